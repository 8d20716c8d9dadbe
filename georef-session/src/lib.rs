//! Drives the acquisition of four control point pairs and the live
//! projection of position fixes onto the calibrated raster.
//!
//! The centerpiece is [`CalibrationSession`], a state machine that
//! collects each control point in two halves (the geographic half from
//! the base map, the pixel half from the raster) and computes the
//! transform bundle atomically when the eighth half is confirmed.
//! [`LiveProjectionTracker`] then feeds position fixes through the
//! bundle, keeping only the newest projected result.
//!
//! Everything the host application owns is expressed as a collaborator
//! trait: the geolocation provider ([`FixSource`]), the persistent
//! store ([`KeyValueStore`]), and the raster image metadata. The
//! [`AnchorDriver`] ties those to the session and tracker so that all
//! subscription and persistence bookkeeping lives in one place and no
//! event handler ever re-subscribes itself.

mod driver;
mod session;
mod settings;
mod source;
mod tracker;

pub mod persist;

pub use driver::*;
pub use persist::KeyValueStore;
pub use session::*;
pub use settings::*;
pub use source::*;
pub use tracker::*;
