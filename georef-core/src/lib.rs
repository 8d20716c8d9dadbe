//! # Georef Core
//!
//! This library provides the common types shared by the georeferencing
//! crates: points in the two coordinate spaces, the fitted projective
//! transform in both directions, the bundle of everything a completed
//! calibration produces, and the error taxonomy.
//!
//! The central convention lives here and must never be violated: the
//! geographic plane is spanned as **(lon, lat)**, longitude along x and
//! latitude along y, matching the pixel plane's (x, y). See
//! [`GeoPoint::homogeneous`]. Swapping the axes produces a transposed,
//! mirrored map with no other symptom.
//!
//! The crate stays small so that every other crate in the workspace can
//! depend on it without pulling in solvers, geodesy, or session
//! machinery.

mod control;
mod error;
mod point;
mod transform;

pub use control::*;
pub use error::*;
pub use nalgebra;
pub use point::*;
pub use transform::*;
