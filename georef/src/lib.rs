//! # `georef`
//!
//! Batteries-included raster georeferencing crate
//!
//! This crate gathers the whole georeferencing workspace behind one
//! import for discoverability and for quickly putting together a
//! calibration flow. If you are making a production application and
//! only need one piece (say, just the transform fit), import that
//! member crate individually instead. You can also disable default
//! features on this crate and enable only the pieces you want.
//!
//! The basic types (points, control points, transforms, errors) live in
//! the root of the crate and come from [`georef_core`]. Modules gather
//! the functionality built on top of them:
//!
//! ## Modules
//! * [`estimate`] - fitting the projective transform to control point pairs
//! * [`geom`] - geodesic distance and ground resolution estimation
//! * [`session`] - the calibration protocol, live tracking, and persistence
//!
//! ## Example
//!
//! Calibrate a raster from its four corners and project a position onto
//! it:
//!
//! ```
//! use georef::{estimate::FourPoint, GeoPoint, GroundControlPoint, Homography};
//!
//! // An 800x600 map sheet whose corner coordinates are known.
//! let controls = GroundControlPoint::raster_corners(
//!     800.0,
//!     600.0,
//!     [
//!         GeoPoint::new(52.52, 13.40),
//!         GeoPoint::new(52.52, 13.42),
//!         GeoPoint::new(52.50, 13.42),
//!         GeoPoint::new(52.50, 13.40),
//!     ],
//! );
//! let (_, geo_to_pixel) = FourPoint::new().solve_transforms(&controls).unwrap();
//! let position = geo_to_pixel.transform(GeoPoint::new(52.51, 13.41)).unwrap();
//! assert!((position.x - 400.0).abs() < 1e-6);
//! assert!((position.y - 300.0).abs() < 1e-6);
//! ```

pub use georef_core::*;

/// Transform estimation from control point pairs
pub mod estimate {
    #[cfg(feature = "four-point")]
    pub use four_point::FourPoint;
}

/// Geometry on the raster and on the globe
pub mod geom {
    #[cfg(feature = "georef-geom")]
    pub use georef_geom::*;
}

/// The calibration protocol, live projection, and persistence
pub mod session {
    #[cfg(feature = "georef-session")]
    pub use georef_session::*;
}
