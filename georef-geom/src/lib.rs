//! This crate contains the geodesic geometry used to georeference
//! raster images.
//!
//! ## Ground resolution
//!
//! Once four control points pin a raster to the ground, the distances
//! between them are known both in pixels and in meters. Their ratio is
//! the ground resolution of the raster, which turns pixel lengths into
//! ground lengths without going through the projective transform:
//!
//! ```text
//!        a-----------b        pixel distance:   |a - b| px
//!       /             \       ground distance:  haversine(A, B) m
//!      /    raster     \
//!     d-----------------c     resolution = mean over all six pairs
//! ```
//!
//! Ground distances are great circle distances on a sphere, which is
//! accurate to a fraction of a percent at the scales a single raster
//! covers.

pub mod geodesy;
pub mod scale;
