use crate::{GeoPoint, PixelPoint};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A correspondence between a pixel on the raster and the geographic
/// position it depicts.
///
/// Four of these, no three pixels collinear, determine the projective
/// transform between the two planes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GroundControlPoint {
    /// Location on the raster.
    pub pixel: PixelPoint,
    /// Location on the ground.
    pub geo: GeoPoint,
}

impl GroundControlPoint {
    pub fn new(pixel: PixelPoint, geo: GeoPoint) -> Self {
        Self { pixel, geo }
    }

    /// Pairs the four corners of a raster with the geographic points
    /// they depict, in top-left, top-right, bottom-right, bottom-left
    /// order.
    ///
    /// Convenient when the raster is a map sheet whose corner
    /// coordinates are printed in the margin.
    ///
    /// ```
    /// use georef_core::{GeoPoint, GroundControlPoint};
    /// let corners = GroundControlPoint::raster_corners(
    ///     800.0,
    ///     600.0,
    ///     [
    ///         GeoPoint::new(1.0, 0.0),
    ///         GeoPoint::new(1.0, 1.0),
    ///         GeoPoint::new(0.0, 1.0),
    ///         GeoPoint::new(0.0, 0.0),
    ///     ],
    /// );
    /// assert_eq!(corners[2].pixel.x, 800.0);
    /// assert_eq!(corners[2].pixel.y, 600.0);
    /// ```
    pub fn raster_corners(width: f64, height: f64, geo: [GeoPoint; 4]) -> [Self; 4] {
        let [tl, tr, br, bl] = geo;
        [
            Self::new(PixelPoint::new(0.0, 0.0), tl),
            Self::new(PixelPoint::new(width, 0.0), tr),
            Self::new(PixelPoint::new(width, height), br),
            Self::new(PixelPoint::new(0.0, height), bl),
        ]
    }
}
