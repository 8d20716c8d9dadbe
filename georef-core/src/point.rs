use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::{Point2, Vector3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Magnitudes of the homogeneous coordinate below this are treated as a
/// point at infinity rather than divided through.
pub const PERSPECTIVE_EPSILON: f64 = 1e-9;

/// A point on one of the two planes related by the calibration, able to
/// lift itself into homogeneous coordinates and to come back down.
///
/// The lift is infallible. The return trip performs the perspective
/// divide and fails (returns `None`) when the homogeneous coordinate is
/// too close to zero or the quotient is not finite, which is how points
/// that the transform sends to infinity are detected.
pub trait ProjectivePoint: Copy {
    /// Lifts the point onto the projective plane.
    fn homogeneous(self) -> Vector3<f64>;

    /// Performs the perspective divide to recover a planar point.
    ///
    /// Returns `None` if `p.z` is smaller in magnitude than
    /// [`PERSPECTIVE_EPSILON`] or the resulting coordinates are not
    /// finite.
    fn from_homogeneous(p: Vector3<f64>) -> Option<Self>;
}

/// Divides through by the homogeneous coordinate, refusing near-zero
/// and non-finite results.
fn perspective_divide(p: Vector3<f64>) -> Option<(f64, f64)> {
    if !(p.z.abs() > PERSPECTIVE_EPSILON) {
        return None;
    }
    let x = p.x / p.z;
    let y = p.y / p.z;
    if x.is_finite() && y.is_finite() {
        Some((x, y))
    } else {
        None
    }
}

/// A point on the raster image in pixel coordinates.
///
/// The origin is the top-left corner of the image, `x` grows rightwards
/// and `y` grows downwards, matching how raster rows are stored.
/// Coordinates are `f64` because projected positions land between
/// pixels.
///
/// ```
/// use georef_core::{PixelPoint, ProjectivePoint};
/// let p = PixelPoint::new(120.0, 45.5);
/// assert_eq!(p.homogeneous().z, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PixelPoint(pub Point2<f64>);

impl PixelPoint {
    /// Creates a pixel point from raster coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self(Point2::new(x, y))
    }
}

impl ProjectivePoint for PixelPoint {
    fn homogeneous(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, 1.0)
    }

    fn from_homogeneous(p: Vector3<f64>) -> Option<Self> {
        perspective_divide(p).map(|(x, y)| Self::new(x, y))
    }
}

/// A geographic position in WGS84 decimal degrees.
///
/// The fields are stored in the conventional `lat`, `lon` order, but
/// the homogeneous lift spans the plane as **(lon, lat)** so longitude
/// plays the x role and latitude the y role, mirroring the pixel
/// plane. All transform math in the workspace relies on this
/// convention.
///
/// ```
/// use georef_core::{GeoPoint, ProjectivePoint};
/// let p = GeoPoint::new(52.52, 13.405);
/// let h = p.homogeneous();
/// assert_eq!(h.x, 13.405);
/// assert_eq!(h.y, 52.52);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GeoPoint {
    /// Latitude in decimal degrees, positive north.
    pub lat: f64,
    /// Longitude in decimal degrees, positive east.
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a geographic point from latitude and longitude in
    /// decimal degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl ProjectivePoint for GeoPoint {
    /// Lifts onto the projective plane as `[lon, lat, 1]`.
    ///
    /// Longitude takes the x slot and latitude the y slot. This is the
    /// one place the axis convention is encoded.
    fn homogeneous(self) -> Vector3<f64> {
        Vector3::new(self.lon, self.lat, 1.0)
    }

    fn from_homogeneous(p: Vector3<f64>) -> Option<Self> {
        perspective_divide(p).map(|(lon, lat)| Self::new(lat, lon))
    }
}
