use crate::{Error, GeoPoint, PixelPoint, ProjectivePoint};
use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::Matrix3;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// How far the product of a matrix and its computed inverse may drift
/// from the identity before the matrix is treated as singular.
///
/// The check is on the residual rather than on the determinant because
/// a determinant threshold cannot be scaled meaningfully here: a valid
/// pixel-to-degrees transform has entries spanning many orders of
/// magnitude, and its determinant is legitimately tiny (around 1e-10
/// for a city-scale map, smaller still for finer ones) while an
/// actually singular transform at the same scale only differs from it
/// by several more orders. The identity residual is dimensionless and
/// behaves the same at every map scale: well below 1e-6 for usable
/// transforms, above 1.0 for singular ones.
pub const INVERSE_RESIDUAL_EPSILON: f64 = 1e-4;

/// Inverts a 3x3 matrix as adjugate over determinant.
///
/// Returns `None` when the matrix is singular or close enough to
/// singular that the computed inverse is unusable: a zero determinant
/// produces non-finite entries, and a near-zero one produces an
/// inverse whose product with the input misses the identity by more
/// than [`INVERSE_RESIDUAL_EPSILON`].
pub fn adjugate_inverse(m: &Matrix3<f64>) -> Option<Matrix3<f64>> {
    let (a, b, c) = (m[(0, 0)], m[(0, 1)], m[(0, 2)]);
    let (d, e, f) = (m[(1, 0)], m[(1, 1)], m[(1, 2)]);
    let (g, h, i) = (m[(2, 0)], m[(2, 1)], m[(2, 2)]);

    let det = a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g);
    #[rustfmt::skip]
    let adjugate = Matrix3::new(
          e * i - f * h,  -(b * i - c * h),   b * f - c * e,
        -(d * i - f * g),   a * i - c * g,  -(a * f - c * d),
          d * h - e * g,  -(a * h - b * g),   a * e - b * d,
    );

    let inverse = adjugate / det;
    if !inverse.iter().all(|entry| entry.is_finite()) {
        return None;
    }
    let residual = (m * inverse - Matrix3::identity()).amax();
    // Negated comparison also rejects a NaN residual.
    if !(residual <= INVERSE_RESIDUAL_EPSILON) {
        return None;
    }
    Some(inverse)
}

/// A plane projective transform between two coordinate spaces.
///
/// Implementors are directed: the input and output point types say
/// which plane is which, and [`Homography::Inverse`] is the transform
/// going the other way. Transforming performs the homogeneous multiply
/// followed by the perspective divide.
pub trait Homography: From<Matrix3<f64>> + Into<Matrix3<f64>> + Clone + Copy {
    type InputPoint: ProjectivePoint;
    type OutputPoint: ProjectivePoint;
    type Inverse: Homography<InputPoint = Self::OutputPoint, OutputPoint = Self::InputPoint>;

    /// Retrieves the underlying matrix.
    fn matrix(self) -> Matrix3<f64>;

    /// The identity transform, mapping every point to itself.
    fn identity() -> Self {
        Matrix3::identity().into()
    }

    /// Maps a point across the transform.
    ///
    /// Fails with [`Error::ProjectionDivergence`] when the point lands
    /// on the line at infinity.
    ///
    /// ```
    /// use georef_core::{Homography, PixelPoint, PixelToGeo};
    /// use georef_core::nalgebra::Matrix3;
    /// let double: PixelToGeo = Matrix3::new(
    ///     2.0, 0.0, 0.0,
    ///     0.0, 2.0, 0.0,
    ///     0.0, 0.0, 1.0,
    /// ).into();
    /// let geo = double.transform(PixelPoint::new(3.0, 5.0)).unwrap();
    /// assert_eq!(geo.lon, 6.0);
    /// assert_eq!(geo.lat, 10.0);
    /// ```
    fn transform(self, input: Self::InputPoint) -> Result<Self::OutputPoint, Error> {
        let projected = self.matrix() * input.homogeneous();
        Self::OutputPoint::from_homogeneous(projected).ok_or(Error::ProjectionDivergence)
    }

    /// Inverts the transform via [`adjugate_inverse`].
    ///
    /// Fails with [`Error::DegenerateConfiguration`] when the matrix is
    /// singular, which happens when the control points that produced it
    /// were degenerate in the output space.
    fn try_inverse(self) -> Result<Self::Inverse, Error> {
        adjugate_inverse(&self.matrix())
            .map(Into::into)
            .ok_or(Error::DegenerateConfiguration)
    }
}

/// Transform taking raster pixel coordinates to geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PixelToGeo(pub Matrix3<f64>);

impl Homography for PixelToGeo {
    type InputPoint = PixelPoint;
    type OutputPoint = GeoPoint;
    type Inverse = GeoToPixel;

    #[inline(always)]
    fn matrix(self) -> Matrix3<f64> {
        self.into()
    }
}

/// Transform taking geographic coordinates to raster pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GeoToPixel(pub Matrix3<f64>);

impl Homography for GeoToPixel {
    type InputPoint = GeoPoint;
    type OutputPoint = PixelPoint;
    type Inverse = PixelToGeo;

    #[inline(always)]
    fn matrix(self) -> Matrix3<f64> {
        self.into()
    }
}

/// Everything a completed calibration produces: the transform in both
/// directions and the ground resolution estimate.
///
/// The two transforms are exact inverses of each other up to floating
/// point, both derived from the same fit. `meters_per_pixel` is an
/// isotropic average over the control points and is `0.0` when the
/// pixel geometry gave no usable distances.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TransformBundle {
    pub pixel_to_geo: PixelToGeo,
    pub geo_to_pixel: GeoToPixel,
    pub meters_per_pixel: f64,
}

impl TransformBundle {
    /// Maps a raster pixel to the geographic position it depicts.
    pub fn to_geo(&self, pixel: PixelPoint) -> Result<GeoPoint, Error> {
        self.pixel_to_geo.transform(pixel)
    }

    /// Maps a geographic position to where it appears on the raster.
    pub fn to_pixel(&self, geo: GeoPoint) -> Result<PixelPoint, Error> {
        self.geo_to_pixel.transform(geo)
    }
}
