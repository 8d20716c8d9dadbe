//! Fits the 3x3 projective transform relating a raster image to the
//! ground from exactly four control points.
//!
//! With four correspondences the
//! [direct linear transformation](https://en.wikipedia.org/wiki/Direct_linear_transformation)
//! becomes an exactly determined 8x8 linear system rather than a least
//! squares problem: fixing the bottom-right matrix entry to one leaves
//! eight unknowns, and each correspondence contributes two equations.
//! The solved transform reproduces the four control points exactly up
//! to floating point error.

use georef_core::{
    nalgebra::{self, Matrix3, OMatrix, OVector, U8},
    Error, GeoToPixel, GroundControlPoint, Homography, PixelToGeo, ProjectivePoint,
};

fn encode_projection_equations(
    points: &[GroundControlPoint; 4],
) -> (OMatrix<f64, U8, U8>, OVector<f64, U8>) {
    let mut coefficients: OMatrix<f64, U8, U8> = nalgebra::zero();
    let mut rhs: OVector<f64, U8> = nalgebra::zero();
    for (i, control) in points.iter().enumerate() {
        let (x, y) = (control.pixel.x, control.pixel.y);
        let ground = control.geo.homogeneous();
        let (gx, gy) = (ground.x, ground.y);
        let lon_row = OVector::<f64, U8>::from_column_slice(&[
            x, y, 1.0, 0.0, 0.0, 0.0, -gx * x, -gx * y,
        ]);
        let lat_row = OVector::<f64, U8>::from_column_slice(&[
            0.0, 0.0, 0.0, x, y, 1.0, -gy * x, -gy * y,
        ]);
        coefficients.row_mut(2 * i).copy_from(&lon_row.transpose());
        coefficients.row_mut(2 * i + 1).copy_from(&lat_row.transpose());
        rhs[2 * i] = gx;
        rhs[2 * i + 1] = gy;
    }
    (coefficients, rhs)
}

/// Solves the four-point plane transform with LU decomposition and
/// partial pivoting.
///
/// The system has no solution when three of the pixel points are
/// collinear, two coincide, or the geographic targets contradict each
/// other. Rather than thresholding a determinant, whose magnitude
/// varies wildly with the units and extent of the scene, the solver
/// verifies its own output: the fitted transform must reproduce every
/// control point within `epsilon` relative error, or the configuration
/// is reported as degenerate. Anything the elimination produces from a
/// singular or inconsistent system misses its own control points by
/// many orders of magnitude more than a valid fit does.
#[derive(Copy, Clone, Debug)]
pub struct FourPoint {
    pub epsilon: f64,
}

impl FourPoint {
    pub fn new() -> Self {
        Default::default()
    }

    #[must_use]
    pub fn epsilon(self, epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Fits the pixel to geographic transform through the four control
    /// points.
    ///
    /// ```
    /// use four_point::FourPoint;
    /// use georef_core::{GeoPoint, GroundControlPoint, Homography, PixelPoint};
    ///
    /// // A 100x100 raster depicting the unit square of the geographic plane.
    /// let controls = [
    ///     GroundControlPoint::new(PixelPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.0)),
    ///     GroundControlPoint::new(PixelPoint::new(100.0, 0.0), GeoPoint::new(0.0, 1.0)),
    ///     GroundControlPoint::new(PixelPoint::new(100.0, 100.0), GeoPoint::new(1.0, 1.0)),
    ///     GroundControlPoint::new(PixelPoint::new(0.0, 100.0), GeoPoint::new(1.0, 0.0)),
    /// ];
    /// let transform = FourPoint::new().from_control_points(&controls).unwrap();
    /// let center = transform.transform(PixelPoint::new(50.0, 50.0)).unwrap();
    /// assert!((center.lat - 0.5).abs() < 1e-9);
    /// assert!((center.lon - 0.5).abs() < 1e-9);
    /// ```
    pub fn from_control_points(
        &self,
        points: &[GroundControlPoint; 4],
    ) -> Result<PixelToGeo, Error> {
        let (coefficients, rhs) = encode_projection_equations(points);
        let h = coefficients
            .lu()
            .solve(&rhs)
            .ok_or(Error::DegenerateConfiguration)?;
        #[rustfmt::skip]
        let matrix = Matrix3::new(
            h[0], h[1], h[2],
            h[3], h[4], h[5],
            h[6], h[7], 1.0,
        );
        if !matrix.iter().all(|entry| entry.is_finite()) {
            return Err(Error::DegenerateConfiguration);
        }
        let transform = PixelToGeo(matrix);
        if !(self.control_point_misfit(transform, points)? <= self.epsilon) {
            return Err(Error::DegenerateConfiguration);
        }
        Ok(transform)
    }

    /// The largest relative error of the fitted transform over its own
    /// control points, with the denominator floored at one degree so
    /// targets near the prime meridian or the equator do not blow the
    /// ratio up.
    fn control_point_misfit(
        &self,
        transform: PixelToGeo,
        points: &[GroundControlPoint; 4],
    ) -> Result<f64, Error> {
        let mut worst = 0.0f64;
        for control in points {
            let geo = transform
                .transform(control.pixel)
                .map_err(|_| Error::DegenerateConfiguration)?;
            for (got, want) in [(geo.lon, control.geo.lon), (geo.lat, control.geo.lat)] {
                worst = worst.max((got - want).abs() / want.abs().max(1.0));
            }
        }
        Ok(worst)
    }

    /// Fits the transform in both directions at once.
    ///
    /// A configuration whose pixels are in general position can still
    /// be degenerate on the geographic side: collinear geographic
    /// targets can give a perfectly consistent system whose solution
    /// is a singular matrix, one that flattens the whole raster onto a
    /// line. The forward fit has no reason to reject it. Inverting
    /// here catches it as [`Error::DegenerateConfiguration`] before
    /// the forward transform is ever handed out.
    pub fn solve_transforms(
        &self,
        points: &[GroundControlPoint; 4],
    ) -> Result<(PixelToGeo, GeoToPixel), Error> {
        let forward = self.from_control_points(points)?;
        let inverse = forward.try_inverse()?;
        Ok((forward, inverse))
    }
}

impl Default for FourPoint {
    fn default() -> Self {
        Self { epsilon: 1e-6 }
    }
}
