use arrayvec::ArrayVec;
use four_point::FourPoint;
use georef_core::{Error, GeoPoint, GroundControlPoint, PixelPoint, TransformBundle};
use georef_geom::scale::mean_meters_per_pixel;
use log::{debug, info};
use std::iter::once;

/// The two coordinate spaces a calibration point can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSpace {
    /// Geographic coordinates on the base map.
    Geo,
    /// Pixel coordinates on the raster image.
    Pixel,
}

/// A point tagged with the coordinate space it was selected in.
///
/// The viewport collaborator reports every user selection as one of
/// these. The tag travels with the point, so the session never infers
/// the space from surrounding state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpacePoint {
    Geo(GeoPoint),
    Pixel(PixelPoint),
}

impl SpacePoint {
    /// The space this point belongs to.
    pub fn space(&self) -> CoordinateSpace {
        match self {
            SpacePoint::Geo(_) => CoordinateSpace::Geo,
            SpacePoint::Pixel(_) => CoordinateSpace::Pixel,
        }
    }
}

/// Where the acquisition protocol currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the geographic half of point `step`, 1 through 4.
    AwaitingGeo(u8),
    /// Waiting for the pixel half of point `step`, 1 through 4.
    AwaitingPixel(u8),
    /// All four pairs confirmed and the transform computed.
    Complete,
}

impl Phase {
    /// The space the session expects next, or `None` once complete.
    pub fn awaited_space(self) -> Option<CoordinateSpace> {
        match self {
            Phase::AwaitingGeo(_) => Some(CoordinateSpace::Geo),
            Phase::AwaitingPixel(_) => Some(CoordinateSpace::Pixel),
            Phase::Complete => None,
        }
    }
}

/// What a successful confirmation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The geographic half of point `step` was captured.
    GeoCaptured(u8),
    /// The pixel half of point `step` was captured; more points remain.
    PixelCaptured(u8),
    /// The fourth pair closed the set and the transform was computed.
    Completed,
}

/// Errors from driving the calibration protocol out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// A point was submitted in a different space than the awaited one.
    #[error("expected a {expected:?} point but got a {found:?} point")]
    SpaceMismatch {
        expected: CoordinateSpace,
        found: CoordinateSpace,
    },
    /// `amend_pending` or `confirm_pending` with nothing pending.
    #[error("no point acquisition is in progress")]
    NoPendingPoint,
    /// The session already holds a computed transform.
    #[error("calibration is already complete")]
    AlreadyComplete,
    /// Computing the transform from the confirmed points failed.
    #[error("transform computation failed: {0}")]
    Transform(#[from] Error),
}

/// The acquisition state machine for the four control point pairs.
///
/// Starts at `AwaitingGeo(1)`. Each point is captured in two halves:
/// the geographic half selected on the base map, then the pixel half
/// selected on the raster. A half is acquired as a pending point that
/// may be amended freely and joins the calibration only on
/// confirmation. Confirming the eighth half computes the transform
/// bundle; on success the session is `Complete` and the bundle stays
/// immutable until [`reset`](CalibrationSession::reset).
///
/// Every transition takes `&mut self` and either commits entirely or
/// leaves the confirmed state as it was, so callers never observe a
/// half-updated session.
#[derive(Debug, Clone)]
pub struct CalibrationSession {
    solver: FourPoint,
    geo_points: ArrayVec<GeoPoint, 4>,
    pixel_points: ArrayVec<PixelPoint, 4>,
    pending: Option<SpacePoint>,
    bundle: Option<TransformBundle>,
}

impl Default for CalibrationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationSession {
    pub fn new() -> Self {
        Self {
            solver: FourPoint::new(),
            geo_points: ArrayVec::new(),
            pixel_points: ArrayVec::new(),
            pending: None,
            bundle: None,
        }
    }

    /// A session using a solver with a non-default degeneracy epsilon.
    pub fn with_solver(solver: FourPoint) -> Self {
        Self {
            solver,
            ..Self::new()
        }
    }

    /// The current phase, derived from how many halves are confirmed.
    pub fn phase(&self) -> Phase {
        if self.bundle.is_some() {
            Phase::Complete
        } else if self.geo_points.len() == self.pixel_points.len() {
            Phase::AwaitingGeo(self.geo_points.len() as u8 + 1)
        } else {
            Phase::AwaitingPixel(self.geo_points.len() as u8)
        }
    }

    /// The point currently being positioned, if any.
    pub fn pending(&self) -> Option<SpacePoint> {
        self.pending
    }

    /// The geographic halves confirmed so far.
    pub fn geo_points(&self) -> &[GeoPoint] {
        &self.geo_points
    }

    /// The pixel halves confirmed so far.
    pub fn pixel_points(&self) -> &[PixelPoint] {
        &self.pixel_points
    }

    /// The transform bundle once the session is complete.
    pub fn bundle(&self) -> Option<&TransformBundle> {
        self.bundle.as_ref()
    }

    /// The four confirmed pairs once the session is complete.
    pub fn control_points(&self) -> Result<[GroundControlPoint; 4], SessionError> {
        if self.bundle.is_none() {
            return Err(Error::IncompleteCalibration.into());
        }
        Ok(self.paired_points())
    }

    /// Starts acquiring the next half, seeded at `point`.
    ///
    /// A second call while a point is pending is a no-op, so a doubled
    /// user gesture cannot acquire two halves. Fails with
    /// [`SessionError::SpaceMismatch`] when the point's space is not
    /// the awaited one, and with [`SessionError::AlreadyComplete`] once
    /// the session is complete.
    pub fn begin_point(&mut self, point: SpacePoint) -> Result<(), SessionError> {
        let expected = self
            .phase()
            .awaited_space()
            .ok_or(SessionError::AlreadyComplete)?;
        if point.space() != expected {
            return Err(SessionError::SpaceMismatch {
                expected,
                found: point.space(),
            });
        }
        if self.pending.is_none() {
            debug!("beginning {:?} point acquisition in {:?}", expected, self.phase());
            self.pending = Some(point);
        }
        Ok(())
    }

    /// Moves the pending point.
    ///
    /// May be called any number of times before confirmation, as the
    /// user drags the marker around. Never changes the phase.
    pub fn amend_pending(&mut self, point: SpacePoint) -> Result<(), SessionError> {
        let pending = self.pending.as_mut().ok_or(SessionError::NoPendingPoint)?;
        if point.space() != pending.space() {
            return Err(SessionError::SpaceMismatch {
                expected: pending.space(),
                found: point.space(),
            });
        }
        *pending = point;
        Ok(())
    }

    /// Commits the pending point and advances the protocol.
    ///
    /// Confirming the eighth half runs the whole computation: fit the
    /// transform, invert it, estimate the ground resolution. All three
    /// results are built in temporaries and committed together with the
    /// final point on success. On failure nothing is committed: the
    /// confirmed lists stay as they were, the discarded pending point
    /// leaves the session in `AwaitingPixel(4)`, and the caller resets
    /// (or acquires a better fourth pixel) to try again.
    pub fn confirm_pending(&mut self) -> Result<Confirmation, SessionError> {
        if self.bundle.is_some() {
            return Err(SessionError::AlreadyComplete);
        }
        let pending = self.pending.take().ok_or(SessionError::NoPendingPoint)?;
        match pending {
            SpacePoint::Geo(geo) => {
                self.geo_points.push(geo);
                let step = self.geo_points.len() as u8;
                debug!("geo half of point {} confirmed", step);
                Ok(Confirmation::GeoCaptured(step))
            }
            SpacePoint::Pixel(pixel) if self.pixel_points.len() < 3 => {
                self.pixel_points.push(pixel);
                let step = self.pixel_points.len() as u8;
                debug!("pixel half of point {} confirmed", step);
                Ok(Confirmation::PixelCaptured(step))
            }
            SpacePoint::Pixel(pixel) => {
                let mut candidate =
                    [GroundControlPoint::new(PixelPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.0)); 4];
                let pixels = self.pixel_points.iter().copied().chain(once(pixel));
                for (control, (&geo, pixel)) in
                    candidate.iter_mut().zip(self.geo_points.iter().zip(pixels))
                {
                    *control = GroundControlPoint::new(pixel, geo);
                }
                let bundle = self.compute_transform(&candidate)?;
                self.pixel_points.push(pixel);
                self.bundle = Some(bundle);
                info!(
                    "calibration complete, resolution {} m/px",
                    bundle.meters_per_pixel
                );
                Ok(Confirmation::Completed)
            }
        }
    }

    /// Rebuilds a complete session from four persisted pairs, bypassing
    /// acquisition.
    ///
    /// On success the session is `Complete` exactly as if the pairs had
    /// been confirmed one by one, and the computed bundle is returned.
    /// On failure the session is left as it was, for the caller to fall
    /// back to fresh acquisition.
    pub fn restore(
        &mut self,
        controls: &[GroundControlPoint; 4],
    ) -> Result<TransformBundle, SessionError> {
        if self.bundle.is_some() {
            return Err(SessionError::AlreadyComplete);
        }
        let bundle = self.compute_transform(controls)?;
        self.geo_points.clear();
        self.pixel_points.clear();
        for control in controls {
            self.geo_points.push(control.geo);
            self.pixel_points.push(control.pixel);
        }
        self.pending = None;
        self.bundle = Some(bundle);
        info!("calibration restored from persisted control points");
        Ok(bundle)
    }

    /// Discards all progress and returns to `AwaitingGeo(1)`.
    pub fn reset(&mut self) {
        debug!("calibration session reset");
        self.geo_points.clear();
        self.pixel_points.clear();
        self.pending = None;
        self.bundle = None;
    }

    /// Fits the transform, inverts it, and estimates the resolution,
    /// all into temporaries.
    fn compute_transform(
        &self,
        controls: &[GroundControlPoint; 4],
    ) -> Result<TransformBundle, Error> {
        let (pixel_to_geo, geo_to_pixel) = self.solver.solve_transforms(controls)?;
        let meters_per_pixel = mean_meters_per_pixel(controls);
        debug!("fitted transform, resolution {} m/px", meters_per_pixel);
        Ok(TransformBundle {
            pixel_to_geo,
            geo_to_pixel,
            meters_per_pixel,
        })
    }

    /// Zips the confirmed halves into pairs; valid only once both
    /// lists hold four points.
    fn paired_points(&self) -> [GroundControlPoint; 4] {
        let mut controls =
            [GroundControlPoint::new(PixelPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.0)); 4];
        for (control, (&geo, &pixel)) in controls
            .iter_mut()
            .zip(self.geo_points.iter().zip(self.pixel_points.iter()))
        {
            *control = GroundControlPoint::new(pixel, geo);
        }
        controls
    }
}
