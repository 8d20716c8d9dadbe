use georef_core::{GeoPoint, PixelPoint, TransformBundle};
use log::debug;

/// Fallback marker radius in pixels when the ground resolution is
/// unknown.
pub const DEFAULT_ACCURACY_RADIUS_PX: f64 = 50.0;

/// One position fix from the geolocation provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Horizontal accuracy radius in meters.
    pub accuracy_m: f64,
}

impl PositionFix {
    pub fn new(lat: f64, lon: f64, accuracy_m: f64) -> Self {
        Self {
            lat,
            lon,
            accuracy_m,
        }
    }

    /// The fix position as a geographic point.
    pub fn geo(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// A position fix projected onto the raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedFix {
    /// Where the fix lands on the raster.
    pub pixel: PixelPoint,
    /// The fix accuracy radius converted to pixel units.
    pub accuracy_radius_px: f64,
}

/// Projects live position fixes onto the raster.
///
/// Holds at most one result: each successful projection replaces the
/// previous one, so a consumer that falls behind only ever sees the
/// newest fix. Fixes that fail to project are skipped and the previous
/// result is kept.
#[derive(Debug, Clone, Default)]
pub struct LiveProjectionTracker {
    bundle: Option<TransformBundle>,
    latest: Option<ProjectedFix>,
}

impl LiveProjectionTracker {
    pub fn new() -> Self {
        Default::default()
    }

    /// Starts projecting through `bundle` from the next fix on.
    ///
    /// Any result projected through a previous bundle is dropped, since
    /// it refers to another raster's pixel space.
    pub fn install_bundle(&mut self, bundle: TransformBundle) {
        self.bundle = Some(bundle);
        self.latest = None;
    }

    /// Stops projecting until a new bundle is installed.
    pub fn clear_bundle(&mut self) {
        self.bundle = None;
        self.latest = None;
    }

    pub fn bundle(&self) -> Option<&TransformBundle> {
        self.bundle.as_ref()
    }

    /// Feeds one fix through the transform.
    ///
    /// Without a bundle this does nothing: until calibration completes,
    /// fixes only matter to the geographic display, which the viewport
    /// collaborator handles on its own. A fix the transform sends to
    /// infinity is skipped without touching the latest result; one bad
    /// fix never terminates the stream.
    ///
    /// The accuracy radius is the fix accuracy divided by the ground
    /// resolution, or [`DEFAULT_ACCURACY_RADIUS_PX`] when the
    /// resolution is unknown.
    pub fn push_fix(&mut self, fix: PositionFix) {
        let bundle = match &self.bundle {
            Some(bundle) => bundle,
            None => return,
        };
        let pixel = match bundle.to_pixel(fix.geo()) {
            Ok(pixel) => pixel,
            Err(err) => {
                debug!("skipping fix at ({}, {}): {}", fix.lat, fix.lon, err);
                return;
            }
        };
        let accuracy_radius_px = if bundle.meters_per_pixel > 0.0 {
            fix.accuracy_m / bundle.meters_per_pixel
        } else {
            DEFAULT_ACCURACY_RADIUS_PX
        };
        self.latest = Some(ProjectedFix {
            pixel,
            accuracy_radius_px,
        });
    }

    /// The newest projected fix, if any.
    pub fn latest(&self) -> Option<ProjectedFix> {
        self.latest
    }

    /// Consumes the newest projected fix, leaving the slot empty.
    pub fn take_latest(&mut self) -> Option<ProjectedFix> {
        self.latest.take()
    }
}
