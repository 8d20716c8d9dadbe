use crate::{
    persist::{self, KeyValueStore, STORAGE_KEY},
    CalibrationSession, Confirmation, FixSource, FixStreamError, FixSubscription,
    LiveProjectionTracker, PositionFix, ProjectedFix, SessionError, SpacePoint, TrackerSettings,
};
use georef_core::Error;
use log::{debug, info, warn};

/// Pixel dimensions of the loaded raster, from the image collaborator.
///
/// Calibration context only, useful for seeding pixel markers in the
/// host; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterMetadata {
    pub width: u32,
    pub height: u32,
}

/// Owns the calibration session, the tracker, and the collaborator
/// handles, and routes the three external event sources through them.
///
/// All subscription bookkeeping happens here: event handlers never
/// re-subscribe themselves, and a superseded fix subscription is
/// canceled exactly once before a new one is opened.
#[derive(Debug)]
pub struct AnchorDriver<F, S> {
    session: CalibrationSession,
    tracker: LiveProjectionTracker,
    settings: TrackerSettings,
    fixes: F,
    store: S,
    subscription: Option<FixSubscription>,
    raster: Option<RasterMetadata>,
}

impl<F: FixSource, S: KeyValueStore> AnchorDriver<F, S> {
    pub fn new(fixes: F, store: S, settings: TrackerSettings) -> Self {
        Self {
            session: CalibrationSession::new(),
            tracker: LiveProjectionTracker::new(),
            settings,
            fixes,
            store,
            subscription: None,
            raster: None,
        }
    }

    /// Begins work on a newly loaded raster.
    ///
    /// Everything tied to the previous raster is dropped: the session
    /// restarts, the tracker stops projecting, and an active fix
    /// subscription is canceled.
    pub fn load_raster(&mut self, metadata: RasterMetadata) {
        info!("raster loaded, {}x{} px", metadata.width, metadata.height);
        self.raster = Some(metadata);
        self.session.reset();
        self.tracker.clear_bundle();
        self.cancel_subscription();
    }

    /// The loaded raster's dimensions, if any.
    pub fn raster(&self) -> Option<RasterMetadata> {
        self.raster
    }

    pub fn session(&self) -> &CalibrationSession {
        &self.session
    }

    /// The geolocation collaborator.
    pub fn fix_source(&self) -> &F {
        &self.fixes
    }

    /// The persistence collaborator.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Forwards a begin gesture to the session.
    pub fn begin_point(&mut self, point: SpacePoint) -> Result<(), SessionError> {
        self.session.begin_point(point)
    }

    /// Forwards a marker drag to the session.
    pub fn amend_pending(&mut self, point: SpacePoint) -> Result<(), SessionError> {
        self.session.amend_pending(point)
    }

    /// Forwards a confirm gesture to the session.
    ///
    /// When this confirmation completes the calibration, the four pairs
    /// are persisted and live projection starts.
    pub fn confirm_point(&mut self) -> Result<Confirmation, SessionError> {
        let confirmation = self.session.confirm_pending()?;
        if let Confirmation::Completed = confirmation {
            self.persist_control_points();
            self.start_tracking();
        }
        Ok(confirmation)
    }

    /// Rebuilds the calibration from the persisted control points.
    ///
    /// Absent or malformed stored data reports
    /// [`Error::InvalidPersistedData`]; a degenerate stored
    /// configuration reports through the session. In every failure
    /// case the session is left as it was, for the caller to start
    /// fresh acquisition.
    pub fn try_restore(&mut self) -> Result<(), SessionError> {
        let bytes = self
            .store
            .get(STORAGE_KEY)
            .ok_or(Error::InvalidPersistedData)?;
        let controls = persist::decode(&bytes)?;
        self.session.restore(&controls)?;
        self.start_tracking();
        Ok(())
    }

    /// Drops all calibration progress, keeping the raster loaded.
    pub fn reset_calibration(&mut self) {
        self.session.reset();
        self.tracker.clear_bundle();
        self.cancel_subscription();
    }

    /// Delivers one fix from the provider.
    pub fn on_fix(&mut self, fix: PositionFix) {
        self.tracker.push_fix(fix);
    }

    /// Delivers one error event from the provider.
    ///
    /// Logged and dropped; the subscription stays up, matching the
    /// per-fix recovery policy.
    pub fn on_fix_error(&mut self, error: FixStreamError) {
        warn!("fix stream: {}", error);
    }

    /// The newest projected fix.
    pub fn latest_projection(&self) -> Option<ProjectedFix> {
        self.tracker.latest()
    }

    /// Consumes the newest projected fix.
    pub fn take_projection(&mut self) -> Option<ProjectedFix> {
        self.tracker.take_latest()
    }

    fn persist_control_points(&mut self) {
        let controls = match self.session.control_points() {
            Ok(controls) => controls,
            Err(err) => {
                warn!("not persisting control points: {}", err);
                return;
            }
        };
        match persist::encode(&controls) {
            Ok(bytes) => {
                self.store.set(STORAGE_KEY, &bytes);
                debug!("persisted control points");
            }
            Err(err) => warn!("not persisting control points: {}", err),
        }
    }

    fn start_tracking(&mut self) {
        if let Some(bundle) = self.session.bundle().copied() {
            self.tracker.install_bundle(bundle);
            self.cancel_subscription();
            self.subscription = Some(self.fixes.subscribe(&self.settings));
            debug!("subscribed to fix stream");
        }
    }

    /// Cancels the active fix subscription, if one exists.
    ///
    /// Taking the handle first guarantees the provider sees exactly
    /// one cancel per subscription no matter how often this runs.
    fn cancel_subscription(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.fixes.cancel(subscription);
        }
    }
}
