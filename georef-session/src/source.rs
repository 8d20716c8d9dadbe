use crate::TrackerSettings;
use thiserror::Error;

/// Identifies one active subscription to the fix stream.
///
/// The wrapped id is chosen by the provider (position watchers commonly
/// hand back a numeric handle) and is meaningful only to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixSubscription(pub u64);

/// The geolocation provider collaborator.
///
/// Implementations deliver fixes asynchronously through whatever
/// callback wiring the host application uses; this trait only covers
/// the subscription lifecycle the driver manages.
pub trait FixSource {
    /// Starts delivering fixes according to `settings` and returns the
    /// subscription handle.
    fn subscribe(&mut self, settings: &TrackerSettings) -> FixSubscription;

    /// Stops a subscription.
    ///
    /// Implementations must accept this at any time, including for
    /// handles already stopped, with no effect beyond stopping
    /// delivery.
    fn cancel(&mut self, subscription: FixSubscription);
}

/// Error events the fix stream reports between fixes.
///
/// These arrive alongside fixes, not instead of them: a provider may
/// time out once and deliver a fix a moment later. The driver logs
/// them and keeps the subscription up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FixStreamError {
    /// The user denied location access.
    #[error("location permission denied")]
    PermissionDenied,
    /// The provider could not determine a position.
    #[error("position unavailable")]
    PositionUnavailable,
    /// The provider took longer than the configured timeout.
    #[error("timed out waiting for a fix")]
    Timeout,
}
