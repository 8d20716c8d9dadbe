use thiserror::Error;

/// Failures the georeferencing pipeline can produce.
///
/// Every variant is recoverable: the caller keeps its state, reports
/// the problem, and may retry with different input. Nothing here
/// should ever abort the process.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The four control points do not determine a transform, usually
    /// because three or more pixels are collinear or two coincide.
    #[error("control points are degenerate and do not determine a transform")]
    DegenerateConfiguration,
    /// A transform was requested before all four control points were
    /// confirmed.
    #[error("calibration is incomplete, four confirmed control points are required")]
    IncompleteCalibration,
    /// Stored calibration data did not match the expected schema.
    #[error("persisted calibration data is malformed")]
    InvalidPersistedData,
    /// The transform sent a point to infinity, its homogeneous
    /// coordinate vanished under the perspective divide.
    #[error("projected point diverged under the perspective divide")]
    ProjectionDivergence,
}
