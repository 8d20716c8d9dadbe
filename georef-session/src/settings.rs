use serde::{Deserialize, Serialize};

/// How the driver asks the geolocation provider to deliver fixes.
///
/// The defaults request the freshest and most accurate fixes the
/// provider can produce, which is what walking around with a
/// georeferenced raster needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSettings {
    /// Ask the provider for its most accurate positioning mode.
    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,
    /// How long the provider may take to deliver a fix before it
    /// reports a timeout error, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Oldest cached fix the provider may hand back, in milliseconds.
    /// Zero demands a fresh fix every time.
    #[serde(default = "default_maximum_age_ms")]
    pub maximum_age_ms: u64,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            high_accuracy: default_high_accuracy(),
            timeout_ms: default_timeout_ms(),
            maximum_age_ms: default_maximum_age_ms(),
        }
    }
}

fn default_high_accuracy() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_maximum_age_ms() -> u64 {
    0
}
