//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Sizing limits and feature flags, fixed at engine construction.
///
/// The attribute/waypoint limits bound the per-tween float buffers and
/// are enforced when values are supplied, never by silent truncation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of combined float attributes a single tween may drive.
    pub combined_attrs_limit: usize,
    /// Maximum number of waypoints a single tween may pass through.
    pub waypoints_limit: usize,
    /// Remove entities from the engine once they report finished.
    pub auto_remove: bool,
    /// Disable the publish/acquire visibility barrier for strictly
    /// single-threaded callers.
    pub unsafe_no_sync: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            combined_attrs_limit: 3,
            waypoints_limit: 0,
            auto_remove: true,
            unsafe_no_sync: false,
        }
    }
}
