//! Core configuration for segue-tween-core.

use serde::{Deserialize, Serialize};

/// Capacity hints for the live set and staging queues.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Initial capacity of the uniform tick-order collection.
    pub initial_tweens: usize,
    /// Initial capacity of the per-target index.
    pub initial_targets: usize,
    /// Initial capacity of the pending add/remove queues.
    pub queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_tweens: 64,
            initial_targets: 32,
            queue_capacity: 16,
        }
    }
}
