//! Resolved configuration types: pure constructor input for the core.
//!
//! The core performs no file I/O; the `farmstead-data` crate parses raw
//! config files and resolves them into these structs.

use serde::{Deserialize, Serialize};

use crate::fixed::{Fixed64, Seconds, secs};

/// Grid dimensions and cell size in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
    pub cell_size: f32,
}

/// Starvation policy thresholds.
///
/// The cycle-completion grace (`ready_grace`) treats a near-complete cycle
/// as complete when the resource runs out; the visibility floor
/// (`pause_visible`) hides the indicator for barely-started cycles instead
/// of freezing it. Historical values 0.95 and 0.05.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub ready_grace: Fixed64,
    pub pause_visible: Fixed64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            ready_grace: secs(0.95),
            pause_visible: secs(0.05),
        }
    }
}

/// Per-kind production parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindParams {
    /// Seconds of accumulated time per unit produced.
    pub production_cost: Seconds,
    /// Resource added to this dweller per delivered product. Zero for
    /// producers that never receive deliveries.
    pub refill_add: Seconds,
    /// Currency credited when one ready unit is sold. Zero for kinds whose
    /// products are not sellable.
    pub sell_price: u32,
    pub thresholds: Thresholds,
}
