//! Serde structs for the on-disk farm definition.
//!
//! These mirror the file layout one-to-one and stay stringly typed; the
//! loader resolves them into core configuration types.

use serde::Deserialize;

/// Top-level farm definition file.
#[derive(Debug, Clone, Deserialize)]
pub struct FarmFile {
    pub name: String,
    pub world: WorldData,
    pub indicator: IndicatorData,
    /// Seed for spawn placement and ground-tile rotation.
    #[serde(default)]
    pub seed: u64,
    pub dwellers: Vec<DwellerData>,
    #[serde(default)]
    pub assets: Vec<AssetData>,
    #[serde(default)]
    pub environs: Vec<EnvironData>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WorldData {
    pub width: u32,
    pub height: u32,
    pub cell_size: f32,
}

/// Progress-ring parameters. `top` is the ring height above the dweller
/// pivot, matching the historical config key.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IndicatorData {
    pub top: f32,
    pub radius: f32,
    pub width: f32,
    pub opacity: f32,
    pub color: u32,
    #[serde(default = "default_segments")]
    pub segments: u32,
}

fn default_segments() -> u32 {
    32
}

/// One dweller kind to populate the world with.
#[derive(Debug, Clone, Deserialize)]
pub struct DwellerData {
    pub kind: String,
    pub amount: u32,
    /// Seconds of accumulated time per produced unit.
    pub price_product: f64,
    #[serde(default)]
    pub refill_add: f64,
    #[serde(default)]
    pub sell_price: u32,
    pub asset: String,
    #[serde(default)]
    pub animation: Option<String>,
    #[serde(default)]
    pub thresholds: Option<ThresholdsData>,
}

/// Optional per-kind starvation policy override.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ThresholdsData {
    pub ready_grace: f64,
    pub pause_visible: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetData {
    pub name: String,
    pub path: String,
}

/// A rectangular block of permanent terrain (buildings, fences).
#[derive(Debug, Clone, Deserialize)]
pub struct EnvironData {
    pub origin: (i32, i32),
    pub size: (u32, u32),
    /// Visual asset placed on the block's origin cell, if any.
    #[serde(default)]
    pub asset: Option<String>,
}
