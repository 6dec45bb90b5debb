//! The radial progress indicator bound 1:1 to a dweller.
//!
//! The indicator carries visual-only state mirroring production progress;
//! the scene service renders it. Three display states: hidden, paused
//! (progress frozen, neutral color), active (progress arc, accent color).

use serde::{Deserialize, Serialize};

use crate::fixed::{Fixed64, to_f32};
use crate::id::SceneHandle;

/// Ring geometry and material parameters, from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorStyle {
    /// Height of the ring above the dweller's pivot.
    pub elevation: f32,
    /// Outer radius of the ring.
    pub radius: f32,
    /// Radial width of the ring band.
    pub width: f32,
    pub opacity: f32,
    /// Accent color as 0xRRGGBB.
    pub color: u32,
    pub segments: u32,
}

impl IndicatorStyle {
    pub fn inner_radius(&self) -> f32 {
        self.radius - self.width
    }
}

/// Display state of an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorMode {
    #[default]
    Hidden,
    /// Arc frozen at the last progress, neutral color.
    Paused,
    /// Arc sweeping `2 * pi * progress`, accent color.
    Active { progress: Fixed64 },
}

/// A progress ring owned by exactly one dweller. Created with the dweller
/// and lives as long as it does.
#[derive(Debug, Clone)]
pub struct Indicator {
    handle: SceneHandle,
    style: IndicatorStyle,
    mode: IndicatorMode,
}

impl Indicator {
    pub fn new(handle: SceneHandle, style: IndicatorStyle) -> Self {
        Self {
            handle,
            style,
            mode: IndicatorMode::Hidden,
        }
    }

    pub fn handle(&self) -> SceneHandle {
        self.handle
    }

    pub fn style(&self) -> &IndicatorStyle {
        &self.style
    }

    pub fn mode(&self) -> IndicatorMode {
        self.mode
    }

    /// Show the accent arc at the given progress fraction.
    pub fn show_progress(&mut self, progress: Fixed64) {
        self.mode = IndicatorMode::Active { progress };
    }

    /// Freeze the arc in the neutral color. Returns whether the display
    /// state changed (used to emit the pause event once, not per tick).
    pub fn pause(&mut self) -> bool {
        let changed = !matches!(self.mode, IndicatorMode::Paused);
        self.mode = IndicatorMode::Paused;
        changed
    }

    /// Hide the ring. Returns whether the display state changed.
    pub fn hide(&mut self) -> bool {
        let changed = !matches!(self.mode, IndicatorMode::Hidden);
        self.mode = IndicatorMode::Hidden;
        changed
    }
}

impl IndicatorMode {
    /// Sweep angle of the arc in radians, `2 * pi * progress` while active.
    pub fn arc_length(&self) -> f32 {
        match self {
            IndicatorMode::Active { progress } => 2.0 * std::f32::consts::PI * to_f32(*progress),
            _ => 0.0,
        }
    }
}
