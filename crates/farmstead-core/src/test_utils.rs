//! Recording service stand-ins and spawn helpers shared by unit tests,
//! the interaction crate's tests, and the integration suite.

use std::collections::HashMap;

use crate::config::{KindParams, Thresholds};
use crate::dweller::{Dweller, DwellerKind};
use crate::fixed::secs;
use crate::grid::CellCoord;
use crate::id::{AssetId, DwellerId, SceneHandle};
use crate::indicator::{Indicator, IndicatorMode, IndicatorStyle};
use crate::services::{Counter, Highlight, InstanceOptions, Ray, Scene, ScoreBoard};
use crate::world::World;

// ---------------------------------------------------------------------------
// Canonical parameters
// ---------------------------------------------------------------------------

pub fn corn_params() -> KindParams {
    KindParams {
        production_cost: secs(10.0),
        refill_add: secs(0.0),
        sell_price: 0,
        thresholds: Thresholds::default(),
    }
}

pub fn chicken_params() -> KindParams {
    KindParams {
        production_cost: secs(10.0),
        refill_add: secs(30.0),
        sell_price: 20,
        thresholds: Thresholds::default(),
    }
}

pub fn cow_params() -> KindParams {
    KindParams {
        production_cost: secs(20.0),
        refill_add: secs(20.0),
        sell_price: 50,
        thresholds: Thresholds::default(),
    }
}

pub fn params_for(kind: DwellerKind) -> KindParams {
    match kind {
        DwellerKind::Corn => corn_params(),
        DwellerKind::Chicken => chicken_params(),
        DwellerKind::Cow => cow_params(),
    }
}

pub fn default_style() -> IndicatorStyle {
    IndicatorStyle {
        elevation: 4.3,
        radius: 0.55,
        width: 0.2,
        opacity: 0.5,
        color: 0x0136F3,
        segments: 32,
    }
}

// ---------------------------------------------------------------------------
// Spawn helpers
// ---------------------------------------------------------------------------

/// A dweller whose model handle is `base` and indicator handle `base + 1`.
pub fn make_dweller(kind: DwellerKind, params: KindParams, base: u64) -> Dweller {
    Dweller::new(
        kind,
        params,
        SceneHandle(base),
        Indicator::new(SceneHandle(base + 1), default_style()),
    )
}

/// Spawn a dweller of `kind` with its canonical parameters.
pub fn spawn_kind(world: &mut World, kind: DwellerKind, cell: CellCoord, base: u64) -> DwellerId {
    world.spawn(cell, make_dweller(kind, params_for(kind), base))
}

// ---------------------------------------------------------------------------
// Recording scene
// ---------------------------------------------------------------------------

/// A scene that records every call and answers picks from a settable slot,
/// subject to the picked object's recorded pickability.
///
/// `pointer_ray` maps the normalized pointer position straight onto the
/// ground plane: the ray origin is `(ndc.x, ndc.y, 10)` looking down, so a
/// test picks a world point by passing it as the pointer position.
#[derive(Debug, Default)]
pub struct NullScene {
    next_handle: u64,
    pub next_pick: Option<SceneHandle>,
    positions: HashMap<SceneHandle, (f32, f32)>,
    scales: HashMap<SceneHandle, f32>,
    pickables: HashMap<SceneHandle, bool>,
    highlights: HashMap<SceneHandle, Highlight>,
    indicators: HashMap<SceneHandle, IndicatorMode>,
    pub frames_rendered: u32,
}

impl NullScene {
    /// Handles issued by `instantiate` start here, clear of the handles
    /// tests assign by hand.
    const FIRST_HANDLE: u64 = 1000;

    pub fn position_of(&self, handle: SceneHandle) -> Option<(f32, f32)> {
        self.positions.get(&handle).copied()
    }

    pub fn scale_of(&self, handle: SceneHandle) -> Option<f32> {
        self.scales.get(&handle).copied()
    }

    pub fn pickable_of(&self, handle: SceneHandle) -> Option<bool> {
        self.pickables.get(&handle).copied()
    }

    pub fn highlight_of(&self, handle: SceneHandle) -> Highlight {
        self.highlights.get(&handle).copied().unwrap_or_default()
    }

    pub fn indicator_of(&self, handle: SceneHandle) -> Option<IndicatorMode> {
        self.indicators.get(&handle).copied()
    }

    /// Handles currently highlighted with the given state.
    pub fn highlighted(&self, highlight: Highlight) -> Vec<SceneHandle> {
        let mut handles: Vec<_> = self
            .highlights
            .iter()
            .filter(|(_, h)| **h == highlight)
            .map(|(handle, _)| *handle)
            .collect();
        handles.sort();
        handles
    }
}

impl Scene for NullScene {
    fn instantiate(&mut self, _asset: AssetId, options: InstanceOptions) -> SceneHandle {
        let handle = SceneHandle(Self::FIRST_HANDLE + self.next_handle);
        self.next_handle += 1;
        self.positions
            .insert(handle, (options.position[0], options.position[1]));
        self.scales.insert(handle, options.scale);
        self.pickables.insert(handle, options.pickable);
        handle
    }

    fn create_indicator(&mut self, _parent: SceneHandle, _style: &IndicatorStyle) -> SceneHandle {
        let handle = SceneHandle(Self::FIRST_HANDLE + self.next_handle);
        self.next_handle += 1;
        self.indicators.insert(handle, IndicatorMode::Hidden);
        handle
    }

    fn pick(&self, _ndc: [f32; 2]) -> Option<SceneHandle> {
        // Unpickable objects never pick, matching a real raycaster.
        // Hand-assigned handles with no recorded state count as pickable.
        self.next_pick
            .filter(|handle| self.pickables.get(handle).copied().unwrap_or(true))
    }

    fn pointer_ray(&self, ndc: [f32; 2]) -> Ray {
        Ray {
            origin: [ndc[0], ndc[1], 10.0],
            dir: [0.0, 0.0, -1.0],
        }
    }

    fn set_position_xy(&mut self, handle: SceneHandle, x: f32, y: f32) {
        self.positions.insert(handle, (x, y));
    }

    fn set_uniform_scale(&mut self, handle: SceneHandle, scale: f32) {
        self.scales.insert(handle, scale);
    }

    fn set_pickable(&mut self, handle: SceneHandle, pickable: bool) {
        self.pickables.insert(handle, pickable);
    }

    fn set_highlight(&mut self, handle: SceneHandle, highlight: Highlight) {
        self.highlights.insert(handle, highlight);
    }

    fn set_indicator(&mut self, handle: SceneHandle, mode: IndicatorMode) {
        self.indicators.insert(handle, mode);
    }

    fn render_frame(&mut self) {
        self.frames_rendered += 1;
    }
}

// ---------------------------------------------------------------------------
// Recording score board
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TallyBoard {
    counts: HashMap<Counter, u32>,
}

impl ScoreBoard for TallyBoard {
    fn increment(&mut self, counter: Counter) {
        *self.counts.entry(counter).or_default() += 1;
    }

    fn add(&mut self, counter: Counter, amount: u32) {
        *self.counts.entry(counter).or_default() += amount;
    }

    fn take(&mut self, counter: Counter) -> bool {
        let count = self.counts.entry(counter).or_default();
        if *count > 0 {
            *count -= 1;
            true
        } else {
            false
        }
    }

    fn value(&self, counter: Counter) -> u32 {
        self.counts.get(&counter).copied().unwrap_or(0)
    }
}
