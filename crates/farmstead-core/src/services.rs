//! Service traits for the out-of-scope collaborators.
//!
//! The core never touches a renderer, the DOM, or asset files directly; it
//! talks to these traits. Hosts supply real implementations (WebGL, DOM
//! counters); tests and the headless runner supply recording stand-ins.

use crate::id::{AssetId, SceneHandle};
use crate::indicator::{IndicatorMode, IndicatorStyle};

// ---------------------------------------------------------------------------
// Scene service
// ---------------------------------------------------------------------------

/// Placement and material options for instantiating a scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceOptions {
    pub position: [f32; 3],
    /// Heading around the vertical axis, radians.
    pub rotation_z: f32,
    pub scale: f32,
    pub pickable: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Default for InstanceOptions {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation_z: 0.0,
            scale: 1.0,
            pickable: true,
            cast_shadow: false,
            receive_shadow: false,
        }
    }
}

/// A ray from the active camera through a pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: [f32; 3],
    pub dir: [f32; 3],
}

/// Highlight states applied to scene objects during interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    /// The object under the pointer while idle.
    Hover,
    /// A legal destination occupant during a drag session.
    DropTarget,
}

/// The graphics/scene boundary: instantiation, picking, per-object
/// transforms, and frame rendering. Mesh and material construction stay on
/// the implementation side.
pub trait Scene {
    /// Instantiate a loaded asset into the scene graph.
    fn instantiate(&mut self, asset: AssetId, options: InstanceOptions) -> SceneHandle;

    /// Create a progress-ring object attached to `parent`.
    fn create_indicator(&mut self, parent: SceneHandle, style: &IndicatorStyle) -> SceneHandle;

    /// Topmost pickable object along a ray from the active camera through
    /// the normalized pointer position, if any.
    fn pick(&self, ndc: [f32; 2]) -> Option<SceneHandle>;

    /// The world-space ray from the active camera through the pointer.
    fn pointer_ray(&self, ndc: [f32; 2]) -> Ray;

    fn set_position_xy(&mut self, handle: SceneHandle, x: f32, y: f32);
    fn set_uniform_scale(&mut self, handle: SceneHandle, scale: f32);
    fn set_pickable(&mut self, handle: SceneHandle, pickable: bool);
    fn set_highlight(&mut self, handle: SceneHandle, highlight: Highlight);
    fn set_indicator(&mut self, handle: SceneHandle, mode: IndicatorMode);

    fn render_frame(&mut self);
}

// ---------------------------------------------------------------------------
// Animation service
// ---------------------------------------------------------------------------

/// Opaque clip playback on scene objects. Used to suspend a dweller's idle
/// animation during a drag session.
pub trait Animations {
    fn play(&mut self, handle: SceneHandle, clip: &str);
    fn pause(&mut self, handle: SceneHandle);
    fn resume(&mut self, handle: SceneHandle);
}

// ---------------------------------------------------------------------------
// Score counters
// ---------------------------------------------------------------------------

/// External integer counters (DOM widgets in the original host).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    Eggs,
    Milk,
    Money,
}

/// Score/UI counter boundary. The production state machine increments
/// product tallies; the sell action moves tallies into currency.
pub trait ScoreBoard {
    fn increment(&mut self, counter: Counter);
    fn add(&mut self, counter: Counter, amount: u32);
    /// Decrement by one if positive. Returns whether a unit was taken.
    fn take(&mut self, counter: Counter) -> bool;
    fn value(&self, counter: Counter) -> u32;
}
