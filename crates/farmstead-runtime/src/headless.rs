//! Renderer-less service backends.
//!
//! These record every transform, highlight, and indicator change without
//! drawing anything. The headless runner uses them to simulate a farm from
//! the terminal, and tests use them to assert on the scene the way a
//! player would see it.

use std::collections::HashMap;

use farmstead_core::id::{AssetId, SceneHandle};
use farmstead_core::indicator::{IndicatorMode, IndicatorStyle};
use farmstead_core::services::{Animations, Highlight, InstanceOptions, Ray, Scene};

use crate::assets::AssetService;
use crate::error::RuntimeError;

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Recorded state of one instantiated object.
#[derive(Debug, Clone, Copy)]
pub struct SceneObject {
    pub asset: AssetId,
    pub position: [f32; 3],
    pub rotation_z: f32,
    pub scale: f32,
    pub pickable: bool,
    pub highlight: Highlight,
}

/// A scene that records instead of rendering.
///
/// The implied camera looks straight down: `pointer_ray` drops a vertical
/// ray from `(ndc.x, ndc.y, 10)`, so pointer coordinates double as
/// ground-plane world coordinates. Picking answers from a slot the driver
/// sets, since there is no geometry to raycast against.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    next_handle: u64,
    pub forced_pick: Option<SceneHandle>,
    objects: HashMap<SceneHandle, SceneObject>,
    indicators: HashMap<SceneHandle, IndicatorMode>,
    frames: u64,
}

impl HeadlessScene {
    pub fn object(&self, handle: SceneHandle) -> Option<&SceneObject> {
        self.objects.get(&handle)
    }

    pub fn indicator_mode(&self, handle: SceneHandle) -> Option<IndicatorMode> {
        self.indicators.get(&handle).copied()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    fn issue_handle(&mut self) -> SceneHandle {
        let handle = SceneHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }
}

impl Scene for HeadlessScene {
    fn instantiate(&mut self, asset: AssetId, options: InstanceOptions) -> SceneHandle {
        let handle = self.issue_handle();
        self.objects.insert(
            handle,
            SceneObject {
                asset,
                position: options.position,
                rotation_z: options.rotation_z,
                scale: options.scale,
                pickable: options.pickable,
                highlight: Highlight::None,
            },
        );
        handle
    }

    fn create_indicator(&mut self, _parent: SceneHandle, _style: &IndicatorStyle) -> SceneHandle {
        let handle = self.issue_handle();
        self.indicators.insert(handle, IndicatorMode::Hidden);
        handle
    }

    fn pick(&self, _ndc: [f32; 2]) -> Option<SceneHandle> {
        self.forced_pick
            .filter(|handle| self.objects.get(handle).is_some_and(|o| o.pickable))
    }

    fn pointer_ray(&self, ndc: [f32; 2]) -> Ray {
        Ray {
            origin: [ndc[0], ndc[1], 10.0],
            dir: [0.0, 0.0, -1.0],
        }
    }

    fn set_position_xy(&mut self, handle: SceneHandle, x: f32, y: f32) {
        if let Some(object) = self.objects.get_mut(&handle) {
            object.position[0] = x;
            object.position[1] = y;
        }
    }

    fn set_uniform_scale(&mut self, handle: SceneHandle, scale: f32) {
        if let Some(object) = self.objects.get_mut(&handle) {
            object.scale = scale;
        }
    }

    fn set_pickable(&mut self, handle: SceneHandle, pickable: bool) {
        if let Some(object) = self.objects.get_mut(&handle) {
            object.pickable = pickable;
        }
    }

    fn set_highlight(&mut self, handle: SceneHandle, highlight: Highlight) {
        if let Some(object) = self.objects.get_mut(&handle) {
            object.highlight = highlight;
        }
    }

    fn set_indicator(&mut self, handle: SceneHandle, mode: IndicatorMode) {
        self.indicators.insert(handle, mode);
    }

    fn render_frame(&mut self) {
        self.frames += 1;
    }
}

// ---------------------------------------------------------------------------
// Animations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipState {
    pub clip: String,
    pub playing: bool,
}

#[derive(Debug, Default)]
pub struct HeadlessAnimations {
    clips: HashMap<SceneHandle, ClipState>,
}

impl HeadlessAnimations {
    pub fn clip(&self, handle: SceneHandle) -> Option<&ClipState> {
        self.clips.get(&handle)
    }
}

impl Animations for HeadlessAnimations {
    fn play(&mut self, handle: SceneHandle, clip: &str) {
        self.clips.insert(
            handle,
            ClipState {
                clip: clip.to_string(),
                playing: true,
            },
        );
    }

    fn pause(&mut self, handle: SceneHandle) {
        if let Some(state) = self.clips.get_mut(&handle) {
            state.playing = false;
        }
    }

    fn resume(&mut self, handle: SceneHandle) {
        if let Some(state) = self.clips.get_mut(&handle) {
            state.playing = true;
        }
    }
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

/// An asset registry that hands out handles without touching disk, keeping
/// the path each load request arrived with.
#[derive(Debug, Default)]
pub struct HeadlessAssets {
    next_id: u32,
    by_name: HashMap<String, AssetId>,
    paths: HashMap<String, String>,
}

impl HeadlessAssets {
    pub fn id_of(&self, name: &str) -> Option<AssetId> {
        self.by_name.get(name).copied()
    }

    pub fn path_of(&self, name: &str) -> Option<&str> {
        self.paths.get(name).map(String::as_str)
    }
}

impl AssetService for HeadlessAssets {
    fn load(&mut self, name: &str, path: &str) -> Result<AssetId, RuntimeError> {
        let id = *self.by_name.entry(name.to_string()).or_insert_with(|| {
            let id = AssetId(self.next_id);
            self.next_id += 1;
            id
        });
        self.paths.insert(name.to_string(), path.to_string());
        Ok(id)
    }
}
