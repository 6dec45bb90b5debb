//! Pointer-driven drag and drop for the farm world.
//!
//! The controller runs a two-state machine, idle and dragging. While idle
//! it polls the pick result every frame and keeps a hover highlight on the
//! dweller model under the pointer. Pointer-down on an owned model opens a
//! drag session: the legal destination set is computed once, destination
//! tiles get a highlight, and the dweller's idle animation pauses. While
//! dragging, pointer moves project onto the ground plane and the model
//! snaps from permitted cell to permitted cell, sticking at the last legal
//! cell when the pointer wanders off. Pointer-up commits the move through
//! the world and tears the session down.
//!
//! Nothing here mutates occupancy directly: commits go through
//! [`World::move_dweller`], whose destinations were validated when the
//! session opened.

use farmstead_core::grid::CellCoord;
use farmstead_core::id::{DwellerId, SceneHandle};
use farmstead_core::services::{Animations, Highlight, Scene};
use farmstead_core::world::{MoveOutcome, World};

pub mod project;

/// A live drag session. The permitted set is frozen at pointer-down; the
/// world does not change under an open session because the sim and the
/// controller tick from the same single-threaded loop.
#[derive(Debug)]
struct Session {
    dweller: DwellerId,
    model: SceneHandle,
    source_cell: CellCoord,
    /// Last permitted cell the pointer crossed, if any.
    dest_cell: Option<CellCoord>,
    permitted: Vec<CellCoord>,
    /// Handles carrying the destination highlight, for teardown.
    highlighted: Vec<SceneHandle>,
}

#[derive(Debug, Default)]
pub struct DragController {
    /// Last reported pointer position, normalized device coordinates.
    pointer: [f32; 2],
    hovered: Option<SceneHandle>,
    session: Option<Session>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn hovered(&self) -> Option<SceneHandle> {
        self.hovered
    }

    pub fn dest_cell(&self) -> Option<CellCoord> {
        self.session.as_ref().and_then(|s| s.dest_cell)
    }

    /// Per-frame poll. While idle, tracks the hover highlight; while a
    /// session is open the highlight set is frozen and this does nothing.
    pub fn update(&mut self, world: &World, scene: &mut dyn Scene) {
        if self.session.is_some() {
            return;
        }
        let picked = scene
            .pick(self.pointer)
            .filter(|handle| world.owner_of(*handle).is_some());
        if picked != self.hovered {
            if let Some(old) = self.hovered {
                scene.set_highlight(old, Highlight::None);
            }
            if let Some(new) = picked {
                scene.set_highlight(new, Highlight::Hover);
            }
            self.hovered = picked;
        }
    }

    /// Try to open a drag session at the current pointer position.
    /// Returns whether a session started; picks that resolve to no owned
    /// model (ground, terrain, empty space) are ignored.
    pub fn pointer_down(
        &mut self,
        world: &World,
        scene: &mut dyn Scene,
        anims: &mut dyn Animations,
    ) -> bool {
        if self.session.is_some() {
            return false;
        }
        let Some(model) = scene.pick(self.pointer) else {
            return false;
        };
        let Some(dweller) = world.owner_of(model) else {
            return false;
        };
        let source_cell = world
            .cell_of(dweller)
            .expect("owned dweller always occupies a cell");

        // The source cell is always legal: dropping in place is a no-op.
        let mut permitted = world.permitted_cells(dweller);
        if !permitted.contains(&source_cell) {
            permitted.push(source_cell);
        }

        let mut highlighted = world.tile_scene_handles(&permitted);
        highlighted.retain(|handle| *handle != model);
        for &handle in &highlighted {
            scene.set_highlight(handle, Highlight::DropTarget);
        }
        anims.pause(model);

        self.session = Some(Session {
            dweller,
            model,
            source_cell,
            dest_cell: None,
            permitted,
            highlighted,
        });
        true
    }

    /// Report a pointer move. While dragging, projects the pointer onto
    /// the ground plane and snaps the model to the resulting cell when it
    /// is permitted; otherwise the model stays where it last snapped.
    pub fn pointer_moved(&mut self, ndc: [f32; 2], world: &World, scene: &mut dyn Scene) {
        self.pointer = ndc;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let ray = scene.pointer_ray(ndc);
        let Some(point) = project::pointer_world_point(&ray, 0.0) else {
            return;
        };
        let candidate = world.grid().world_to_cell(point);
        if session.dest_cell == Some(candidate) || !session.permitted.contains(&candidate) {
            return;
        }
        let pivot = world.grid().cell_to_world(candidate);
        scene.set_position_xy(session.model, pivot.x, pivot.y);
        session.dest_cell = Some(candidate);
    }

    /// Close the session: clear highlights, resume the idle animation, and
    /// commit the move if the pointer settled on a new cell. On a delivery
    /// (or no destination at all) the model snaps back to its source pivot.
    pub fn pointer_up(
        &mut self,
        world: &mut World,
        scene: &mut dyn Scene,
        anims: &mut dyn Animations,
    ) -> Option<MoveOutcome> {
        let session = self.session.take()?;
        for &handle in &session.highlighted {
            scene.set_highlight(handle, Highlight::None);
        }
        anims.resume(session.model);

        let outcome = match session.dest_cell {
            Some(dst) if dst != session.source_cell => Some(world.move_dweller(session.dweller, dst)),
            _ => None,
        };
        if !matches!(outcome, Some(MoveOutcome::Relocated)) {
            let pivot = world.grid().cell_to_world(session.source_cell);
            scene.set_position_xy(session.model, pivot.x, pivot.y);
        }
        outcome
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use farmstead_core::dweller::DwellerKind;
    use farmstead_core::fixed::secs;
    use farmstead_core::grid::Grid;
    use farmstead_core::test_utils::{NullScene, TallyBoard, spawn_kind};

    #[derive(Debug, Default)]
    struct RecAnims {
        log: Vec<(&'static str, SceneHandle)>,
    }

    impl Animations for RecAnims {
        fn play(&mut self, handle: SceneHandle, _clip: &str) {
            self.log.push(("play", handle));
        }

        fn pause(&mut self, handle: SceneHandle) {
            self.log.push(("pause", handle));
        }

        fn resume(&mut self, handle: SceneHandle) {
            self.log.push(("resume", handle));
        }
    }

    fn world_3x3() -> World {
        World::new(Grid::new(3, 3, 2.0))
    }

    /// NullScene rays drop straight down from the pointer position, so
    /// "ndc" doubles as a ground-plane world point in these tests.
    fn pivot_ndc(world: &World, cell: CellCoord) -> [f32; 2] {
        let p = world.grid().cell_to_world(cell);
        [p.x, p.y]
    }

    // -----------------------------------------------------------------------
    // Hover
    // -----------------------------------------------------------------------

    #[test]
    fn hover_highlights_owned_models_only() {
        let mut world = world_3x3();
        let id = spawn_kind(&mut world, DwellerKind::Cow, CellCoord::new(0, 0), 10);
        let model = world.dweller(id).unwrap().model();
        let mut scene = NullScene::default();
        let mut drag = DragController::new();

        scene.next_pick = Some(model);
        drag.update(&world, &mut scene);
        assert_eq!(drag.hovered(), Some(model));
        assert_eq!(scene.highlight_of(model), Highlight::Hover);

        // An unowned handle (ground, terrain) never hovers.
        scene.next_pick = Some(SceneHandle(999));
        drag.update(&world, &mut scene);
        assert_eq!(drag.hovered(), None);
        assert_eq!(scene.highlight_of(model), Highlight::None);
    }

    #[test]
    fn hover_clears_when_pointer_leaves() {
        let mut world = world_3x3();
        let id = spawn_kind(&mut world, DwellerKind::Chicken, CellCoord::new(1, 1), 10);
        let model = world.dweller(id).unwrap().model();
        let mut scene = NullScene::default();
        let mut drag = DragController::new();

        scene.next_pick = Some(model);
        drag.update(&world, &mut scene);
        scene.next_pick = None;
        drag.update(&world, &mut scene);
        assert_eq!(drag.hovered(), None);
        assert_eq!(scene.highlight_of(model), Highlight::None);
    }

    // -----------------------------------------------------------------------
    // Session lifecycle
    // -----------------------------------------------------------------------

    #[test]
    fn pointer_down_on_unowned_handle_does_nothing() {
        let world = world_3x3();
        let mut scene = NullScene::default();
        let mut anims = RecAnims::default();
        let mut drag = DragController::new();

        scene.next_pick = Some(SceneHandle(42));
        assert!(!drag.pointer_down(&world, &mut scene, &mut anims));
        assert!(!drag.is_dragging());
        assert!(anims.log.is_empty());
    }

    #[test]
    fn pointer_down_on_growing_corn_does_nothing() {
        let mut world = world_3x3();
        let id = spawn_kind(&mut world, DwellerKind::Corn, CellCoord::new(0, 0), 10);
        let model = world.dweller(id).unwrap().model();
        let mut scene = NullScene::default();
        let mut anims = RecAnims::default();
        let mut scores = TallyBoard::default();
        let mut drag = DragController::new();

        // Mid-cycle the sim marks the model unpickable, so the pick misses.
        world.update(secs(0.0), &mut scene, &mut scores);
        world.update(secs(5.0), &mut scene, &mut scores);
        assert_eq!(scene.pickable_of(model), Some(false));

        scene.next_pick = Some(model);
        assert!(!drag.pointer_down(&world, &mut scene, &mut anims));
        assert!(!drag.is_dragging());

        // Once ready it picks again.
        world.update(secs(10.5), &mut scene, &mut scores);
        assert!(drag.pointer_down(&world, &mut scene, &mut anims));
    }

    #[test]
    fn pointer_down_opens_session_and_pauses_animation() {
        let mut world = world_3x3();
        let id = spawn_kind(&mut world, DwellerKind::Cow, CellCoord::new(0, 0), 10);
        let model = world.dweller(id).unwrap().model();
        let mut scene = NullScene::default();
        let mut anims = RecAnims::default();
        let mut drag = DragController::new();

        scene.next_pick = Some(model);
        assert!(drag.pointer_down(&world, &mut scene, &mut anims));
        assert!(drag.is_dragging());
        assert_eq!(anims.log, vec![("pause", model)]);
    }

    #[test]
    fn drop_targets_highlight_excludes_dragged_model() {
        let mut world = world_3x3();
        let corn = spawn_kind(&mut world, DwellerKind::Corn, CellCoord::new(0, 0), 10);
        let hen = spawn_kind(&mut world, DwellerKind::Chicken, CellCoord::new(2, 2), 20);
        let corn_model = world.dweller(corn).unwrap().model();
        let hen_model = world.dweller(hen).unwrap().model();
        let mut scene = NullScene::default();
        let mut anims = RecAnims::default();
        let mut drag = DragController::new();

        scene.next_pick = Some(corn_model);
        drag.pointer_down(&world, &mut scene, &mut anims);

        // The hen sits on a permitted cell, so its model lights up; the
        // dragged corn never highlights itself.
        assert_eq!(scene.highlight_of(hen_model), Highlight::DropTarget);
        assert_eq!(scene.highlight_of(corn_model), Highlight::None);
    }

    #[test]
    fn move_snaps_to_permitted_cells_and_sticks_otherwise() {
        let mut world = world_3x3();
        let id = spawn_kind(&mut world, DwellerKind::Cow, CellCoord::new(0, 0), 10);
        let model = world.dweller(id).unwrap().model();
        let mut scene = NullScene::default();
        let mut anims = RecAnims::default();
        let mut drag = DragController::new();

        scene.next_pick = Some(model);
        drag.pointer_down(&world, &mut scene, &mut anims);

        let dst = CellCoord::new(2, 1);
        drag.pointer_moved(pivot_ndc(&world, dst), &world, &mut scene);
        assert_eq!(drag.dest_cell(), Some(dst));
        let pivot = world.grid().cell_to_world(dst);
        assert_eq!(scene.position_of(model), Some((pivot.x, pivot.y)));

        // A point far outside the grid leaves the last snap in place.
        drag.pointer_moved([500.0, 500.0], &world, &mut scene);
        assert_eq!(drag.dest_cell(), Some(dst));
        assert_eq!(scene.position_of(model), Some((pivot.x, pivot.y)));
    }

    #[test]
    fn occupied_cell_is_not_a_snap_target_for_animals() {
        let mut world = world_3x3();
        let cow = spawn_kind(&mut world, DwellerKind::Cow, CellCoord::new(0, 0), 10);
        spawn_kind(&mut world, DwellerKind::Chicken, CellCoord::new(1, 1), 20);
        let model = world.dweller(cow).unwrap().model();
        let mut scene = NullScene::default();
        let mut anims = RecAnims::default();
        let mut drag = DragController::new();

        scene.next_pick = Some(model);
        drag.pointer_down(&world, &mut scene, &mut anims);
        drag.pointer_moved(pivot_ndc(&world, CellCoord::new(1, 1)), &world, &mut scene);
        assert_eq!(drag.dest_cell(), None);
    }

    // -----------------------------------------------------------------------
    // Commit
    // -----------------------------------------------------------------------

    #[test]
    fn pointer_up_commits_relocation() {
        let mut world = world_3x3();
        let id = spawn_kind(&mut world, DwellerKind::Cow, CellCoord::new(0, 0), 10);
        let model = world.dweller(id).unwrap().model();
        let mut scene = NullScene::default();
        let mut anims = RecAnims::default();
        let mut drag = DragController::new();

        scene.next_pick = Some(model);
        drag.pointer_down(&world, &mut scene, &mut anims);
        let dst = CellCoord::new(2, 2);
        drag.pointer_moved(pivot_ndc(&world, dst), &world, &mut scene);
        let outcome = drag.pointer_up(&mut world, &mut scene, &mut anims);

        assert_eq!(outcome, Some(MoveOutcome::Relocated));
        assert_eq!(world.cell_of(id), Some(dst));
        assert!(!drag.is_dragging());
        assert_eq!(anims.log.last(), Some(&("resume", model)));
        // The model stays on the destination pivot.
        let pivot = world.grid().cell_to_world(dst);
        assert_eq!(scene.position_of(model), Some((pivot.x, pivot.y)));
    }

    #[test]
    fn pointer_up_without_destination_snaps_back() {
        let mut world = world_3x3();
        let id = spawn_kind(&mut world, DwellerKind::Chicken, CellCoord::new(1, 0), 10);
        let model = world.dweller(id).unwrap().model();
        let mut scene = NullScene::default();
        let mut anims = RecAnims::default();
        let mut drag = DragController::new();

        scene.next_pick = Some(model);
        drag.pointer_down(&world, &mut scene, &mut anims);
        let outcome = drag.pointer_up(&mut world, &mut scene, &mut anims);

        assert_eq!(outcome, None);
        assert_eq!(world.cell_of(id), Some(CellCoord::new(1, 0)));
        let pivot = world.grid().cell_to_world(CellCoord::new(1, 0));
        assert_eq!(scene.position_of(model), Some((pivot.x, pivot.y)));
    }

    #[test]
    fn delivery_snaps_the_producer_back() {
        let mut world = world_3x3();
        let corn = spawn_kind(&mut world, DwellerKind::Corn, CellCoord::new(0, 0), 10);
        let hen = spawn_kind(&mut world, DwellerKind::Chicken, CellCoord::new(2, 2), 20);
        let corn_model = world.dweller(corn).unwrap().model();
        let mut scene = NullScene::default();
        let mut anims = RecAnims::default();
        let mut scores = TallyBoard::default();
        let mut drag = DragController::new();

        // Grow a ready unit first.
        world.update(secs(0.0), &mut scene, &mut scores);
        world.update(secs(10.5), &mut scene, &mut scores);

        scene.next_pick = Some(corn_model);
        drag.pointer_down(&world, &mut scene, &mut anims);
        drag.pointer_moved(pivot_ndc(&world, CellCoord::new(2, 2)), &world, &mut scene);
        let outcome = drag.pointer_up(&mut world, &mut scene, &mut anims);

        assert_eq!(outcome, Some(MoveOutcome::Consumed));
        assert_eq!(world.cell_of(corn), Some(CellCoord::new(0, 0)));
        assert_eq!(world.dweller(corn).unwrap().products().ready, 0);
        assert!(world.dweller(hen).unwrap().resource().has_fuel());
        let pivot = world.grid().cell_to_world(CellCoord::new(0, 0));
        assert_eq!(scene.position_of(corn_model), Some((pivot.x, pivot.y)));
    }

    #[test]
    fn highlights_clear_on_pointer_up() {
        let mut world = world_3x3();
        let corn = spawn_kind(&mut world, DwellerKind::Corn, CellCoord::new(0, 0), 10);
        let hen = spawn_kind(&mut world, DwellerKind::Chicken, CellCoord::new(2, 2), 20);
        let hen_model = world.dweller(hen).unwrap().model();
        let mut scene = NullScene::default();
        let mut anims = RecAnims::default();
        let mut drag = DragController::new();

        scene.next_pick = Some(world.dweller(corn).unwrap().model());
        drag.pointer_down(&world, &mut scene, &mut anims);
        assert_eq!(scene.highlight_of(hen_model), Highlight::DropTarget);

        drag.pointer_up(&mut world, &mut scene, &mut anims);
        assert_eq!(scene.highlight_of(hen_model), Highlight::None);
        assert!(scene.highlighted(Highlight::DropTarget).is_empty());
    }

    #[test]
    fn no_hover_polling_while_dragging() {
        let mut world = world_3x3();
        let cow = spawn_kind(&mut world, DwellerKind::Cow, CellCoord::new(0, 0), 10);
        let hen = spawn_kind(&mut world, DwellerKind::Chicken, CellCoord::new(2, 2), 20);
        let cow_model = world.dweller(cow).unwrap().model();
        let hen_model = world.dweller(hen).unwrap().model();
        let mut scene = NullScene::default();
        let mut anims = RecAnims::default();
        let mut drag = DragController::new();

        scene.next_pick = Some(cow_model);
        drag.pointer_down(&world, &mut scene, &mut anims);

        // The pick result changes mid-drag; the hover state must not.
        scene.next_pick = Some(hen_model);
        drag.update(&world, &mut scene);
        assert_ne!(scene.highlight_of(hen_model), Highlight::Hover);
    }
}
