//! The running farm: world, drag controller, and scores behind one
//! frame-driven facade.

use std::collections::HashMap;

use farmstead_core::dweller::DwellerKind;
use farmstead_core::fixed::Seconds;
use farmstead_core::id::AssetId;
use farmstead_core::services::{Animations, Counter, Scene, ScoreBoard};
use farmstead_core::world::{MoveOutcome, World};
use farmstead_data::FarmConfig;
use farmstead_interact::DragController;

use crate::builder::build_world;
use crate::error::RuntimeError;
use crate::scores::CounterBoard;

pub struct FarmSession {
    world: World,
    drag: DragController,
    scores: CounterBoard,
    sell_prices: HashMap<DwellerKind, u32>,
}

impl FarmSession {
    /// Build a farm from resolved configuration and pre-loaded assets.
    pub fn from_config(
        config: &FarmConfig,
        assets: &HashMap<String, AssetId>,
        scene: &mut dyn Scene,
        anims: &mut dyn Animations,
    ) -> Result<Self, RuntimeError> {
        let world = build_world(config, assets, scene, anims)?;
        let sell_prices = config
            .dwellers
            .iter()
            .map(|spec| (spec.kind, spec.params.sell_price))
            .collect();
        Ok(Self {
            world,
            drag: DragController::new(),
            scores: CounterBoard::default(),
            sell_prices,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn scores(&self) -> &CounterBoard {
        &self.scores
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// One logical tick: interaction poll, simulation, event drain, render.
    pub fn frame(&mut self, now: Seconds, scene: &mut dyn Scene) {
        self.drag.update(&self.world, scene);
        self.world.update(now, scene, &mut self.scores);
        for event in self.world.drain_events() {
            tracing::debug!(event = event.kind(), "{event:?}");
        }
        scene.render_frame();
    }

    // -- Pointer passthroughs --

    pub fn pointer_moved(&mut self, ndc: [f32; 2], scene: &mut dyn Scene) {
        self.drag.pointer_moved(ndc, &self.world, scene);
    }

    pub fn pointer_down(&mut self, scene: &mut dyn Scene, anims: &mut dyn Animations) -> bool {
        self.drag.pointer_down(&self.world, scene, anims)
    }

    pub fn pointer_up(
        &mut self,
        scene: &mut dyn Scene,
        anims: &mut dyn Animations,
    ) -> Option<MoveOutcome> {
        self.drag.pointer_up(&mut self.world, scene, anims)
    }

    // -- Economy --

    /// Sell one unit of a kind's product: decrement its tally and credit
    /// the configured price. Returns whether a unit was sold.
    pub fn sell(&mut self, kind: DwellerKind) -> bool {
        let Some(counter) = kind.tally() else {
            return false;
        };
        let Some(&price) = self.sell_prices.get(&kind) else {
            return false;
        };
        if !self.scores.take(counter) {
            return false;
        }
        self.scores.add(Counter::Money, price);
        tracing::info!(kind = kind.name(), price, "product sold");
        true
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::load_assets;
    use crate::headless::{HeadlessAnimations, HeadlessAssets, HeadlessScene};
    use farmstead_core::fixed::secs;
    use farmstead_data::loader::from_ron_str;

    const FARM: &str = r#"(
        name: "Session Farm",
        seed: 3,
        world: (width: 4, height: 4, cell_size: 2.0),
        indicator: (top: 4.3, radius: 0.55, width: 0.2, opacity: 0.5, color: 0x0136F3),
        assets: [
            (name: "chicken", path: "assets/chicken.glb"),
            (name: "cow", path: "assets/cow.glb"),
        ],
        dwellers: [
            (
                kind: "chicken",
                amount: 1,
                price_product: 10.0,
                refill_add: 30.0,
                sell_price: 20,
                asset: "chicken",
            ),
            (
                kind: "cow",
                amount: 1,
                price_product: 20.0,
                refill_add: 20.0,
                sell_price: 50,
                asset: "cow",
            ),
        ],
    )"#;

    fn session() -> (FarmSession, HeadlessScene, HeadlessAnimations) {
        let config = farmstead_data::resolve(from_ron_str(FARM).unwrap()).unwrap();
        let mut scene = HeadlessScene::default();
        let mut anims = HeadlessAnimations::default();
        let mut assets = HeadlessAssets::default();
        let ids = load_assets(&mut assets, "", &config).unwrap();
        let session = FarmSession::from_config(&config, &ids, &mut scene, &mut anims).unwrap();
        (session, scene, anims)
    }

    fn chicken_id(session: &FarmSession) -> farmstead_core::id::DwellerId {
        session
            .world()
            .dwellers()
            .find(|(_, d)| d.kind() == DwellerKind::Chicken)
            .map(|(id, _)| id)
            .unwrap()
    }

    #[test]
    fn frames_advance_production() {
        let (mut session, mut scene, _anims) = session();
        let hen = chicken_id(&session);
        session.world_mut().dweller_mut(hen).unwrap().refill();

        // 0.5-second frames for 21 simulated seconds: two egg cycles.
        for frame in 0..=42u32 {
            session.frame(secs(frame as f64 * 0.5), &mut scene);
        }
        assert_eq!(session.scores().value(Counter::Eggs), 2);
        assert_eq!(scene.frames_rendered(), 43);
    }

    #[test]
    fn sell_moves_tally_into_money() {
        let (mut session, mut scene, _anims) = session();
        let hen = chicken_id(&session);
        session.world_mut().dweller_mut(hen).unwrap().refill();
        for frame in 0..=42u32 {
            session.frame(secs(frame as f64 * 0.5), &mut scene);
        }

        assert!(session.sell(DwellerKind::Chicken));
        assert!(session.sell(DwellerKind::Chicken));
        assert!(!session.sell(DwellerKind::Chicken));
        assert_eq!(session.scores().value(Counter::Eggs), 0);
        assert_eq!(session.scores().value(Counter::Money), 40);
    }

    #[test]
    fn selling_a_kind_without_products_fails() {
        let (mut session, _, _) = session();
        assert!(!session.sell(DwellerKind::Corn));
        assert!(!session.sell(DwellerKind::Cow));
        assert_eq!(session.scores().value(Counter::Money), 0);
    }

    #[test]
    fn drag_through_the_session_facade() {
        let (mut session, mut scene, mut anims) = session();
        let hen = chicken_id(&session);
        let model = session.world().dweller(hen).unwrap().model();
        let src = session.world().cell_of(hen).unwrap();

        scene.forced_pick = Some(model);
        assert!(session.pointer_down(&mut scene, &mut anims));

        // Find some other empty cell and drop there.
        let dst = *session
            .world()
            .permitted_cells(hen)
            .iter()
            .find(|c| **c != src)
            .unwrap();
        let pivot = session.world().grid().cell_to_world(dst);
        session.pointer_moved([pivot.x, pivot.y], &mut scene);
        let outcome = session.pointer_up(&mut scene, &mut anims);

        assert_eq!(outcome, Some(MoveOutcome::Relocated));
        assert_eq!(session.world().cell_of(hen), Some(dst));
    }
}
