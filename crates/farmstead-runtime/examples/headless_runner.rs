//! Run the bundled farm headlessly for a simulated minute and report the
//! harvest.
//!
//! ```sh
//! RUST_LOG=info cargo run -p farmstead-runtime --example headless_runner
//! ```

use farmstead_core::dweller::DwellerKind;
use farmstead_core::fixed::secs;
use farmstead_core::services::{Counter, ScoreBoard};
use farmstead_runtime::{
    FarmSession, HeadlessAnimations, HeadlessAssets, HeadlessScene, load_assets,
};
use tracing_subscriber::EnvFilter;

const FRAMES: u32 = 3600;
const FRAME_SECONDS: f64 = 1.0 / 60.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = farmstead_data::resolve(farmstead_data::loader::from_ron_str(include_str!(
        "../data/farm.ron"
    ))?)?;

    let mut scene = HeadlessScene::default();
    let mut anims = HeadlessAnimations::default();
    let mut assets = HeadlessAssets::default();
    let ids = load_assets(&mut assets, "", &config)?;
    let mut session = FarmSession::from_config(&config, &ids, &mut scene, &mut anims)?;

    // Give the animals a first feeding so the minute isn't silent.
    let hungry: Vec<_> = session
        .world()
        .dwellers()
        .filter(|(_, d)| d.kind().is_animal())
        .map(|(id, _)| id)
        .collect();
    for id in hungry {
        session.world_mut().dweller_mut(id).unwrap().refill();
    }

    for frame in 0..FRAMES {
        session.frame(secs(frame as f64 * FRAME_SECONDS), &mut scene);
    }

    println!("after {FRAMES} frames ({:.0} s simulated):", FRAMES as f64 * FRAME_SECONDS);
    println!("  eggs: {}", session.scores().value(Counter::Eggs));
    println!("  milk: {}", session.scores().value(Counter::Milk));

    while session.sell(DwellerKind::Chicken) {}
    while session.sell(DwellerKind::Cow) {}
    println!("  money after selling out: {}", session.scores().value(Counter::Money));

    Ok(())
}
