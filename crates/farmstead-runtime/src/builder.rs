//! World construction from resolved configuration.
//!
//! Lays the ground tiles, marks terrain blocks, and spawns the configured
//! dwellers on random empty cells. All randomness (tile rotation, spawn
//! placement, initial headings) comes from the seeded [`SimRng`], so a
//! given config builds the same farm every time.

use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, PI};

use farmstead_core::dweller::{Dweller, DwellerKind};
use farmstead_core::grid::Grid;
use farmstead_core::id::AssetId;
use farmstead_core::indicator::Indicator;
use farmstead_core::rng::SimRng;
use farmstead_core::services::{Animations, InstanceOptions, Scene};
use farmstead_core::world::World;
use farmstead_data::{DwellerSpec, FarmConfig};

use crate::error::RuntimeError;

const GROUND_ASSET: &str = "ground";

/// Initial visual scale of a freshly planted crop.
const SEEDLING_SCALE: f32 = 0.3;

pub fn build_world(
    config: &FarmConfig,
    assets: &HashMap<String, AssetId>,
    scene: &mut dyn Scene,
    anims: &mut dyn Animations,
) -> Result<World, RuntimeError> {
    let grid = Grid::new(config.grid.width, config.grid.height, config.grid.cell_size);
    let mut world = World::new(grid);
    let mut rng = SimRng::new(config.seed);

    if let Some(&ground) = assets.get(GROUND_ASSET) {
        lay_ground(&mut world, ground, scene, &mut rng);
    }

    for environ in &config.environs {
        world.grid_mut().mark_environ(environ.origin, environ.size);
        if let Some(name) = &environ.asset {
            let asset = lookup(assets, name)?;
            let pivot = world.grid().cell_to_world(environ.origin);
            scene.instantiate(
                asset,
                InstanceOptions {
                    position: [pivot.x, pivot.y, 0.0],
                    pickable: false,
                    cast_shadow: true,
                    ..InstanceOptions::default()
                },
            );
        }
    }

    for spec in &config.dwellers {
        spawn_flock(config, spec, assets, &mut world, scene, anims, &mut rng)?;
    }

    tracing::info!(
        farm = %config.name,
        dwellers = world.dwellers().count(),
        "world built"
    );
    Ok(world)
}

/// One ground tile per cell, each at a random quarter turn so the tiling
/// doesn't repeat visibly.
fn lay_ground(world: &mut World, ground: AssetId, scene: &mut dyn Scene, rng: &mut SimRng) {
    let mut placements = Vec::new();
    world.grid().for_each_cell(|_, coord| placements.push(coord));
    for coord in placements {
        let pivot = world.grid().cell_to_world(coord);
        let handle = scene.instantiate(
            ground,
            InstanceOptions {
                position: [pivot.x, pivot.y, 0.0],
                rotation_z: rng.quarter_turns() as f32 * FRAC_PI_2,
                pickable: false,
                receive_shadow: true,
                ..InstanceOptions::default()
            },
        );
        world.grid_mut().set_ground(coord, Some(handle));
    }
}

fn spawn_flock(
    config: &FarmConfig,
    spec: &DwellerSpec,
    assets: &HashMap<String, AssetId>,
    world: &mut World,
    scene: &mut dyn Scene,
    anims: &mut dyn Animations,
    rng: &mut SimRng,
) -> Result<(), RuntimeError> {
    let asset = lookup(assets, &spec.asset)?;
    for _ in 0..spec.amount {
        let Some(cell) = world.grid().random_empty_cell(rng) else {
            tracing::warn!(kind = spec.kind.name(), "grid full, skipping spawn");
            break;
        };
        let pivot = world.grid().cell_to_world(cell);
        // Crops grow into view and stay unpickable until ready.
        let seedling = spec.kind == DwellerKind::Corn;
        let model = scene.instantiate(
            asset,
            InstanceOptions {
                position: [pivot.x, pivot.y, 0.0],
                rotation_z: PI * rng.unit_f32(),
                scale: if seedling { SEEDLING_SCALE } else { 1.0 },
                pickable: !seedling,
                cast_shadow: true,
                ..InstanceOptions::default()
            },
        );
        let ring = scene.create_indicator(model, &config.indicator);
        if let Some(clip) = &spec.animation {
            anims.play(model, clip);
        }
        world.spawn(
            cell,
            Dweller::new(
                spec.kind,
                spec.params,
                model,
                Indicator::new(ring, config.indicator),
            ),
        );
    }
    Ok(())
}

fn lookup(assets: &HashMap<String, AssetId>, name: &str) -> Result<AssetId, RuntimeError> {
    assets
        .get(name)
        .copied()
        .ok_or_else(|| RuntimeError::AssetMissing {
            name: name.to_string(),
        })
}

// ===========================================================================
// Tests
// ===========================================================================
