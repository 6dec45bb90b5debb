//! Farmstead Core -- the simulation core for a grid-based farm game.
//!
//! This crate provides the cell grid, the per-dweller production state
//! machine, the indicator protocol, deterministic fixed-point time, and the
//! service traits that connect the core to its out-of-process collaborators
//! (graphics, animation, score counters).
//!
//! # Frame Pipeline
//!
//! The host drives one logical tick per render callback:
//!
//! 1. **Interact** -- the drag controller polls the pick result and, while a
//!    session is active, snaps the dragged model to permitted cells
//!    (see the `farmstead-interact` crate).
//! 2. **Simulate** -- [`world::World::update`] advances every dweller's
//!    production cycle by elapsed wall-clock time and routes the resulting
//!    signals to indicators, counters, and the scene.
//! 3. **Observe** -- the host drains [`event::Event`]s for logging and UI.
//! 4. **Render** -- the host asks the scene service for a frame.
//!
//! All mutation happens synchronously inside a tick; there is no locking
//! because there is no parallelism. The grid is the single source of truth
//! for occupancy: dwellers and the drag controller only read and write cell
//! state through it.
//!
//! # Key Types
//!
//! - [`grid::Grid`] -- fixed-size cell array with the world<->cell affine
//!   transform and emptiness queries.
//! - [`dweller::Dweller`] -- production state machine (accumulate, produce,
//!   ready, collect) driven by elapsed seconds.
//! - [`world::World`] -- arena of dwellers plus the grid; the only place
//!   occupancy is mutated.
//! - [`indicator::Indicator`] -- progress-ring display state bound 1:1 to a
//!   dweller.
//! - [`services::Scene`] -- the boundary to the out-of-scope renderer.
//! - [`fixed::Seconds`] -- Q32.32 fixed-point seconds for deterministic
//!   progress math.

pub mod config;
pub mod dweller;
pub mod event;
pub mod fixed;
pub mod grid;
pub mod id;
pub mod indicator;
pub mod rng;
pub mod services;
pub mod world;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
