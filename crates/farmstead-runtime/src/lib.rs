//! Host-side runtime for the farm simulation.
//!
//! Glues the core, the drag controller, and the data loader into a running
//! farm: asset loading, world construction from configuration, the
//! per-frame tick, score counters, and the sell action. Ships renderer-less
//! service backends so the whole thing runs (and is tested) without a GPU;
//! a browser host swaps in WebGL-backed implementations of the same
//! service traits.

pub mod assets;
pub mod builder;
pub mod error;
pub mod headless;
pub mod scores;
pub mod session;

pub use assets::{AssetService, load_assets};
pub use builder::build_world;
pub use error::RuntimeError;
pub use headless::{HeadlessAnimations, HeadlessAssets, HeadlessScene};
pub use scores::CounterBoard;
pub use session::FarmSession;
