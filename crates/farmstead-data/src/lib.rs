//! Farm configuration loading.
//!
//! [`schema`] defines the raw on-disk format (RON or JSON via serde);
//! [`loader`] parses and resolves it into the core's typed configuration,
//! rejecting unknown kind names and geometrically impossible worlds before
//! anything is built.

pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, DwellerSpec, EnvironSpec, FarmConfig, load_farm, resolve};
