//! The asset-loading boundary.
//!
//! Loading is a synchronous call: hosts that fetch over the network block
//! (or pre-fetch) before world construction starts, so the builder never
//! sees a half-loaded asset set.

use std::collections::HashMap;

use farmstead_core::id::AssetId;
use farmstead_data::FarmConfig;

use crate::error::RuntimeError;

/// Loads visual assets and issues handles for them. Paths arrive already
/// joined with the base URL.
pub trait AssetService {
    fn load(&mut self, name: &str, path: &str) -> Result<AssetId, RuntimeError>;
}

/// Load every asset in the configuration's table, in file order. Each
/// configured path is joined onto `base` before the service sees it; an
/// empty base leaves paths untouched.
pub fn load_assets(
    service: &mut dyn AssetService,
    base: &str,
    config: &FarmConfig,
) -> Result<HashMap<String, AssetId>, RuntimeError> {
    let mut ids = HashMap::with_capacity(config.assets.len());
    for (name, path) in &config.assets {
        let full = join_base(base, path);
        let id = service.load(name, &full)?;
        tracing::debug!(asset = %name, path = %full, "asset loaded");
        ids.insert(name.clone(), id);
    }
    Ok(ids)
}

fn join_base(base: &str, path: &str) -> String {
    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), path)
    }
}
