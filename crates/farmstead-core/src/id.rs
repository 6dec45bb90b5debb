use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Identifies a dweller (placeable, simulated entity) in the world arena.
    pub struct DwellerId;
}

/// Handle to an object instantiated in the scene graph. Issued by the
/// graphics service; opaque to the core. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SceneHandle(pub u64);

/// Handle to a loaded visual asset. Issued by the asset service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u32);
