//! Parse and resolve farm definition files.
//!
//! Format is dispatched on the file extension (RON or JSON). Resolution
//! turns kind names into [`DwellerKind`] values, checks asset references,
//! and validates the numbers a broken file could smuggle in, so that world
//! construction never sees an impossible configuration.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use farmstead_core::config::{GridConfig, KindParams, Thresholds};
use farmstead_core::dweller::DwellerKind;
use farmstead_core::fixed::secs;
use farmstead_core::grid::CellCoord;
use farmstead_core::indicator::IndicatorStyle;

use crate::schema::{DwellerData, FarmFile};

// ===========================================================================
// Errors
// ===========================================================================

#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error: {detail}")]
    Parse { detail: String },

    /// A dweller entry names a kind the simulation doesn't know.
    #[error("unknown dweller kind '{name}'")]
    UnknownKind { name: String },

    /// Two dweller entries name the same kind.
    #[error("duplicate dweller kind '{name}'")]
    DuplicateKind { name: String },

    /// A reference to an asset missing from the asset table.
    #[error("unknown asset '{name}' referenced by {referrer}")]
    UnknownAsset { name: String, referrer: String },

    /// A value outside its legal range.
    #[error("invalid configuration: {detail}")]
    Invalid { detail: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Resolved configuration
// ===========================================================================

/// A fully resolved farm definition, ready for world construction.
#[derive(Debug, Clone)]
pub struct FarmConfig {
    pub name: String,
    pub grid: GridConfig,
    pub seed: u64,
    pub indicator: IndicatorStyle,
    pub dwellers: Vec<DwellerSpec>,
    /// Asset name to path, in file order.
    pub assets: Vec<(String, String)>,
    pub environs: Vec<EnvironSpec>,
}

#[derive(Debug, Clone)]
pub struct DwellerSpec {
    pub kind: DwellerKind,
    pub amount: u32,
    pub params: KindParams,
    pub asset: String,
    pub animation: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EnvironSpec {
    pub origin: CellCoord,
    pub size: (u32, u32),
    pub asset: Option<String>,
}

// ===========================================================================
// Parsing
// ===========================================================================

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

pub fn from_ron_str(content: &str) -> Result<FarmFile, DataLoadError> {
    ron::from_str(content).map_err(|e| DataLoadError::Parse {
        detail: e.to_string(),
    })
}

pub fn from_json_str(content: &str) -> Result<FarmFile, DataLoadError> {
    serde_json::from_str(content).map_err(|e| DataLoadError::Parse {
        detail: e.to_string(),
    })
}

/// Read, parse, and resolve a farm definition file.
pub fn load_farm(path: &Path) -> Result<FarmConfig, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    let file = match format {
        Format::Ron => from_ron_str(&content)?,
        Format::Json => from_json_str(&content)?,
    };
    resolve(file)
}

// ===========================================================================
// Resolution
// ===========================================================================

/// Resolve a parsed file into typed configuration, validating as it goes.
pub fn resolve(file: FarmFile) -> Result<FarmConfig, DataLoadError> {
    if file.world.width == 0 || file.world.height == 0 {
        return Err(DataLoadError::Invalid {
            detail: format!(
                "grid dimensions must be non-zero, got {}x{}",
                file.world.width, file.world.height
            ),
        });
    }
    if file.world.cell_size <= 0.0 {
        return Err(DataLoadError::Invalid {
            detail: format!("cell size must be positive, got {}", file.world.cell_size),
        });
    }

    let asset_names: HashSet<&str> = file.assets.iter().map(|a| a.name.as_str()).collect();

    let mut seen = HashSet::new();
    let mut dwellers = Vec::with_capacity(file.dwellers.len());
    for entry in &file.dwellers {
        let kind = DwellerKind::from_name(&entry.kind).ok_or_else(|| DataLoadError::UnknownKind {
            name: entry.kind.clone(),
        })?;
        if !seen.insert(kind) {
            return Err(DataLoadError::DuplicateKind {
                name: entry.kind.clone(),
            });
        }
        if entry.price_product <= 0.0 {
            return Err(DataLoadError::Invalid {
                detail: format!(
                    "production cost for '{}' must be positive, got {}",
                    entry.kind, entry.price_product
                ),
            });
        }
        if !asset_names.contains(entry.asset.as_str()) {
            return Err(DataLoadError::UnknownAsset {
                name: entry.asset.clone(),
                referrer: format!("dweller '{}'", entry.kind),
            });
        }
        dwellers.push(DwellerSpec {
            kind,
            amount: entry.amount,
            params: resolve_params(entry),
            asset: entry.asset.clone(),
            animation: entry.animation.clone(),
        });
    }

    let mut environs = Vec::with_capacity(file.environs.len());
    for entry in &file.environs {
        if let Some(asset) = &entry.asset {
            if !asset_names.contains(asset.as_str()) {
                return Err(DataLoadError::UnknownAsset {
                    name: asset.clone(),
                    referrer: format!("environ at ({}, {})", entry.origin.0, entry.origin.1),
                });
            }
        }
        environs.push(EnvironSpec {
            origin: CellCoord::new(entry.origin.0, entry.origin.1),
            size: entry.size,
            asset: entry.asset.clone(),
        });
    }

    Ok(FarmConfig {
        name: file.name,
        grid: GridConfig {
            width: file.world.width,
            height: file.world.height,
            cell_size: file.world.cell_size,
        },
        seed: file.seed,
        indicator: IndicatorStyle {
            elevation: file.indicator.top,
            radius: file.indicator.radius,
            width: file.indicator.width,
            opacity: file.indicator.opacity,
            color: file.indicator.color,
            segments: file.indicator.segments,
        },
        dwellers,
        assets: file
            .assets
            .into_iter()
            .map(|a| (a.name, a.path))
            .collect(),
        environs,
    })
}

fn resolve_params(entry: &DwellerData) -> KindParams {
    KindParams {
        production_cost: secs(entry.price_product),
        refill_add: secs(entry.refill_add),
        sell_price: entry.sell_price,
        thresholds: entry
            .thresholds
            .map(|t| Thresholds {
                ready_grace: secs(t.ready_grace),
                pause_visible: secs(t.pause_visible),
            })
            .unwrap_or_default(),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
