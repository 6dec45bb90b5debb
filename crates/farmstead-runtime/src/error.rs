/// Errors that can occur while assembling or running a farm.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Configuration failed to load or resolve.
    #[error("config error: {0}")]
    Data(#[from] farmstead_data::DataLoadError),

    /// An asset named by the configuration was never loaded.
    #[error("asset '{name}' has not been loaded")]
    AssetMissing { name: String },
}
