use crate::config::ConfigError;
use crate::document::export::ExportError;
use crate::input::LoadError;
use crate::storage::StorageError;
use thiserror::Error;

/// Any failure the application reports to the user as a notification.
#[derive(Error, Debug)]
pub enum PacerError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
