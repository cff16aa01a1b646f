//! Error types for look-manager

use thiserror::Error;

/// Main error type for look-manager
#[derive(Error, Debug)]
pub enum LookError {
    #[error("Invalid object id: '{0}'")]
    InvalidObjectId(String),

    #[error("Invalid queue file: {0}")]
    InvalidQueueFile(String),

    #[error("Queue item has no nodes to assign to")]
    EmptyNodeList,

    #[error("No published version for look '{subset}' on asset '{asset}'")]
    MissingVersion { asset: String, subset: String },

    #[error("No look selected that matches asset '{0}'")]
    NoLookMatch(String),

    #[error("Scene error: {0}")]
    SceneError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Assignment error: {0}")]
    AssignError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type alias for look-manager operations
pub type Result<T> = std::result::Result<T, LookError>;
