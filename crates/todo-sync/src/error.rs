//! Sync Errors
//!
//! Every failure that can cross a storage or messaging boundary.

use serde::{Deserialize, Serialize};

/// Common result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Storage and messaging failures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SyncError {
    /// Reading or writing the shared key-value store failed
    Storage(String),
    /// A message could not be delivered (closed tab, no receiver)
    Messaging(String),
    /// A value crossing the JS boundary did not have the expected shape
    Decode(String),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::Storage(msg) => write!(f, "Storage error: {}", msg),
            SyncError::Messaging(msg) => write!(f, "Messaging error: {}", msg),
            SyncError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<serde_json::Error> for SyncError {
    fn from(e: serde_json::Error) -> Self {
        SyncError::Decode(e.to_string())
    }
}
