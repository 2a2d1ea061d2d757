use std::fmt;

/// The two failure families the store recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    StorageRead,
    StorageWrite,
}

#[derive(Debug)]
pub enum StoreError {
    /// Durable data exists but could not be read
    ReadIo { key: String, source: std::io::Error },

    /// Durable data is not a knowledge base
    Malformed { key: String, source: serde_json::Error },

    /// Durable write rejected by the substrate
    WriteIo { key: String, source: std::io::Error },

    /// Knowledge base could not be serialized
    Serialize { key: String, source: serde_json::Error },

    /// Value larger than the substrate allows
    QuotaExceeded { key: String, needed: usize, quota: usize },
}

impl StoreError {
    pub fn kind(&self) -> FailureKind {
        match self {
            StoreError::ReadIo { .. } | StoreError::Malformed { .. } => FailureKind::StorageRead,
            StoreError::WriteIo { .. }
            | StoreError::Serialize { .. }
            | StoreError::QuotaExceeded { .. } => FailureKind::StorageWrite,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ReadIo { key, source } => {
                write!(f, "Failed to read '{}': {}", key, source)
            }
            StoreError::Malformed { key, source } => {
                write!(f, "Stored data under '{}' is malformed: {}", key, source)
            }
            StoreError::WriteIo { key, source } => {
                write!(f, "Failed to write '{}': {}", key, source)
            }
            StoreError::Serialize { key, source } => {
                write!(f, "Failed to serialize data for '{}': {}", key, source)
            }
            StoreError::QuotaExceeded { key, needed, quota } => {
                write!(
                    f,
                    "Storage quota exceeded writing '{}' ({} bytes, quota {})",
                    key, needed, quota
                )
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::ReadIo { source, .. } => Some(source),
            StoreError::Malformed { source, .. } => Some(source),
            StoreError::WriteIo { source, .. } => Some(source),
            StoreError::Serialize { source, .. } => Some(source),
            StoreError::QuotaExceeded { .. } => None,
        }
    }
}
