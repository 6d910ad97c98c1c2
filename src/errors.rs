//! Error types for instance resolution

use thiserror::Error;

use crate::domain::ProviderIdError;

/// Errors reported by a device directory
///
/// Never interpreted or retried by the resolver, only wrapped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Network/transport failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Request exceeded its deadline
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Request was cancelled before completing
    #[error("request cancelled")]
    Cancelled,

    /// Directory answered with a non-success status
    #[error("directory returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Response could not be decoded
    #[error("failed to decode directory response: {0}")]
    Decode(String),
}

/// Result type for directory queries
pub type DirectoryResult<T> = Result<T, DirectoryError>;

impl From<serde_json::Error> for DirectoryError {
    fn from(err: serde_json::Error) -> Self {
        DirectoryError::Decode(err.to_string())
    }
}

/// Flat classification of an [`InstanceError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyNodeName,
    EmptyIdentifier,
    UnsupportedScheme,
    MalformedKey,
    NotFound,
    Directory,
}

/// Errors that can occur while resolving an instance
#[derive(Debug, Error)]
pub enum InstanceError {
    /// Neither providerID nor node name was given
    #[error("node name cannot be empty")]
    EmptyNodeName,

    /// providerID required but missing
    #[error("providerID cannot be empty")]
    EmptyIdentifier,

    /// providerID has an unsupported scheme or a malformed key
    #[error(transparent)]
    InvalidIdentifier(ProviderIdError),

    /// Identifier or name is well-formed but no device matches
    #[error("instance not found: {lookup}")]
    NotFound { lookup: String },

    /// Device directory failure, passed through
    #[error("device directory error during {operation} for {target}")]
    Directory {
        operation: &'static str,
        target: String,
        #[source]
        source: DirectoryError,
    },
}

impl InstanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyNodeName => ErrorKind::EmptyNodeName,
            Self::EmptyIdentifier => ErrorKind::EmptyIdentifier,
            Self::InvalidIdentifier(ProviderIdError::Empty) => ErrorKind::EmptyIdentifier,
            Self::InvalidIdentifier(ProviderIdError::UnsupportedScheme { .. }) => {
                ErrorKind::UnsupportedScheme
            }
            Self::InvalidIdentifier(ProviderIdError::MalformedKey { .. }) => {
                ErrorKind::MalformedKey
            }
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Directory { .. } => ErrorKind::Directory,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<ProviderIdError> for InstanceError {
    fn from(err: ProviderIdError) -> Self {
        match err {
            ProviderIdError::Empty => InstanceError::EmptyIdentifier,
            other => InstanceError::InvalidIdentifier(other),
        }
    }
}

/// Result type for instance operations
pub type InstanceResult<T> = Result<T, InstanceError>;
