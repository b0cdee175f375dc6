//! Error types for the Bazaar storefront.

use thiserror::Error;

/// A shared error type for the entire storefront.
///
/// The first group of variants is user-facing: adapters report them to the
/// invoking actor only. The second group is plumbing and is fatal to the
/// operation that produced it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BazaarError {
    /// Actor is neither the workspace owner nor an administrator
    #[error("Not authorized to {action}")]
    Unauthorized { action: String },

    /// Authoring step applied to an absent, expired or already finalized session
    #[error("No authoring session in progress for actor {actor}")]
    SessionNotFound { actor: String },

    /// Finalize called on a draft without options
    #[error("A bundle needs at least one option before it can be finalized")]
    EmptyBundle,

    /// No container configured for transaction channels
    #[error("No container configured for transaction channels")]
    CategoryUnset,

    /// Configured container no longer resolves in the workspace
    #[error("Container not found: {container}")]
    CategoryNotFound { container: String },

    /// Channel already deleted
    #[error("Channel not found: {channel}")]
    ChannelNotFound { channel: String },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Buyer selected a position that does not exist
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BazaarError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Unauthorized error for the named action
    pub fn unauthorized(action: impl Into<String>) -> Self {
        Self::Unauthorized {
            action: action.into(),
        }
    }

    /// Creates a SessionNotFound error
    pub fn session_not_found(actor: impl ToString) -> Self {
        Self::SessionNotFound {
            actor: actor.to_string(),
        }
    }

    /// Creates a CategoryNotFound error
    pub fn category_not_found(container: impl ToString) -> Self {
        Self::CategoryNotFound {
            container: container.to_string(),
        }
    }

    /// Creates a ChannelNotFound error
    pub fn channel_not_found(channel: impl ToString) -> Self {
        Self::ChannelNotFound {
            channel: channel.to_string(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an Unauthorized error
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if this is a ChannelNotFound error
    pub fn is_channel_not_found(&self) -> bool {
        matches!(self, Self::ChannelNotFound { .. })
    }

    /// Returns true for errors that are reported to the invoking actor and
    /// require a new user action, as opposed to storage or internal faults.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. }
                | Self::SessionNotFound { .. }
                | Self::EmptyBundle
                | Self::CategoryUnset
                | Self::CategoryNotFound { .. }
                | Self::ChannelNotFound { .. }
                | Self::NotFound { .. }
                | Self::InvalidSelection(_)
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for BazaarError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for BazaarError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for BazaarError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, BazaarError>`.
pub type Result<T> = std::result::Result<T, BazaarError>;
