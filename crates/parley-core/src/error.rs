//! Error types for Parley.

use thiserror::Error;

/// A shared error type for the entire Parley workspace.
///
/// Two families exist: recoverable external-call failures (`Model`,
/// `Timeout`, `InvalidResponse`, `Serialization`), which the application
/// layer always converts into a fallback value, and user input rejections
/// (`EmptyInput`, `TurnInProgress`). Everything else is local misuse or
/// configuration trouble.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParleyError {
    /// The user submitted an empty (or whitespace-only) message
    #[error("Message text must not be empty")]
    EmptyInput,

    /// A turn is already outstanding for this session
    #[error("A turn is already in progress")]
    TurnInProgress,

    /// Replay step outside the committed history
    #[error("Replay step {requested} is out of range (history has {available} messages)")]
    ReplayOutOfRange { requested: usize, available: usize },

    /// A metric value outside 0..=100
    #[error("Metric '{metric}' out of range: {value}")]
    MetricOutOfRange { metric: String, value: i64 },

    /// Scenario definition is incomplete or inconsistent
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The generative model call failed (network, HTTP status, empty output)
    #[error("Model call failed: {message}")]
    Model {
        status_code: Option<u16>,
        message: String,
    },

    /// The model answered, but the answer violates the declared contract
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    /// The external call did not finish within the configured bound
    #[error("Model call timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Prompt template error
    #[error("Template error: {0}")]
    Template(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ParleyError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Model error without an HTTP status
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model {
            status_code: None,
            message: message.into(),
        }
    }

    /// Creates a Model error carrying the HTTP status code
    pub fn model_status(status_code: u16, message: impl Into<String>) -> Self {
        Self::Model {
            status_code: Some(status_code),
            message: message.into(),
        }
    }

    /// Creates an InvalidResponse error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Creates an InvalidScenario error
    pub fn invalid_scenario(message: impl Into<String>) -> Self {
        Self::InvalidScenario(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error came from talking to the external model.
    ///
    /// These are the failures every call site degrades into a fallback value.
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            Self::Model { .. }
                | Self::InvalidResponse(_)
                | Self::Timeout { .. }
                | Self::Serialization { .. }
        )
    }

    /// Check if this is a rejected user submission
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::TurnInProgress)
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ParleyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ParleyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ParleyError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ParleyError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from String (for error messages)
impl From<String> for ParleyError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, ParleyError>`.
pub type Result<T> = std::result::Result<T, ParleyError>;
