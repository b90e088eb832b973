//! Error types for the image_color_picker library

use thiserror::Error;

/// Result type alias for picker operations
pub type Result<T> = std::result::Result<T, PickerError>;

/// Every failure the picker core and its async layers can surface.
#[derive(Error, Debug)]
pub enum PickerError {
    /// A caller-supplied value cannot be processed (empty pixel block,
    /// out-of-range probe geometry, unknown pooling strategy, ...)
    #[error("Invalid argument: {parameter} ({reason})")]
    InvalidArgument { parameter: String, reason: String },

    /// Picker configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Image file could not be loaded or decoded
    #[error("Failed to load image: {0}")]
    ImageError(#[from] image::ImageError),

    /// The picker actor stopped before answering
    #[error("Picker channel closed during {operation}")]
    ChannelClosed { operation: String },

    /// A sampling worker panicked or was cancelled
    #[error("Sampling task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

impl PickerError {
    pub fn invalid_argument(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with its underlying cause
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn channel_closed(operation: impl Into<String>) -> Self {
        Self::ChannelClosed {
            operation: operation.into(),
        }
    }

    /// True for the `InvalidArgument` class of failures
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PickerError::InvalidArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_message_names_parameter() {
        let err = PickerError::invalid_argument("probe_radius", "must be >= 0, got -1");
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "Invalid argument: probe_radius (must be >= 0, got -1)"
        );
    }

    #[test]
    fn config_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = PickerError::config("cannot read picker.json", io);
        assert!(!err.is_invalid_argument());
        assert!(std::error::Error::source(&err).is_some());
    }
}
