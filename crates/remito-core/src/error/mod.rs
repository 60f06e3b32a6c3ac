//! Error types and result aliases for remito operations.
//!
//! Configuration absence and remote fetch failures are not errors in remito;
//! they degrade to empty mappings or fallback values. What remains here are
//! the hard failures: I/O the caller asked for explicitly, invalid client
//! settings, and the database hand-off.

use thiserror::Error;

/// Boxed error returned by external collaborators (connection factories)
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Unified error type for all remito operations
#[derive(Error, Debug)]
pub enum RemitoError {
    // Config errors
    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // Client errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    // Bootstrap errors
    #[error("Database connection failed: {message}")]
    Database {
        message: String,
        #[source]
        source: BoxError,
    },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for remito operations
pub type RemitoResult<T> = Result<T, RemitoError>;

impl RemitoError {
    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Wrap a connection factory failure, keeping the original error as source
    pub fn database(source: BoxError) -> Self {
        let message = source.to_string();
        let message = if message.is_empty() {
            "unknown connection error".to_string()
        } else {
            message
        };
        Self::Database { message, source }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RemitoError::Network { .. } | RemitoError::Io { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            RemitoError::Network { .. } => {
                Some("Check the server URL and that the config API is reachable")
            },
            RemitoError::Database { .. } => {
                Some("Check the [db] section of defaults.ini and custom.ini")
            },
            RemitoError::ConfigValidation { .. } => {
                Some("Run 'remito show' to inspect the merged configuration")
            },
            RemitoError::Io { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_database_error_keeps_source() {
        let source: BoxError = Box::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        let err = RemitoError::database(source);

        assert_eq!(err.to_string(), "Database connection failed: connection refused");
        assert!(err.source().is_some());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_database_error_with_empty_message() {
        let source: BoxError = "".into();
        let err = RemitoError::database(source);

        match err {
            RemitoError::Database { message, .. } => {
                assert_eq!(message, "unknown connection error");
            }
            _ => panic!("Expected Database error"),
        }
    }

    #[test]
    fn test_suggestions() {
        let err = RemitoError::Network {
            message: "timeout".to_string(),
            source: None,
        };
        assert!(err.is_recoverable());
        assert!(err.suggestion().is_some());

        let err = RemitoError::io(
            "read failed".to_string(),
            std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        );
        assert!(err.suggestion().is_none());
    }
}
