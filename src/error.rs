//! Import error types and exit codes

use thiserror::Error;

/// Exit codes for the importer
/// - 0: Success (per-record import failures included)
/// - 1: Configuration or local I/O error
/// - 2: Authentication failed
/// - 3: Network error
/// - 4: Validation error
/// - 5: Server error
pub type ImportResult<T> = Result<T, ImportError>;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("Connection '{name}' is not a database connection (strategy: {strategy})")]
    NotDatabaseConnection { name: String, strategy: String },

    #[error("Connection '{connection}' is not enabled for client {client_id}")]
    ClientNotEnabled {
        connection: String,
        client_id: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Connection failed: {0}\n\nTroubleshooting:\n  - Check your internet connection\n  - Verify the tenant domain is correct\n  - Try again in a few moments")]
    ConnectionFailed(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl ImportError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ImportError::Config(_) | ImportError::Io(_) => 1,
            ImportError::AuthenticationFailed(_) => 2,
            ImportError::Network(_) | ImportError::ConnectionFailed(_) => 3,
            ImportError::ConnectionNotFound(_)
            | ImportError::NotDatabaseConnection { .. }
            | ImportError::ClientNotEnabled { .. } => 4,
            ImportError::Api { status, .. } => {
                if *status >= 500 {
                    5
                } else if *status == 401 || *status == 403 {
                    2
                } else {
                    4
                }
            }
        }
    }

    /// Print the error to stderr with appropriate formatting
    pub fn print(&self) {
        let use_color = std::env::var("NO_COLOR").is_err();

        if use_color {
            eprintln!("\x1b[31mError:\x1b[0m {}", self);
        } else {
            eprintln!("Error: {}", self);
        }

        if let Some(suggestion) = self.suggestion() {
            if use_color {
                eprintln!("\n\x1b[33mSuggestion:\x1b[0m {}", suggestion);
            } else {
                eprintln!("\nSuggestion: {}", suggestion);
            }
        }
    }

    /// Get a suggested action for this error
    fn suggestion(&self) -> Option<&'static str> {
        match self {
            ImportError::AuthenticationFailed(_) => Some(
                "Check the client id and secret, and that the client is authorized for the Management API.",
            ),
            ImportError::ConnectionNotFound(_) => {
                Some("Check the connection name in the dashboard under Authentication > Database.")
            }
            ImportError::ClientNotEnabled { .. } => {
                Some("Enable the client on the connection's Applications tab.")
            }
            ImportError::ConnectionFailed(_) => Some("Check your network connection and try again."),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ImportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            ImportError::ConnectionFailed(e.to_string())
        } else if e.is_timeout() {
            ImportError::Network("Request timed out".to_string())
        } else {
            ImportError::Network(e.to_string())
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(e: std::io::Error) -> Self {
        ImportError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(e: serde_json::Error) -> Self {
        ImportError::Config(format!("JSON error: {}", e))
    }
}

impl From<globset::Error> for ImportError {
    fn from(e: globset::Error) -> Self {
        ImportError::Config(format!("Invalid file pattern: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_config() {
        assert_eq!(ImportError::Config("missing".to_string()).exit_code(), 1);
    }

    #[test]
    fn test_exit_code_authentication() {
        assert_eq!(
            ImportError::AuthenticationFailed("denied".to_string()).exit_code(),
            2
        );
    }

    #[test]
    fn test_exit_code_network() {
        assert_eq!(ImportError::Network("reset".to_string()).exit_code(), 3);
        assert_eq!(
            ImportError::ConnectionFailed("refused".to_string()).exit_code(),
            3
        );
    }

    #[test]
    fn test_exit_code_validation() {
        assert_eq!(
            ImportError::ConnectionNotFound("users".to_string()).exit_code(),
            4
        );
        assert_eq!(
            ImportError::ClientNotEnabled {
                connection: "users".to_string(),
                client_id: "abc".to_string()
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn test_exit_code_api_error_5xx() {
        assert_eq!(
            ImportError::Api {
                status: 503,
                message: "unavailable".to_string()
            }
            .exit_code(),
            5
        );
    }

    #[test]
    fn test_exit_code_api_error_403() {
        assert_eq!(
            ImportError::Api {
                status: 403,
                message: "insufficient scope".to_string()
            }
            .exit_code(),
            2
        );
    }

    #[test]
    fn test_error_display_not_database() {
        let error = ImportError::NotDatabaseConnection {
            name: "github".to_string(),
            strategy: "github".to_string(),
        };
        assert!(error.to_string().contains("not a database connection"));
    }
}
