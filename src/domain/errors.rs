//! Domain error types
//!
//! This module defines the error hierarchy for the pipeline.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main pipeline error type
///
/// This is the primary error type used throughout the application.
/// Every variant is fatal for the operation that raised it; malformed
/// record fields never produce an error (they sanitize to null).
#[derive(Debug, Error)]
pub enum AlvysError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No credentials are registered for the requested tenant
    #[error("Credentials not found for SCAC '{0}'")]
    CredentialNotFound(String),

    /// Alvys API errors
    #[error("Alvys API error: {0}")]
    Api(#[from] ApiError),

    /// Warehouse errors
    #[error("Warehouse error: {0}")]
    Warehouse(#[from] WarehouseError),

    /// Snapshot store errors
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl AlvysError {
    /// Process exit code for this error
    ///
    /// `2` for configuration and credential problems, `4` when a remote
    /// system could not be reached, `5` for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            AlvysError::Configuration(_) | AlvysError::CredentialNotFound(_) => 2,
            AlvysError::Api(ApiError::ConnectionFailed(_))
            | AlvysError::Warehouse(WarehouseError::ConnectionFailed(_)) => 4,
            _ => 5,
        }
    }
}

/// Alvys API errors
///
/// Errors raised by the token exchange and the search endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server could not be reached
    #[error("Failed to connect to Alvys API: {0}")]
    ConnectionFailed(String),

    /// Token exchange was rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Non-success HTTP status on a search call
    #[error("Request to {url} failed with status {status}: {message}")]
    RequestFailed {
        url: String,
        status: u16,
        message: String,
    },

    /// Response body could not be understood
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

/// Warehouse errors
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// Failed to open the warehouse connection
    #[error("Failed to connect to warehouse: {0}")]
    ConnectionFailed(String),

    /// A chunk insert failed
    #[error("Insert into {table} failed: {message}")]
    InsertFailed { table: String, message: String },

    /// BEGIN/COMMIT/ROLLBACK failed
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// A lookup query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl From<std::io::Error> for AlvysError {
    fn from(err: std::io::Error) -> Self {
        AlvysError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AlvysError {
    fn from(err: serde_json::Error) -> Self {
        AlvysError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for AlvysError {
    fn from(err: toml::de::Error) -> Self {
        AlvysError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alvys_error_display() {
        let err = AlvysError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_credential_not_found_display() {
        let err = AlvysError::CredentialNotFound("QWIK".to_string());
        assert_eq!(err.to_string(), "Credentials not found for SCAC 'QWIK'");
    }

    #[test]
    fn test_api_error_conversion() {
        let api_err = ApiError::RequestFailed {
            url: "https://example.com/trips/search".to_string(),
            status: 500,
            message: "boom".to_string(),
        };
        let err: AlvysError = api_err.into();
        assert!(matches!(err, AlvysError::Api(_)));
        assert!(err.to_string().contains("status 500"));
    }

    #[test]
    fn test_warehouse_error_conversion() {
        let wh_err = WarehouseError::InsertFailed {
            table: "TRIPS_RAW".to_string(),
            message: "duplicate key".to_string(),
        };
        let err: AlvysError = wh_err.into();
        assert!(matches!(err, AlvysError::Warehouse(_)));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AlvysError::Configuration("x".into()).exit_code(), 2);
        assert_eq!(AlvysError::CredentialNotFound("x".into()).exit_code(), 2);
        assert_eq!(
            AlvysError::Api(ApiError::ConnectionFailed("x".into())).exit_code(),
            4
        );
        assert_eq!(
            AlvysError::Warehouse(WarehouseError::ConnectionFailed("x".into())).exit_code(),
            4
        );
        assert_eq!(AlvysError::Snapshot("x".into()).exit_code(), 5);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: AlvysError = io_err.into();
        assert!(matches!(err, AlvysError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: AlvysError = json_err.into();
        assert!(matches!(err, AlvysError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: AlvysError = toml_err.into();
        assert!(matches!(err, AlvysError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
