//! Error type definitions
//!
//! Every step of the retrieval sequence fails with its own variant so the
//! caller can tell an authentication problem from a missing device, token,
//! key identifier or key.

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for keysword
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credentials rejected by the console or the REST API
    #[error("Authentication failed: {reason}")]
    Authentication { reason: String },

    /// No computer matches the supplied name or ID
    #[error("No device found for {device}")]
    DeviceNotFound { device: String },

    /// The inventory page carried no session token
    #[error("Unable to find session token")]
    SessionTokenNotFound,

    /// The inventory page carried no FileVault key marker
    #[error("Unable to find FileVault key ID")]
    KeyIdNotFound,

    /// The ajax response carried no individual key
    #[error("Unable to find FileVault key")]
    KeyNotFound,

    /// A status code the step does not know how to handle
    #[error("Unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { endpoint: String, status: StatusCode },

    /// A response body that could not be interpreted
    #[error("Malformed response: {details}")]
    MalformedResponse { details: String },

    /// Network/HTTP client errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// XML parsing errors
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// URL construction errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration file parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an authentication error
    pub fn authentication(reason: impl Into<String>) -> Self {
        Self::Authentication {
            reason: reason.into(),
        }
    }

    /// Create a device-not-found error
    pub fn device_not_found(device: impl Into<String>) -> Self {
        Self::DeviceNotFound {
            device: device.into(),
        }
    }

    /// Create an unexpected status error
    pub fn unexpected_status(endpoint: impl Into<String>, status: StatusCode) -> Self {
        Self::UnexpectedStatus {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Create a malformed response error
    pub fn malformed(details: impl Into<String>) -> Self {
        Self::MalformedResponse {
            details: details.into(),
        }
    }

    /// Whether the error means "the server has nothing for this device"
    /// rather than a failure to talk to it.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DeviceNotFound { .. }
                | Self::SessionTokenNotFound
                | Self::KeyIdNotFound
                | Self::KeyNotFound
        )
    }
}
