use std::path::PathBuf;

use reqwest::StatusCode;

/// Failure talking to the weather provider.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{endpoint} request could not be sent: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("failed to parse {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{endpoint} response is incomplete: {reason}")]
    Malformed {
        endpoint: &'static str,
        reason: &'static str,
    },
}

/// Failure resolving the device position.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("geolocation is not supported on this device")]
    Unsupported,
    #[error("location permission denied")]
    PermissionDenied,
    #[error("could not determine position: {0}")]
    Position(String),
}

/// Failure reading or writing persisted dashboard state.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not determine platform data directory")]
    NoDataDir,
    #[error("storage I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Any failure a fetch operation can run into before it is turned into a
/// user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Location(#[from] LocationError),
}
