//! Client error types

use std::path::PathBuf;

use fah_project::ProjectError;
use thiserror::Error;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to a SysAP or loading a project
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The SysAP answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// settings.json could not be parsed
    #[error("invalid settings.json: {0}")]
    Settings(#[from] serde_json::Error),

    /// A JID without the parts we need
    #[error("invalid JID '{0}'")]
    InvalidJid(String),

    /// The configured user is not known to the SysAP
    #[error("Invalid username: {username} not in {known:?}")]
    UnknownUser { username: String, known: Vec<String> },

    /// An RPC was attempted before logging in
    #[error("not connected to the SysAP")]
    NotConnected,

    /// The RPC transport failed (connection, login, call)
    #[error("RPC transport error: {0}")]
    Transport(String),

    /// The RPC returned a value of the wrong type
    #[error("{method} returned {found}, expected a string")]
    UnexpectedResponse { method: String, found: &'static str },

    /// A saved project description could not be read
    #[error("failed to read project description {path}: {source}")]
    ReadDump {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project description could not be loaded
    #[error(transparent)]
    Project(#[from] ProjectError),
}
