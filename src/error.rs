// error.rs - Error types for the MIDI link and configuration

use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a MIDI transport.
///
/// None of these are fatal: the link logs them and keeps running with
/// whatever endpoints it managed to bind.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The transport refused to hand out a session.
    #[error("MIDI access denied: {0}")]
    AccessDenied(String),

    /// An endpoint was listed but could not be opened.
    #[error("MIDI endpoint <{name}> unavailable: {reason}")]
    EndpointUnavailable { name: String, reason: String },

    /// A bound output rejected a message.
    #[error("MIDI send failed: {0}")]
    Send(String),
}

/// Failures while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
