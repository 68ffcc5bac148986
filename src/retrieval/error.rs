use std::fmt;

use thiserror::Error;

use crate::parser::ParseError;

#[derive(Debug, Error)]
pub enum RetrievalError {
    // Transport
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("received a non 200 status code from {url}: status code {status} received")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Invalid response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },

    // Integrity
    #[error("the given checksum of the source does not match with downloaded source: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    // Authenticity
    #[error("no valid trust material: {}", KeyFailures(.failures))]
    NoValidTrustMaterial { failures: Vec<KeyFailure> },

    #[error("no trusted public keys found in {path}")]
    EmptyKeyring { path: String },

    // Structural
    #[error("required files are missing from the release")]
    MissingReleaseFiles,

    #[error("the following version string could not be parsed {version:?}: {source}")]
    InvalidVersion {
        version: String,
        source: semver::Error,
    },

    #[error("unable to parse the checksum manifest {name}")]
    UnparsableChecksumManifest { name: String },

    #[error("unsupported archive type for {url}")]
    UnsupportedArchive { url: String },

    #[error("Invalid buildpack descriptor: {0}")]
    InvalidDescriptor(#[from] ParseError),

    // I/O
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single trusted key did not validate a signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyFailure {
    /// The armored block could not be read as a public key
    Unreadable { index: usize, reason: String },
    /// The key was read but the signature did not check out against it
    SignatureRejected { index: usize, reason: String },
}

impl fmt::Display for KeyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyFailure::Unreadable { index, reason } => {
                write!(f, "key #{index}: failed to read armored key: {reason}")
            }
            KeyFailure::SignatureRejected { index, reason } => {
                write!(f, "key #{index}: failed to check signature: {reason}")
            }
        }
    }
}

struct KeyFailures<'a>(&'a [KeyFailure]);

impl fmt::Display for KeyFailures<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("keyring is empty");
        }
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl RetrievalError {
    pub(crate) fn unexpected_status(url: &str, status: reqwest::StatusCode) -> Self {
        RetrievalError::UnexpectedStatus {
            url: url.to_string(),
            status: status.as_u16(),
        }
    }
}
