//! Checksum manifest parsing and streamed digest validation

use std::fmt;

use regex::Regex;
use sha2::{Digest, Sha512};

use crate::retrieval::error::RetrievalError;

/// Name of the manifest file published alongside each release
pub const CHECKSUM_MANIFEST_NAME: &str = "SHASUM512.txt";

/// An algorithm-qualified digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum {
    hex: String,
}

impl Checksum {
    pub const ALGORITHM: &'static str = "sha512";

    pub fn sha512(hex: &str) -> Self {
        Self {
            hex: hex.to_ascii_lowercase(),
        }
    }

    /// Bare hex digest without the algorithm prefix
    pub fn hex(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", Self::ALGORITHM, self.hex)
    }
}

/// Find the digest for `file_name` in a `sha512sum`-style manifest.
///
/// Accepts both `<hex>  <name>` and `<hex> *<name>` lines. Digest and name
/// must share a line. The first line whose file name is exactly `file_name`
/// wins.
pub fn parse_manifest(manifest: &str, file_name: &str) -> Result<Checksum, RetrievalError> {
    let pattern = format!(
        r"(?m)^([0-9a-fA-F]+)[ \t*]+{}[ \t\r]*$",
        regex::escape(file_name)
    );
    let unparsable = || RetrievalError::UnparsableChecksumManifest {
        name: CHECKSUM_MANIFEST_NAME.to_string(),
    };
    let re = Regex::new(&pattern).map_err(|_| unparsable())?;

    re.captures(manifest)
        .and_then(|caps| caps.get(1))
        .map(|digest| Checksum::sha512(digest.as_str()))
        .ok_or_else(unparsable)
}

/// Incrementally hashes a body and compares it against an expected checksum
pub struct ChecksumValidator {
    expected: Checksum,
    hasher: Sha512,
}

impl ChecksumValidator {
    pub fn new(expected: Checksum) -> Self {
        Self {
            expected,
            hasher: Sha512::new(),
        }
    }

    pub fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
    }

    /// Consume the validator, failing if the digest differs from the expected one
    pub fn finish(self) -> Result<(), RetrievalError> {
        let actual = format!("{:x}", self.hasher.finalize());
        if actual == self.expected.hex {
            Ok(())
        } else {
            Err(RetrievalError::ChecksumMismatch {
                expected: self.expected.to_string(),
                actual: Checksum::sha512(&actual).to_string(),
            })
        }
    }
}
