//! Shared data model for the retrieval pipeline

use semver::Version;
use serde::{Deserialize, Serialize};

/// Identifier of the dependency in buildpack metadata
pub const DEPENDENCY_ID: &str = "icu";

/// Human readable name of the dependency
pub const DEPENDENCY_NAME: &str = "ICU";

/// Licenses the ICU source distribution is published under
pub const LICENSES: [&str; 4] = ["BSD-2-Clause", "BSD-3-Clause", "ICU", "Unicode-TOU"];

/// A downloadable asset attached to an upstream release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseFile {
    pub name: String,
    #[serde(rename = "browser_download_url")]
    pub url: String,
}

impl ReleaseFile {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A published, non-draft, non-prerelease upstream release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Parsed semantic version (partial versions padded with zeros)
    pub semver: Version,
    /// Version as displayed upstream, e.g. "72.1"
    pub version: String,
    pub files: Vec<ReleaseFile>,
}

/// The three assets a release must carry to be converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseFiles {
    pub source: ReleaseFile,
    pub signature: ReleaseFile,
    pub checksum_manifest: ReleaseFile,
}

/// One supported deployment target for the emitted metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformStackTarget {
    pub stacks: Vec<String>,
    pub target: String,
    pub os: String,
    pub arch: String,
}

/// Dependency metadata for one release on one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    pub id: String,
    pub name: String,
    pub version: String,
    pub source: String,
    #[serde(rename = "source-checksum")]
    pub source_checksum: String,
    pub cpe: String,
    pub purl: String,
    pub licenses: Vec<String>,
    pub stacks: Vec<String>,
    pub os: String,
    pub arch: String,
    pub target: String,
}
