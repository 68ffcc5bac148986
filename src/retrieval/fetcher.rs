//! GitHub Releases API fetcher for upstream ICU releases

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::{DEFAULT_API_URL, RELEASES_PER_PAGE, UPSTREAM_REPOSITORY};
use crate::retrieval::error::RetrievalError;
use crate::retrieval::http;
use crate::retrieval::semver::parse_version;
use crate::retrieval::types::{Release, ReleaseFile};

/// Prefix upstream puts in front of the version in release names.
/// The trailing space is part of the prefix.
const RELEASE_NAME_PREFIX: &str = "ICU ";

/// Release entry from the GitHub Releases API
#[derive(Debug, Deserialize)]
struct ReleaseEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    prerelease: bool,
    #[serde(default)]
    assets: Vec<ReleaseFile>,
}

/// Enumerates published releases page by page
pub struct ReleaseFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl ReleaseFetcher {
    /// Creates a new ReleaseFetcher with a custom API base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: http::client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches every non-draft, non-prerelease release in upstream order.
    ///
    /// Stops at the first empty page. Any bad status, undecodable page, or
    /// unparsable version aborts the whole fetch.
    pub async fn get(&self) -> Result<Vec<Release>, RetrievalError> {
        let mut releases = Vec::new();
        let mut page = 1;

        loop {
            let url = format!(
                "{}/repos/{}/releases?per_page={}&page={}",
                self.base_url, UPSTREAM_REPOSITORY, RELEASES_PER_PAGE, page
            );

            let response = http::get_success(&self.client, &url).await?;
            let entries: Vec<ReleaseEntry> =
                response
                    .json()
                    .await
                    .map_err(|e| RetrievalError::InvalidResponse {
                        url: url.clone(),
                        reason: e.to_string(),
                    })?;

            if entries.is_empty() {
                break;
            }

            debug!("page {} returned {} releases", page, entries.len());

            for entry in entries {
                if entry.draft || entry.prerelease {
                    continue;
                }
                releases.push(into_release(entry)?);
            }

            page += 1;
        }

        info!("Fetched {} releases", releases.len());
        Ok(releases)
    }
}

impl Default for ReleaseFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn into_release(entry: ReleaseEntry) -> Result<Release, RetrievalError> {
    let name = entry.name.unwrap_or_default();
    let version = name
        .strip_prefix(RELEASE_NAME_PREFIX)
        .unwrap_or(&name)
        .to_string();

    let semver = parse_version(&version).map_err(|source| RetrievalError::InvalidVersion {
        version: version.clone(),
        source,
    })?;

    Ok(Release {
        semver,
        version,
        files: entry.assets,
    })
}
