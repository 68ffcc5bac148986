//! End-to-end retrieval run: fetch, select, convert, write

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::config::RetrievalConfig;
use crate::retrieval::converter::ReleaseConverter;
use crate::retrieval::error::RetrievalError;
use crate::retrieval::fetcher::ReleaseFetcher;
use crate::retrieval::keyring::{EMBEDDED_KEYS_PATH, TrustedKeyring};
use crate::retrieval::output::write_output;
use crate::retrieval::selector::find_new_versions;
use crate::retrieval::types::DEPENDENCY_ID;
use crate::retrieval::verifier::PgpVerifier;

pub struct Pipeline {
    fetcher: ReleaseFetcher,
    converter: ReleaseConverter,
}

impl Pipeline {
    pub fn new(fetcher: ReleaseFetcher, converter: ReleaseConverter) -> Self {
        Self { fetcher, converter }
    }

    /// Pipeline against the configured API, verifying with the embedded keyring.
    ///
    /// Fails before any request is made when the bundled key file holds no keys.
    pub fn from_config(config: &RetrievalConfig) -> Result<Self, RetrievalError> {
        Self::with_keyring(config, TrustedKeyring::embedded(), EMBEDDED_KEYS_PATH)
    }

    fn with_keyring(
        config: &RetrievalConfig,
        keyring: &TrustedKeyring,
        keyring_path: &str,
    ) -> Result<Self, RetrievalError> {
        if keyring.is_empty() {
            return Err(RetrievalError::EmptyKeyring {
                path: keyring_path.to_string(),
            });
        }

        Ok(Self::new(
            ReleaseFetcher::new(&config.api_url),
            ReleaseConverter::new(Arc::new(PgpVerifier::new(keyring.clone()))),
        ))
    }

    /// Runs the whole pipeline and returns the number of records written.
    ///
    /// Stops at the first release that fails to convert; nothing is written then.
    pub async fn run(&self, buildpack_toml: &Path, output: &Path) -> Result<usize, RetrievalError> {
        let releases = self.fetcher.get().await?;

        let versions: Vec<String> = releases.iter().map(|r| r.semver.to_string()).collect();
        let new_versions = find_new_versions(buildpack_toml, DEPENDENCY_ID, &versions)?;

        let mut records = Vec::new();
        for version in &new_versions {
            for release in releases.iter().filter(|r| r.semver.to_string() == *version) {
                info!("Converting release {}", release.version);
                records.extend(self.converter.convert(release).await?);
            }
        }

        write_output(output, &records)?;
        info!(
            "Generated {} records for {} new versions",
            records.len(),
            new_versions.len()
        );

        Ok(records.len())
    }
}
