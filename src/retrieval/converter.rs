//! Converts a verified upstream release into per-target dependency records

use std::sync::Arc;

use tracing::info;

use crate::retrieval::archive::ArchiveEncoding;
use crate::retrieval::checksum::{
    CHECKSUM_MANIFEST_NAME, Checksum, ChecksumValidator, parse_manifest,
};
use crate::retrieval::error::RetrievalError;
use crate::retrieval::http;
use crate::retrieval::identifiers::{generate_purl, icu_cpe};
use crate::retrieval::targets::supported_targets;
use crate::retrieval::types::{
    DEPENDENCY_ID, DEPENDENCY_NAME, DependencyRecord, LICENSES, PlatformStackTarget, Release,
    ReleaseFile, ReleaseFiles,
};
use crate::retrieval::verifier::{PgpVerifier, SignatureVerifier};

/// Source archive naming conventions across upstream release eras, tried in order
const SOURCE_NAME_CANDIDATES: [fn(&str) -> String; 2] = [underscored_src_name, dotted_sources_name];

fn underscored_src_name(version: &str) -> String {
    format!("icu4c-{}-src.tgz", version.replace('.', "_"))
}

fn dotted_sources_name(version: &str) -> String {
    format!("icu4c-{version}-sources.tgz")
}

const SIGNATURE_SUFFIX: &str = ".asc";

/// Turns releases into dependency records after checking integrity and authenticity
pub struct ReleaseConverter {
    client: reqwest::Client,
    verifier: Arc<dyn SignatureVerifier>,
    targets: Vec<PlatformStackTarget>,
}

impl ReleaseConverter {
    pub fn new(verifier: Arc<dyn SignatureVerifier>) -> Self {
        Self {
            client: http::client(),
            verifier,
            targets: supported_targets(),
        }
    }

    /// Restricts the fan-out to the given targets
    pub fn with_targets(mut self, targets: Vec<PlatformStackTarget>) -> Self {
        self.targets = targets;
        self
    }

    /// Produces one record per supported target for `release`.
    ///
    /// Any failure aborts the whole release; no partial record list is returned.
    pub async fn convert(&self, release: &Release) -> Result<Vec<DependencyRecord>, RetrievalError> {
        let files = locate_release_files(release)?;

        let manifest = http::fetch_text(&self.client, &files.checksum_manifest.url).await?;
        let checksum = parse_manifest(&manifest, &files.source.name)?;

        self.validate_source(&files.source, &checksum).await?;
        self.verifier
            .verify(&files.signature.url, &files.source.url)
            .await?;

        let version = release.version.as_str();
        let cpe = icu_cpe(version);
        let purl = generate_purl(DEPENDENCY_ID, version, checksum.hex(), &files.source.url);
        let licenses: Vec<String> = LICENSES.iter().map(|l| l.to_string()).collect();

        let records = self
            .targets
            .iter()
            .map(|target| {
                info!(
                    "Generating metadata for {} {} {} {}",
                    target.os, target.arch, target.target, version
                );
                DependencyRecord {
                    id: DEPENDENCY_ID.to_string(),
                    name: DEPENDENCY_NAME.to_string(),
                    version: version.to_string(),
                    source: files.source.url.clone(),
                    source_checksum: checksum.to_string(),
                    cpe: cpe.clone(),
                    purl: purl.clone(),
                    licenses: licenses.clone(),
                    stacks: target.stacks.clone(),
                    os: target.os.clone(),
                    arch: target.arch.clone(),
                    target: target.target.clone(),
                }
            })
            .collect();

        Ok(records)
    }

    /// Streams the source archive through the hasher and checks its encoding
    async fn validate_source(
        &self,
        source: &ReleaseFile,
        checksum: &Checksum,
    ) -> Result<(), RetrievalError> {
        let mut response = http::get_success(&self.client, &source.url).await?;
        let mut validator = ChecksumValidator::new(checksum.clone());
        let mut header = Vec::with_capacity(ArchiveEncoding::SNIFF_LEN);

        while let Some(chunk) = response.chunk().await? {
            if header.len() < ArchiveEncoding::SNIFF_LEN {
                let take = (ArchiveEncoding::SNIFF_LEN - header.len()).min(chunk.len());
                header.extend_from_slice(&chunk[..take]);
            }
            validator.update(&chunk);
        }

        validator.finish()?;

        if ArchiveEncoding::sniff(&header).is_none() {
            return Err(RetrievalError::UnsupportedArchive {
                url: source.url.clone(),
            });
        }

        Ok(())
    }
}

impl Default for ReleaseConverter {
    fn default() -> Self {
        Self::new(Arc::new(PgpVerifier::default()))
    }
}

/// Finds the source archive, its signature, and the checksum manifest
pub fn locate_release_files(release: &Release) -> Result<ReleaseFiles, RetrievalError> {
    let find = |name: &str| release.files.iter().find(|f| f.name == name).cloned();

    let source_and_signature = SOURCE_NAME_CANDIDATES.iter().find_map(|candidate| {
        let source_name = candidate(&release.version);
        let signature_name = format!("{source_name}{SIGNATURE_SUFFIX}");
        Some((find(&source_name)?, find(&signature_name)?))
    });

    match (source_and_signature, find(CHECKSUM_MANIFEST_NAME)) {
        (Some((source, signature)), Some(checksum_manifest)) => Ok(ReleaseFiles {
            source,
            signature,
            checksum_manifest,
        }),
        _ => Err(RetrievalError::MissingReleaseFiles),
    }
}
