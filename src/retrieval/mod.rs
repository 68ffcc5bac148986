//! Release metadata retrieval and verification
//!
//! This module discovers upstream ICU releases, checks that their source
//! archives are intact and signed by a trusted key, and emits one dependency
//! record per supported platform/stack target.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Fetcher   │────▶│  Selector   │────▶│  Converter  │────▶│   Output    │
//! │ (releases)  │     │(new versions│     │ (records)   │     │   (JSON)    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                                           │         │
//!                                           ▼         ▼
//!                                   ┌─────────────┐ ┌─────────────┐
//!                                   │  Checksum   │ │  Verifier   │
//!                                   │ (SHA-512)   │ │   (PGP)     │
//!                                   └─────────────┘ └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`fetcher`]: Paginated GitHub Releases API client
//! - [`verifier`]: Detached signature checks against the trusted keyring
//! - [`keyring`]: Embedded armored public keys
//! - [`converter`]: Release to dependency record conversion
//! - [`checksum`]: Manifest parsing and streamed digest validation
//! - [`selector`]: Chooses versions missing from buildpack.toml
//! - [`output`]: JSON metadata writer
//! - [`pipeline`]: Runs every stage in order
//! - [`error`]: Error type shared by all stages

pub mod archive;
pub mod checksum;
pub mod converter;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod identifiers;
pub mod keyring;
pub mod output;
pub mod pipeline;
pub mod selector;
pub mod semver;
pub mod targets;
pub mod types;
pub mod verifier;

pub use converter::ReleaseConverter;
pub use error::RetrievalError;
pub use fetcher::ReleaseFetcher;
pub use keyring::TrustedKeyring;
pub use output::write_output;
pub use pipeline::Pipeline;
pub use types::{DependencyRecord, PlatformStackTarget, Release, ReleaseFile};
pub use verifier::{PgpVerifier, SignatureVerifier};
