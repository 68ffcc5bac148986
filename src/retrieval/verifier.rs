//! Detached PGP signature verification against the trusted keyring

use std::io::Cursor;

#[cfg(test)]
use mockall::automock;
use pgp::{Deserializable, SignedPublicKey, StandaloneSignature};
use tracing::{debug, warn};

use crate::retrieval::error::{KeyFailure, RetrievalError};
use crate::retrieval::http;
use crate::retrieval::keyring::TrustedKeyring;

/// Proves that an artifact was signed by trusted material
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait SignatureVerifier: Send + Sync {
    /// Downloads `target_url` and its detached signature at `signature_url`
    /// and checks the signature.
    ///
    /// # Returns
    /// * `Ok(())` - A trusted key validated the signature
    /// * `Err(RetrievalError)` - A download failed or no key validated it
    async fn verify(&self, signature_url: &str, target_url: &str) -> Result<(), RetrievalError>;
}

/// [`SignatureVerifier`] backed by an armored PGP keyring
pub struct PgpVerifier {
    client: reqwest::Client,
    keyring: TrustedKeyring,
}

impl PgpVerifier {
    /// Creates a verifier trusting the given keyring
    pub fn new(keyring: TrustedKeyring) -> Self {
        Self {
            client: http::client(),
            keyring,
        }
    }
}

impl Default for PgpVerifier {
    fn default() -> Self {
        Self::new(TrustedKeyring::embedded().clone())
    }
}

#[async_trait::async_trait]
impl SignatureVerifier for PgpVerifier {
    async fn verify(&self, signature_url: &str, target_url: &str) -> Result<(), RetrievalError> {
        let target = http::fetch_bytes(&self.client, target_url).await?;
        let signature = http::fetch_bytes(&self.client, signature_url).await?;

        verify_detached(&self.keyring, &signature, &target)
    }
}

/// Check a detached signature over `content`, trying each key in order.
///
/// The signature may be ASCII-armored or binary. The first key that
/// validates it wins; otherwise every per-key failure is reported.
pub fn verify_detached(
    keyring: &TrustedKeyring,
    signature: &[u8],
    content: &[u8],
) -> Result<(), RetrievalError> {
    let signature = parse_signature(signature);
    let mut failures = Vec::new();

    for (index, armored) in keyring.keys().iter().enumerate() {
        let key = match read_key(armored) {
            Ok(key) => key,
            Err(reason) => {
                warn!("failed to read armored key #{}: {}", index, reason);
                failures.push(KeyFailure::Unreadable { index, reason });
                continue;
            }
        };

        let checked = match &signature {
            Ok(signature) => check_signature(&key, signature, content),
            Err(reason) => Err(reason.clone()),
        };

        match checked {
            Ok(()) => {
                debug!("signature validated by key #{}", index);
                return Ok(());
            }
            Err(reason) => {
                warn!("failed to check signature with key #{}: {}", index, reason);
                failures.push(KeyFailure::SignatureRejected { index, reason });
            }
        }
    }

    Err(RetrievalError::NoValidTrustMaterial { failures })
}

fn read_key(armored: &str) -> Result<SignedPublicKey, String> {
    let (key, _headers) = SignedPublicKey::from_armor_single(Cursor::new(armored.as_bytes()))
        .map_err(|e| e.to_string())?;
    key.verify().map_err(|e| e.to_string())?;
    Ok(key)
}

fn parse_signature(bytes: &[u8]) -> Result<StandaloneSignature, String> {
    let is_armored = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .is_some_and(|start| bytes[start..].starts_with(b"-----BEGIN"));

    let parsed = if is_armored {
        StandaloneSignature::from_armor_single(Cursor::new(bytes)).map(|(signature, _)| signature)
    } else {
        StandaloneSignature::from_bytes(Cursor::new(bytes))
    };

    parsed.map_err(|e| format!("unreadable detached signature: {e}"))
}

/// Signatures may be issued by the primary key or any signing subkey
fn check_signature(
    key: &SignedPublicKey,
    signature: &StandaloneSignature,
    content: &[u8],
) -> Result<(), String> {
    let primary = match signature.verify(key, content) {
        Ok(()) => return Ok(()),
        Err(e) => e.to_string(),
    };

    if key
        .public_subkeys
        .iter()
        .any(|subkey| signature.verify(subkey, content).is_ok())
    {
        return Ok(());
    }

    Err(primary)
}
