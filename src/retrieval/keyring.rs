//! Embedded trust material for release signature checks

use std::sync::LazyLock;

const BEGIN_PUBLIC_KEY: &str = "-----BEGIN PGP PUBLIC KEY BLOCK-----";
const END_PUBLIC_KEY: &str = "-----END PGP PUBLIC KEY BLOCK-----";

/// Location of the bundled key file, relative to the crate root
pub const EMBEDDED_KEYS_PATH: &str = "keys/icu-release-keys.asc";

/// Release signing keys published by the ICU project, bundled at build time
const EMBEDDED_KEYS: &str = include_str!("../../keys/icu-release-keys.asc");

static EMBEDDED: LazyLock<TrustedKeyring> =
    LazyLock::new(|| TrustedKeyring::from_armored(EMBEDDED_KEYS));

/// Ordered list of armored public key blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustedKeyring {
    keys: Vec<String>,
}

impl TrustedKeyring {
    /// Keyring built from the bundled key file, split once per process
    pub fn embedded() -> &'static TrustedKeyring {
        &EMBEDDED
    }

    /// Split concatenated armored blocks into individual keys.
    ///
    /// Text outside a BEGIN/END pair is ignored and an unterminated trailing
    /// block is dropped.
    pub fn from_armored(block: &str) -> Self {
        let mut keys = Vec::new();
        let mut current: Option<String> = None;

        for line in block.lines() {
            let line = line.trim_end();
            if line == BEGIN_PUBLIC_KEY {
                current = Some(format!("{line}\n"));
            } else if line == END_PUBLIC_KEY {
                if let Some(mut key) = current.take() {
                    key.push_str(line);
                    key.push('\n');
                    keys.push(key);
                }
            } else if let Some(key) = current.as_mut() {
                key.push_str(line);
                key.push('\n');
            }
        }

        Self { keys }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_armored_splits_concatenated_blocks() {
        let block = "-----BEGIN PGP PUBLIC KEY BLOCK-----\n\
first\n\
-----END PGP PUBLIC KEY BLOCK-----\n\
-----BEGIN PGP PUBLIC KEY BLOCK-----\n\
\n\
second\n\
-----END PGP PUBLIC KEY BLOCK-----\n";

        let keyring = TrustedKeyring::from_armored(block);

        assert_eq!(
            keyring.keys(),
            &[
                "-----BEGIN PGP PUBLIC KEY BLOCK-----\nfirst\n-----END PGP PUBLIC KEY BLOCK-----\n"
                    .to_string(),
                "-----BEGIN PGP PUBLIC KEY BLOCK-----\n\nsecond\n-----END PGP PUBLIC KEY BLOCK-----\n"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn from_armored_ignores_text_outside_blocks() {
        let block = "pub   rsa4096 2016-03-01\n\
-----BEGIN PGP PUBLIC KEY BLOCK-----\n\
key\n\
-----END PGP PUBLIC KEY BLOCK-----\n\
trailing commentary\n";

        let keyring = TrustedKeyring::from_armored(block);
        assert_eq!(keyring.len(), 1);
        assert!(keyring.keys()[0].contains("key\n"));
        assert!(!keyring.keys()[0].contains("commentary"));
    }

    #[test]
    fn from_armored_handles_crlf_line_endings() {
        let block = "-----BEGIN PGP PUBLIC KEY BLOCK-----\r\nkey\r\n-----END PGP PUBLIC KEY BLOCK-----\r\n";
        assert_eq!(TrustedKeyring::from_armored(block).len(), 1);
    }

    #[test]
    fn from_armored_drops_unterminated_block() {
        let block = "-----BEGIN PGP PUBLIC KEY BLOCK-----\nhalf a key\n";
        assert!(TrustedKeyring::from_armored(block).is_empty());
    }

    #[test]
    fn from_armored_of_empty_input_is_empty() {
        assert!(TrustedKeyring::from_armored("").is_empty());
    }

    #[test]
    fn embedded_keyring_is_loaded_once() {
        let first = TrustedKeyring::embedded();
        let second = TrustedKeyring::embedded();
        assert!(std::ptr::eq(first, second));
    }
}
