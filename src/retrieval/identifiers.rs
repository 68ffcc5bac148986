//! CPE and package URL generation

use std::collections::BTreeMap;
use std::fmt;

/// CPE 2.3 name for an ICU release
pub fn icu_cpe(version: &str) -> String {
    format!(
        r"cpe:2.3:a:icu-project:international_components_for_unicode:{version}:*:*:*:*:c\/c\+\+:*:*"
    )
}

/// A `pkg:generic` package URL with sorted qualifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageUrl {
    name: String,
    version: String,
    qualifiers: BTreeMap<&'static str, String>,
}

impl PackageUrl {
    pub fn generic(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            qualifiers: BTreeMap::new(),
        }
    }

    pub fn with_qualifier(mut self, key: &'static str, value: &str) -> Self {
        if !value.is_empty() {
            self.qualifiers.insert(key, value.to_string());
        }
        self
    }
}

impl fmt::Display for PackageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pkg:generic/{}@{}", self.name, self.version)?;
        for (i, (key, value)) in self.qualifiers.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

/// Package URL carrying the source checksum and download location
pub fn generate_purl(id: &str, version: &str, checksum_hex: &str, source_url: &str) -> String {
    PackageUrl::generic(id, version)
        .with_qualifier("checksum", checksum_hex)
        .with_qualifier("download_url", source_url)
        .to_string()
}
