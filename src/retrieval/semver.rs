use semver::Version;

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Handles partial versions like "72" or "72.1" by padding with zeros.
///
/// Examples:
/// - "72" -> Version(72, 0, 0)
/// - "72.1" -> Version(72, 1, 0)
/// - "72.1.1" -> Version(72, 1, 1)
pub fn parse_version(version: &str) -> Result<Version, semver::Error> {
    let trimmed = version.trim();
    let (core, rest) = match trimmed.find(['-', '+']) {
        Some(idx) => trimmed.split_at(idx),
        None => (trimmed, ""),
    };
    let normalized = match core.split('.').count() {
        1 => format!("{core}.0.0{rest}"),
        2 => format!("{core}.0{rest}"),
        _ => trimmed.to_string(),
    };
    Version::parse(&normalized)
}

/// Like [`parse_version`] but discards the error
pub fn parse_version_lossy(version: &str) -> Option<Version> {
    parse_version(version).ok()
}
