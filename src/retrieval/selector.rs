//! Picks which fetched versions still need metadata

use std::collections::HashSet;
use std::path::Path;

use semver::{Version, VersionReq};
use tracing::{debug, info};

use crate::parser::{BuildpackDescriptor, BuildpackTomlParser, ParseError};
use crate::retrieval::error::RetrievalError;
use crate::retrieval::semver::parse_version_lossy;

/// Read `descriptor_path` and select the new versions of dependency `id`
pub fn find_new_versions(
    descriptor_path: &Path,
    id: &str,
    versions: &[String],
) -> Result<Vec<String>, RetrievalError> {
    let content = std::fs::read_to_string(descriptor_path).map_err(|source| ParseError::Read {
        path: descriptor_path.display().to_string(),
        source,
    })?;
    let descriptor = BuildpackTomlParser::new().parse(&content)?;

    let selected = select_new_versions(&descriptor, id, versions)?;
    info!(
        "{} of {} upstream versions are new for {}",
        selected.len(),
        versions.len(),
        id
    );
    Ok(selected)
}

/// Versions not yet in the descriptor that its constraints ask for.
///
/// Each constraint keeps its newest `patches` matching versions. Without
/// constraints every unknown version is selected. Input order is preserved.
pub fn select_new_versions(
    descriptor: &BuildpackDescriptor,
    id: &str,
    versions: &[String],
) -> Result<Vec<String>, RetrievalError> {
    let existing: HashSet<Version> = descriptor
        .versions_for(id)
        .into_iter()
        .filter_map(parse_version_lossy)
        .collect();

    let constraints = descriptor.constraints_for(id);
    let wanted: Option<HashSet<Version>> = if constraints.is_empty() {
        None
    } else {
        let parsed: Vec<Version> = versions
            .iter()
            .filter_map(|v| parse_version_lossy(v))
            .collect();

        let mut wanted = HashSet::new();
        for constraint in constraints {
            let req = VersionReq::parse(&constraint.constraint).map_err(|e| {
                ParseError::InvalidSyntax(format!(
                    "invalid constraint {:?}: {}",
                    constraint.constraint, e
                ))
            })?;

            let mut matching: Vec<&Version> = parsed.iter().filter(|v| req.matches(v)).collect();
            matching.sort_unstable_by(|a, b| b.cmp(a));
            matching.dedup();

            debug!(
                "constraint {} keeps {:?}",
                constraint.constraint,
                matching.iter().take(constraint.patches).collect::<Vec<_>>()
            );
            wanted.extend(matching.into_iter().take(constraint.patches).cloned());
        }
        Some(wanted)
    };

    let mut seen = HashSet::new();
    let selected = versions
        .iter()
        .filter(|raw| {
            let Some(version) = parse_version_lossy(raw) else {
                return false;
            };
            !existing.contains(&version)
                && wanted.as_ref().is_none_or(|w| w.contains(&version))
                && seen.insert(version)
        })
        .cloned()
        .collect();

    Ok(selected)
}
