//! Types extracted from buildpack.toml

/// A dependency entry already present in `[[metadata.dependencies]]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorDependency {
    pub id: String,
    pub version: String,
}

/// A `[[metadata.dependency-constraints]]` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyConstraint {
    pub id: String,
    /// Semver requirement, e.g. "72.*"
    pub constraint: String,
    /// Number of newest matching versions to keep
    pub patches: usize,
}

/// The parts of buildpack.toml that drive version selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildpackDescriptor {
    pub dependencies: Vec<DescriptorDependency>,
    pub constraints: Vec<DependencyConstraint>,
}

impl BuildpackDescriptor {
    /// Versions already listed for dependency `id`
    pub fn versions_for(&self, id: &str) -> Vec<&str> {
        self.dependencies
            .iter()
            .filter(|d| d.id == id)
            .map(|d| d.version.as_str())
            .collect()
    }

    /// Constraints declared for dependency `id`
    pub fn constraints_for(&self, id: &str) -> Vec<&DependencyConstraint> {
        self.constraints.iter().filter(|c| c.id == id).collect()
    }
}
