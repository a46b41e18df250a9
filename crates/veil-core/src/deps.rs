//! Resolved runtime-dependency set
//!
//! Computed once per cycle by the external dependency resolver and passed in
//! verbatim. The dependency graph can change between cycles, so membership
//! results are never cached across aggregation passes.

use im::OrdSet;

use crate::artifact::ArtifactKey;

/// The set of artifacts actually present on the resolved runtime classpath
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet(OrdSet<ArtifactKey>);

impl DependencySet {
    /// An empty dependency set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure membership test: is this artifact part of the runtime classpath?
    #[must_use]
    pub fn contains(&self, artifact: &ArtifactKey) -> bool {
        self.0.contains(artifact)
    }

    /// Number of resolved runtime dependencies
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the classpath resolved to no dependencies
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the resolved artifacts in key order
    pub fn iter(&self) -> impl Iterator<Item = &ArtifactKey> {
        self.0.iter()
    }
}

impl FromIterator<ArtifactKey> for DependencySet {
    fn from_iter<I: IntoIterator<Item = ArtifactKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<ArtifactKey> for DependencySet {
    fn extend<I: IntoIterator<Item = ArtifactKey>>(&mut self, iter: I) {
        for artifact in iter {
            self.0.insert(artifact);
        }
    }
}
