//! Frozen exclusion state
//!
//! One [`ExclusionState`] is the complete exclusion/override configuration a
//! resolution consults: generated class/resource additions plus the two
//! aggregated removal maps. States are immutable after construction and
//! carry a version assigned at install time, monotonically increasing per
//! holder, so observers can tell states apart and check swap ordering.

use veil_core::{
    AddedClasses, AddedResources, AggregatedClassExclusions, AggregatedResourceExclusions,
    ArtifactKey,
};

/// The complete, frozen exclusion/override bundle for one installed cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionState {
    version: u64,
    added_classes: AddedClasses,
    added_resources: AddedResources,
    removed_classes: AggregatedClassExclusions,
    removed_resources: AggregatedResourceExclusions,
}

impl ExclusionState {
    /// The pristine state: version 0, nothing added, nothing removed
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        version: u64,
        added_classes: AddedClasses,
        added_resources: AddedResources,
        removed_classes: AggregatedClassExclusions,
        removed_resources: AggregatedResourceExclusions,
    ) -> Self {
        Self {
            version,
            added_classes,
            added_resources,
            removed_classes,
            removed_resources,
        }
    }

    /// Install-time version of this state (0 for the pristine state)
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// True when this state filters and overrides nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added_classes.is_empty()
            && self.added_resources.is_empty()
            && self.removed_classes.is_empty()
            && self.removed_resources.is_empty()
    }

    /// Should `class_name` inside `artifact` be hidden from resolution?
    #[must_use]
    pub fn removes_class(&self, artifact: &ArtifactKey, class_name: &str) -> bool {
        self.removed_classes.removes_class(artifact, class_name)
    }

    /// Should resource `path` inside `artifact` be hidden from resolution?
    #[must_use]
    pub fn removes_resource(&self, artifact: &ArtifactKey, path: &str) -> bool {
        self.removed_resources.removes_resource(artifact, path)
    }

    /// Generated bytecode overriding `class_name`, when present
    #[must_use]
    pub fn added_class(&self, class_name: &str) -> Option<&[u8]> {
        self.added_classes.get(class_name).map(Vec::as_slice)
    }

    /// Generated bytes overriding resource `path`, when present
    #[must_use]
    pub fn added_resource(&self, path: &str) -> Option<&[u8]> {
        self.added_resources.get(path).map(Vec::as_slice)
    }

    /// The class-removal map, for consumers that enumerate exclusions
    #[must_use]
    pub fn removed_classes(&self) -> &AggregatedClassExclusions {
        &self.removed_classes
    }

    /// The resource-removal map, for consumers that enumerate exclusions
    #[must_use]
    pub fn removed_resources(&self) -> &AggregatedResourceExclusions {
        &self.removed_resources
    }
}
