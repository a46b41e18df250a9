//! Installer boundary to the live code-loading subsystem
//!
//! The engine computes the two removal maps; the code-loading subsystem owns
//! everything else about class resolution. The single operation crossing
//! that boundary replaces the entire exclusion/override state atomically: a
//! concurrent reader observes either the complete old state or the complete
//! new state, never a mix.

use std::sync::Arc;

use im::OrdMap;

use crate::aggregate::{AggregatedClassExclusions, AggregatedResourceExclusions};

/// Generated class overrides: dotted class name to bytecode
pub type AddedClasses = OrdMap<String, Vec<u8>>;

/// Generated resource overrides: archive path to bytes
pub type AddedResources = OrdMap<String, Vec<u8>>;

/// The single operation the code-loading subsystem exposes to this engine
///
/// `install` is infallible at this layer: its internal failure modes belong
/// to the code-loading subsystem. The engine calls it exactly once per
/// aggregation cycle, after class aggregation (which depends on resource
/// aggregation because of reclassification) has completed.
pub trait ExclusionInstaller: Send + Sync {
    /// Atomically replace the entire exclusion/override state
    ///
    /// Effective for every subsequent resolution request. Resolutions already
    /// in flight keep the complete state they started with.
    fn install(
        &self,
        added_classes: AddedClasses,
        added_resources: AddedResources,
        removed_classes: AggregatedClassExclusions,
        removed_resources: AggregatedResourceExclusions,
    );
}

impl<T: ExclusionInstaller + ?Sized> ExclusionInstaller for Arc<T> {
    fn install(
        &self,
        added_classes: AddedClasses,
        added_resources: AddedResources,
        removed_classes: AggregatedClassExclusions,
        removed_resources: AggregatedResourceExclusions,
    ) {
        (**self).install(
            added_classes,
            added_resources,
            removed_classes,
            removed_resources,
        );
    }
}
