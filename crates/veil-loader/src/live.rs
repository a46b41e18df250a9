//! Live exclusion snapshot holder
//!
//! [`LiveExclusions`] is the single point where the build-side engine meets
//! running resolution threads. Readers take a brief read lock to clone the
//! current `Arc<ExclusionState>` and then work entirely on that complete
//! snapshot; an install builds a brand-new frozen state and replaces the
//! `Arc` in one assignment under the write lock. No reader ever observes a
//! mixed old/new state, and in-flight resolutions keep the snapshot they
//! already hold.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;
use veil_core::{
    AddedClasses, AddedResources, AggregatedClassExclusions, AggregatedResourceExclusions,
    ExclusionInstaller,
};

use crate::state::ExclusionState;

/// Shared holder of the currently installed exclusion state
///
/// Starts out holding the pristine empty state (version 0). Versions are
/// assigned under the write lock, so version order always matches swap
/// order.
#[derive(Debug)]
pub struct LiveExclusions {
    state: RwLock<Arc<ExclusionState>>,
}

impl LiveExclusions {
    /// Create a holder with nothing installed yet
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(Arc::new(ExclusionState::empty())),
        }
    }

    /// Clone the current snapshot
    ///
    /// The returned state is complete and immutable; it stays valid (and
    /// unchanged) however many installs happen afterwards.
    ///
    /// A poisoned lock still holds a complete snapshot - the writer only
    /// performs a single assignment - so poisoning is recovered, not
    /// propagated.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ExclusionState> {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Version of the currently installed state
    #[must_use]
    pub fn version(&self) -> u64 {
        self.snapshot().version()
    }
}

impl Default for LiveExclusions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExclusionInstaller for LiveExclusions {
    fn install(
        &self,
        added_classes: AddedClasses,
        added_resources: AddedResources,
        removed_classes: AggregatedClassExclusions,
        removed_resources: AggregatedResourceExclusions,
    ) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let next = Arc::new(ExclusionState::new(
            guard.version() + 1,
            added_classes,
            added_resources,
            removed_classes,
            removed_resources,
        ));
        let version = next.version();
        let empty = next.is_empty();
        *guard = next;
        drop(guard);

        info!(version, empty, "installed new exclusion state");
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use veil_core::{ArtifactKey, ClassRule, DependencySet, RuleSet};

    use super::*;

    fn removals_for(class_name: &str) -> (AggregatedClassExclusions, ArtifactKey) {
        let a = ArtifactKey::parse("io.acme:acme-lib").unwrap();
        let deps: DependencySet = [a.clone()].into_iter().collect();
        let aggregation = RuleSet::new()
            .with_class_rule(ClassRule::of_class(a.clone(), class_name))
            .aggregate(&deps);
        (aggregation.classes().clone(), a)
    }

    #[test]
    fn starts_with_the_pristine_empty_state() {
        let live = LiveExclusions::new();
        let snapshot = live.snapshot();
        assert_eq!(snapshot.version(), 0);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn install_swaps_the_whole_state_and_bumps_the_version() {
        let live = LiveExclusions::new();
        let (removals, a) = removals_for("com.acme.Foo");

        live.install(
            AddedClasses::new(),
            AddedResources::new(),
            removals,
            AggregatedResourceExclusions::new(),
        );

        let snapshot = live.snapshot();
        assert_eq!(snapshot.version(), 1);
        assert!(snapshot.removes_class(&a, "com.acme.Foo"));
    }

    #[test]
    fn old_snapshots_keep_their_state_after_a_new_install() {
        let live = LiveExclusions::new();
        let (first, a) = removals_for("com.acme.Foo");
        live.install(
            AddedClasses::new(),
            AddedResources::new(),
            first,
            AggregatedResourceExclusions::new(),
        );
        let held = live.snapshot();

        let (second, _) = removals_for("com.acme.Bar");
        live.install(
            AddedClasses::new(),
            AddedResources::new(),
            second,
            AggregatedResourceExclusions::new(),
        );

        // The in-flight snapshot is untouched by the swap.
        assert_eq!(held.version(), 1);
        assert!(held.removes_class(&a, "com.acme.Foo"));
        assert!(!held.removes_class(&a, "com.acme.Bar"));

        let fresh = live.snapshot();
        assert_eq!(fresh.version(), 2);
        assert!(fresh.removes_class(&a, "com.acme.Bar"));
        assert!(!fresh.removes_class(&a, "com.acme.Foo"));
    }

    #[test]
    fn clearing_install_replaces_with_an_empty_state() {
        let live = LiveExclusions::new();
        let (removals, a) = removals_for("com.acme.Foo");
        live.install(
            AddedClasses::new(),
            AddedResources::new(),
            removals,
            AggregatedResourceExclusions::new(),
        );

        live.install(
            AddedClasses::new(),
            AddedResources::new(),
            AggregatedClassExclusions::new(),
            AggregatedResourceExclusions::new(),
        );

        let snapshot = live.snapshot();
        assert_eq!(snapshot.version(), 2);
        assert!(snapshot.is_empty());
        assert!(!snapshot.removes_class(&a, "com.acme.Foo"));
    }
}
