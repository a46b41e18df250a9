//! Rule aggregation
//!
//! One aggregation pass per build/refresh cycle: validate every contributed
//! rule against the resolved dependency set, reclassify `.class`-suffixed
//! resource paths into class exclusions, and freeze the result. Rules that
//! reference artifacts absent from the dependency model are dropped and
//! reported in a single batched warning - a misconfigured exclusion for an
//! absent artifact must never block the rest of the pipeline.
//!
//! The aggregator owns exclusive, un-shared mutable accumulators for the
//! duration of one pass and publishes only the frozen [`Aggregation`]. A
//! later cycle produces an entirely new value; published values are never
//! mutated.

use std::collections::{BTreeMap, BTreeSet};

use im::{OrdMap, OrdSet, Vector};
use itertools::Itertools;
use tracing::{debug, warn};

use crate::artifact::ArtifactKey;
use crate::deps::DependencySet;
use crate::matcher::{ClassMatcher, CLASS_FILE_SUFFIX};
use crate::rules::RuleSet;

// ═══════════════════════════════════════════════════════════════════════════
// FROZEN MAPS
// ═══════════════════════════════════════════════════════════════════════════

/// Frozen mapping of artifact to the class matchers removed from it
///
/// Matching is an OR across the per-artifact list; insertion order is
/// preserved for deterministic debugging output. The empty map is the
/// canonical "nothing excluded" value, and lookups are get-with-default-empty.
/// No entry ever carries an empty matcher list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedClassExclusions(OrdMap<ArtifactKey, Vector<ClassMatcher>>);

impl AggregatedClassExclusions {
    /// The canonical empty value
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no class is excluded anywhere
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of artifacts with at least one class exclusion
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The matchers removed from one artifact (empty when none)
    #[must_use]
    pub fn matchers_for(&self, artifact: &ArtifactKey) -> Vector<ClassMatcher> {
        self.0.get(artifact).cloned().unwrap_or_default()
    }

    /// True when any matcher for `artifact` matches `class_name`
    #[must_use]
    pub fn removes_class(&self, artifact: &ArtifactKey, class_name: &str) -> bool {
        self.0
            .get(artifact)
            .is_some_and(|matchers| matchers.iter().any(|m| m.matches(class_name)))
    }

    /// Iterate entries in artifact-key order
    pub fn iter(&self) -> impl Iterator<Item = (&ArtifactKey, &Vector<ClassMatcher>)> {
        self.0.iter()
    }
}

/// Frozen mapping of artifact to the resource paths removed from it
///
/// Same backing and no-empty-entry rule as [`AggregatedClassExclusions`];
/// paths are deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedResourceExclusions(OrdMap<ArtifactKey, OrdSet<String>>);

impl AggregatedResourceExclusions {
    /// The canonical empty value
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no resource is excluded anywhere
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of artifacts with at least one resource exclusion
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The resource paths removed from one artifact (empty when none)
    #[must_use]
    pub fn resources_for(&self, artifact: &ArtifactKey) -> OrdSet<String> {
        self.0.get(artifact).cloned().unwrap_or_default()
    }

    /// True when `path` is removed from `artifact`
    #[must_use]
    pub fn removes_resource(&self, artifact: &ArtifactKey, path: &str) -> bool {
        self.0.get(artifact).is_some_and(|paths| paths.contains(path))
    }

    /// Iterate entries in artifact-key order
    pub fn iter(&self) -> impl Iterator<Item = (&ArtifactKey, &OrdSet<String>)> {
        self.0.iter()
    }
}

/// The frozen result of one aggregation cycle
///
/// Both maps are always present: an empty map means "explicitly, there is
/// nothing to exclude", distinct from "not yet computed". The unknown set is
/// exposed for downstream consumers; the batched warning has already been
/// emitted by the time an `Aggregation` exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    classes: AggregatedClassExclusions,
    resources: AggregatedResourceExclusions,
    unknown: OrdSet<ArtifactKey>,
}

impl Aggregation {
    /// Classes removed per artifact
    #[must_use]
    pub fn classes(&self) -> &AggregatedClassExclusions {
        &self.classes
    }

    /// Resources removed per artifact
    #[must_use]
    pub fn resources(&self) -> &AggregatedResourceExclusions {
        &self.resources
    }

    /// Artifacts referenced by rules but absent from the dependency set
    /// (sorted, deduplicated)
    #[must_use]
    pub fn unknown_artifacts(&self) -> &OrdSet<ArtifactKey> {
        &self.unknown
    }

    /// O(1) signal that no filtering is configured at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.resources.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// AGGREGATION
// ═══════════════════════════════════════════════════════════════════════════

impl RuleSet {
    /// Aggregate all contributed rules against the resolved dependency set
    ///
    /// Consumes the rule set: the contributor list is closed before the
    /// aggregation phase runs, so producer order cannot affect the outcome.
    #[must_use]
    pub fn aggregate(self, dependencies: &DependencySet) -> Aggregation {
        let (class_rules, resource_rules) = self.into_parts();

        let mut unknown: BTreeSet<ArtifactKey> = BTreeSet::new();
        let mut resources_acc: BTreeMap<ArtifactKey, BTreeSet<String>> = BTreeMap::new();
        let mut reclassified: BTreeMap<ArtifactKey, Vec<ClassMatcher>> = BTreeMap::new();

        // Fast path: resource rules are rare; no work at all when absent.
        if !resource_rules.is_empty() {
            for rule in resource_rules {
                if !dependencies.contains(rule.artifact()) {
                    unknown.insert(rule.artifact().clone());
                    continue;
                }

                for path in rule.resources() {
                    // Backward compatibility: resource removal historically
                    // doubled as class removal. Strip exactly the suffix,
                    // then dot the separators.
                    if let Some(stem) = path.strip_suffix(CLASS_FILE_SUFFIX) {
                        reclassified
                            .entry(rule.artifact().clone())
                            .or_default()
                            .push(ClassMatcher::exact(stem.replace('/', ".")));
                    } else {
                        resources_acc
                            .entry(rule.artifact().clone())
                            .or_default()
                            .insert(path.clone());
                    }
                }
            }
        }

        let mut classes_acc: BTreeMap<ArtifactKey, Vec<ClassMatcher>> = BTreeMap::new();
        for rule in class_rules {
            let (artifact, matcher) = rule.into_parts();
            if !dependencies.contains(&artifact) {
                unknown.insert(artifact);
                continue;
            }
            classes_acc.entry(artifact).or_default().push(matcher);
        }

        // Reclassified entries follow all explicit class rules, each in
        // input order.
        for (artifact, matchers) in reclassified {
            classes_acc.entry(artifact).or_default().extend(matchers);
        }

        if unknown.is_empty() {
            debug!(
                class_artifacts = classes_acc.len(),
                resource_artifacts = resources_acc.len(),
                "aggregated exclusion rules"
            );
        } else {
            let missing = unknown.iter().map(ToString::to_string).join(", ");
            warn!(
                count = unknown.len(),
                "could not apply configured exclusions for artifacts not found in the dependency model: {missing}"
            );
        }

        Aggregation {
            classes: AggregatedClassExclusions(
                classes_acc
                    .into_iter()
                    .map(|(artifact, matchers)| (artifact, Vector::from(matchers)))
                    .collect(),
            ),
            resources: AggregatedResourceExclusions(
                resources_acc
                    .into_iter()
                    .map(|(artifact, paths)| (artifact, paths.into_iter().collect::<OrdSet<String>>()))
                    .collect(),
            ),
            unknown: unknown.into_iter().collect(),
        }
    }
}
