//! Exclusion rule value types and the collect phase
//!
//! Rules are immutable values created by independent, mutually unaware
//! contributors. A [`RuleSet`] closes the contributor list: aggregation
//! consumes it by value, so the collect phase and the aggregation phase are
//! structurally separate and producer order cannot leak into the result.

use im::OrdSet;

use crate::artifact::ArtifactKey;
use crate::matcher::ClassMatcher;

/// Classes to be hidden from resolution inside one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRule {
    artifact: ArtifactKey,
    matcher: ClassMatcher,
}

impl ClassRule {
    /// Rule matching exactly one class name
    pub fn of_class(artifact: ArtifactKey, class_name: impl Into<String>) -> Self {
        Self {
            artifact,
            matcher: ClassMatcher::exact(class_name),
        }
    }

    /// Rule matching a class name and any of its nested classes
    pub fn of_class_and_nested_classes(
        artifact: ArtifactKey,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            artifact,
            matcher: ClassMatcher::with_nested(class_name),
        }
    }

    /// Rule matching an arbitrary caller-supplied predicate
    pub fn of_predicate(
        artifact: ArtifactKey,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            artifact,
            matcher: ClassMatcher::custom(predicate),
        }
    }

    /// The artifact this rule applies to
    #[must_use]
    pub fn artifact(&self) -> &ArtifactKey {
        &self.artifact
    }

    /// The compiled class-name matcher
    #[must_use]
    pub fn matcher(&self) -> &ClassMatcher {
        &self.matcher
    }

    pub(crate) fn into_parts(self) -> (ArtifactKey, ClassMatcher) {
        (self.artifact, self.matcher)
    }
}

/// Resources to be hidden from resolution inside one artifact
///
/// Resource paths are exact, case-sensitive archive paths. Duplicates across
/// rules for the same artifact collapse silently during aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRule {
    artifact: ArtifactKey,
    resources: OrdSet<String>,
}

impl ResourceRule {
    /// Build a resource rule from any collection of archive paths
    pub fn new<I, S>(artifact: ArtifactKey, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            artifact,
            resources: resources.into_iter().map(Into::into).collect(),
        }
    }

    /// The artifact this rule applies to
    #[must_use]
    pub fn artifact(&self) -> &ArtifactKey {
        &self.artifact
    }

    /// The resource paths to hide
    #[must_use]
    pub fn resources(&self) -> &OrdSet<String> {
        &self.resources
    }
}

/// The closed set of contributed rules for one aggregation cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    class_rules: Vec<ClassRule>,
    resource_rules: Vec<ResourceRule>,
}

impl RuleSet {
    /// An empty rule set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Contribute one class rule
    pub fn add_class_rule(&mut self, rule: ClassRule) {
        self.class_rules.push(rule);
    }

    /// Contribute one resource rule
    pub fn add_resource_rule(&mut self, rule: ResourceRule) {
        self.resource_rules.push(rule);
    }

    /// Builder-style variant of [`Self::add_class_rule`]
    #[must_use]
    pub fn with_class_rule(mut self, rule: ClassRule) -> Self {
        self.add_class_rule(rule);
        self
    }

    /// Builder-style variant of [`Self::add_resource_rule`]
    #[must_use]
    pub fn with_resource_rule(mut self, rule: ResourceRule) -> Self {
        self.add_resource_rule(rule);
        self
    }

    /// Merge another contributor's rules into this set
    pub fn extend(&mut self, other: Self) {
        self.class_rules.extend(other.class_rules);
        self.resource_rules.extend(other.resource_rules);
    }

    /// True when no rules were contributed at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.class_rules.is_empty() && self.resource_rules.is_empty()
    }

    /// Number of contributed class rules
    #[must_use]
    pub fn class_rule_count(&self) -> usize {
        self.class_rules.len()
    }

    /// Number of contributed resource rules
    #[must_use]
    pub fn resource_rule_count(&self) -> usize {
        self.resource_rules.len()
    }

    pub(crate) fn into_parts(self) -> (Vec<ClassRule>, Vec<ResourceRule>) {
        (self.class_rules, self.resource_rules)
    }
}
