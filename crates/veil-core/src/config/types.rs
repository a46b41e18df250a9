//! Configuration type definitions
//!
//! Pure data holders with derived traits; validation and rule compilation
//! live in `validate`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root exclusion configuration
///
/// Keys of the `exclusions` table are artifact coordinates
/// (`"group:name[:classifier[:kind]]"`); they are validated when the config
/// is compiled into rules, not at deserialization time, so one malformed
/// entry can be reported with its coordinates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExclusionsConfig {
    pub exclusions: BTreeMap<String, ArtifactExclusions>,
}

/// Exclusions declared for one artifact
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ArtifactExclusions {
    /// Exact fully-qualified class names to hide
    pub classes: Vec<String>,
    /// Class names to hide together with all their nested classes
    pub nested_classes: Vec<String>,
    /// Regex patterns over fully-qualified class names
    pub class_patterns: Vec<String>,
    /// Exact archive paths to hide
    pub resources: Vec<String>,
}

impl ExclusionsConfig {
    /// True when the config declares nothing at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exclusions.is_empty()
    }
}

impl ArtifactExclusions {
    /// True when this entry declares nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.nested_classes.is_empty()
            && self.class_patterns.is_empty()
            && self.resources.is_empty()
    }
}
