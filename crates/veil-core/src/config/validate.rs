//! Configuration validation and rule compilation
//!
//! Turns a deserialized [`ExclusionsConfig`] into the contributed
//! [`RuleSet`] for one cycle. Every error names the offending entry so a
//! misconfigured artifact can be found without bisecting the file.

use regex::Regex;
use tracing::debug;

use super::types::ExclusionsConfig;
use crate::artifact::ArtifactKey;
use crate::error::{Error, Result};
use crate::rules::{ClassRule, ResourceRule, RuleSet};

impl ExclusionsConfig {
    /// Validate the config without compiling rules
    ///
    /// # Errors
    ///
    /// Returns error if any artifact coordinates, class name, or pattern is
    /// invalid.
    pub fn validate(&self) -> Result<()> {
        self.clone().into_rules().map(|_| ())
    }

    /// Compile the config into the rule set it contributes
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - An `exclusions` table key is not valid artifact coordinates
    /// - A class name entry is empty
    /// - A class pattern fails to compile
    pub fn into_rules(self) -> Result<RuleSet> {
        let mut rules = RuleSet::new();

        for (coordinates, entry) in self.exclusions {
            let artifact = ArtifactKey::parse(&coordinates).map_err(|source| Error::Coordinates {
                coordinates: coordinates.clone(),
                source,
            })?;

            for class_name in entry.classes {
                validate_class_name(&coordinates, &class_name)?;
                rules.add_class_rule(ClassRule::of_class(artifact.clone(), class_name));
            }

            for class_name in entry.nested_classes {
                validate_class_name(&coordinates, &class_name)?;
                rules.add_class_rule(ClassRule::of_class_and_nested_classes(
                    artifact.clone(),
                    class_name,
                ));
            }

            for pattern in entry.class_patterns {
                let regex = Regex::new(&pattern).map_err(|source| Error::Pattern {
                    coordinates: coordinates.clone(),
                    pattern: pattern.clone(),
                    source,
                })?;
                rules.add_class_rule(ClassRule::of_predicate(artifact.clone(), move |name| {
                    regex.is_match(name)
                }));
            }

            if !entry.resources.is_empty() {
                rules.add_resource_rule(ResourceRule::new(artifact, entry.resources));
            }
        }

        debug!(
            class_rules = rules.class_rule_count(),
            resource_rules = rules.resource_rule_count(),
            "compiled exclusion config into rules"
        );
        Ok(rules)
    }
}

fn validate_class_name(coordinates: &str, class_name: &str) -> Result<()> {
    if class_name.trim().is_empty() {
        return Err(Error::invalid_config(format!(
            "empty class name in exclusions for artifact `{coordinates}`"
        )));
    }
    Ok(())
}
