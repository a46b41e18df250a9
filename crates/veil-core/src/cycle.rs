//! Refresh-cycle driver
//!
//! Runs one collect-then-aggregate cycle and calls the installer at most
//! once. The driver remembers whether a non-empty state was previously
//! installed: a later cycle that aggregates to empty issues one clearing
//! install, and a first empty cycle performs no boundary call at all.

use tracing::{debug, info};

use crate::aggregate::Aggregation;
use crate::deps::DependencySet;
use crate::install::{AddedClasses, AddedResources, ExclusionInstaller};
use crate::rules::RuleSet;

/// What the cycle did at the installer boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleAction {
    /// A non-empty exclusion state was installed
    Installed,
    /// A previously installed state was cleared with all-empty maps
    Cleared,
    /// Nothing was installed and nothing needed clearing
    Skipped,
}

/// The published result of one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOutcome {
    /// The frozen aggregation, published even when empty
    pub aggregation: Aggregation,
    /// The boundary action taken
    pub action: CycleAction,
}

/// Drives aggregation cycles against one installer
#[derive(Debug)]
pub struct RefreshCycle<I> {
    installer: I,
    installed_nonempty: bool,
}

impl<I: ExclusionInstaller> RefreshCycle<I> {
    /// Create a driver that has not installed anything yet
    pub fn new(installer: I) -> Self {
        Self {
            installer,
            installed_nonempty: false,
        }
    }

    /// The installer this driver feeds
    pub fn installer(&self) -> &I {
        &self.installer
    }

    /// Run one full cycle: aggregate the closed rule set and install the
    /// result when warranted
    ///
    /// The removal maps come from the aggregation; this engine contributes
    /// no class/resource additions, so the addition maps are empty.
    pub fn run(&mut self, rules: RuleSet, dependencies: &DependencySet) -> CycleOutcome {
        let aggregation = rules.aggregate(dependencies);

        let action = if aggregation.is_empty() {
            if self.installed_nonempty {
                self.installer.install(
                    AddedClasses::new(),
                    AddedResources::new(),
                    aggregation.classes().clone(),
                    aggregation.resources().clone(),
                );
                self.installed_nonempty = false;
                info!("cleared previously installed exclusion state");
                CycleAction::Cleared
            } else {
                debug!("no exclusions configured, skipping install");
                CycleAction::Skipped
            }
        } else {
            self.installer.install(
                AddedClasses::new(),
                AddedResources::new(),
                aggregation.classes().clone(),
                aggregation.resources().clone(),
            );
            self.installed_nonempty = true;
            info!(
                class_artifacts = aggregation.classes().len(),
                resource_artifacts = aggregation.resources().len(),
                unknown_artifacts = aggregation.unknown_artifacts().len(),
                "installed exclusion state"
            );
            CycleAction::Installed
        };

        CycleOutcome {
            aggregation,
            action,
        }
    }
}
