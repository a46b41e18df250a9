//! veil-core - Build-side artifact content-exclusion engine
//!
//! This crate provides:
//! - Artifact identity types (`ArtifactKey`)
//! - Exclusion rule value types and class-name matchers
//! - The rule aggregator and dependency validation
//! - The installer boundary to the live code-loading subsystem
//! - A TOML exclusion config contributor and a hot-reload watcher
//!
//! # Pipeline
//!
//! Contributors emit [`ClassRule`]/[`ResourceRule`] values into a [`RuleSet`]
//! (collect phase). One consuming [`RuleSet::aggregate`] call validates every
//! rule against the resolved [`DependencySet`], reclassifies `.class`-suffixed
//! resource paths into class exclusions, and freezes the result into an
//! [`Aggregation`]. A [`RefreshCycle`] hands the frozen maps to an
//! [`ExclusionInstaller`] exactly once per cycle.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod artifact;
pub mod config;
pub mod cycle;
pub mod deps;
pub mod error;
pub mod install;
pub mod matcher;
pub mod rules;
pub mod watch;

pub use aggregate::{AggregatedClassExclusions, AggregatedResourceExclusions, Aggregation};
pub use artifact::{ArtifactKey, ArtifactKeyError};
pub use config::{config_path, load_exclusions, ArtifactExclusions, ExclusionsConfig};
pub use cycle::{CycleAction, CycleOutcome, RefreshCycle};
pub use deps::DependencySet;
pub use error::{Error, Result};
pub use install::{AddedClasses, AddedResources, ExclusionInstaller};
pub use matcher::{ClassMatcher, CLASS_FILE_SUFFIX};
pub use rules::{ClassRule, ResourceRule, RuleSet};
pub use watch::{RefreshEvent, RefreshWatcher, WatchOptions};
