//! Exclusion configuration loading
//!
//! The one in-tree rule contributor: a TOML file declaring, per artifact,
//! the classes and resources to hide from resolution.
//!
//! # Example Config
//!
//! ```toml
//! [exclusions."io.acme:acme-lib"]
//! classes = ["com.acme.Foo"]
//! nested_classes = ["com.acme.Bar"]
//! class_patterns = ["^com\\.acme\\.internal\\..*"]
//! resources = ["META-INF/extra-descriptor.xml"]
//! ```
//!
//! # Discovery
//!
//! The config lives at `.veil/exclusions.toml` in the working directory; the
//! `VEIL_EXCLUSIONS` environment variable overrides the path.
//!
//! # Module Structure
//!
//! - `types`: Configuration structure definitions
//! - `load`: Loading from file and environment
//! - `validate`: Validation and compilation into a [`crate::RuleSet`]

// Module declarations
mod load;
mod types;
mod validate;

// Re-export public API
pub use load::{config_path, load_exclusions, CONFIG_ENV_VAR, DEFAULT_CONFIG_PATH};
pub use types::{ArtifactExclusions, ExclusionsConfig};
