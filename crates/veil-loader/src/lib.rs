//! veil-loader - Runtime-side exclusion state for the code-loading subsystem
//!
//! This crate provides:
//! - [`ExclusionState`]: the frozen, versioned bundle of addition and removal
//!   maps a resolution consults
//! - [`LiveExclusions`]: the live snapshot holder implementing the
//!   [`veil_core::ExclusionInstaller`] boundary with an atomic whole-state
//!   swap
//!
//! Readers never block installs and installs never block readers: a reader
//! clones the current `Arc` snapshot and keeps using it for the resolution it
//! already started, while an install replaces the `Arc` in one assignment.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod live;
pub mod state;

pub use live::LiveExclusions;
pub use state::ExclusionState;
