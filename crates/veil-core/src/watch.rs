//! Hot-reload watching for the exclusion config
//!
//! Monitors the exclusion config file and drives one full refresh cycle per
//! debounced change: reload, compile, aggregate against a freshly resolved
//! dependency set, install. Events are debounced to prevent excessive cycles
//! during bulk edits. A failed reload aborts that cycle only; the previously
//! installed state remains authoritative.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! use veil_core::{DependencySet, RefreshWatcher, WatchOptions};
//! use veil_core::install::{AddedClasses, AddedResources, ExclusionInstaller};
//! use veil_core::{AggregatedClassExclusions, AggregatedResourceExclusions};
//!
//! # struct Loader;
//! # impl ExclusionInstaller for Loader {
//! #     fn install(&self, _: AddedClasses, _: AddedResources,
//! #         _: AggregatedClassExclusions, _: AggregatedResourceExclusions) {}
//! # }
//! # async fn example(loader: Arc<Loader>) -> veil_core::Result<()> {
//! let mut rx = RefreshWatcher::spawn(
//!     PathBuf::from(".veil/exclusions.toml"),
//!     &WatchOptions::default(),
//!     DependencySet::new, // re-resolve per cycle in real use
//!     loader,
//! )?;
//!
//! while let Some(event) = rx.recv().await {
//!     println!("refresh: {event:?}");
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::{load_exclusions, ExclusionsConfig};
use crate::cycle::{CycleAction, RefreshCycle};
use crate::deps::DependencySet;
use crate::error::{Error, Result};
use crate::install::ExclusionInstaller;

// ═══════════════════════════════════════════════════════════════════════════
// TYPES
// ═══════════════════════════════════════════════════════════════════════════

/// Watcher tuning knobs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchOptions {
    /// Debounce window in milliseconds (10-5000)
    pub debounce_ms: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self { debounce_ms: 250 }
    }
}

/// Events emitted by the refresh watcher, one per completed cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshEvent {
    /// A non-empty exclusion state was installed
    Applied {
        at: DateTime<Utc>,
        class_artifacts: usize,
        resource_artifacts: usize,
        unknown_artifacts: usize,
    },
    /// The previously installed state was cleared
    Cleared { at: DateTime<Utc> },
    /// The reload failed; the previous state remains authoritative
    Failed { at: DateTime<Utc>, reason: String },
}

// ═══════════════════════════════════════════════════════════════════════════
// WATCHER
// ═══════════════════════════════════════════════════════════════════════════

/// Debounced config watcher driving refresh cycles
pub struct RefreshWatcher;

impl RefreshWatcher {
    /// Watch the exclusion config and run one cycle per debounced change
    ///
    /// `resolver` is called once per cycle to obtain a fresh runtime
    /// dependency set; its result is never cached across cycles. Cycles that
    /// neither install nor clear emit no event.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The debounce window is outside 10-5000 ms
    /// - The watcher cannot be created or attached to the config path
    pub fn spawn<R, I>(
        config_path: PathBuf,
        options: &WatchOptions,
        resolver: R,
        installer: I,
    ) -> Result<mpsc::Receiver<RefreshEvent>>
    where
        R: Fn() -> DependencySet + Send + 'static,
        I: ExclusionInstaller + 'static,
    {
        validate_debounce(options.debounce_ms)?;

        let (event_tx, event_rx) = mpsc::channel(64);
        let (change_tx, mut change_rx) = mpsc::channel::<()>(16);

        let mut debouncer = new_debouncer(
            Duration::from_millis(u64::from(options.debounce_ms)),
            move |res: notify_debouncer_mini::DebounceEventResult| {
                if let Ok(events) = res {
                    if !events.is_empty() {
                        let _ = change_tx.blocking_send(());
                    }
                }
            },
        )?;

        let watch_target = nearest_watchable(&config_path);
        debouncer
            .watcher()
            .watch(&watch_target, RecursiveMode::NonRecursive)?;

        tokio::spawn(async move {
            // Hold onto the debouncer to keep watching.
            let _debouncer = debouncer;
            let mut cycle = RefreshCycle::new(installer);

            while let Some(()) = change_rx.recv().await {
                if let Some(event) = run_refresh(&config_path, &resolver, &mut cycle) {
                    if event_tx.send(event).await.is_err() {
                        break;
                    }
                }
            }
        });

        Ok(event_rx)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// HELPERS
// ═══════════════════════════════════════════════════════════════════════════

/// Deepest existing path covering `config_path`
///
/// The config file (or its whole directory chain) may not exist yet. Watching
/// the nearest existing ancestor picks up its eventual creation; a bare
/// relative filename resolves to the working directory.
fn nearest_watchable(config_path: &Path) -> PathBuf {
    if config_path.exists() {
        return config_path.to_path_buf();
    }

    let mut current = config_path;
    while let Some(parent) = current.parent() {
        let candidate = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        if candidate.exists() {
            return candidate.to_path_buf();
        }
        current = parent;
    }
    PathBuf::from(".")
}

/// Run one refresh cycle; `None` means the cycle had nothing to do
fn run_refresh<R, I>(
    config_path: &Path,
    resolver: &R,
    cycle: &mut RefreshCycle<I>,
) -> Option<RefreshEvent>
where
    R: Fn() -> DependencySet,
    I: ExclusionInstaller,
{
    let at = Utc::now();

    let rules = match load_exclusions(config_path).and_then(ExclusionsConfig::into_rules) {
        Ok(rules) => rules,
        Err(e) => {
            warn!("exclusion refresh failed, keeping previous state: {e}");
            return Some(RefreshEvent::Failed {
                at,
                reason: e.to_string(),
            });
        }
    };

    let dependencies = resolver();
    let outcome = cycle.run(rules, &dependencies);

    match outcome.action {
        CycleAction::Installed => Some(RefreshEvent::Applied {
            at,
            class_artifacts: outcome.aggregation.classes().len(),
            resource_artifacts: outcome.aggregation.resources().len(),
            unknown_artifacts: outcome.aggregation.unknown_artifacts().len(),
        }),
        CycleAction::Cleared => Some(RefreshEvent::Cleared { at }),
        CycleAction::Skipped => {
            debug!("config change produced no exclusions and none were installed");
            None
        }
    }
}

fn validate_debounce(debounce_ms: u32) -> Result<()> {
    if !(10..=5000).contains(&debounce_ms) {
        return Err(Error::invalid_config(format!(
            "debounce_ms must be between 10 and 5000, got {debounce_ms}"
        )));
    }
    Ok(())
}
