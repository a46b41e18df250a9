//! Integration tests for the aggregation warning contract: unknown artifacts
//! are reported in one batched, sorted warning per aggregation pass, and
//! clean passes emit no warning at all.

// Integration tests have relaxed clippy settings for test ergonomics.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::io;
use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use veil_core::{ArtifactKey, ClassRule, DependencySet, ResourceRule, RuleSet};

/// Captures formatted log output for later inspection
#[derive(Clone, Default)]
struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CaptureWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a capturing subscriber and return everything it logged at
/// WARN or above.
fn captured_warnings<F: FnOnce()>(f: F) -> String {
    let writer = CaptureWriter::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_max_level(Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = writer.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

fn key(s: &str) -> ArtifactKey {
    ArtifactKey::parse(s).unwrap()
}

#[test]
fn unknown_artifacts_warn_once_sorted_and_deduplicated() {
    let known = key("io.acme:acme-lib");
    let deps: DependencySet = [known.clone()].into_iter().collect();

    // Two unknown artifacts, each referenced by several rules of both kinds,
    // contributed in non-sorted order.
    let rules = RuleSet::new()
        .with_class_rule(ClassRule::of_class(key("io.acme:zzz"), "com.acme.Foo"))
        .with_class_rule(ClassRule::of_class(key("io.acme:aaa"), "com.acme.Bar"))
        .with_resource_rule(ResourceRule::new(key("io.acme:zzz"), ["z.txt"]))
        .with_resource_rule(ResourceRule::new(key("io.acme:aaa"), ["a.txt"]))
        .with_class_rule(ClassRule::of_class(known, "com.acme.Kept"));

    let output = captured_warnings(|| {
        let aggregation = rules.aggregate(&deps);
        assert_eq!(aggregation.unknown_artifacts().len(), 2);
    });

    let warning_lines: Vec<&str> = output
        .lines()
        .filter(|line| line.contains("could not apply configured exclusions"))
        .collect();
    assert_eq!(warning_lines.len(), 1, "expected one batched warning");

    let line = warning_lines[0];
    // Sorted, comma-joined, each coordinate exactly once.
    assert!(line.contains("io.acme:aaa, io.acme:zzz"));
    assert_eq!(line.matches("io.acme:aaa").count(), 1);
    assert_eq!(line.matches("io.acme:zzz").count(), 1);
    assert!(!line.contains("io.acme:acme-lib"));
}

#[test]
fn clean_aggregation_emits_no_warning() {
    let a = key("io.acme:acme-lib");
    let deps: DependencySet = [a.clone()].into_iter().collect();
    let rules = RuleSet::new()
        .with_class_rule(ClassRule::of_class(a.clone(), "com.acme.Foo"))
        .with_resource_rule(ResourceRule::new(a, ["extra.txt"]));

    let output = captured_warnings(|| {
        let aggregation = rules.aggregate(&deps);
        assert!(!aggregation.is_empty());
    });

    assert!(!output.contains("could not apply configured exclusions"));
}
