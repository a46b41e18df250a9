//! Class-name matchers
//!
//! A [`ClassMatcher`] is the predicate half of a class exclusion rule. The
//! common forms (exact name, name plus nested classes) are inspectable and
//! comparable by value; the fully general form stores an opaque callable and
//! compares by predicate identity, so clones of one rule stay equal.
//!
//! Once constructed a matcher is referentially stable and pure: no side
//! effects, deterministic per input.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Suffix of a class file entry inside an artifact archive
pub const CLASS_FILE_SUFFIX: &str = ".class";

/// Predicate over fully-qualified class names
#[derive(Clone)]
pub enum ClassMatcher {
    /// Matches exactly one class name
    Exact(String),
    /// Matches a class name and any of its nested classes (`Name$Inner`)
    WithNested(String),
    /// Matches whatever the caller-supplied predicate matches
    Custom(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl ClassMatcher {
    /// Matcher for exactly one class name
    pub fn exact(class_name: impl Into<String>) -> Self {
        Self::Exact(class_name.into())
    }

    /// Matcher for a class name plus any `$`-suffixed nested class of it
    pub fn with_nested(class_name: impl Into<String>) -> Self {
        Self::WithNested(class_name.into())
    }

    /// Matcher wrapping an arbitrary caller-supplied predicate
    ///
    /// The predicate must be pure and deterministic per input; it is shared
    /// by reference, so clones of the matcher compare equal.
    pub fn custom(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(predicate))
    }

    /// Test a fully-qualified, dotted class name
    #[must_use]
    pub fn matches(&self, class_name: &str) -> bool {
        match self {
            Self::Exact(name) => class_name == name,
            Self::WithNested(name) => class_name
                .strip_prefix(name.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('$')),
            Self::Custom(predicate) => predicate(class_name),
        }
    }

    /// Test an archive file name (e.g. `com/acme/Foo.class`)
    ///
    /// # Errors
    ///
    /// Returns `Error::NotAClassFile` if `file_name` does not end with
    /// `.class` - that is a contract violation by the caller, not a
    /// non-match.
    pub fn matches_file_name(&self, file_name: &str) -> Result<bool> {
        let class_name = class_name_from_path(file_name)?;
        Ok(self.matches(&class_name))
    }
}

/// Derive the dotted class name from an archive path
///
/// Strips exactly the `.class` suffix from the end of the path, then
/// replaces `/` separators with `.`.
///
/// # Errors
///
/// Returns `Error::NotAClassFile` if the path does not end with `.class`.
pub fn class_name_from_path(path: &str) -> Result<String> {
    path.strip_suffix(CLASS_FILE_SUFFIX)
        .map(|stem| stem.replace('/', "."))
        .ok_or_else(|| Error::not_a_class_file(path))
}

impl fmt::Debug for ClassMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(name) => f.debug_tuple("Exact").field(name).finish(),
            Self::WithNested(name) => f.debug_tuple("WithNested").field(name).finish(),
            Self::Custom(_) => f.write_str("Custom(<predicate>)"),
        }
    }
}

impl PartialEq for ClassMatcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) | (Self::WithNested(a), Self::WithNested(b)) => {
                a == b
            }
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for ClassMatcher {}
