//! Merging and diffing of ent graphs.
//!
//! Both operations walk ents key by key and never change the type of a
//! key's value: an incoming value whose type differs from the existing one
//! is ignored.

pub mod diff;
pub mod merge;

use rustc_hash::FxHashSet;

use crate::error::EntError;
use crate::model::{Ent, Value};

pub use diff::{diff, diff_values};
pub use merge::{merge, merge_values};

/// Options shared by [`merge`] and [`diff`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOptions {
    /// Include keys that later ents have but earlier ones lack.
    pub newkeys: bool,
    /// Keys never taken from later ents.
    pub ignore: FxHashSet<String>,
}

/// Diffing takes the same options as merging.
pub type DiffOptions = MergeOptions;

impl MergeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether keys missing from earlier ents are included.
    pub fn newkeys(mut self, newkeys: bool) -> Self {
        self.newkeys = newkeys;
        self
    }

    /// Adds a key to the ignore set.
    pub fn ignore(mut self, key: impl Into<String>) -> Self {
        self.ignore.insert(key.into());
        self
    }

    /// Adds several keys to the ignore set.
    pub fn ignore_all<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn is_ignored(&self, key: &str) -> bool {
        self.ignore.contains(key)
    }
}

/// Checks that every dynamically supplied argument is an ent.
fn expect_ents<'a>(op: &'static str, values: &'a [Value]) -> Result<Vec<&'a Ent>, EntError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value.as_ent().ok_or(EntError::NotAnEnt {
                op,
                index,
                found: value.value_type(),
            })
        })
        .collect()
}
