//! Key-wise, type-stable extraction of differences between ents.

use crate::error::EntError;
use crate::model::{Ent, Value};
use crate::ops::{DiffOptions, expect_ents};
use crate::transform;

/// Computes the differences across two or more ents.
///
/// Ents are compared pairwise (`ents[0]` with `ents[1]`, then `ents[1]`
/// with `ents[2]`, ...), always against the previous *input*, and the
/// changes are collected into one new base-class ent holding the latest
/// value seen for each changed key. Nested ents are diffed recursively and
/// only appear when something inside them changed. Keys whose value changes
/// type are ignored; keys missing on the left side only appear when
/// [`DiffOptions::newkeys`] is set.
///
/// # Example
///
/// ```rust
/// use ent::{DiffOptions, Ent, diff};
///
/// let mut a = Ent::new();
/// a.set("x", 1);
/// a.set("w", 1);
/// let mut b = Ent::new();
/// b.set("x", 2);
/// b.set("w", 2);
///
/// let changes = diff(&[&a, &b], &DiffOptions::new().ignore("x")).unwrap();
/// assert_eq!(changes.keys().collect::<Vec<_>>(), vec!["w"]);
/// ```
pub fn diff(ents: &[&Ent], options: &DiffOptions) -> Result<Ent, EntError> {
    if ents.len() < 2 {
        return Err(EntError::TooFewEnts {
            op: "diff",
            min: 2,
            found: ents.len(),
        });
    }

    let mut differences = Ent::new();
    for pair in ents.windows(2) {
        diff_into(&mut differences, pair[0], pair[1], options);
    }

    tracing::debug!(ents = ents.len(), changed = differences.len(), "diffed ents");
    Ok(differences)
}

/// Like [`diff`], for arguments whose type is only known at runtime.
///
/// Fails with [`EntError::NotAnEnt`] if any argument is not an ent.
pub fn diff_values(values: &[Value], options: &DiffOptions) -> Result<Ent, EntError> {
    if values.len() < 2 {
        return Err(EntError::TooFewEnts {
            op: "diff",
            min: 2,
            found: values.len(),
        });
    }
    diff(&expect_ents("diff", values)?, options)
}

fn diff_into(differences: &mut Ent, left: &Ent, right: &Ent, options: &DiffOptions) {
    for (key, value) in right {
        if options.is_ignored(key) {
            continue;
        }

        match left.get(key) {
            Some(previous) if previous.same_type(value) => match (previous, value) {
                (Value::Ent(l), Value::Ent(r)) => {
                    let mut delta = Ent::new();
                    diff_into(&mut delta, l, r, options);
                    if !delta.is_empty() {
                        differences.attrs_mut().insert(key.clone(), Value::Ent(delta));
                    }
                }
                (previous, value) => {
                    if previous != value {
                        differences
                            .attrs_mut()
                            .insert(key.clone(), transform::load(value));
                    }
                }
            },
            Some(_) => {}
            None if options.newkeys => {
                differences
                    .attrs_mut()
                    .insert(key.clone(), transform::load(value));
            }
            None => {}
        }
    }
}
