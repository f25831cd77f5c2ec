//! Key-wise, type-stable combination of ents.

use crate::error::EntError;
use crate::model::{Ent, Value};
use crate::ops::{MergeOptions, expect_ents};
use crate::transform;

/// Merges one or more ents into a new ent.
///
/// The result starts as a deep copy of the first ent (keeping its class).
/// Each later ent then overwrites existing keys whose value has the same
/// type; nested ents are merged recursively. Values of a different type are
/// ignored. Keys absent from the accumulated result are only added when
/// [`MergeOptions::newkeys`] is set. The inputs are not modified.
///
/// # Example
///
/// ```rust
/// use ent::{Ent, MergeOptions, merge};
///
/// let mut a = Ent::new();
/// a.set("x", 1);
/// let mut b = Ent::new();
/// b.set("x", 2);
/// b.set("y", 3);
///
/// let merged = merge(&[&a, &b], &MergeOptions::default()).unwrap();
/// assert_eq!(merged.get_int("x"), Some(2));
/// assert!(!merged.contains_key("y"));
///
/// let merged = merge(&[&a, &b], &MergeOptions::new().newkeys(true)).unwrap();
/// assert_eq!(merged.get_int("y"), Some(3));
/// ```
pub fn merge(ents: &[&Ent], options: &MergeOptions) -> Result<Ent, EntError> {
    let (first, rest) = ents.split_first().ok_or(EntError::NoEnts { op: "merge" })?;

    let mut merged = first.copy();
    for ent in rest {
        merge_into(&mut merged, ent, options);
    }

    tracing::debug!(ents = ents.len(), keys = merged.len(), "merged ents");
    Ok(merged)
}

/// Like [`merge`], for arguments whose type is only known at runtime.
///
/// Fails with [`EntError::NotAnEnt`] if any argument is not an ent.
pub fn merge_values(values: &[Value], options: &MergeOptions) -> Result<Ent, EntError> {
    if values.is_empty() {
        return Err(EntError::NoEnts { op: "merge" });
    }
    merge(&expect_ents("merge", values)?, options)
}

fn merge_into(acc: &mut Ent, incoming: &Ent, options: &MergeOptions) {
    for (key, value) in incoming {
        if options.is_ignored(key) {
            continue;
        }

        match acc.get_mut(key) {
            Some(existing) if existing.same_type(value) => match (existing, value) {
                (Value::Ent(left), Value::Ent(right)) => merge_into(left, right, options),
                (existing, value) => *existing = transform::load(value),
            },
            Some(_) => {
                tracing::trace!(key = key.as_str(), "type mismatch, keeping existing value");
            }
            None if options.newkeys => {
                acc.attrs_mut().insert(key.clone(), transform::load(value));
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntClass, Map};

    fn ent(entries: Vec<(&str, Value)>) -> Ent {
        Ent::from_map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<Map>(),
        )
    }

    fn nested(entries: Vec<(&str, Value)>) -> Value {
        Value::Ent(ent(entries))
    }

    #[test]
    fn test_overwrite_same_type() {
        let a = ent(vec![("x", Value::Int(1))]);
        let b = ent(vec![("x", Value::Int(2))]);
        let merged = merge(&[&a, &b], &MergeOptions::default()).unwrap();
        assert_eq!(merged, ent(vec![("x", Value::Int(2))]));
    }

    #[test]
    fn test_type_mismatch_ignored() {
        let a = ent(vec![("x", Value::Int(1))]);
        let b = ent(vec![("x", Value::from("s"))]);
        let merged = merge(&[&a, &b], &MergeOptions::default()).unwrap();
        assert_eq!(merged, a);

        let b = ent(vec![("x", Value::Float(2.0))]);
        let merged = merge(&[&a, &b], &MergeOptions::default()).unwrap();
        assert_eq!(merged, a);
    }

    #[test]
    fn test_newkeys() {
        let a = ent(vec![("x", Value::Int(1))]);
        let b = ent(vec![("x", Value::Int(1)), ("y", Value::Int(2))]);

        let merged = merge(&[&a, &b], &MergeOptions::default()).unwrap();
        assert_eq!(merged, ent(vec![("x", Value::Int(1))]));

        let merged = merge(&[&a, &b], &MergeOptions::new().newkeys(true)).unwrap();
        assert_eq!(merged, ent(vec![("x", Value::Int(1)), ("y", Value::Int(2))]));
    }

    #[test]
    fn test_ignore() {
        let a = ent(vec![("x", Value::Int(1)), ("w", Value::Int(1))]);
        let b = ent(vec![("x", Value::Int(2)), ("w", Value::Int(2))]);
        let merged = merge(&[&a, &b], &MergeOptions::new().ignore("x")).unwrap();
        assert_eq!(merged, ent(vec![("x", Value::Int(1)), ("w", Value::Int(2))]));
    }

    #[test]
    fn test_nested_merge() {
        let a = ent(vec![("h", nested(vec![("a", Value::Int(1)), ("b", Value::Int(1))]))]);
        let b = ent(vec![("h", nested(vec![("b", Value::Int(2)), ("c", Value::Int(3))]))]);

        let merged = merge(&[&a, &b], &MergeOptions::default()).unwrap();
        assert_eq!(
            merged,
            ent(vec![("h", nested(vec![("a", Value::Int(1)), ("b", Value::Int(2))]))])
        );

        let merged = merge(&[&a, &b], &MergeOptions::new().newkeys(true)).unwrap();
        let h = merged.get_ent("h").unwrap();
        assert_eq!(h.get_int("c"), Some(3));
    }

    #[test]
    fn test_many_ents_later_wins() {
        let a = ent(vec![("x", Value::Int(1))]);
        let b = ent(vec![("x", Value::Int(2))]);
        let c = ent(vec![("x", Value::Int(3))]);
        let merged = merge(&[&a, &b, &c], &MergeOptions::default()).unwrap();
        assert_eq!(merged.get_int("x"), Some(3));
    }

    #[test]
    fn test_keeps_first_class_and_inputs() {
        let foo = EntClass::define("MergeTestFoo", &EntClass::base(), &[]).unwrap();
        let a = ent(vec![("x", Value::Int(1))]).promote(&foo);
        let b = ent(vec![("x", Value::Int(2))]);

        let merged = merge(&[&a, &b], &MergeOptions::default()).unwrap();
        assert_eq!(merged.class(), &foo);
        assert_eq!(a.get_int("x"), Some(1));
        assert_eq!(b.get_int("x"), Some(2));

        let single = merge(&[&a], &MergeOptions::default()).unwrap();
        assert_eq!(single, a);
    }

    #[test]
    fn test_nested_class_mismatch_ignored() {
        let foo = EntClass::define("MergeTestNested", &EntClass::base(), &[]).unwrap();
        let a = ent(vec![("h", nested(vec![("a", Value::Int(1))]))]);
        let b = ent(vec![("h", Value::Ent(ent(vec![("a", Value::Int(2))]).promote(&foo)))]);
        let merged = merge(&[&a, &b], &MergeOptions::default()).unwrap();
        assert_eq!(merged, a);
    }

    #[test]
    fn test_invalid_arguments() {
        let err = merge(&[], &MergeOptions::default()).unwrap_err();
        assert_eq!(err, EntError::NoEnts { op: "merge" });

        let err = merge_values(&[], &MergeOptions::default()).unwrap_err();
        assert_eq!(err, EntError::NoEnts { op: "merge" });

        let err = merge_values(
            &[Value::Ent(Ent::new()), Value::from("nope")],
            &MergeOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EntError::NotAnEnt { index: 1, .. }));

        let merged = merge_values(
            &[nested(vec![("x", Value::Int(1))]), nested(vec![("x", Value::Int(5))])],
            &MergeOptions::default(),
        )
        .unwrap();
        assert_eq!(merged.get_int("x"), Some(5));
    }
}
