//! Recursive transform engine.
//!
//! [`load`] turns arbitrary input into a canonical ent graph:
//!
//! | Input | Result |
//! |-------|--------|
//! | ent | deep copy, same class |
//! | unsafe (`Null`, `Opaque`) | `Null` |
//! | mapping | new ent of the loading class, entries loaded |
//! | sequence / set | same container kind, elements loaded |
//! | scalar | unchanged |
//!
//! Loading through [`EntClass::load`] builds mappings as ents of that class;
//! the free functions use the base class. Recursion stops at
//! [`MAX_DEPTH`]: anything deeper loads as `Null`.

use crate::limits::MAX_DEPTH;
use crate::model::{Ent, EntClass, Map, Value};

/// Loads a value through the base class. The input is never aliased.
pub fn load(value: &Value) -> Value {
    load_owned(value.clone())
}

/// Loads an owned value through the base class.
pub fn load_owned(value: Value) -> Value {
    load_at(&EntClass::base(), value, 0)
}

impl EntClass {
    /// Loads a value, building raw mappings as ents of this class.
    ///
    /// Existing ents keep their own class; use [`Ent::promote`] to change it.
    pub fn load(&self, value: &Value) -> Value {
        self.load_owned(value.clone())
    }

    /// Owned variant of [`EntClass::load`].
    pub fn load_owned(&self, value: Value) -> Value {
        load_at(self, value, 0)
    }
}

pub(crate) fn load_at(class: &EntClass, value: Value, depth: usize) -> Value {
    if depth > MAX_DEPTH {
        tracing::warn!(depth, limit = MAX_DEPTH, "nesting limit reached, dropping subtree");
        return Value::Null;
    }

    match value {
        Value::Ent(ent) => Value::Ent(copy_ent(&ent, depth)),
        Value::Map(map) => Value::Ent(assemble(
            class.clone(),
            map.into_iter()
                .map(|(key, value)| (key, load_at(class, value, depth + 1))),
        )),
        Value::List(items) => Value::List(
            items
                .into_iter()
                .map(|item| load_at(class, item, depth + 1))
                .collect(),
        ),
        Value::Set(set) => Value::Set(
            set.into_iter()
                .map(|item| load_at(class, item, depth + 1))
                .collect(),
        ),
        Value::Null | Value::Opaque(_) => Value::Null,
        scalar => scalar,
    }
}

/// Deep-copies an ent, loading its attributes through its own class.
pub(crate) fn copy_ent(ent: &Ent, depth: usize) -> Ent {
    let class = ent.class();
    assemble(
        class.clone(),
        ent.iter()
            .map(|(key, value)| (key.clone(), load_at(class, value.clone(), depth + 1))),
    )
}

/// Builds an ent from loaded entries, dropping unsafe values stored under
/// keys the class protects.
pub(crate) fn assemble(class: EntClass, entries: impl Iterator<Item = (String, Value)>) -> Ent {
    let mut attrs = Map::new();
    for (key, value) in entries {
        if !value.kind().is_safe() && class.protects(&key) {
            tracing::debug!(
                class = class.name(),
                key = key.as_str(),
                value_type = value.value_type().name(),
                "dropping unsafe value for protected attribute"
            );
            continue;
        }
        attrs.insert(key, value);
    }
    Ent::from_parts(class, attrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValueSet;

    fn foo() -> EntClass {
        EntClass::define("TransformTestFoo", &EntClass::base(), &[]).unwrap()
    }

    fn bar() -> EntClass {
        EntClass::define("TransformTestBar", &foo(), &[]).unwrap()
    }

    fn map(entries: Vec<(&str, Value)>) -> Map {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_scalars_unchanged() {
        for value in [
            Value::Bool(false),
            Value::Int(7),
            Value::Float(0.5),
            Value::from("text"),
            Value::bytes(vec![0u8, 1]),
        ] {
            assert_eq!(load(&value), value);
        }
    }

    #[test]
    fn test_unsafe_loads_as_null() {
        assert_eq!(load(&Value::Null), Value::Null);
        assert_eq!(load(&Value::opaque(|| ())), Value::Null);
        assert_eq!(
            load(&Value::List(vec![Value::Int(1), Value::opaque(3u8)])),
            Value::List(vec![Value::Int(1), Value::Null])
        );
    }

    #[test]
    fn test_containers_keep_kind() {
        let set: ValueSet = vec![Value::Int(1), Value::Map(map(vec![("a", Value::Int(1))]))]
            .into_iter()
            .collect();
        let loaded = load(&Value::Set(set));
        let loaded = loaded.as_set().unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().any(|v| v.as_ent().is_some()));

        let loaded = load(&Value::List(vec![Value::Map(Map::new())]));
        assert!(loaded.as_list().unwrap()[0].as_ent().is_some());
    }

    #[test]
    fn test_class_load_builds_that_class() {
        let data = Value::Map(map(vec![
            ("foo", Value::from("bar")),
            ("hash", Value::Map(map(vec![("x", Value::Int(1))]))),
        ]));

        let loaded = foo().load(&data);
        let ent = loaded.as_ent().unwrap();
        assert_eq!(ent.class(), &foo());
        assert!(ent.is_instance_of(&EntClass::base()));
        assert!(!ent.is_instance_of(&bar()));
        assert_eq!(ent.get_ent("hash").unwrap().class(), &foo());

        let loaded = bar().load(&data);
        assert!(loaded.as_ent().unwrap().is_instance_of(&foo()));
    }

    #[test]
    fn test_loading_ent_preserves_class() {
        let foo_ent = Ent::with_class(foo());

        assert_eq!(load(&Value::Ent(foo_ent.clone())).as_ent().unwrap().class(), &foo());

        let loaded = load(&Value::List(vec![Value::Ent(foo_ent.clone())]));
        assert_eq!(loaded.as_list().unwrap()[0].as_ent().unwrap().class(), &foo());

        let loaded = load(&Value::Map(map(vec![("foo", Value::Ent(foo_ent.clone()))])));
        let outer = loaded.as_ent().unwrap();
        assert_eq!(outer.class(), &EntClass::base());
        assert_eq!(outer.get_ent("foo").unwrap().class(), &foo());

        // Loading through a subclass does not re-tag an existing ent.
        let loaded = bar().load(&Value::Ent(foo_ent));
        assert_eq!(loaded.as_ent().unwrap().class(), &foo());
    }

    #[test]
    fn test_copy_normalises_raw_maps() {
        let mut ent = Ent::with_class(foo());
        ent.set("raw", Value::Map(map(vec![("x", Value::Int(1))])));
        ent.set("handle", Value::opaque(1u8));

        let copy = ent.copy();
        assert_eq!(copy.get_ent("raw").unwrap().class(), &foo());
        assert_eq!(copy.get("handle"), Some(&Value::Null));
    }

    #[test]
    fn test_depth_limit() {
        let mut value = Value::Int(1);
        for _ in 0..(MAX_DEPTH + 10) {
            value = Value::List(vec![value]);
        }
        let loaded = load_owned(value);

        let mut depth = 0;
        let mut cursor = &loaded;
        while let Some(items) = cursor.as_list() {
            cursor = &items[0];
            depth += 1;
        }
        assert_eq!(depth, MAX_DEPTH + 1);
        assert_eq!(cursor, &Value::Null);
    }
}
