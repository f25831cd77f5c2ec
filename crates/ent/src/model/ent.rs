//! The ent record type.
//!
//! An [`Ent`] is an insertion-ordered bag of named [`Value`]s tagged with an
//! [`EntClass`]. Nested mappings are always ents; nested sequences and sets
//! have their elements transformed the same way.

use std::fmt;

use crate::model::{EntClass, Map, Value, ValueSet};
use crate::transform;

/// A recursively-typed attribute record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ent {
    class: EntClass,
    attrs: Map,
}

impl Ent {
    /// Creates an empty ent of the base class.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty ent of the given class.
    pub fn with_class(class: EntClass) -> Self {
        Self {
            class,
            attrs: Map::new(),
        }
    }

    /// Builds a base-class ent from a mapping.
    pub fn from_map(map: Map) -> Self {
        Self::from_map_with(EntClass::base(), map, Map::new())
    }

    /// Builds an ent of `class` from a mapping plus keyword-style overrides.
    ///
    /// Overrides take precedence on key collision. Each entry is admitted as
    /// follows:
    /// - a key protected by the class (see [`EntClass::protects`]) with an
    ///   unsafe value is dropped;
    /// - raw mappings become ents of the *base* class, even when `class` is
    ///   a subclass;
    /// - sequences and sets keep their kind with elements loaded recursively;
    /// - ents keep their own class;
    /// - any other unsafe value is stored as [`Value::Null`].
    pub fn from_map_with(class: EntClass, mut map: Map, overrides: Map) -> Self {
        map.extend(overrides);
        let base = EntClass::base();
        transform::assemble(
            class,
            map.into_iter()
                .map(|(key, value)| (key, transform::load_at(&base, value, 1))),
        )
    }

    /// Assembles an ent from already-loaded attributes without filtering.
    pub(crate) fn from_parts(class: EntClass, attrs: Map) -> Self {
        Self { class, attrs }
    }

    pub fn class(&self) -> &EntClass {
        &self.class
    }

    /// Returns whether this ent's class is `class` or derives from it.
    pub fn is_instance_of(&self, class: &EntClass) -> bool {
        self.class.is_subclass_of(class)
    }

    /// Returns all attributes, in insertion order.
    pub fn attributes(&self) -> &Map {
        &self.attrs
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.attrs.get_mut(key)
    }

    /// Sets an attribute, returning the previous value.
    ///
    /// Assignment after construction is unconstrained: no filtering or
    /// loading happens here.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.attrs.insert(key.into(), value.into())
    }

    /// Removes an attribute, preserving the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attrs.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.attrs.iter()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_int)
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_float)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_bytes(&self, key: &str) -> Option<&[u8]> {
        self.get(key).and_then(Value::as_bytes)
    }

    pub fn get_list(&self, key: &str) -> Option<&[Value]> {
        self.get(key).and_then(Value::as_list)
    }

    pub fn get_set(&self, key: &str) -> Option<&ValueSet> {
        self.get(key).and_then(Value::as_set)
    }

    pub fn get_ent(&self, key: &str) -> Option<&Ent> {
        self.get(key).and_then(Value::as_ent)
    }

    pub fn get_ent_mut(&mut self, key: &str) -> Option<&mut Ent> {
        self.get_mut(key).and_then(Value::as_ent_mut)
    }

    // =========================================================================
    // Transformations
    // =========================================================================

    /// Flattens this ent into a plain [`Value::Map`].
    ///
    /// Private (`_`-prefixed) attributes and unsafe values are left out;
    /// nested ents are encoded recursively.
    pub fn encode(&self) -> Value {
        Value::Map(
            self.encodable()
                .map(|(key, value)| (key.clone(), value.encode()))
                .collect(),
        )
    }

    /// Attributes that take part in encoding.
    pub(crate) fn encodable(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.attrs
            .iter()
            .filter(|(key, value)| !key.starts_with('_') && value.kind().is_safe())
    }

    /// Returns a deep copy with the same class.
    pub fn copy(&self) -> Ent {
        transform::copy_ent(self, 0)
    }

    /// Returns a deep copy re-tagged as `class`.
    pub fn promote(&self, class: &EntClass) -> Ent {
        let mut copy = self.copy();
        copy.class = class.clone();
        copy
    }

    pub(crate) fn attrs_mut(&mut self) -> &mut Map {
        &mut self.attrs
    }
}

impl fmt::Display for Ent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {:?}>", self.class, self.attrs)
    }
}

impl FromIterator<(String, Value)> for Ent {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Ent::from_map(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Ent {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.attrs.iter()
    }
}
