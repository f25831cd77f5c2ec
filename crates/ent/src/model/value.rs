//! Value types stored as ent attributes.
//!
//! Values form a tagged union over the "safe" primitive and container kinds,
//! plus two unsafe variants used only to represent foreign input before it is
//! filtered: [`Value::Null`] and [`Value::Opaque`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::model::Ent;

/// An insertion-ordered raw mapping of attribute names to values.
pub type Map = IndexMap<String, Value>;

/// Classification of a value. Every value has exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Bool, Int, Float, Text or Bytes.
    Scalar,
    /// Ordered sequence.
    Sequence,
    /// Unordered set.
    Set,
    /// Raw mapping (not yet an ent).
    Mapping,
    /// Ent instance.
    Ent,
    /// Anything that may not be stored on an ent.
    Unsafe,
}

impl Kind {
    /// Returns whether values of this kind may be admitted as attributes.
    pub fn is_safe(self) -> bool {
        matches!(
            self,
            Kind::Scalar | Kind::Sequence | Kind::Set | Kind::Mapping | Kind::Ent
        )
    }
}

/// Concrete runtime type of a value.
///
/// Merge and diff only replace a value with one of the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Bool,
    Int,
    Float,
    Text,
    Bytes,
    List,
    Set,
    Map,
    Ent,
    Opaque,
}

impl ValueType {
    /// Returns a lowercase name for this type.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Text => "text",
            ValueType::Bytes => "bytes",
            ValueType::List => "list",
            ValueType::Set => "set",
            ValueType::Map => "map",
            ValueType::Ent => "ent",
            ValueType::Opaque => "opaque",
        }
    }
}

/// A foreign object with no safe representation (a callable, a handle, ...).
///
/// Opaque values are never admitted by construction or loading; they only
/// exist so callers can hand arbitrary data to the transform engine and have
/// it filtered.
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
    /// Wraps an arbitrary value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            inner: Arc::new(value),
        }
    }

    /// Returns the Rust type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns a reference to the wrapped value if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({})", self.type_name)
    }
}

/// Text fallback used when an opaque value has to be serialized.
impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.type_name)
    }
}

/// Opaque values are equal only when they share the same allocation.
impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// An unordered collection of distinct values.
///
/// Values are not hashable (floats, nested ents), so uniqueness is checked by
/// equality and equality between sets ignores order.
#[derive(Debug, Clone, Default)]
pub struct ValueSet {
    items: Vec<Value>,
}

impl ValueSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning false if an equal value was already present.
    pub fn insert(&mut self, value: Value) -> bool {
        if self.items.contains(&value) {
            return false;
        }
        self.items.push(value);
        true
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.contains(value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len() && self.items.iter().all(|v| other.contains(v))
    }
}

impl FromIterator<Value> for ValueSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut set = ValueSet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl IntoIterator for ValueSet {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A dynamically-typed attribute value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Absent value; the result of loading something unsafe.
    #[default]
    Null,

    Bool(bool),

    Int(i64),

    Float(f64),

    /// UTF-8 text.
    Text(String),

    /// Opaque byte string.
    Bytes(Vec<u8>),

    /// Ordered sequence.
    List(Vec<Value>),

    /// Unordered set.
    Set(ValueSet),

    /// Raw mapping. Loading turns these into [`Value::Ent`].
    Map(Map),

    /// Nested ent.
    Ent(Ent),

    /// Foreign object with no safe representation.
    Opaque(Opaque),
}

impl Value {
    /// Creates a byte-string value.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(data.into())
    }

    /// Wraps an arbitrary foreign object.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Value::Opaque(Opaque::new(value))
    }

    /// Classifies this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Text(_) | Value::Bytes(_) => {
                Kind::Scalar
            }
            Value::List(_) => Kind::Sequence,
            Value::Set(_) => Kind::Set,
            Value::Map(_) => Kind::Mapping,
            Value::Ent(_) => Kind::Ent,
            Value::Null | Value::Opaque(_) => Kind::Unsafe,
        }
    }

    /// Returns the concrete type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Text(_) => ValueType::Text,
            Value::Bytes(_) => ValueType::Bytes,
            Value::List(_) => ValueType::List,
            Value::Set(_) => ValueType::Set,
            Value::Map(_) => ValueType::Map,
            Value::Ent(_) => ValueType::Ent,
            Value::Opaque(_) => ValueType::Opaque,
        }
    }

    /// Returns whether both values have the same concrete type.
    ///
    /// Ents only match ents of the same class; opaque values only match
    /// opaque values wrapping the same Rust type.
    pub fn same_type(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Ent(a), Value::Ent(b)) => a.class() == b.class(),
            (Value::Opaque(a), Value::Opaque(b)) => a.type_name() == b.type_name(),
            _ => self.value_type() == other.value_type(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&ValueSet> {
        match self {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_ent(&self) -> Option<&Ent> {
        match self {
            Value::Ent(ent) => Some(ent),
            _ => None,
        }
    }

    pub fn as_ent_mut(&mut self) -> Option<&mut Ent> {
        match self {
            Value::Ent(ent) => Some(ent),
            _ => None,
        }
    }

    /// Flattens this value into plain data.
    ///
    /// Ents become maps (see [`Ent::encode`]), containers are encoded
    /// element-wise and opaque values degrade to their text representation.
    pub fn encode(&self) -> Value {
        match self {
            Value::Ent(ent) => ent.encode(),
            Value::List(items) => Value::List(items.iter().map(Value::encode).collect()),
            Value::Set(set) => Value::Set(set.iter().map(Value::encode).collect()),
            Value::Map(map) => Value::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.encode()))
                    .collect(),
            ),
            Value::Opaque(opaque) => Value::Text(opaque.to_string()),
            other => other.clone(),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<ValueSet> for Value {
    fn from(v: ValueSet) -> Self {
        Value::Set(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Value::Map(v)
    }
}

impl From<Ent> for Value {
    fn from(v: Ent) -> Self {
        Value::Ent(v)
    }
}

impl From<Opaque> for Value {
    fn from(v: Opaque) -> Self {
        Value::Opaque(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
