//! Builder API for keyword-style ent construction.
//!
//! # Example
//!
//! ```rust
//! use ent::{EntBuilder, Map, Value};
//!
//! let mut data = Map::new();
//! data.insert("name".to_string(), Value::from("alice"));
//! data.insert("age".to_string(), Value::from(30));
//!
//! let ent = EntBuilder::new()
//!     .data(data)
//!     .set("age", 31)
//!     .set("tags", vec!["admin", "ops"])
//!     .build();
//!
//! assert_eq!(ent.get_int("age"), Some(31));
//! assert_eq!(ent.get_list("tags").map(|t| t.len()), Some(2));
//! ```

use crate::model::{Ent, EntClass, Map, Value};

/// Builder for an [`Ent`] from a base mapping plus overrides.
#[derive(Debug, Clone, Default)]
pub struct EntBuilder {
    class: EntClass,
    data: Map,
    overrides: Map,
}

impl EntBuilder {
    /// Creates a builder for a base-class ent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the class of the built ent.
    pub fn class(mut self, class: EntClass) -> Self {
        self.class = class;
        self
    }

    /// Sets the base mapping.
    pub fn data(mut self, data: Map) -> Self {
        self.data = data;
        self
    }

    /// Adds an override entry. Overrides win over the base mapping.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Builds the ent, applying the usual admission rules.
    pub fn build(self) -> Ent {
        Ent::from_map_with(self.class, self.data, self.overrides)
    }
}
