//! Data model types.
//!
//! - Values (the tagged union admitted as attributes) and their classifier
//! - Classes (runtime type identity and the subclass registry)
//! - Ents (attribute records)
//! - Builders (keyword-style construction)

pub mod builder;
pub mod class;
pub mod ent;
pub mod value;

pub use builder::EntBuilder;
pub use class::{BASE_ATTRIBUTES, BASE_CLASS_NAME, EntClass};
pub use ent::Ent;
pub use value::{Kind, Map, Opaque, Value, ValueSet, ValueType};
