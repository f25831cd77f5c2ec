//! Serialization adapters.
//!
//! [`plain`] implements serde for [`Value`](crate::Value) and
//! [`Ent`](crate::Ent); [`json`] and [`yaml`] wrap it in the familiar
//! dump/load shapes.

mod finite;
pub mod json;
pub mod plain;
pub mod yaml;

pub use json::JsonOptions;
pub use yaml::YamlOptions;
