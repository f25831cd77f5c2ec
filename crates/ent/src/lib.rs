//! Ent: recursive, dynamic attribute records for plain data.
//!
//! An [`Ent`] wraps a mapping of string keys to plain values. Loading a plain
//! tree turns every nested mapping into an ent, so deeply nested
//! configuration or API payloads can be read, copied, merged and diffed with
//! one vocabulary.
//!
//! # Quick Start
//!
//! ```rust
//! use ent::{MergeOptions, Value, merge};
//! use ent::codec::json;
//!
//! let base = json::loads(r#"{"server": {"port": 80, "host": "a"}}"#).unwrap();
//! let local = json::loads(r#"{"server": {"port": 8080, "debug": true}}"#).unwrap();
//!
//! let (Value::Ent(base), Value::Ent(local)) = (base, local) else { unreachable!() };
//! let merged = merge(&[&base, &local], &MergeOptions::default()).unwrap();
//!
//! let server = merged.get_ent("server").unwrap();
//! assert_eq!(server.get_int("port"), Some(8080));
//! assert!(!server.contains_key("debug"));
//!
//! assert_eq!(
//!     json::dumps(&merged).unwrap(),
//!     r#"{"server":{"port":8080,"host":"a"}}"#,
//! );
//! ```
//!
//! # Modules
//!
//! - [`model`]: Values, ents and ent classes
//! - [`transform`]: Loading plain data into ents
//! - [`ops`]: Merge and diff
//! - [`codec`]: serde support and JSON/YAML adapters
//! - [`singleton`]: One shared instance per type
//! - [`error`]: Error types
//! - [`limits`]: Nesting limits
//!
//! # Features
//!
//! - `yaml` (default): YAML support through `serde_yaml`. Without it the
//!   YAML functions return [`EntError::NotImplemented`].

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod ops;
pub mod singleton;
pub mod transform;

// Re-export commonly used types at crate root
pub use error::{EntError, ErrorKind};
pub use model::{Ent, EntBuilder, EntClass, Kind, Map, Opaque, Value, ValueSet, ValueType};
pub use ops::{DiffOptions, MergeOptions, diff, diff_values, merge, merge_values};
pub use transform::{load, load_owned};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
