//! Resource limits for recursive transforms.
//!
//! Ent graphs are trees built from untrusted input (decoded JSON/YAML), so
//! recursion is bounded to keep pathological nesting from exhausting the
//! stack.

/// Maximum nesting depth followed by the transform engine.
///
/// Deeper subtrees load as [`Value::Null`](crate::Value::Null).
pub const MAX_DEPTH: usize = 256;
