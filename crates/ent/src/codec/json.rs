//! JSON adapter mirroring the usual `dump`/`dumps`/`load`/`loads` API.
//!
//! Encoding writes ents in their encoded form; decoding runs the parsed tree
//! through the transform engine so every JSON object becomes an [`Ent`].
//!
//! JSON cannot represent NaN or infinite floats. [`dumps`] and friends
//! reject them with [`EntError::Json`] rather than writing `null`; use the
//! YAML adapter for data that may hold them.
//!
//! [`Ent`]: crate::Ent

use std::io::{Read, Write};

use serde::Serialize;

use crate::codec::finite;
use crate::error::EntError;
use crate::model::{EntClass, Value};
use crate::transform;

/// Options for JSON output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonOptions {
    /// Indent output over multiple lines.
    pub pretty: bool,
}

impl JsonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Serializes a value to a compact JSON string.
pub fn dumps<T: Serialize + ?Sized>(value: &T) -> Result<String, EntError> {
    dumps_with(value, JsonOptions::default())
}

/// Serializes a value to a JSON string with the given options.
pub fn dumps_with<T: Serialize + ?Sized>(value: &T, options: JsonOptions) -> Result<String, EntError> {
    check_finite(value)?;
    let text = if options.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

/// Serializes a value as compact JSON into `writer`.
pub fn dump<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<(), EntError> {
    dump_with(writer, value, JsonOptions::default())
}

/// Serializes a value as JSON into `writer` with the given options.
pub fn dump_with<W: Write, T: Serialize + ?Sized>(
    writer: W,
    value: &T,
    options: JsonOptions,
) -> Result<(), EntError> {
    check_finite(value)?;
    if options.pretty {
        serde_json::to_writer_pretty(writer, value)?;
    } else {
        serde_json::to_writer(writer, value)?;
    }
    Ok(())
}

fn check_finite<T: Serialize + ?Sized>(value: &T) -> Result<(), EntError> {
    finite::check(value).map_err(|err| EntError::Json(err.to_string()))
}

/// Parses JSON text; objects become base-class ents.
///
/// `null` parses to [`Value::Null`].
pub fn loads(text: &str) -> Result<Value, EntError> {
    let plain: Value = serde_json::from_str(text)?;
    Ok(transform::load_owned(plain))
}

/// Parses JSON text; objects become ents of `class`.
pub fn loads_as(class: &EntClass, text: &str) -> Result<Value, EntError> {
    let plain: Value = serde_json::from_str(text)?;
    Ok(class.load_owned(plain))
}

/// Parses JSON from a reader; objects become base-class ents.
pub fn load<R: Read>(reader: R) -> Result<Value, EntError> {
    let plain: Value = serde_json::from_reader(reader)?;
    Ok(transform::load_owned(plain))
}
