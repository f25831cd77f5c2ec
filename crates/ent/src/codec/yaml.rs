//! YAML adapter mirroring the usual `dump`/`safe_load` API.
//!
//! Output is block style unless [`YamlOptions::default_flow_style`] is set.
//! When the crate is built without the `yaml` feature, every function here
//! returns [`EntError::NotImplemented`].

use std::io::Read;

use serde::Serialize;

use crate::error::EntError;
use crate::model::Value;

/// Options for YAML output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YamlOptions {
    /// Emit the whole document on one line in flow style (`{"a": 1, "b": [1, 2]}`).
    pub default_flow_style: bool,
}

impl YamlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_flow_style(mut self, flow: bool) -> Self {
        self.default_flow_style = flow;
        self
    }
}

/// Serializes a value to a block-style YAML document.
pub fn dump<T: Serialize + ?Sized>(value: &T) -> Result<String, EntError> {
    dump_with(value, YamlOptions::default())
}

#[cfg(feature = "yaml")]
pub use enabled::{dump_with, safe_load, safe_load_reader};

#[cfg(not(feature = "yaml"))]
pub use disabled::{dump_with, safe_load, safe_load_reader};

#[cfg(feature = "yaml")]
mod enabled {
    use std::fmt::Write as _;

    use super::*;
    use crate::transform;

    /// Serializes a value to YAML with the given options.
    pub fn dump_with<T: Serialize + ?Sized>(value: &T, options: YamlOptions) -> Result<String, EntError> {
        if options.default_flow_style {
            let tree = serde_yaml::to_value(value)?;
            let mut text = String::new();
            write_flow(&mut text, &tree)?;
            text.push('\n');
            return Ok(text);
        }
        Ok(serde_yaml::to_string(value)?)
    }

    /// Writes a YAML node as a single flow-style line.
    fn write_flow(out: &mut String, node: &serde_yaml::Value) -> Result<(), EntError> {
        use serde_yaml::Value as Node;

        match node {
            Node::Null => out.push_str("null"),
            Node::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Node::Number(n) => write_number(out, n),
            // Double-quoted JSON strings are valid YAML scalars.
            Node::String(s) => out.push_str(&serde_json::to_string(s)?),
            Node::Sequence(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_flow(out, item)?;
                }
                out.push(']');
            }
            Node::Mapping(mapping) => {
                out.push('{');
                for (i, (key, value)) in mapping.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_flow(out, key)?;
                    out.push_str(": ");
                    write_flow(out, value)?;
                }
                out.push('}');
            }
            Node::Tagged(tagged) => {
                let _ = write!(out, "{} ", tagged.tag);
                write_flow(out, &tagged.value)?;
            }
        }
        Ok(())
    }

    fn write_number(out: &mut String, n: &serde_yaml::Number) {
        if let Some(i) = n.as_i64() {
            let _ = write!(out, "{i}");
        } else if let Some(u) = n.as_u64() {
            let _ = write!(out, "{u}");
        } else {
            match n.as_f64() {
                Some(f) if f.is_nan() => out.push_str(".nan"),
                Some(f) if f == f64::INFINITY => out.push_str(".inf"),
                Some(f) if f == f64::NEG_INFINITY => out.push_str("-.inf"),
                Some(f) => {
                    let _ = write!(out, "{f:?}");
                }
                None => {
                    let _ = write!(out, "{n}");
                }
            }
        }
    }

    /// Parses a YAML document; mappings become base-class ents.
    pub fn safe_load(text: &str) -> Result<Value, EntError> {
        let plain: Value = serde_yaml::from_str(text)?;
        Ok(transform::load_owned(plain))
    }

    /// Parses a YAML document from a reader.
    pub fn safe_load_reader<R: Read>(reader: R) -> Result<Value, EntError> {
        let plain: Value = serde_yaml::from_reader(reader)?;
        Ok(transform::load_owned(plain))
    }
}

#[cfg(not(feature = "yaml"))]
mod disabled {
    use super::*;

    const FEATURE: &str = "yaml";

    pub fn dump_with<T: Serialize + ?Sized>(_value: &T, _options: YamlOptions) -> Result<String, EntError> {
        Err(EntError::NotImplemented { feature: FEATURE })
    }

    pub fn safe_load(_text: &str) -> Result<Value, EntError> {
        Err(EntError::NotImplemented { feature: FEATURE })
    }

    pub fn safe_load_reader<R: Read>(_reader: R) -> Result<Value, EntError> {
        Err(EntError::NotImplemented { feature: FEATURE })
    }
}

#[cfg(all(test, feature = "yaml"))]
mod tests {
    use super::*;
    use crate::model::Ent;

    #[test]
    fn test_load_types() {
        assert_eq!(safe_load("1").unwrap(), Value::Int(1));
        assert_eq!(safe_load("1.0").unwrap(), Value::Float(1.0));
        assert_eq!(safe_load("true").unwrap(), Value::Bool(true));
        assert_eq!(safe_load(r#""foo""#).unwrap(), Value::from("foo"));
        assert_eq!(safe_load("[]").unwrap(), Value::List(vec![]));
        assert_eq!(safe_load("{}").unwrap(), Value::Ent(Ent::new()));
        assert_eq!(safe_load("null").unwrap(), Value::Null);
    }

    #[test]
    fn test_dump_types() {
        assert_eq!(dump(&1).unwrap(), "1\n");
        assert_eq!(dump(&true).unwrap(), "true\n");
        assert_eq!(dump(&Value::Null).unwrap(), "null\n");
        assert_eq!(dump(&Value::List(vec![])).unwrap(), "[]\n");
        assert_eq!(dump(&Ent::new()).unwrap(), "{}\n");
    }

    #[test]
    fn test_block_style_by_default() {
        let value = safe_load("a: 1\nb:\n  - x\n  - y\nc:\n  d: true\n").unwrap();
        let text = dump(&value).unwrap();
        assert_eq!(text, "a: 1\nb:\n- x\n- y\nc:\n  d: true\n");
        assert_eq!(safe_load(&text).unwrap(), value);
    }

    #[test]
    fn test_flow_style_override() {
        let value = safe_load("a: 1\nb: [x, y]\n").unwrap();
        let text = dump_with(&value, YamlOptions::new().default_flow_style(true)).unwrap();
        assert_eq!(text, "{\"a\": 1, \"b\": [\"x\", \"y\"]}\n");
        assert_eq!(safe_load(&text).unwrap(), value);
    }

    #[test]
    fn test_flow_style_keeps_non_finite_floats() {
        let mut ent = Ent::new();
        ent.set("f", f64::NAN);
        ent.set("g", f64::INFINITY);
        ent.set("h", f64::NEG_INFINITY);
        ent.set("i", 0.5);

        let text = dump_with(&ent, YamlOptions::new().default_flow_style(true)).unwrap();
        assert_eq!(text, "{\"f\": .nan, \"g\": .inf, \"h\": -.inf, \"i\": 0.5}\n");

        let loaded = safe_load(&text).unwrap();
        let loaded = loaded.as_ent().unwrap();
        assert!(loaded.get_float("f").unwrap().is_nan());
        assert_eq!(loaded.get_float("g"), Some(f64::INFINITY));
        assert_eq!(loaded.get_float("h"), Some(f64::NEG_INFINITY));
        assert_eq!(loaded.get_float("i"), Some(0.5));
    }

    #[test]
    fn test_flow_style_nested_and_quoted() {
        let value = safe_load("a:\n  b: [1, {c: true}]\nt: \"line\\nbreak\"\n").unwrap();
        let text = dump_with(&value, YamlOptions::new().default_flow_style(true)).unwrap();
        assert_eq!(text, "{\"a\": {\"b\": [1, {\"c\": true}]}, \"t\": \"line\\nbreak\"}\n");
        assert_eq!(safe_load(&text).unwrap(), value);
    }

    #[test]
    fn test_non_string_keys() {
        let value = safe_load("1: one\ntrue: yes\n").unwrap();
        let ent = value.as_ent().unwrap();
        assert_eq!(ent.get_str("1"), Some("one"));
        assert_eq!(ent.get_str("true"), Some("yes"));
    }
}

#[cfg(all(test, not(feature = "yaml")))]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::Ent;

    fn assert_not_implemented<T: std::fmt::Debug>(result: Result<T, EntError>) {
        let err = result.unwrap_err();
        assert_eq!(err, EntError::NotImplemented { feature: "yaml" });
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
    }

    #[test]
    fn test_everything_reports_not_implemented() {
        assert_not_implemented(dump(&Ent::new()));
        assert_not_implemented(dump_with(&Value::Int(1), YamlOptions::new().default_flow_style(true)));
        assert_not_implemented(safe_load("a: 1"));
        assert_not_implemented(safe_load_reader("a: 1".as_bytes()));
    }
}
