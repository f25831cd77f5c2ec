//! Simple inspector for JSON and YAML documents loaded as ents.
//!
//! Usage: `cargo run --example inspect -- <file.json|file.yaml> [depth]`

use std::fs;

use ent::codec::{json, yaml};
use ent::{Ent, Value};

fn format_value(v: &Value) -> String {
    match v {
        Value::Text(s) => {
            let preview: String = s.chars().take(60).collect();
            if s.chars().count() > 60 {
                format!("\"{}...\"", preview)
            } else {
                format!("\"{}\"", preview)
            }
        }
        Value::Int(i) => format!("{}", i),
        Value::Float(f) => format!("{:.6}", f),
        Value::Bool(b) => format!("{}", b),
        Value::Null => "null".to_string(),
        Value::Bytes(b) => format!("BYTES[{}]", b.len()),
        Value::List(items) => format!("LIST[{}]", items.len()),
        Value::Set(set) => format!("SET[{}]", set.len()),
        Value::Map(map) => format!("MAP[{}]", map.len()),
        Value::Ent(ent) => format!("{}[{}]", ent.class(), ent.len()),
        Value::Opaque(o) => o.to_string(),
    }
}

fn print_ent(ent: &Ent, indent: usize, depth: usize) {
    for (key, value) in ent {
        println!("{:indent$}{} = {}", "", key, format_value(value), indent = indent);
        if depth == 0 {
            continue;
        }
        match value {
            Value::Ent(child) => print_ent(child, indent + 2, depth - 1),
            Value::List(items) => {
                if let Some(Value::Ent(first)) = items.first() {
                    println!("{:indent$}[0]", "", indent = indent + 2);
                    print_ent(first, indent + 4, depth - 1);
                }
            }
            _ => {}
        }
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let path = args.next().expect("usage: inspect <file> [depth]");
    let depth: usize = args
        .next()
        .map(|d| d.parse().expect("depth must be a number"))
        .unwrap_or(2);

    println!("Reading: {}", path);
    let text = fs::read_to_string(&path).expect("Failed to read file");
    println!("File size: {} bytes", text.len());

    let value = if path.ends_with(".yaml") || path.ends_with(".yml") {
        yaml::safe_load(&text).expect("Failed to parse YAML")
    } else {
        json::loads(&text).expect("Failed to parse JSON")
    };

    println!("\n=== Document ===");
    match &value {
        Value::Ent(root) => {
            println!("{} with {} keys", root.class(), root.len());
            print_ent(root, 2, depth);
        }
        other => println!("{}", format_value(other)),
    }
}
