//! Benchmark for loading, merging, diffing and serializing ents.
//!
//! Builds a synthetic dataset of nested city records. The record count can be
//! passed as the first argument. Phase timings are logged through `tracing`;
//! `RUST_LOG` controls what is shown.

use std::time::{Duration, Instant};

use ent::codec::{json, yaml};
use ent::{DiffOptions, Ent, MergeOptions, Value};
use serde_json::json;
use tracing_subscriber::EnvFilter;

const DEFAULT_RECORDS: usize = 20_000;
const ITERS: u32 = 5;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ent=info,bench_ent=info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn city(i: usize, revision: usize) -> serde_json::Value {
    json!({
        "id": i,
        "name": format!("city-{i}"),
        "population": (i * 7919 + revision * 13) % 5_000_000,
        "capital": i % 50 == 0,
        "location": {
            "lat": (i % 180) as f64 - 90.0 + revision as f64 * 0.001,
            "lon": (i % 360) as f64 - 180.0,
        },
        "timezone": format!("UTC+{}", i % 12),
        "tags": ["city", format!("region-{}", i % 17)],
        "state": {
            "name": format!("state-{}", i % 300),
            "country": { "code": format!("C{}", i % 40), "revision": revision },
        },
    })
}

fn dataset(records: usize, revision: usize) -> Value {
    let plain = json!({
        "revision": revision,
        "cities": (0..records).map(|i| city(i, revision)).collect::<Vec<_>>(),
    });
    serde_json::from_value(plain).expect("Failed to convert dataset")
}

fn as_ent(value: Value) -> Ent {
    match value {
        Value::Ent(ent) => ent,
        other => panic!("expected an ent, got {}", other.value_type().name()),
    }
}

/// Runs `f` a few times after one warmup run and returns the average time.
fn time<T>(mut f: impl FnMut() -> T) -> (T, Duration) {
    let _ = f();
    let start = Instant::now();
    let mut out = None;
    for _ in 0..ITERS {
        out = Some(f());
    }
    let elapsed = start.elapsed() / ITERS;
    (out.expect("ITERS is non-zero"), elapsed)
}

fn main() {
    init_logging();

    let records = std::env::args()
        .nth(1)
        .map(|arg| arg.parse().expect("Record count must be a number"))
        .unwrap_or(DEFAULT_RECORDS);

    println!("Building {} records (ent {})", records, ent::VERSION);

    let build_start = Instant::now();
    let before = dataset(records, 0);
    let after = dataset(records, 1);
    tracing::info!(phase = "build", elapsed = ?build_start.elapsed(), "built plain data");

    // Load
    let (loaded, load_time) = time(|| ent::load(&before));
    let base = as_ent(loaded);
    let newer = as_ent(ent::load(&after));
    tracing::info!(phase = "load", elapsed = ?load_time, iterations = ITERS, "timed");

    // Copy
    let (copied, copy_time) = time(|| base.copy());
    assert_eq!(copied, base);
    tracing::info!(phase = "copy", elapsed = ?copy_time, "timed");

    // Encode
    let (encoded, encode_time) = time(|| base.encode());
    assert_eq!(encoded, before);
    tracing::info!(phase = "encode", elapsed = ?encode_time, "timed");

    // Merge
    let options = MergeOptions::default();
    let (merged, merge_time) = time(|| ent::merge(&[&base, &newer], &options).expect("Failed to merge"));
    assert_eq!(merged.get_int("revision"), Some(1));
    tracing::info!(phase = "merge", elapsed = ?merge_time, "timed");

    // Diff
    let options = DiffOptions::new().ignore("revision");
    let (changes, diff_time) = time(|| ent::diff(&[&base, &newer], &options).expect("Failed to diff"));
    assert!(!changes.contains_key("revision"));
    tracing::info!(phase = "diff", elapsed = ?diff_time, changed = changes.len(), "timed");

    // JSON
    let (text, dumps_time) = time(|| json::dumps(&base).expect("Failed to encode JSON"));
    let (decoded, loads_time) = time(|| json::loads(&text).expect("Failed to decode JSON"));
    assert_eq!(as_ent(decoded), base);
    tracing::info!(phase = "json.dumps", elapsed = ?dumps_time, bytes = text.len(), "timed");
    tracing::info!(phase = "json.loads", elapsed = ?loads_time, "timed");
    println!("\nJSON: {} bytes", text.len());
    println!(
        "  dumps: {:?} ({:.2} MB/s)",
        dumps_time,
        (text.len() as f64 / 1_000_000.0) / dumps_time.as_secs_f64()
    );
    println!(
        "  loads: {:?} ({:.2} MB/s)",
        loads_time,
        (text.len() as f64 / 1_000_000.0) / loads_time.as_secs_f64()
    );

    // YAML
    match yaml::dump(&base) {
        Ok(_) => {
            let (text, dump_time) = time(|| yaml::dump(&base).expect("Failed to encode YAML"));
            let (decoded, load_time) = time(|| yaml::safe_load(&text).expect("Failed to decode YAML"));
            assert_eq!(as_ent(decoded), base);
            tracing::info!(phase = "yaml.dump", elapsed = ?dump_time, bytes = text.len(), "timed");
            tracing::info!(phase = "yaml.safe_load", elapsed = ?load_time, "timed");
        }
        Err(err) => tracing::warn!(error = %err, "skipping YAML phase"),
    }

    println!("\n=== Summary ===");
    println!("Records: {}", records);
    println!("Top-level keys: {}", base.len());
    println!("JSON size: {} bytes ({:.1} MB)", text.len(), text.len() as f64 / 1_000_000.0);
}
