//! Editing records through entities, and what the errors look like.
//!
//! Run with: cargo run --example dynamic_values

use serde_record::{
    to_vec, value, AnyRecordEntity, Error, ErrorCode, GenericRecordEntity, Item, RecordEntity,
    Value,
};
use std::error::Error as _;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=serde_record=debug shows registry lookups.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut config = RecordEntity::new();
    config.set_property("host", "localhost")?;
    config.set_property("port", 8080)?;
    config.set_property("features", value!(["auth", "logging", "metrics"]))?;
    config.set_property("proxy", Value::Null)?;

    println!("host:     {:?}", config.property("host")?.as_str());
    println!("port:     {:?}", config.property("port")?.as_i64());
    println!("proxy:    {:?}", config.property_or("proxy", Item::String("direct".to_string()))?);
    println!("has proxy: {}", config.has_property("proxy"));

    let record = config.record()?;
    let bytes = to_vec("application/json", &record.to_map())?;
    println!("as JSON:  {}\n", String::from_utf8(bytes)?);

    // Keys follow a strict grammar.
    for key in ["1st", "umläutz", "with space"] {
        if let Err(err) = config.set_property(key, true) {
            println!("rejected {:?}: {}", key, err);
        }
    }

    // So do items.
    let err = config
        .set_property("payload", value!({ "raw": (vec![0u8, 1, 2]) }))
        .unwrap_err();
    println!("rejected payload: {}", err);

    match config.property("timeout") {
        Err(err) if err.code() == ErrorCode::NotFound => println!("missing: {}", err),
        other => println!("unexpected: {:?}", other),
    }

    // Computed records are validated on every call.
    let computed = GenericRecordEntity::new(|| match value!({ "0": "index keys are not names" }) {
        Value::Object(map) => Ok(map),
        _ => Err(Error::runtime(ErrorCode::InternalError, "not an object")),
    });
    let err = computed.record().unwrap_err();
    println!("\n{}", err);
    if let Some(cause) = err.source() {
        println!("  caused by: {}", cause);
    }

    Ok(())
}
