//! Building and parsing one record in every registered media type.
//!
//! Run with: cargo run --example simple

use serde_record::{default_factory, from_slice, normalize, to_vec, value, Item};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let data = value!({
        "id": 42,
        "name": "Alice Johnson",
        "email": "alice@example.com",
        "roles": ["admin", "developer"],
        "address": { "city": "Berlin", "zip": "10115" }
    });
    let data = data.as_object().ok_or("not an object")?;
    let expected = normalize(data)?;

    for media_type in default_factory().builder_types() {
        let bytes = to_vec(media_type, data)?;
        println!("{}:\n{}\n", media_type, String::from_utf8_lossy(&bytes));

        let record = from_slice(media_type, &bytes)?;
        assert_eq!(record, expected);
    }
    println!("✓ Round-trip successful");

    let ini = b"name = demo\n[server]\nport = 8080\n";
    let record = from_slice("application/textedit", ini)?;
    let port = record
        .get("server")
        .and_then(Item::as_record)
        .and_then(|server| server.get("port"))
        .and_then(Item::as_i64);
    println!("INI server port: {:?}", port);

    Ok(())
}
