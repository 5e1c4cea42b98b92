//! Strict and relaxed validation against a schema.
//!
//! Run with: cargo run --example schema

use std::error::Error;
use typed_ini::{
    from_str, validate, Constraint, OptionSchema, Schema, SchemaMode, SectionSchema, ValueKind,
};

fn schema() -> typed_ini::Result<Schema> {
    Schema::new()
        .with_section(
            SectionSchema::new("server")
                .with_option(OptionSchema::new("host", ValueKind::String))?
                .with_option(
                    OptionSchema::new("port", ValueKind::Unsigned)
                        .with_constraint(Constraint::range(1u64, 65535u64)),
                )?
                .with_option(
                    OptionSchema::new("debug", ValueKind::Boolean)
                        .optional()
                        .with_default(false),
                )?,
        )?
        .with_section(
            SectionSchema::new("log")
                .optional()
                .with_option(
                    OptionSchema::new("level", ValueKind::Enum)
                        .with_constraint(Constraint::one_of(["debug", "info", "warn"])),
                )?,
        )
}

fn main() -> Result<(), Box<dyn Error>> {
    let schema = schema()?;
    let raw = from_str("[server]\nhost = example.com\nport = 8080\n\n[metrics]\ninterval = 10")?;

    match validate(&raw, &schema, SchemaMode::Strict) {
        Ok(_) => println!("strict: accepted"),
        Err(e) => println!("strict: {}", e),
    }

    let config = validate(&raw, &schema, SchemaMode::Relaxed)?;
    println!("relaxed: accepted");
    println!("  port  = {}", config.get_value::<u64>("server", "port")?);
    println!("  debug = {} (default)", config.get_value::<bool>("server", "debug")?);
    println!(
        "  metrics.interval kind = {}",
        config.option("metrics", "interval").map(|o| o.kind().to_string()).unwrap_or_default()
    );

    let bad = from_str("[server]\nhost = example.com\nport = 70000")?;
    if let Err(e) = validate(&bad, &schema, SchemaMode::Strict) {
        println!("out of range: {}", e);
    }

    Ok(())
}
