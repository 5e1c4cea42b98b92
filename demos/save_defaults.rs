//! Writing schema defaults and annotated templates.
//!
//! Run with: cargo run --example save_defaults

use std::error::Error;
use typed_ini::{
    from_str, schema_to_string, to_string_with_schema, Constraint, OptionSchema, SaveOptions,
    Schema, SectionSchema, Value, ValueKind,
};

fn main() -> Result<(), Box<dyn Error>> {
    let schema = Schema::new().with_section(
        SectionSchema::new("cache")
            .with_comment("In-memory cache")
            .with_option(OptionSchema::new("backend", ValueKind::String).with_comment("redis or memory"))?
            .with_option(
                OptionSchema::new("size_mb", ValueKind::Unsigned)
                    .optional()
                    .with_default(256u64)
                    .with_constraint(Constraint::at_least(16u64)),
            )?
            .with_option(
                OptionSchema::new("regions", ValueKind::String)
                    .list()
                    .optional()
                    .with_default(vec![Value::from("eu"), Value::from("us")]),
            )?,
    )?;

    println!("Template:\n{}", schema_to_string(&schema, SaveOptions::annotated())?);

    let config = from_str("[cache]\nbackend = redis")?;
    println!("Merged:\n{}", to_string_with_schema(&config, &schema, SaveOptions::new())?);

    Ok(())
}
