//! # typed_ini
//!
//! A schema-validated INI configuration library.
//!
//! ## What does it do?
//!
//! `typed_ini` reads INI text into an ordered [`Config`] of sections and
//! options, optionally checks it against a [`Schema`] that assigns every option
//! a kind, an arity and a requirement level, and writes configurations back,
//! filling in schema defaults on request.
//!
//! ## Key Features
//!
//! - **Typed values**: boolean, signed, unsigned, float, enum, string, date and
//!   locale kinds with an explicit conversion matrix
//! - **Schemas**: mandatory/optional sections and options, defaults, range,
//!   allow-list and predicate constraints, strict or relaxed mode
//! - **Includes**: `#include name` pulls in other resources through a pluggable
//!   [`ResourceOpener`], with cycle detection
//! - **Links**: `${section:option}` reuses values defined earlier
//! - **Round-trip output**: saved text parses back to the same configuration
//! - **Serde projection**: a [`Config`] implements `serde::Serialize`
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! typed_ini = "0.1"
//! ```
//!
//! ### Loading with a Schema
//!
//! ```rust
//! use typed_ini::{from_str_with_schema, OptionSchema, Schema, SchemaMode, SectionSchema, ValueKind};
//!
//! # fn main() -> typed_ini::Result<()> {
//! let schema = Schema::new().with_section(
//!     SectionSchema::new("server")
//!         .with_option(OptionSchema::new("host", ValueKind::String))?
//!         .with_option(OptionSchema::new("port", ValueKind::Unsigned).optional().with_default(8080u64))?,
//! )?;
//!
//! let config = from_str_with_schema("[server]\nhost = example.org", &schema, SchemaMode::Strict)?;
//! assert_eq!(config.get_value::<u64>("server", "port")?, 8080);
//! # Ok(())
//! # }
//! ```
//!
//! ### Saving
//!
//! ```rust
//! use typed_ini::{ini, to_string};
//!
//! let config = ini! { "db" => { "hosts" => ["a", "b"], "retries" => 3u64 } }.unwrap();
//! assert_eq!(to_string(&config).unwrap(), "[db]\nhosts = a, b\nretries = 3\n");
//! ```
//!
//! ### Includes from Memory
//!
//! ```rust
//! use typed_ini::{from_resource, MapOpener, ResourceStack};
//!
//! let opener = MapOpener::new().with_resource("base.ini", "[base]\nname = shared");
//! let stack = ResourceStack::from_str("#include base.ini\n[local]\nname = ${base:name}", opener);
//! let config = from_resource(stack).unwrap();
//! assert_eq!(config.get_value::<String>("local", "name").unwrap(), "shared");
//! ```
//!
//! ## Logging
//!
//! Include handling, defaults and relaxed pass-through emit `tracing` events at
//! `debug` level, every parsed line at `trace` level. No subscriber is installed.
//!
//! ## Format Reference
//!
//! The accepted dialect is described in [`format`].
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Load, inspect and save a configuration
//! - **`schema.rs`** - Strict and relaxed validation
//! - **`includes.rs`** - In-memory includes and links
//! - **`save_defaults.rs`** - Writing schema defaults and annotated templates
//!
//! Run any example with: `cargo run --example <name>`

pub mod config;
pub mod de;
pub mod error;
pub mod format;
pub mod line;
pub mod macros;
pub mod map;
pub mod options;
pub mod resource;
pub mod schema;
pub mod ser;
pub mod validate;
pub mod value;

pub use config::{Config, ConfigOption, OptionValue, Section};
pub use de::{handle_links, Parser};
pub use error::{Error, Result};
pub use map::NameMap;
pub use options::SaveOptions;
pub use resource::{FileOpener, MapOpener, ResourceOpener, ResourceStack};
pub use schema::{Arity, Constraint, OptionSchema, Requirement, Schema, SchemaMode, SectionSchema};
pub use ser::Serializer;
pub use validate::validate;
pub use value::{FromValue, Value, ValueKind, DATE_FORMAT};

#[doc(hidden)]
pub use macros::build as __build_config;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Parses INI text without a schema.
///
/// Includes are opened as files relative to the working directory.
///
/// # Examples
///
/// ```rust
/// use typed_ini::from_str;
///
/// let config = from_str("[a]\nx = 1, 2").unwrap();
/// assert!(config.option("a", "x").unwrap().is_list());
/// ```
///
/// # Errors
///
/// Returns an error if a line is malformed or an include cannot be read.
/// Syntax errors carry the resource name and line number.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Config> {
    from_resource(ResourceStack::from_str(s, FileOpener::new()))
}

/// Parses INI text and validates it against `schema`.
///
/// # Errors
///
/// As [`from_str`], plus [`Error::Validation`] if the config does not match.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_schema(s: &str, schema: &Schema, mode: SchemaMode) -> Result<Config> {
    from_resource_with_schema(ResourceStack::from_str(s, FileOpener::new()), schema, mode)
}

/// Parses INI text from bytes.
///
/// # Errors
///
/// Returns [`Error::Resource`] if the bytes are not valid UTF-8, otherwise as
/// [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Config> {
    from_resource(ResourceStack::from_bytes(v, FileOpener::new()))
}

/// Parses INI text from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use typed_ini::from_reader;
/// use std::io::Cursor;
///
/// let config = from_reader(Cursor::new(b"[a]\nx = 1")).unwrap();
/// assert_eq!(config.get_value::<i64>("a", "x").unwrap(), 1);
/// ```
///
/// # Errors
///
/// Returns [`Error::Resource`] if reading fails, otherwise as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R: io::Read>(reader: R) -> Result<Config> {
    from_resource(ResourceStack::from_reader(reader, FileOpener::new()))
}

/// Parses INI text from an I/O stream and validates it against `schema`.
///
/// # Errors
///
/// As [`from_reader`], plus [`Error::Validation`] if the config does not match.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_schema<R: io::Read>(
    reader: R,
    schema: &Schema,
    mode: SchemaMode,
) -> Result<Config> {
    from_resource_with_schema(ResourceStack::from_reader(reader, FileOpener::new()), schema, mode)
}

fn file_stack(path: &Path) -> Result<ResourceStack<'static>> {
    let name = path.display().to_string();
    let file = File::open(path).map_err(|e| Error::resource(&name, e))?;
    let key = FileOpener::new().canonical_name(&name);
    let mut opener = FileOpener::new();
    if let Some(parent) = path.parent() {
        opener = opener.with_base_dir(parent);
    }
    Ok(ResourceStack::keyed(&name, key, BufReader::new(file), opener))
}

/// Parses an INI file. Relative includes are resolved against the file's directory.
///
/// # Errors
///
/// Returns [`Error::Resource`] naming the path if the file cannot be opened,
/// otherwise as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    from_resource(file_stack(path.as_ref())?)
}

/// Parses an INI file and validates it against `schema`.
///
/// # Errors
///
/// As [`from_file`], plus [`Error::Validation`] if the config does not match.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_file_with_schema<P: AsRef<Path>>(
    path: P,
    schema: &Schema,
    mode: SchemaMode,
) -> Result<Config> {
    from_resource_with_schema(file_stack(path.as_ref())?, schema, mode)
}

/// Parses everything a prepared [`ResourceStack`] yields.
///
/// # Errors
///
/// Returns an error if a line is malformed or an include cannot be read.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_resource(stack: ResourceStack<'_>) -> Result<Config> {
    Parser::new(stack).parse()
}

/// Parses a prepared [`ResourceStack`] and validates the result.
///
/// # Examples
///
/// ```rust
/// use typed_ini::*;
///
/// let schema = Schema::new()
///     .with_section(SectionSchema::new("a").with_option(OptionSchema::new("x", ValueKind::Signed)).unwrap())
///     .unwrap();
/// let stack = ResourceStack::from_str("[a]\nx = -4\n[b]", MapOpener::new());
///
/// let err = from_resource_with_schema(stack, &schema, SchemaMode::Strict).unwrap_err();
/// assert!(err.is_validation());
/// ```
///
/// # Errors
///
/// As [`from_resource`], plus [`Error::Validation`] if the config does not match.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_resource_with_schema(
    stack: ResourceStack<'_>,
    schema: &Schema,
    mode: SchemaMode,
) -> Result<Config> {
    let raw = from_resource(stack)?;
    validate(&raw, schema, mode)
}

/// Serializes a configuration as-is.
///
/// # Errors
///
/// Returns [`Error::UnsupportedValue`] if a value contains a line break.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(config: &Config) -> Result<String> {
    to_string_with_options(config, SaveOptions::default())
}

/// Serializes a configuration with custom layout options.
///
/// # Errors
///
/// As [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(config: &Config, options: SaveOptions) -> Result<String> {
    let mut serializer = Serializer::new(options);
    serializer.write_config(config)?;
    Ok(serializer.into_inner())
}

/// Serializes a configuration merged with the defaults `schema` declares for
/// entries the configuration lacks.
///
/// # Examples
///
/// ```rust
/// use typed_ini::*;
///
/// let schema = Schema::new()
///     .with_section(
///         SectionSchema::new("log")
///             .with_option(OptionSchema::new("level", ValueKind::String).optional().with_default("info"))
///             .unwrap(),
///     )
///     .unwrap();
/// let config = from_str("[log]").unwrap();
///
/// let text = to_string_with_schema(&config, &schema, SaveOptions::new()).unwrap();
/// assert_eq!(text, "[log]\nlevel = info\n");
/// ```
///
/// # Errors
///
/// As [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_schema(config: &Config, schema: &Schema, options: SaveOptions) -> Result<String> {
    let mut serializer = Serializer::new(options);
    serializer.write_config_with_schema(config, schema)?;
    Ok(serializer.into_inner())
}

/// Serializes the structure `schema` declares: defaults, plus commented stubs
/// for options without one.
///
/// # Errors
///
/// As [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn schema_to_string(schema: &Schema, options: SaveOptions) -> Result<String> {
    let mut serializer = Serializer::new(options);
    serializer.write_schema(schema)?;
    Ok(serializer.into_inner())
}

fn write_all<W: io::Write>(mut writer: W, text: &str) -> Result<()> {
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))
}

/// Serializes a configuration to a writer.
///
/// # Examples
///
/// ```rust
/// use typed_ini::{from_str, to_writer};
///
/// let config = from_str("[a]\nx = 1").unwrap();
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &config).unwrap();
/// assert_eq!(buffer, b"[a]\nx = 1\n");
/// ```
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W: io::Write>(writer: W, config: &Config) -> Result<()> {
    write_all(writer, &to_string(config)?)
}

/// Serializes a configuration merged with schema defaults to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_schema<W: io::Write>(
    writer: W,
    config: &Config,
    schema: &Schema,
    options: SaveOptions,
) -> Result<()> {
    write_all(writer, &to_string_with_schema(config, schema, options)?)
}

/// Serializes a schema's declared structure to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn schema_to_writer<W: io::Write>(writer: W, schema: &Schema, options: SaveOptions) -> Result<()> {
    write_all(writer, &schema_to_string(schema, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::new()
            .with_section(
                SectionSchema::new("app")
                    .with_option(OptionSchema::new("name", ValueKind::String))
                    .unwrap()
                    .with_option(OptionSchema::new("ratio", ValueKind::Float).optional())
                    .unwrap()
                    .with_option(
                        OptionSchema::new("since", ValueKind::Date)
                            .optional()
                            .with_default("2024-01-15 10:30:00"),
                    )
                    .unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn test_load_save_reload() {
        let config = from_str_with_schema("[app]\nname = demo\nratio = 0.25", &schema(), SchemaMode::Strict)
            .unwrap();
        let text = to_string(&config).unwrap();
        assert_eq!(text, "[app]\nname = demo\nratio = 0.25\nsince = 2024-01-15 10:30:00\n");

        let again = from_str_with_schema(&text, &schema(), SchemaMode::Strict).unwrap();
        assert_eq!(again, config);
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let err = from_slice(b"[a]\nx = \xff").unwrap_err();
        assert!(err.is_resource());
    }

    #[test]
    fn test_from_file_missing() {
        let err = from_file("/definitely/not/here.ini").unwrap_err();
        assert!(err.is_resource());
        assert!(err.to_string().contains("here.ini"));
    }

    #[test]
    fn test_writers() {
        let config = from_str("[app]\nname = demo").unwrap();

        let mut buffer = Vec::new();
        to_writer_with_schema(&mut buffer, &config, &schema(), SaveOptions::new()).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "[app]\nname = demo\nsince = 2024-01-15 10:30:00\n"
        );

        let mut buffer = Vec::new();
        schema_to_writer(&mut buffer, &schema(), SaveOptions::new()).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "[app]\n;name =\n;ratio =\nsince = 2024-01-15 10:30:00\n"
        );
    }

    #[test]
    fn test_serde_projection() {
        let config = from_str_with_schema("[app]\nname = demo", &schema(), SchemaMode::Strict).unwrap();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "app": { "name": "demo", "since": "2024-01-15 10:30:00" } })
        );
    }
}
