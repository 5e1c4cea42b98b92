//! Schema validation: turns a raw, string-typed [`Config`] into a typed one.
//!
//! Validation never mutates its input. The result keeps the source order of
//! sections and options; defaults for absent optional options are appended to
//! their section.

use crate::config::{Config, Section};
use crate::schema::{Schema, SchemaMode, SectionSchema};
use crate::{Error, Result};

/// Checks `config` against `schema` and converts every known option to its
/// declared kind and arity.
///
/// # Errors
///
/// Returns [`Error::Validation`] naming the offending `section` or
/// `section.option` when:
///
/// - `mode` is [`SchemaMode::Strict`] and an entry is not in the schema
/// - a mandatory section or option is absent
/// - a value has the wrong arity, cannot be converted or violates a constraint
///
/// # Examples
///
/// ```rust
/// use typed_ini::{validate, OptionSchema, Schema, SchemaMode, SectionSchema, ValueKind};
///
/// # fn main() -> typed_ini::Result<()> {
/// let raw = typed_ini::from_str("[db]\nport = 5432")?;
/// let schema = Schema::new().with_section(
///     SectionSchema::new("db").with_option(OptionSchema::new("port", ValueKind::Unsigned))?,
/// )?;
///
/// let typed = validate(&raw, &schema, SchemaMode::Strict)?;
/// assert_eq!(typed.get_value::<u64>("db", "port")?, 5432);
/// # Ok(())
/// # }
/// ```
pub fn validate(config: &Config, schema: &Schema, mode: SchemaMode) -> Result<Config> {
    if mode == SchemaMode::Strict {
        reject_unknown(config, schema)?;
    }

    for section_schema in schema.iter() {
        if section_schema.is_mandatory() && !config.contains(section_schema.name()) {
            return Err(Error::validation(
                section_schema.name(),
                "mandatory section is missing",
            ));
        }
    }

    let mut validated = Config::new();
    for section in config.iter() {
        let section = match schema.get(section.name()) {
            Some(section_schema) => validate_section(section, section_schema)?,
            None => {
                tracing::debug!(section = section.name(), "passing through unknown section");
                section.clone()
            }
        };
        validated.push(section);
    }
    Ok(validated)
}

fn reject_unknown(config: &Config, schema: &Schema) -> Result<()> {
    for section in config.iter() {
        let Some(section_schema) = schema.get(section.name()) else {
            return Err(Error::validation(section.name(), "unknown section"));
        };
        if let Some(option) = section.iter().find(|o| section_schema.get(o.name()).is_none()) {
            return Err(Error::validation(
                &format!("{}.{}", section.name(), option.name()),
                "unknown option",
            ));
        }
    }
    Ok(())
}

fn validate_section(section: &Section, schema: &SectionSchema) -> Result<Section> {
    let mut validated = Section::unchecked(section.name());

    for option in section.iter() {
        let path = format!("{}.{}", section.name(), option.name());
        let option = match schema.get(option.name()) {
            Some(option_schema) => option_schema.apply(option, &path)?,
            None => {
                tracing::debug!(option = %path, "passing through unknown option");
                option.clone()
            }
        };
        validated.push(option);
    }

    for option_schema in schema.options() {
        if section.contains(option_schema.name()) {
            continue;
        }
        let path = format!("{}.{}", section.name(), option_schema.name());
        if option_schema.is_mandatory() {
            return Err(Error::validation(&path, "mandatory option is missing"));
        }
        if let Some(default) = option_schema.default_option() {
            tracing::debug!(option = %path, "applying default");
            validated.push(default);
        }
    }

    Ok(validated)
}
