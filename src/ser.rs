//! INI serialization.
//!
//! This module provides the [`Serializer`] that renders a [`Config`], a config
//! merged with [`Schema`] defaults, or a bare schema as INI text.
//!
//! ## Overview
//!
//! - **Order**: sections and options are written in iteration order
//! - **Canonical values**: each value is written in its kind's canonical form
//! - **Escaping**: comment markers, separators, backslashes, `$` and edge
//!   whitespace are escaped so the text parses back to the same values
//! - **Annotations**: with [`SaveOptions::annotated`], schema comments and
//!   `; <requirement>, <arity> <kind>` lines precede each entry
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! let config = typed_ini::from_str("[a]\nx = 1 ; one").unwrap();
//! assert_eq!(typed_ini::to_string(&config).unwrap(), "[a]\nx = 1\n");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! Several configurations can be written into one output:
//!
//! ```rust
//! use typed_ini::{ini, SaveOptions, Serializer};
//!
//! let first = ini! { "a" => { "x" => 1 } }.unwrap();
//! let second = ini! { "b" => { "y" => 2 } }.unwrap();
//!
//! let mut serializer = Serializer::new(SaveOptions::new());
//! serializer.write_config(&first).unwrap();
//! serializer.write_config(&second).unwrap();
//! assert_eq!(serializer.into_inner(), "[a]\nx = 1\n\n[b]\ny = 2\n");
//! ```

use crate::config::{Config, ConfigOption, OptionValue, Section};
use crate::line::escape;
use crate::schema::{Arity, OptionSchema, Schema, SectionSchema};
use crate::{Error, Result, SaveOptions};

/// The INI serializer.
///
/// Created via [`Serializer::new`] with customizable options.
#[derive(Debug)]
pub struct Serializer {
    output: String,
    options: SaveOptions,
    sections_written: usize,
}

impl Serializer {
    #[must_use]
    pub fn new(options: SaveOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
            sections_written: 0,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes `config` as-is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValue`](crate::Error::UnsupportedValue) for
    /// a value containing a line break.
    pub fn write_config(&mut self, config: &Config) -> Result<()> {
        for section in config.iter() {
            self.write_section_header(section.name(), None);
            for option in section.iter() {
                self.write_option(option.name(), option.value())?;
            }
        }
        Ok(())
    }

    /// Writes `config` with every schema default it lacks filled in.
    ///
    /// Schema sections absent from `config` are written after the config's own
    /// sections when they contribute at least one line.
    ///
    /// # Errors
    ///
    /// As [`Serializer::write_config`].
    pub fn write_config_with_schema(&mut self, config: &Config, schema: &Schema) -> Result<()> {
        for section in config.iter() {
            match schema.get(section.name()) {
                Some(section_schema) => self.write_merged_section(section, section_schema)?,
                None => {
                    self.write_section_header(section.name(), None);
                    for option in section.iter() {
                        self.write_option(option.name(), option.value())?;
                    }
                }
            }
        }

        for section_schema in schema.iter() {
            if config.contains(section_schema.name()) {
                continue;
            }
            let contributes = self.options.annotated
                || section_schema.options().any(|o| o.default_value().is_some());
            if contributes {
                tracing::debug!(section = section_schema.name(), "writing section from schema");
                self.write_schema_section(section_schema, self.options.annotated)?;
            }
        }
        Ok(())
    }

    /// Writes the declared structure of `schema`: defaults where present,
    /// commented stubs for every other option.
    ///
    /// # Errors
    ///
    /// As [`Serializer::write_config`].
    pub fn write_schema(&mut self, schema: &Schema) -> Result<()> {
        for section_schema in schema.iter() {
            self.write_schema_section(section_schema, true)?;
        }
        Ok(())
    }

    fn write_merged_section(&mut self, section: &Section, schema: &SectionSchema) -> Result<()> {
        self.write_section_header(section.name(), Some(schema));
        for option in section.iter() {
            let option_schema = schema.get(option.name());
            if let Some(option_schema) = option_schema {
                self.write_annotation(option_schema);
            }
            self.write_option(option.name(), option.value())?;
        }
        for option_schema in schema.options() {
            if !section.contains(option_schema.name()) {
                self.write_schema_option(option_schema, self.options.annotated)?;
            }
        }
        Ok(())
    }

    fn write_schema_section(&mut self, schema: &SectionSchema, stubs: bool) -> Result<()> {
        self.write_section_header(schema.name(), Some(schema));
        for option_schema in schema.options() {
            self.write_schema_option(option_schema, stubs)?;
        }
        Ok(())
    }

    fn write_schema_option(&mut self, schema: &OptionSchema, stubs: bool) -> Result<()> {
        match schema.default_value() {
            Some(default) => {
                self.write_annotation(schema);
                self.write_option(schema.name(), default)
            }
            None if stubs => {
                self.write_annotation(schema);
                self.output.push(';');
                self.output.push_str(schema.name());
                self.output.push_str(self.options.assignment().trim_end());
                self.output.push('\n');
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn write_section_header(&mut self, name: &str, schema: Option<&SectionSchema>) {
        if self.sections_written > 0 && self.options.section_spacing {
            self.output.push('\n');
        }
        self.sections_written += 1;

        if let Some(schema) = schema.filter(|_| self.options.annotated) {
            self.write_comment(schema.comment());
            self.write_comment_line(&schema.requirement().to_string());
        }
        self.output.push('[');
        self.output.push_str(name);
        self.output.push_str("]\n");
    }

    fn write_annotation(&mut self, schema: &OptionSchema) {
        if !self.options.annotated {
            return;
        }
        self.write_comment(schema.comment());
        let arity = match schema.arity() {
            Arity::Single => "single",
            Arity::List => "list",
        };
        self.write_comment_line(&format!(
            "{}, {} {}",
            schema.requirement(),
            arity,
            schema.kind()
        ));
        if let Some(constraint) = schema.constraint() {
            self.write_comment_line(&constraint.to_string());
        }
    }

    fn write_comment(&mut self, comment: Option<&str>) {
        for line in comment.into_iter().flat_map(str::lines) {
            self.write_comment_line(line);
        }
    }

    fn write_comment_line(&mut self, text: &str) {
        self.output.push(';');
        if !text.is_empty() {
            self.output.push(' ');
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    fn write_option(&mut self, name: &str, value: &OptionValue) -> Result<()> {
        if is_lone_empty_element(value) {
            return Err(Error::unsupported_value(format!(
                "option '{}' is a list holding one empty element",
                name
            )));
        }
        let rendered = value
            .values()
            .iter()
            .map(|value| escape(&value.to_string()))
            .collect::<Result<Vec<_>>>()?
            .join(self.options.list_separator());

        self.output.push_str(name);
        if rendered.is_empty() {
            self.output.push_str(self.options.assignment().trim_end());
        } else {
            self.output.push_str(self.options.assignment());
            self.output.push_str(&rendered);
        }
        self.output.push('\n');
        Ok(())
    }
}

/// `name =` reads back as an empty list, so this shape has no text form.
fn is_lone_empty_element(value: &OptionValue) -> bool {
    matches!(value, OptionValue::List(values) if values.len() == 1 && values[0].to_string().is_empty())
}

/// Renders one option line without a trailing newline.
///
/// # Examples
///
/// ```rust
/// use typed_ini::{ser::option_line, ConfigOption, SaveOptions, Value};
///
/// let option = ConfigOption::new("path", Value::from("C:\\temp; old")).unwrap();
/// assert_eq!(option_line(&option, &SaveOptions::new()).unwrap(), r"path = C:\\temp\; old");
/// ```
pub fn option_line(option: &ConfigOption, options: &SaveOptions) -> Result<String> {
    let mut serializer = Serializer::new(options.clone());
    serializer.write_option(option.name(), option.value())?;
    let mut line = serializer.into_inner();
    line.pop();
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Constraint, OptionSchema, SectionSchema, Value, ValueKind};

    fn render(config: &Config, options: SaveOptions) -> String {
        let mut serializer = Serializer::new(options);
        serializer.write_config(config).unwrap();
        serializer.into_inner()
    }

    fn sample() -> Config {
        let mut config = Config::new();
        let mut section = Section::new("net").unwrap();
        section
            .insert(ConfigOption::new("port", Value::from(80u64)).unwrap())
            .unwrap();
        section
            .insert(
                ConfigOption::new("hosts", vec![Value::from("a"), Value::from("b,c")]).unwrap(),
            )
            .unwrap();
        section
            .insert(ConfigOption::new("none", Vec::<Value>::new()).unwrap())
            .unwrap();
        config.insert(section).unwrap();
        config.insert(Section::new("empty").unwrap()).unwrap();
        config
    }

    #[test]
    fn test_write_config_layouts() {
        assert_eq!(
            render(&sample(), SaveOptions::new()),
            "[net]\nport = 80\nhosts = a, b\\,c\nnone =\n\n[empty]\n"
        );
        assert_eq!(
            render(&sample(), SaveOptions::compact()),
            "[net]\nport=80\nhosts=a,b\\,c\nnone=\n[empty]\n"
        );
    }

    #[test]
    fn test_line_break_is_unsupported() {
        let mut config = Config::new();
        let mut section = Section::new("s").unwrap();
        section
            .insert(ConfigOption::new("text", Value::from("two\nlines")).unwrap())
            .unwrap();
        config.insert(section).unwrap();

        let mut serializer = Serializer::new(SaveOptions::new());
        let err = serializer.write_config(&config).unwrap_err();
        assert!(matches!(err, crate::Error::UnsupportedValue(_)));
    }

    #[test]
    fn test_lone_empty_list_element_is_unsupported() {
        let lone = ConfigOption::new("v", vec![Value::from("")]).unwrap();
        let err = option_line(&lone, &SaveOptions::new()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedValue(_)));

        let pair = ConfigOption::new("v", vec![Value::from(""), Value::from("")]).unwrap();
        assert_eq!(option_line(&pair, &SaveOptions::new()).unwrap(), "v = , ");

        let none = ConfigOption::new("v", Vec::<Value>::new()).unwrap();
        assert_eq!(option_line(&none, &SaveOptions::new()).unwrap(), "v =");
    }

    fn schema() -> Schema {
        Schema::new()
            .with_section(
                SectionSchema::new("net")
                    .with_comment("Network settings")
                    .with_option(
                        OptionSchema::new("port", ValueKind::Unsigned)
                            .optional()
                            .with_default(8080u64)
                            .with_constraint(Constraint::range(1u64, 65535u64)),
                    )
                    .unwrap()
                    .with_option(OptionSchema::new("host", ValueKind::String))
                    .unwrap(),
            )
            .unwrap()
            .with_section(
                SectionSchema::new("log")
                    .optional()
                    .with_option(
                        OptionSchema::new("level", ValueKind::Enum)
                            .optional()
                            .with_default(Value::enumeration("info")),
                    )
                    .unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn test_write_with_schema_fills_defaults() {
        let config = crate::from_str("[net]\nhost = example.org").unwrap();
        let mut serializer = Serializer::new(SaveOptions::new());
        serializer.write_config_with_schema(&config, &schema()).unwrap();
        assert_eq!(
            serializer.into_inner(),
            "[net]\nhost = example.org\nport = 8080\n\n[log]\nlevel = info\n"
        );
    }

    #[test]
    fn test_write_schema_annotated_stubs() {
        let mut serializer = Serializer::new(SaveOptions::annotated());
        serializer.write_schema(&schema()).unwrap();
        let text = serializer.into_inner();
        assert!(text.starts_with("; Network settings\n; mandatory\n[net]\n"));
        assert!(text.contains("; optional, single unsigned\n; range [1, 65535]\nport = 8080\n"));
        assert!(text.contains("; mandatory, single string\n;host =\n"));
    }

    #[test]
    fn test_write_schema_plain_still_stubs() {
        let mut serializer = Serializer::new(SaveOptions::new());
        serializer.write_schema(&schema()).unwrap();
        assert_eq!(
            serializer.into_inner(),
            "[net]\nport = 8080\n;host =\n\n[log]\nlevel = info\n"
        );
    }
}
