//! INI parsing.
//!
//! This module provides the [`Parser`] that drains a [`ResourceStack`] into a
//! raw [`Config`]. Every parsed value is of the `string` kind; kinds are only
//! assigned by [`validate`](crate::validate()).
//!
//! ## Overview
//!
//! - **Single pass**: each line is classified once, in source order
//! - **Includes**: resolved by the stack, so the parser sees one stream of lines
//! - **Links**: `${section:option}` elements are replaced by values parsed earlier
//! - **Error reporting**: syntax errors carry the resource name and its own line number
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! let config = typed_ini::from_str("[paths]\nroot = /srv\nall = ${paths:root}, /tmp").unwrap();
//! let all: Vec<String> = config.option("paths", "all").unwrap().get_list().unwrap();
//! assert_eq!(all, vec!["/srv", "/tmp"]);
//! ```

use crate::config::{Config, ConfigOption, OptionValue};
use crate::line::{self, Element, Token};
use crate::resource::{ResourceStack, SourceLine};
use crate::{Result, Value, ValueKind};

/// The INI parser.
///
/// Created via [`Parser::new`] and consumed by [`Parser::parse`].
#[derive(Debug)]
pub struct Parser<'a> {
    stack: ResourceStack<'a>,
    config: Config,
    current: Option<String>,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(stack: ResourceStack<'a>) -> Self {
        Parser {
            stack,
            config: Config::new(),
            current: None,
        }
    }

    /// Parses every line of the stack into a raw configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`](crate::Error::Syntax) for malformed lines,
    /// options outside a section, duplicate options and unresolved links, and
    /// [`Error::Resource`](crate::Error::Resource) for include failures.
    pub fn parse(mut self) -> Result<Config> {
        while let Some(line) = self.stack.next_line()? {
            tracing::trace!(resource = %line.resource, line = line.number, text = %line.text, "parsing line");
            match line::classify(&line)? {
                Token::Blank => {}
                Token::Section(name) => {
                    tracing::debug!(section = %name, resource = %line.resource, "opening section");
                    self.config.section_or_insert(&name);
                    self.current = Some(name);
                }
                Token::Option { name, elements } => self.add_option(&line, &name, elements)?,
            }
        }
        tracing::debug!(sections = self.config.len(), "parsed configuration");
        Ok(self.config)
    }

    fn add_option(&mut self, line: &SourceLine, name: &str, elements: Vec<Element>) -> Result<()> {
        let Some(section) = self.current.as_deref() else {
            return Err(line.error(&format!("option '{}' appears before any section", name)));
        };
        let value = handle_links(&self.config, elements, line)?;
        let section = self.config.section_or_insert(section);
        if section.contains(name) {
            return Err(line.error(&format!(
                "option '{}' is already defined in section '{}'",
                name,
                section.name()
            )));
        }
        section.push(ConfigOption::typed(name, ValueKind::String, value));
        Ok(())
    }
}

/// Resolves the elements of an option line into its raw value.
///
/// A lone link takes over the arity of its target. Otherwise the values of
/// every element are spliced, in order, into one list; a single literal stays
/// a single value.
///
/// # Errors
///
/// Returns [`Error::Syntax`](crate::Error::Syntax) at `line` if a link names an
/// option that has not been parsed yet.
pub fn handle_links(config: &Config, elements: Vec<Element>, line: &SourceLine) -> Result<OptionValue> {
    if let [Element::Link { section, option }] = elements.as_slice() {
        return Ok(resolve(config, section, option, line)?.value().clone());
    }

    let mut values = Vec::with_capacity(elements.len());
    for element in elements {
        match element {
            Element::Literal(text) => values.push(Value::String(text)),
            Element::Link { section, option } => {
                let target = resolve(config, &section, &option, line)?;
                values.extend(target.values().iter().cloned());
            }
        }
    }

    if values.len() == 1 {
        if let Some(single) = values.pop() {
            return Ok(OptionValue::Single(single));
        }
    }
    Ok(OptionValue::List(values))
}

fn resolve<'c>(
    config: &'c Config,
    section: &str,
    option: &str,
    line: &SourceLine,
) -> Result<&'c ConfigOption> {
    config.option(section, option).ok_or_else(|| {
        line.error(&format!(
            "link '${{{}:{}}}' does not name an option defined above",
            section, option
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::MapOpener;
    use crate::Error;

    fn parse(text: &str) -> Result<Config> {
        Parser::new(ResourceStack::from_str(text, MapOpener::new())).parse()
    }

    fn strings(config: &Config, section: &str, option: &str) -> Vec<String> {
        config.option(section, option).unwrap().get_list().unwrap()
    }

    #[test]
    fn test_sections_and_options() {
        let config = parse("; header\n[a]\nx = 1\n\n[b]\ny = two words ; trailing").unwrap();
        assert_eq!(config.len(), 2);
        assert_eq!(config.get_value::<String>("a", "x").unwrap(), "1");
        assert_eq!(config.get_value::<String>("b", "y").unwrap(), "two words");
        assert_eq!(config.option("a", "x").unwrap().kind(), ValueKind::String);
    }

    #[test]
    fn test_lists_and_empty_value() {
        let config = parse("[a]\nl = 1, 2 ,3\ne =").unwrap();
        assert_eq!(strings(&config, "a", "l"), vec!["1", "2", "3"]);
        assert_eq!(
            config.option("a", "e").unwrap().value(),
            &OptionValue::Single(Value::from(""))
        );
    }

    #[test]
    fn test_reopened_section_appends() {
        let config = parse("[a]\nx = 1\n[b]\n[a]\ny = 2").unwrap();
        let names: Vec<_> = config.iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(config.get("a").unwrap().len(), 2);
    }

    #[test]
    fn test_option_outside_section() {
        let err = parse("\nx = 1").unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_duplicate_option() {
        let err = parse("[a]\nx = 1\n[a]\nx = 2").unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 4, .. }));
    }

    #[test]
    fn test_links() {
        let text = "[base]\nroot = /srv\nlist = a, b\n\
                    [use]\nsame = ${base:root}\nwhole = ${base:list}\nmixed = x, ${base:list}, y";
        let config = parse(text).unwrap();
        assert_eq!(config.get_value::<String>("use", "same").unwrap(), "/srv");
        assert!(config.option("use", "whole").unwrap().is_list());
        assert_eq!(strings(&config, "use", "mixed"), vec!["x", "a", "b", "y"]);
    }

    #[test]
    fn test_forward_link_is_error() {
        let err = parse("[a]\nx = ${a:y}\ny = 1").unwrap_err();
        assert!(err.is_syntax());
        assert!(err.to_string().contains("${a:y}"));
    }

    #[test]
    fn test_escaped_link_is_literal() {
        let config = parse("[a]\nx = \\${a:y}").unwrap();
        assert_eq!(config.get_value::<String>("a", "x").unwrap(), "${a:y}");
    }

    #[test]
    fn test_include_errors_keep_resource_line() {
        let opener = MapOpener::new().with_resource("inc.ini", "[i]\n\nbroken line");
        let stack = ResourceStack::from_str("[a]\n#include inc.ini", opener);
        let err = Parser::new(stack).parse().unwrap_err();
        match err {
            Error::Syntax { resource, line, .. } => {
                assert_eq!(resource, "inc.ini");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
