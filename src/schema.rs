//! Declarative description of the expected configuration.
//!
//! A [`Schema`] names sections ([`SectionSchema`]) and, within them, options
//! ([`OptionSchema`]) with their kind, arity, requirement level, default and an
//! optional [`Constraint`]. Schemas are built once and only read afterwards.
//!
//! ## Examples
//!
//! ```rust
//! use typed_ini::{Constraint, OptionSchema, Schema, SectionSchema, ValueKind};
//!
//! # fn main() -> typed_ini::Result<()> {
//! let schema = Schema::new().with_section(
//!     SectionSchema::new("server")
//!         .with_option(OptionSchema::new("host", ValueKind::String))?
//!         .with_option(
//!             OptionSchema::new("port", ValueKind::Unsigned)
//!                 .optional()
//!                 .with_default(8080u64)
//!                 .with_constraint(Constraint::range(1u64, 65535u64)),
//!         )?,
//! )?;
//!
//! assert!(schema.get("server").unwrap().get("port").unwrap().default_value().is_some());
//! # Ok(())
//! # }
//! ```

use crate::config::{ConfigOption, OptionValue};
use crate::line::is_identifier;
use crate::{Error, NameMap, Result, Value, ValueKind};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Whether an option holds one value or a list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Arity {
    #[default]
    Single,
    List,
}

/// Whether a section or option must be present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Requirement {
    #[default]
    Mandatory,
    Optional,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Mandatory => f.write_str("mandatory"),
            Requirement::Optional => f.write_str("optional"),
        }
    }
}

/// How validation treats entries the schema does not name.
///
/// - **Strict**: unknown sections and options are rejected
/// - **Relaxed**: unknown entries pass through untouched
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SchemaMode {
    #[default]
    Strict,
    Relaxed,
}

type Check = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Additional condition every value of an option must satisfy.
#[derive(Clone)]
pub enum Constraint {
    /// Inclusive bounds, compared within the option's kind
    Range {
        min: Option<Value>,
        max: Option<Value>,
    },
    /// Allow-list, typically paired with the `enum` kind
    OneOf(Vec<Value>),
    /// Arbitrary check with a description used in error messages
    Predicate { description: String, check: Check },
}

impl Constraint {
    /// Both bounds inclusive.
    #[must_use]
    pub fn range(min: impl Into<Value>, max: impl Into<Value>) -> Self {
        Constraint::Range {
            min: Some(min.into()),
            max: Some(max.into()),
        }
    }

    #[must_use]
    pub fn at_least(min: impl Into<Value>) -> Self {
        Constraint::Range {
            min: Some(min.into()),
            max: None,
        }
    }

    #[must_use]
    pub fn at_most(max: impl Into<Value>) -> Self {
        Constraint::Range {
            min: None,
            max: Some(max.into()),
        }
    }

    /// # Examples
    ///
    /// ```rust
    /// use typed_ini::{Constraint, Value};
    ///
    /// let levels = Constraint::one_of(["debug", "info", "warn"]);
    /// assert!(levels.check(&Value::from("info")));
    /// assert!(!levels.check(&Value::from("trace")));
    /// ```
    #[must_use]
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Constraint::OneOf(values.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn predicate<F>(description: &str, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Constraint::Predicate {
            description: description.to_string(),
            check: Arc::new(check),
        }
    }

    /// Returns `true` if `value` satisfies the constraint.
    #[must_use]
    pub fn check(&self, value: &Value) -> bool {
        match self {
            Constraint::Range { min, max } => {
                let above = min.as_ref().map_or(true, |min| {
                    matches!(value.partial_cmp(min), Some(Ordering::Greater | Ordering::Equal))
                });
                let below = max.as_ref().map_or(true, |max| {
                    matches!(value.partial_cmp(max), Some(Ordering::Less | Ordering::Equal))
                });
                above && below
            }
            Constraint::OneOf(allowed) => allowed.contains(value),
            Constraint::Predicate { check, .. } => check(value),
        }
    }

    /// Converts bounds and allow-list entries to `kind`.
    fn coerce(self, kind: ValueKind) -> Result<Self> {
        let convert = |value: Value| value.into_kind(kind);
        Ok(match self {
            Constraint::Range { min, max } => Constraint::Range {
                min: min.map(convert).transpose()?,
                max: max.map(convert).transpose()?,
            },
            Constraint::OneOf(allowed) => Constraint::OneOf(
                allowed.into_iter().map(convert).collect::<Result<Vec<_>>>()?,
            ),
            predicate @ Constraint::Predicate { .. } => predicate,
        })
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Range { min, max } => {
                let bound = |b: &Option<Value>| b.as_ref().map(Value::to_string).unwrap_or_default();
                write!(f, "range [{}, {}]", bound(min), bound(max))
            }
            Constraint::OneOf(allowed) => {
                let names: Vec<_> = allowed.iter().map(Value::to_string).collect();
                write!(f, "one of {{{}}}", names.join(", "))
            }
            Constraint::Predicate { description, .. } => f.write_str(description),
        }
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Range { min, max } => f
                .debug_struct("Range")
                .field("min", min)
                .field("max", max)
                .finish(),
            Constraint::OneOf(allowed) => f.debug_tuple("OneOf").field(allowed).finish(),
            Constraint::Predicate { description, .. } => f
                .debug_struct("Predicate")
                .field("description", description)
                .finish_non_exhaustive(),
        }
    }
}

/// Expected shape of one option.
#[derive(Debug, Clone)]
pub struct OptionSchema {
    name: String,
    kind: ValueKind,
    arity: Arity,
    requirement: Requirement,
    default: Option<OptionValue>,
    constraint: Option<Constraint>,
    comment: Option<String>,
}

impl OptionSchema {
    /// A mandatory single-valued option of the given kind.
    #[must_use]
    pub fn new(name: &str, kind: ValueKind) -> Self {
        OptionSchema {
            name: name.to_string(),
            kind,
            arity: Arity::Single,
            requirement: Requirement::Mandatory,
            default: None,
            constraint: None,
            comment: None,
        }
    }

    #[must_use]
    pub fn list(mut self) -> Self {
        self.arity = Arity::List;
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.requirement = Requirement::Optional;
        self
    }

    #[must_use]
    pub fn with_arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    #[must_use]
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    /// Sets the default, converted to the option's kind when the option is
    /// added to a [`SectionSchema`].
    #[must_use]
    pub fn with_default(mut self, default: impl Into<OptionValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    #[must_use]
    pub fn arity(&self) -> Arity {
        self.arity
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        self.arity == Arity::List
    }

    #[must_use]
    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    #[must_use]
    pub fn is_mandatory(&self) -> bool {
        self.requirement == Requirement::Mandatory
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&OptionValue> {
        self.default.as_ref()
    }

    #[must_use]
    pub fn constraint(&self) -> Option<&Constraint> {
        self.constraint.as_ref()
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Converts `value` to this option's kind and arity and checks the constraint.
    ///
    /// A list option given a single empty value becomes an empty list. A list
    /// holding exactly one empty element is rejected, since it saves as that same
    /// empty value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming `path` on arity mismatch, failed
    /// conversion or violated constraint.
    pub fn coerce(&self, value: &OptionValue, path: &str) -> Result<OptionValue> {
        let values = value.values();
        if self.arity == Arity::List && is_empty_text(value) {
            return Ok(OptionValue::List(Vec::new()));
        }
        if self.arity == Arity::Single && values.len() != 1 {
            return Err(Error::validation(
                path,
                format!("expects a single value, found a list of {}", values.len()),
            ));
        }

        let mut converted = Vec::with_capacity(values.len());
        for value in values {
            let typed = value.convert(self.kind).map_err(|e| Error::validation(path, e))?;
            if let Some(constraint) = &self.constraint {
                if !constraint.check(&typed) {
                    return Err(Error::validation(
                        path,
                        format!("value '{}' violates {}", typed, constraint),
                    ));
                }
            }
            converted.push(typed);
        }

        match (self.arity, converted.pop()) {
            (Arity::Single, Some(single)) => Ok(OptionValue::Single(single)),
            (Arity::List, last) => {
                converted.extend(last);
                if matches!(converted.as_slice(), [only] if only.to_string().is_empty()) {
                    return Err(Error::validation(
                        path,
                        "a list holding one empty element cannot be written back",
                    ));
                }
                Ok(OptionValue::List(converted))
            }
            (Arity::Single, None) => Err(Error::validation(path, "expects a single value")),
        }
    }

    /// Produces the validated form of a config option.
    pub(crate) fn apply(&self, option: &ConfigOption, path: &str) -> Result<ConfigOption> {
        let value = self.coerce(option.value(), path)?;
        Ok(ConfigOption::typed(&self.name, self.kind, value))
    }

    /// Builds the option this schema contributes when the config lacks it.
    pub(crate) fn default_option(&self) -> Option<ConfigOption> {
        self.default
            .as_ref()
            .map(|value| ConfigOption::typed(&self.name, self.kind, value.clone()))
    }

    /// Checks the name and normalizes constraint and default to the declared kind.
    fn prepare(mut self, section: &str) -> Result<Self> {
        let path = format!("{}.{}", section, self.name);
        if !is_identifier(&self.name) {
            return Err(Error::validation(&path, "not a valid option identifier"));
        }
        if let Some(constraint) = self.constraint.take() {
            self.constraint = Some(
                constraint
                    .coerce(self.kind)
                    .map_err(|e| Error::validation(&path, format!("constraint: {}", e)))?,
            );
        }
        if let Some(default) = self.default.take() {
            self.default = Some(self.coerce(&default, &path)?);
        }
        Ok(self)
    }
}

fn is_empty_text(value: &OptionValue) -> bool {
    matches!(value, OptionValue::Single(Value::String(s)) if s.is_empty())
}

/// Expected shape of one section.
#[derive(Debug, Clone)]
pub struct SectionSchema {
    name: String,
    requirement: Requirement,
    comment: Option<String>,
    options: NameMap<OptionSchema>,
}

impl SectionSchema {
    /// A mandatory section without options.
    #[must_use]
    pub fn new(name: &str) -> Self {
        SectionSchema {
            name: name.to_string(),
            requirement: Requirement::Mandatory,
            comment: None,
            options: NameMap::new(),
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.requirement = Requirement::Optional;
        self
    }

    #[must_use]
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    /// Builder form of [`SectionSchema::add_option`].
    pub fn with_option(mut self, option: OptionSchema) -> Result<Self> {
        self.add_option(option)?;
        Ok(self)
    }

    /// Adds an option schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Ambiguity`] for a duplicate name and [`Error::Validation`]
    /// for a bad identifier, or a default or constraint that does not fit the
    /// declared kind and arity.
    pub fn add_option(&mut self, option: OptionSchema) -> Result<()> {
        if self.options.contains_key(option.name()) {
            return Err(Error::ambiguity(format!(
                "option '{}' is declared twice in section '{}'",
                option.name(),
                self.name
            )));
        }
        let option = option.prepare(&self.name)?;
        self.options.insert(option.name.clone(), option);
        Ok(())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    #[must_use]
    pub fn is_mandatory(&self) -> bool {
        self.requirement == Requirement::Mandatory
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    #[must_use]
    pub fn get(&self, option: &str) -> Option<&OptionSchema> {
        self.options.get(option)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Iterates over the option schemas in declaration order.
    pub fn options(&self) -> impl Iterator<Item = &OptionSchema> {
        self.options.values()
    }
}

/// Collection of section schemas.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    sections: NameMap<SectionSchema>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Schema::add_section`].
    pub fn with_section(mut self, section: SectionSchema) -> Result<Self> {
        self.add_section(section)?;
        Ok(self)
    }

    /// Adds a section schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Ambiguity`] for a duplicate name and
    /// [`Error::Validation`] for a bad identifier.
    pub fn add_section(&mut self, section: SectionSchema) -> Result<()> {
        if !is_identifier(section.name()) {
            return Err(Error::validation(
                section.name(),
                "not a valid section identifier",
            ));
        }
        if self.sections.contains_key(section.name()) {
            return Err(Error::ambiguity(format!(
                "section '{}' is declared twice",
                section.name()
            )));
        }
        self.sections.insert(section.name.clone(), section);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, section: &str) -> Option<&SectionSchema> {
        self.sections.get(section)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterates over the section schemas in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &SectionSchema> {
        self.sections.values()
    }
}
