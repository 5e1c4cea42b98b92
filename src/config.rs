//! In-memory configuration model.
//!
//! A [`Config`] owns [`Section`]s, a section owns [`ConfigOption`]s, and an option
//! holds either one [`Value`] or an ordered list of values, all of the option's
//! declared [`ValueKind`]. Names are unique within their parent and iteration
//! follows insertion order.
//!
//! Configs produced by the parser hold `string` values only; validating against a
//! [`Schema`](crate::Schema) converts them to the declared kinds.
//!
//! ## Examples
//!
//! ```rust
//! use typed_ini::{Config, ConfigOption, Section, Value};
//!
//! let mut server = Section::new("server").unwrap();
//! server.insert(ConfigOption::new("host", Value::from("example.com")).unwrap()).unwrap();
//! server
//!     .insert(ConfigOption::new("ports", vec![Value::from(80u64), Value::from(443u64)]).unwrap())
//!     .unwrap();
//!
//! let mut config = Config::new();
//! config.insert(server).unwrap();
//!
//! let ports: Vec<u64> = config.option("server", "ports").unwrap().get_list().unwrap();
//! assert_eq!(ports, vec![80, 443]);
//! ```

use crate::line::is_identifier;
use crate::value::FromValue;
use crate::{Error, NameMap, Result, Value, ValueKind};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::slice;

/// The payload of an option: one value or a list of values.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Single(Value),
    List(Vec<Value>),
}

impl OptionValue {
    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, OptionValue::List(_))
    }

    /// All values, a single value being a slice of length one.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        match self {
            OptionValue::Single(value) => slice::from_ref(value),
            OptionValue::List(values) => values,
        }
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        match self {
            OptionValue::Single(value) => vec![value],
            OptionValue::List(values) => values,
        }
    }
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        OptionValue::Single(value)
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for OptionValue {
                fn from(value: $ty) -> Self {
                    OptionValue::Single(Value::from(value))
                }
            }
        )*
    };
}

impl_from_scalar!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    &str,
    chrono::NaiveDateTime,
);

impl From<Vec<Value>> for OptionValue {
    fn from(values: Vec<Value>) -> Self {
        OptionValue::List(values)
    }
}

impl Serialize for OptionValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            OptionValue::Single(value) => value.serialize(serializer),
            OptionValue::List(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
        }
    }
}

fn check_identifier(name: &str) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(Error::validation(name, "not a valid section or option identifier"))
    }
}

/// A named option holding values of a single kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigOption {
    name: String,
    kind: ValueKind,
    value: OptionValue,
}

impl ConfigOption {
    /// Creates an option whose kind is taken from its (first) value.
    ///
    /// An empty list is given the `string` kind.
    ///
    /// # Errors
    ///
    /// Fails if `name` is not an identifier or a list mixes kinds.
    pub fn new(name: &str, value: impl Into<OptionValue>) -> Result<Self> {
        let value = value.into();
        let kind = value
            .values()
            .first()
            .map_or(ValueKind::String, Value::kind);
        Self::with_kind(name, kind, value)
    }

    /// Creates an option of an explicit kind.
    ///
    /// # Errors
    ///
    /// Fails if `name` is not an identifier or any value is of another kind.
    pub fn with_kind(name: &str, kind: ValueKind, value: impl Into<OptionValue>) -> Result<Self> {
        check_identifier(name)?;
        let value = value.into();
        check_kind(name, kind, &value)?;
        Ok(ConfigOption {
            name: name.to_string(),
            kind,
            value,
        })
    }

    /// Builds an option whose values are known to match `kind`.
    pub(crate) fn typed(name: &str, kind: ValueKind, value: OptionValue) -> Self {
        debug_assert!(value.values().iter().all(|v| v.kind() == kind));
        ConfigOption {
            name: name.to_string(),
            kind,
            value,
        }
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
    pub fn is_list(&self) -> bool {
        self.value.is_list()
    }

    #[must_use]
    pub fn value(&self) -> &OptionValue {
        &self.value
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        self.value.values()
    }

    /// Replaces the stored value(s), keeping the declared kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] if a value is of another kind.
    pub fn set(&mut self, value: impl Into<OptionValue>) -> Result<()> {
        let value = value.into();
        check_kind(&self.name, self.kind, &value)?;
        self.value = value;
        Ok(())
    }

    /// Extracts a single value as `T`, converting if the kinds differ.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] for list options or impossible conversions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use typed_ini::{ConfigOption, Value};
    ///
    /// let option = ConfigOption::new("port", Value::from("8080")).unwrap();
    /// assert_eq!(option.get::<u64>().unwrap(), 8080);
    /// assert_eq!(option.get::<String>().unwrap(), "8080");
    /// ```
    pub fn get<T: FromValue>(&self) -> Result<T> {
        match &self.value {
            OptionValue::Single(value) => T::from_value(value.clone()),
            OptionValue::List(_) => Err(Error::type_error(format!(
                "option '{}' holds a list, not a single value",
                self.name
            ))),
        }
    }

    /// Extracts every value as `T`; a single value yields a list of one.
    pub fn get_list<T: FromValue>(&self) -> Result<Vec<T>> {
        self.values()
            .iter()
            .map(|value| T::from_value(value.clone()))
            .collect()
    }
}

fn check_kind(name: &str, kind: ValueKind, value: &OptionValue) -> Result<()> {
    match value.values().iter().find(|v| v.kind() != kind) {
        Some(other) => Err(Error::type_error(format!(
            "option '{}' is declared {} but got a {} value",
            name,
            kind,
            other.kind()
        ))),
        None => Ok(()),
    }
}

impl Serialize for ConfigOption {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value.serialize(serializer)
    }
}

/// A named group of options.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    name: String,
    options: NameMap<ConfigOption>,
}

impl Section {
    /// Creates an empty section.
    ///
    /// # Errors
    ///
    /// Fails if `name` is not an identifier.
    pub fn new(name: &str) -> Result<Self> {
        check_identifier(name)?;
        Ok(Self::unchecked(name))
    }

    pub(crate) fn unchecked(name: &str) -> Self {
        Section {
            name: name.to_string(),
            options: NameMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn get(&self, option: &str) -> Option<&ConfigOption> {
        self.options.get(option)
    }

    pub fn get_mut(&mut self, option: &str) -> Option<&mut ConfigOption> {
        self.options.get_mut(option)
    }

    #[must_use]
    pub fn contains(&self, option: &str) -> bool {
        self.options.contains_key(option)
    }

    /// Adds an option.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Ambiguity`] if an option of that name already exists.
    pub fn insert(&mut self, option: ConfigOption) -> Result<()> {
        if self.contains(option.name()) {
            return Err(Error::ambiguity(format!(
                "option '{}' already exists in section '{}'",
                option.name(),
                self.name
            )));
        }
        self.push(option);
        Ok(())
    }

    /// Adds or replaces an option, returning the replaced one.
    pub fn replace(&mut self, option: ConfigOption) -> Option<ConfigOption> {
        self.options.insert(option.name.clone(), option)
    }

    pub(crate) fn push(&mut self, option: ConfigOption) {
        self.options.insert(option.name.clone(), option);
    }

    pub fn remove(&mut self, option: &str) -> Option<ConfigOption> {
        self.options.remove(option)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Iterates over the options in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigOption> {
        self.options.values()
    }
}

impl Serialize for Section {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.options.len()))?;
        for (name, option) in &self.options {
            map.serialize_entry(name, option)?;
        }
        map.end()
    }
}

/// Root of a parsed or programmatically built configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    sections: NameMap<Section>,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, section: &str) -> Option<&Section> {
        self.sections.get(section)
    }

    pub fn get_mut(&mut self, section: &str) -> Option<&mut Section> {
        self.sections.get_mut(section)
    }

    #[must_use]
    pub fn contains(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Shorthand for `config.get(section)?.get(option)`.
    #[must_use]
    pub fn option(&self, section: &str, option: &str) -> Option<&ConfigOption> {
        self.get(section).and_then(|s| s.get(option))
    }

    /// Looks up a single value and extracts it as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the option does not exist, otherwise as
    /// [`ConfigOption::get`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// let config = typed_ini::from_str("[server]\nport = 8080").unwrap();
    /// let port: u64 = config.get_value("server", "port").unwrap();
    /// assert_eq!(port, 8080);
    /// assert!(config.get_value::<u64>("server", "missing").is_err());
    /// ```
    pub fn get_value<T: FromValue>(&self, section: &str, option: &str) -> Result<T> {
        self.option(section, option)
            .ok_or_else(|| Error::not_found(format!("option '{}.{}'", section, option)))?
            .get()
    }

    /// Adds a section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Ambiguity`] if a section of that name already exists.
    pub fn insert(&mut self, section: Section) -> Result<()> {
        if self.contains(section.name()) {
            return Err(Error::ambiguity(format!(
                "section '{}' already exists",
                section.name()
            )));
        }
        self.push(section);
        Ok(())
    }

    pub(crate) fn push(&mut self, section: Section) {
        self.sections.insert(section.name.clone(), section);
    }

    /// Returns the named section, appending an empty one if absent.
    pub(crate) fn section_or_insert(&mut self, name: &str) -> &mut Section {
        self.sections
            .get_or_insert_with(name, || Section::unchecked(name))
    }

    pub fn remove(&mut self, section: &str) -> Option<Section> {
        self.sections.remove(section)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterates over the sections in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }
}

impl Serialize for Config {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (name, section) in &self.sections {
            map.serialize_entry(name, section)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_inferred_and_checked() {
        let option = ConfigOption::new("ids", vec![Value::from(1u64), Value::from(2u64)]).unwrap();
        assert_eq!(option.kind(), ValueKind::Unsigned);
        assert!(option.is_list());

        let mixed = ConfigOption::new("ids", vec![Value::from(1u64), Value::from("two")]);
        assert!(mixed.unwrap_err().is_type());

        let empty = ConfigOption::new("none", Vec::<Value>::new()).unwrap();
        assert_eq!(empty.kind(), ValueKind::String);
    }

    #[test]
    fn test_set_keeps_kind() {
        let mut option = ConfigOption::new("flag", Value::from(true)).unwrap();
        option.set(Value::from(false)).unwrap();
        assert!(!option.get::<bool>().unwrap());
        assert!(option.set(Value::from("yes")).unwrap_err().is_type());
    }

    #[test]
    fn test_single_get_on_list_fails() {
        let option = ConfigOption::new("a", vec![Value::from("x")]).unwrap();
        assert!(option.get::<String>().unwrap_err().is_type());
        assert_eq!(option.get_list::<String>().unwrap(), vec!["x".to_string()]);
    }

    #[test]
    fn test_invalid_names_rejected() {
        assert!(Section::new("bad name!").is_err());
        assert!(ConfigOption::new("", Value::from(1)).is_err());
    }

    #[test]
    fn test_duplicates_are_ambiguous() {
        let mut section = Section::new("s").unwrap();
        section.insert(ConfigOption::new("a", Value::from(1)).unwrap()).unwrap();
        let err = section
            .insert(ConfigOption::new("a", Value::from(2)).unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::Ambiguity(_)));

        let mut config = Config::new();
        config.insert(section.clone()).unwrap();
        assert!(matches!(config.insert(section).unwrap_err(), Error::Ambiguity(_)));
    }

    #[test]
    fn test_order_preserved_after_remove() {
        let mut config = Config::new();
        for name in ["c", "a", "b"] {
            config.insert(Section::new(name).unwrap()).unwrap();
        }
        config.remove("a");
        let names: Vec<_> = config.iter().map(Section::name).collect();
        assert_eq!(names, vec!["c", "b"]);
    }
}
