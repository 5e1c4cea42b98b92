//! Typed scalar values stored in INI options.
//!
//! This module provides the [`Value`] enum and its [`ValueKind`] tag. Eight kinds
//! exist, and exactly one is active per value:
//!
//! | Kind | Rust payload | Text form |
//! |------|--------------|-----------|
//! | `boolean` | `bool` | `true`, `no`, `on`, `1`, ... (case-insensitive) |
//! | `signed` | `i64` | `-42`, `0x2A`, `0b101`, `052` |
//! | `unsigned` | `u64` | `42`, `0xFF` |
//! | `float` | `f64` | `3.5`, `1e-3`, `inf` |
//! | `enum` | `String` | verbatim |
//! | `string` | `String` | verbatim |
//! | `date` | `NaiveDateTime` | `YYYY-MM-DD HH:MM:SS` |
//! | `locale` | `String` | verbatim locale name |
//!
//! ## Conversions
//!
//! [`Value::convert`] is the single, explicit conversion path between kinds:
//!
//! - every kind converts to `string` through its canonical text form
//! - `string` converts to every kind by parsing
//! - `boolean`, `signed`, `unsigned` and `float` interconvert with range checks
//! - `enum`, `date` and `locale` accept nothing but their own kind and `string`,
//!   and convert to nothing but `string`
//!
//! ```rust
//! use typed_ini::{Value, ValueKind};
//!
//! let port = Value::parse(ValueKind::Unsigned, "8080").unwrap();
//! assert_eq!(port, Value::Unsigned(8080));
//!
//! // numeric kinds interconvert
//! assert_eq!(port.convert(ValueKind::Float).unwrap(), Value::Float(8080.0));
//!
//! // opaque kinds refuse numbers
//! assert!(port.convert(ValueKind::Date).unwrap_err().is_type());
//! ```

use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::num::IntErrorKind;

/// Text pattern of `date` values.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The closed set of value kinds an option can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Boolean,
    Signed,
    Unsigned,
    Float,
    Enum,
    String,
    Date,
    Locale,
}

impl ValueKind {
    /// All kinds, in declaration order.
    pub const ALL: [ValueKind; 8] = [
        ValueKind::Boolean,
        ValueKind::Signed,
        ValueKind::Unsigned,
        ValueKind::Float,
        ValueKind::Enum,
        ValueKind::String,
        ValueKind::Date,
        ValueKind::Locale,
    ];

    /// Returns the lowercase name of this kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use typed_ini::ValueKind;
    ///
    /// assert_eq!(ValueKind::Unsigned.as_str(), "unsigned");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Signed => "signed",
            ValueKind::Unsigned => "unsigned",
            ValueKind::Float => "float",
            ValueKind::Enum => "enum",
            ValueKind::String => "string",
            ValueKind::Date => "date",
            ValueKind::Locale => "locale",
        }
    }

    /// Returns `true` for the kinds that interconvert numerically.
    #[inline]
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueKind::Boolean | ValueKind::Signed | ValueKind::Unsigned | ValueKind::Float
        )
    }

    /// Returns `true` for `enum`, `date` and `locale`.
    #[inline]
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        matches!(self, ValueKind::Enum | ValueKind::Date | ValueKind::Locale)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single typed scalar.
///
/// # Examples
///
/// ```rust
/// use typed_ini::{Value, ValueKind};
///
/// let flag = Value::from(true);
/// assert_eq!(flag.kind(), ValueKind::Boolean);
/// assert_eq!(flag.to_string(), "true");
///
/// let level = Value::enumeration("debug");
/// assert_eq!(level.as_str(), Some("debug"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Boolean(bool),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Enum(String),
    String(String),
    Date(NaiveDateTime),
    Locale(String),
}

impl Value {
    /// Creates an `enum` value.
    #[must_use]
    pub fn enumeration(value: impl Into<String>) -> Self {
        Value::Enum(value.into())
    }

    /// Creates a `locale` value from a locale name such as `en_US.UTF-8`.
    #[must_use]
    pub fn locale(name: impl Into<String>) -> Self {
        Value::Locale(name.into())
    }

    /// Returns the kind of this value.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Signed(_) => ValueKind::Signed,
            Value::Unsigned(_) => ValueKind::Unsigned,
            Value::Float(_) => ValueKind::Float,
            Value::Enum(_) => ValueKind::Enum,
            Value::String(_) => ValueKind::String,
            Value::Date(_) => ValueKind::Date,
            Value::Locale(_) => ValueKind::Locale,
        }
    }

    /// Parses `text` as a value of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] if the text is not a literal of that kind and
    /// [`Error::Range`] if a numeric literal does not fit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use typed_ini::{Value, ValueKind};
    ///
    /// assert_eq!(Value::parse(ValueKind::Boolean, "Yes").unwrap(), Value::Boolean(true));
    /// assert_eq!(Value::parse(ValueKind::Signed, "-0x10").unwrap(), Value::Signed(-16));
    /// assert!(Value::parse(ValueKind::Unsigned, "99999999999999999999").unwrap_err().is_range());
    /// ```
    pub fn parse(kind: ValueKind, text: &str) -> Result<Value> {
        match kind {
            ValueKind::Boolean => parse_bool(text).map(Value::Boolean),
            ValueKind::Signed => parse_signed(text).map(Value::Signed),
            ValueKind::Unsigned => parse_unsigned(text).map(Value::Unsigned),
            ValueKind::Float => parse_float(text).map(Value::Float),
            ValueKind::Enum => Ok(Value::Enum(text.to_string())),
            ValueKind::String => Ok(Value::String(text.to_string())),
            ValueKind::Date => parse_date(text).map(Value::Date),
            ValueKind::Locale => Ok(Value::Locale(text.to_string())),
        }
    }

    /// Converts this value to another kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] for conversions outside the allow-list (see the
    /// module documentation) and [`Error::Range`] when a number does not fit.
    pub fn convert(&self, target: ValueKind) -> Result<Value> {
        if self.kind() == target {
            return Ok(self.clone());
        }
        match (self, target) {
            (_, ValueKind::String) => Ok(Value::String(self.to_string())),
            (Value::String(s), _) => Value::parse(target, s),

            (Value::Boolean(b), ValueKind::Signed) => Ok(Value::Signed(i64::from(*b))),
            (Value::Boolean(b), ValueKind::Unsigned) => Ok(Value::Unsigned(u64::from(*b))),
            (Value::Boolean(b), ValueKind::Float) => Ok(Value::Float(f64::from(u8::from(*b)))),

            (Value::Signed(i), ValueKind::Boolean) => Ok(Value::Boolean(*i != 0)),
            (Value::Signed(i), ValueKind::Unsigned) => u64::try_from(*i)
                .map(Value::Unsigned)
                .map_err(|_| Error::range(format!("{} does not fit into unsigned", i))),
            (Value::Signed(i), ValueKind::Float) => Ok(Value::Float(*i as f64)),

            (Value::Unsigned(u), ValueKind::Boolean) => Ok(Value::Boolean(*u != 0)),
            (Value::Unsigned(u), ValueKind::Signed) => i64::try_from(*u)
                .map(Value::Signed)
                .map_err(|_| Error::range(format!("{} does not fit into signed", u))),
            (Value::Unsigned(u), ValueKind::Float) => Ok(Value::Float(*u as f64)),

            (Value::Float(f), ValueKind::Boolean) => Ok(Value::Boolean(*f != 0.0)),
            (Value::Float(f), ValueKind::Signed) => float_to_signed(*f).map(Value::Signed),
            (Value::Float(f), ValueKind::Unsigned) => float_to_unsigned(*f).map(Value::Unsigned),

            _ => Err(Error::type_error(format!(
                "cannot convert {} value to {}",
                self.kind(),
                target
            ))),
        }
    }

    /// Like [`Value::convert`], but avoids a copy when the kind already matches.
    pub fn into_kind(self, target: ValueKind) -> Result<Value> {
        if self.kind() == target {
            Ok(self)
        } else {
            self.convert(target)
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Signed(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Unsigned(u) => Some(*u),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the text payload of `string`, `enum` and `locale` values.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Enum(s) | Value::Locale(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<&NaiveDateTime> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Signed(i) => write!(f, "{}", i),
            Value::Unsigned(u) => write!(f, "{}", u),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Enum(s) | Value::String(s) | Value::Locale(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

/// Values of the same kind compare naturally; values of different kinds are unordered.
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a.partial_cmp(b),
            (Value::Signed(a), Value::Signed(b)) => a.partial_cmp(b),
            (Value::Unsigned(a), Value::Unsigned(b)) => a.partial_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Enum(a), Value::Enum(b))
            | (Value::String(a), Value::String(b))
            | (Value::Locale(a), Value::Locale(b)) => a.partial_cmp(b),
            (Value::Date(a), Value::Date(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Signed(i) => serializer.serialize_i64(*i),
            Value::Unsigned(u) => serializer.serialize_u64(*u),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Enum(s) | Value::String(s) | Value::Locale(s) => serializer.serialize_str(s),
            Value::Date(d) => serializer.collect_str(&d.format(DATE_FORMAT)),
        }
    }
}

fn parse_bool(text: &str) -> Result<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "y" | "t" | "enabled" | "1" => Ok(true),
        "false" | "no" | "off" | "n" | "f" | "disabled" | "0" => Ok(false),
        _ => Err(Error::type_error(format!(
            "'{}' is not a boolean literal",
            text
        ))),
    }
}

/// Splits an integer literal into sign and magnitude, honouring `0x`, `0b` and
/// leading-zero octal prefixes.
fn parse_integer(text: &str) -> Result<(bool, u64)> {
    let trimmed = text.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, digits) = if let Some(hex) = rest.strip_prefix("0x").or(rest.strip_prefix("0X")) {
        (16, hex)
    } else if let Some(bin) = rest.strip_prefix("0b").or(rest.strip_prefix("0B")) {
        (2, bin)
    } else if rest.len() > 1 && rest.starts_with('0') {
        (8, &rest[1..])
    } else {
        (10, rest)
    };

    // from_str_radix would accept a second sign
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(Error::type_error(format!(
            "'{}' is not an integer literal",
            text
        )));
    }
    match u64::from_str_radix(digits, radix) {
        Ok(magnitude) => Ok((negative, magnitude)),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Err(Error::range(format!(
            "'{}' does not fit into 64 bits",
            text
        ))),
        Err(_) => Err(Error::type_error(format!(
            "'{}' is not an integer literal",
            text
        ))),
    }
}

fn parse_signed(text: &str) -> Result<i64> {
    let (negative, magnitude) = parse_integer(text)?;
    let out_of_range = || Error::range(format!("'{}' does not fit into signed", text));
    if negative {
        if magnitude == i64::MIN.unsigned_abs() {
            Ok(i64::MIN)
        } else {
            i64::try_from(magnitude).map(|m| -m).map_err(|_| out_of_range())
        }
    } else {
        i64::try_from(magnitude).map_err(|_| out_of_range())
    }
}

fn parse_unsigned(text: &str) -> Result<u64> {
    let (negative, magnitude) = parse_integer(text)?;
    if negative && magnitude != 0 {
        return Err(Error::range(format!(
            "'{}' does not fit into unsigned",
            text
        )));
    }
    Ok(magnitude)
}

fn parse_float(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| Error::type_error(format!("'{}' is not a float literal", text)))?;
    if value.is_infinite() {
        let unsigned = trimmed.trim_start_matches(['+', '-']).to_ascii_lowercase();
        if unsigned != "inf" && unsigned != "infinity" {
            return Err(Error::range(format!("'{}' overflows float", text)));
        }
    }
    Ok(value)
}

fn parse_date(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), DATE_FORMAT).map_err(|e| {
        Error::type_error(format!(
            "'{}' is not a date in YYYY-MM-DD HH:MM:SS form ({})",
            text, e
        ))
    })
}

// 2^63 and 2^64 are exact in f64
const SIGNED_BOUND: f64 = 9_223_372_036_854_775_808.0;
const UNSIGNED_BOUND: f64 = 18_446_744_073_709_551_616.0;

fn check_integral(f: f64) -> Result<()> {
    if !f.is_finite() || f.fract() != 0.0 {
        return Err(Error::type_error(format!(
            "float {} has no integer representation",
            f
        )));
    }
    Ok(())
}

fn float_to_signed(f: f64) -> Result<i64> {
    check_integral(f)?;
    if f < -SIGNED_BOUND || f >= SIGNED_BOUND {
        return Err(Error::range(format!("{} does not fit into signed", f)));
    }
    Ok(f as i64)
}

fn float_to_unsigned(f: f64) -> Result<u64> {
    check_integral(f)?;
    if f < 0.0 || f >= UNSIGNED_BOUND {
        return Err(Error::range(format!("{} does not fit into unsigned", f)));
    }
    Ok(f as u64)
}

/// Rust types that can be extracted from a [`Value`] through the conversion matrix.
///
/// # Examples
///
/// ```rust
/// use typed_ini::{FromValue, Value};
///
/// let port = u64::from_value(Value::from("8080")).unwrap();
/// assert_eq!(port, 8080);
/// ```
pub trait FromValue: Sized {
    /// The kind the value is converted to before extraction.
    const KIND: ValueKind;

    /// Converts `value` to [`Self::KIND`] and unwraps the payload.
    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! impl_from_value {
    ($ty:ty, $variant:ident) => {
        impl FromValue for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn from_value(value: Value) -> Result<Self> {
                match value.into_kind(Self::KIND)? {
                    Value::$variant(inner) => Ok(inner),
                    other => Err(Error::type_error(format!(
                        "expected {}, found {}",
                        Self::KIND,
                        other.kind()
                    ))),
                }
            }
        }

        impl TryFrom<Value> for $ty {
            type Error = Error;

            fn try_from(value: Value) -> Result<Self> {
                <$ty as FromValue>::from_value(value)
            }
        }
    };
}

impl_from_value!(bool, Boolean);
impl_from_value!(i64, Signed);
impl_from_value!(u64, Unsigned);
impl_from_value!(f64, Float);
impl_from_value!(String, String);
impl_from_value!(NaiveDateTime, Date);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Signed(i64::from(value))
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Signed(i64::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Signed(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Signed(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Unsigned(u64::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Unsigned(u64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Unsigned(u64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Unsigned(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Date(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 5, 17)
            .unwrap()
            .and_hms_opt(12, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_parse_bool_tokens() {
        for token in ["true", "TRUE", "yes", "On", "1", "y", "t", "enabled"] {
            assert_eq!(Value::parse(ValueKind::Boolean, token).unwrap(), Value::Boolean(true));
        }
        for token in ["false", "No", "OFF", "0", "n", "f", "Disabled"] {
            assert_eq!(Value::parse(ValueKind::Boolean, token).unwrap(), Value::Boolean(false));
        }
        assert!(Value::parse(ValueKind::Boolean, "maybe").unwrap_err().is_type());
    }

    #[test]
    fn test_parse_signed() {
        assert_eq!(Value::parse(ValueKind::Signed, "-42").unwrap(), Value::Signed(-42));
        assert_eq!(Value::parse(ValueKind::Signed, "+7").unwrap(), Value::Signed(7));
        assert_eq!(Value::parse(ValueKind::Signed, "0x1F").unwrap(), Value::Signed(31));
        assert_eq!(Value::parse(ValueKind::Signed, "0b101").unwrap(), Value::Signed(5));
        assert_eq!(Value::parse(ValueKind::Signed, "010").unwrap(), Value::Signed(8));
        assert_eq!(Value::parse(ValueKind::Signed, "0").unwrap(), Value::Signed(0));
        assert_eq!(
            Value::parse(ValueKind::Signed, "-9223372036854775808").unwrap(),
            Value::Signed(i64::MIN)
        );
        assert!(Value::parse(ValueKind::Signed, "9223372036854775808")
            .unwrap_err()
            .is_range());
        assert!(Value::parse(ValueKind::Signed, "12abc").unwrap_err().is_type());
        assert!(Value::parse(ValueKind::Signed, "--1").unwrap_err().is_type());
        assert!(Value::parse(ValueKind::Signed, "").unwrap_err().is_type());
    }

    #[test]
    fn test_parse_unsigned() {
        assert_eq!(
            Value::parse(ValueKind::Unsigned, "18446744073709551615").unwrap(),
            Value::Unsigned(u64::MAX)
        );
        assert!(Value::parse(ValueKind::Unsigned, "18446744073709551616")
            .unwrap_err()
            .is_range());
        assert!(Value::parse(ValueKind::Unsigned, "-1").unwrap_err().is_range());
        assert_eq!(Value::parse(ValueKind::Unsigned, "-0").unwrap(), Value::Unsigned(0));
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(Value::parse(ValueKind::Float, "3.5").unwrap(), Value::Float(3.5));
        assert_eq!(Value::parse(ValueKind::Float, "-1e3").unwrap(), Value::Float(-1000.0));
        assert_eq!(
            Value::parse(ValueKind::Float, "inf").unwrap(),
            Value::Float(f64::INFINITY)
        );
        assert!(Value::parse(ValueKind::Float, "1e400").unwrap_err().is_range());
        assert!(Value::parse(ValueKind::Float, "abc").unwrap_err().is_type());
    }

    #[test]
    fn test_parse_date() {
        let value = Value::parse(ValueKind::Date, "2016-05-17 12:30:05").unwrap();
        assert_eq!(value, Value::Date(sample_date()));
        assert_eq!(value.to_string(), "2016-05-17 12:30:05");
        assert!(Value::parse(ValueKind::Date, "2016-05-17").unwrap_err().is_type());
    }

    #[test]
    fn test_verbatim_kinds() {
        assert_eq!(
            Value::parse(ValueKind::Locale, "en_US.UTF-8").unwrap(),
            Value::locale("en_US.UTF-8")
        );
        assert_eq!(
            Value::parse(ValueKind::Enum, "debug").unwrap(),
            Value::enumeration("debug")
        );
    }

    #[test]
    fn test_numeric_conversions() {
        assert_eq!(
            Value::Boolean(true).convert(ValueKind::Unsigned).unwrap(),
            Value::Unsigned(1)
        );
        assert_eq!(
            Value::Signed(-3).convert(ValueKind::Float).unwrap(),
            Value::Float(-3.0)
        );
        assert!(Value::Signed(-3).convert(ValueKind::Unsigned).unwrap_err().is_range());
        assert!(Value::Unsigned(u64::MAX)
            .convert(ValueKind::Signed)
            .unwrap_err()
            .is_range());
        assert_eq!(
            Value::Float(42.0).convert(ValueKind::Signed).unwrap(),
            Value::Signed(42)
        );
        assert!(Value::Float(42.5).convert(ValueKind::Signed).unwrap_err().is_type());
        assert!(Value::Float(1e30).convert(ValueKind::Unsigned).unwrap_err().is_range());
        assert_eq!(
            Value::Unsigned(0).convert(ValueKind::Boolean).unwrap(),
            Value::Boolean(false)
        );
    }

    #[test]
    fn test_opaque_kinds_reject_everything_but_string() {
        let numeric = [
            Value::Boolean(true),
            Value::Signed(1),
            Value::Unsigned(1),
            Value::Float(1.0),
        ];
        let opaque = [
            Value::enumeration("a"),
            Value::Date(sample_date()),
            Value::locale("C"),
        ];
        for n in &numeric {
            for o in &opaque {
                assert!(n.convert(o.kind()).unwrap_err().is_type());
                assert!(o.convert(n.kind()).unwrap_err().is_type());
            }
        }
        assert!(Value::enumeration("a")
            .convert(ValueKind::Locale)
            .unwrap_err()
            .is_type());
        assert!(Value::locale("C").convert(ValueKind::Date).unwrap_err().is_type());
    }

    #[test]
    fn test_string_bridge() {
        assert_eq!(
            Value::enumeration("warn").convert(ValueKind::String).unwrap(),
            Value::from("warn")
        );
        assert_eq!(
            Value::from("warn").convert(ValueKind::Enum).unwrap(),
            Value::enumeration("warn")
        );
        assert_eq!(
            Value::Date(sample_date()).convert(ValueKind::String).unwrap(),
            Value::from("2016-05-17 12:30:05")
        );
    }

    #[test]
    fn test_partial_ord() {
        assert!(Value::Signed(1) < Value::Signed(2));
        assert!(Value::from("a") < Value::from("b"));
        assert_eq!(Value::Signed(1).partial_cmp(&Value::Unsigned(1)), None);
    }

    #[test]
    fn test_from_value() {
        assert!(bool::from_value(Value::from("yes")).unwrap());
        assert_eq!(i64::try_from(Value::Unsigned(5)).unwrap(), 5);
        assert_eq!(String::from_value(Value::Signed(-5)).unwrap(), "-5");
        assert_eq!(
            NaiveDateTime::from_value(Value::from("2016-05-17 12:30:05")).unwrap(),
            sample_date()
        );
        assert!(u64::from_value(Value::enumeration("x")).unwrap_err().is_type());
    }
}
