//! Error types for INI parsing, validation and serialization.
//!
//! Every fallible operation in this crate returns [`Result`]. The first failure
//! aborts the current load or save; nothing is partially applied.
//!
//! ## Error Categories
//!
//! - **Resource errors**: the initial source or an `#include`d resource cannot be opened
//! - **Syntax errors**: malformed line, bad identifier or unresolved link, with line number
//! - **Type / Range errors**: a value cannot be converted to the requested kind, or a
//!   numeric literal does not fit
//! - **Validation errors**: the configuration does not comply with a schema
//!
//! ## Examples
//!
//! ```rust
//! use typed_ini::from_str;
//!
//! let err = from_str("[server]\nthis is not an option").unwrap_err();
//! assert!(err.is_syntax());
//! assert!(err.to_string().contains("line 2"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while loading or saving INI data.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A resource (initial source or include) could not be opened or read
    #[error("Cannot open resource '{name}': {reason}")]
    Resource { name: String, reason: String },

    /// Malformed input line
    #[error("Syntax error in {resource} at line {line}: {msg}")]
    Syntax {
        resource: String,
        line: usize,
        msg: String,
    },

    /// Conversion between value kinds is not possible
    #[error("Type error: {0}")]
    Type(String),

    /// Numeric value does not fit into the requested kind
    #[error("Range error: {0}")]
    Range(String),

    /// Configuration does not comply with a schema
    #[error("Validation error at {path}: {msg}")]
    Validation { path: String, msg: String },

    /// Duplicate name in a section, config or schema
    #[error("Ambiguous name: {0}")]
    Ambiguity(String),

    /// Requested section or option does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Value has no textual INI representation
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Creates a resource error naming the resource that failed to open.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use typed_ini::Error;
    ///
    /// let err = Error::resource("extra.ini", "no such resource");
    /// assert!(err.to_string().contains("extra.ini"));
    /// ```
    pub fn resource<T: fmt::Display>(name: &str, reason: T) -> Self {
        Error::Resource {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a syntax error for the given resource and 1-based line number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use typed_ini::Error;
    ///
    /// let err = Error::syntax("<string>", 10, "missing '='");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(resource: &str, line: usize, msg: &str) -> Self {
        Error::Syntax {
            resource: resource.to_string(),
            line,
            msg: msg.to_string(),
        }
    }

    /// Creates a type error.
    pub fn type_error<T: fmt::Display>(msg: T) -> Self {
        Error::Type(msg.to_string())
    }

    /// Creates a range error.
    pub fn range<T: fmt::Display>(msg: T) -> Self {
        Error::Range(msg.to_string())
    }

    /// Creates a validation error for an entry path such as `server` or `server.port`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use typed_ini::Error;
    ///
    /// let err = Error::validation("server.port", "mandatory option is missing");
    /// assert!(err.to_string().contains("server.port"));
    /// ```
    pub fn validation<T: fmt::Display>(path: &str, msg: T) -> Self {
        Error::Validation {
            path: path.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an ambiguity error for a duplicate name.
    pub fn ambiguity<T: fmt::Display>(msg: T) -> Self {
        Error::Ambiguity(msg.to_string())
    }

    /// Creates a not-found error.
    pub fn not_found<T: fmt::Display>(msg: T) -> Self {
        Error::NotFound(msg.to_string())
    }

    /// Creates an unsupported value error.
    pub fn unsupported_value<T: fmt::Display>(msg: T) -> Self {
        Error::UnsupportedValue(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for [`Error::Resource`].
    #[must_use]
    pub fn is_resource(&self) -> bool {
        matches!(self, Error::Resource { .. })
    }

    /// Returns `true` for [`Error::Syntax`].
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax { .. })
    }

    /// Returns `true` for [`Error::Type`].
    #[must_use]
    pub fn is_type(&self) -> bool {
        matches!(self, Error::Type(_))
    }

    /// Returns `true` for [`Error::Range`].
    #[must_use]
    pub fn is_range(&self) -> bool {
        matches!(self, Error::Range(_))
    }

    /// Returns `true` for [`Error::Validation`].
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Returns the line number carried by a syntax error.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_predicates() {
        assert!(Error::resource("a.ini", "missing").is_resource());
        assert!(Error::syntax("a.ini", 3, "bad").is_syntax());
        assert!(Error::type_error("nope").is_type());
        assert!(Error::range("too big").is_range());
        assert!(Error::validation("s.o", "missing").is_validation());
        assert!(!Error::not_found("x").is_syntax());
    }

    #[test]
    fn test_syntax_line() {
        assert_eq!(Error::syntax("<string>", 7, "bad").line(), Some(7));
        assert_eq!(Error::type_error("bad").line(), None);
    }
}
