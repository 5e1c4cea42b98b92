//! Configuration options for INI output.
//!
//! [`SaveOptions`] controls the layout of written INI text. Every layout it
//! produces is read back to the same configuration.
//!
//! ## Examples
//!
//! ```rust
//! use typed_ini::{ini, to_string_with_options, SaveOptions};
//!
//! let config = ini! { "app" => { "tags" => ["a", "b"] } }.unwrap();
//!
//! let text = to_string_with_options(&config, SaveOptions::new()).unwrap();
//! assert_eq!(text, "[app]\ntags = a, b\n");
//!
//! let text = to_string_with_options(&config, SaveOptions::compact()).unwrap();
//! assert_eq!(text, "[app]\ntags=a,b\n");
//! ```

/// Layout options for INI output.
///
/// # Examples
///
/// ```rust
/// use typed_ini::SaveOptions;
///
/// // `key = a, b`, blank line between sections
/// let options = SaveOptions::new();
///
/// // Adds schema comments and type lines when saving with a schema
/// let options = SaveOptions::annotated();
///
/// // Custom configuration
/// let options = SaveOptions::new()
///     .with_spaced_assignment(false)
///     .with_section_spacing(false);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SaveOptions {
    /// `key = value` instead of `key=value`
    pub spaced_assignment: bool,
    /// Blank line between sections
    pub section_spacing: bool,
    /// `a, b` instead of `a,b`
    pub list_spacing: bool,
    /// Write schema comments, requirement/kind lines and stubs
    pub annotated: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        SaveOptions {
            spaced_assignment: true,
            section_spacing: true,
            list_spacing: true,
            annotated: false,
        }
    }
}

impl SaveOptions {
    /// Creates default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use typed_ini::SaveOptions;
    ///
    /// let options = SaveOptions::new();
    /// assert!(options.spaced_assignment);
    /// assert!(!options.annotated);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn annotated() -> Self {
        SaveOptions {
            annotated: true,
            ..Default::default()
        }
    }

    /// No optional whitespace at all.
    #[must_use]
    pub fn compact() -> Self {
        SaveOptions {
            spaced_assignment: false,
            section_spacing: false,
            list_spacing: false,
            annotated: false,
        }
    }

    #[must_use]
    pub fn with_spaced_assignment(mut self, spaced: bool) -> Self {
        self.spaced_assignment = spaced;
        self
    }

    #[must_use]
    pub fn with_section_spacing(mut self, spacing: bool) -> Self {
        self.section_spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_list_spacing(mut self, spacing: bool) -> Self {
        self.list_spacing = spacing;
        self
    }

    /// Enables or disables annotations.
    ///
    /// Only saves that involve a schema have anything to annotate.
    #[must_use]
    pub fn with_annotations(mut self, annotated: bool) -> Self {
        self.annotated = annotated;
        self
    }

    #[inline]
    #[must_use]
    pub const fn assignment(&self) -> &'static str {
        if self.spaced_assignment {
            " = "
        } else {
            "="
        }
    }

    #[inline]
    #[must_use]
    pub const fn list_separator(&self) -> &'static str {
        if self.list_spacing {
            ", "
        } else {
            ","
        }
    }
}
