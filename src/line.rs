//! Line-level tokenizer.
//!
//! Turns one raw input line into a [`Token`]: the comment is cut at the first
//! unescaped `;` or `#`, the remainder is classified as blank, `[section]` header
//! or `name = value[, value...]`, and every list element is trimmed and unescaped.
//!
//! A backslash escapes the character that follows it. Whether a marker is escaped
//! depends on the parity of the backslash run in front of it: `a\;b` keeps the
//! semicolon, `a\\;b` starts a comment after the literal backslash.
//!
//! ```rust
//! use typed_ini::line::{classify, Element, Token};
//! use typed_ini::resource::SourceLine;
//!
//! let line = SourceLine::new("<string>", 1, r"colors = red, green\, blue ; pick one");
//! let token = classify(&line).unwrap();
//! assert_eq!(
//!     token,
//!     Token::Option {
//!         name: "colors".to_string(),
//!         elements: vec![
//!             Element::Literal("red".to_string()),
//!             Element::Literal("green, blue".to_string()),
//!         ],
//!     }
//! );
//! ```

use crate::resource::SourceLine;
use crate::{Error, Result};

/// Characters starting a comment.
pub const COMMENT_MARKERS: [char; 2] = [';', '#'];

/// Separator between list elements.
pub const LIST_SEPARATOR: char = ',';

/// Directive pulling another resource into the line stream.
pub const INCLUDE_DIRECTIVE: &str = "#include";

/// A classified line.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Empty, whitespace-only or comment-only line
    Blank,
    /// `[name]`
    Section(String),
    /// `name = element[, element...]`
    Option { name: String, elements: Vec<Element> },
}

/// One element of an option's value list.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Unescaped literal text
    Literal(String),
    /// `${section:option}` reference to an option parsed earlier
    Link { section: String, option: String },
}

/// Classifies a single line that is not an include directive.
///
/// # Errors
///
/// Returns [`Error::Syntax`] carrying the line's location when the line is not
/// blank, a section header or an option, or when a name is not a valid identifier.
pub fn classify(line: &SourceLine) -> Result<Token> {
    let content = trim_unescaped(delete_comment(&line.text));
    if content.is_empty() {
        return Ok(Token::Blank);
    }

    if let Some(header) = content.strip_prefix('[') {
        let name = header
            .strip_suffix(']')
            .ok_or_else(|| line.error("section header is not closed by ']'"))?
            .trim();
        validate_identifier(name, line)?;
        return Ok(Token::Section(name.to_string()));
    }

    let eq = find_first_nonescaped(content, &['=']).ok_or_else(|| {
        line.error("expected '[section]' or 'name = value'")
    })?;
    let name = content[..eq].trim();
    validate_identifier(name, line)?;

    let elements = split_unescaped(&content[eq + 1..], LIST_SEPARATOR)
        .into_iter()
        .map(|piece| parse_element(piece, line))
        .collect::<Result<Vec<_>>>()?;

    Ok(Token::Option {
        name: name.to_string(),
        elements,
    })
}

fn parse_element(piece: &str, line: &SourceLine) -> Result<Element> {
    let raw = trim_unescaped(piece);
    let Some(reference) = raw.strip_prefix("${") else {
        return Ok(Element::Literal(unescape(raw)));
    };
    let (section, option) = reference
        .strip_suffix('}')
        .and_then(|inner| inner.split_once(':'))
        .ok_or_else(|| line.error(&format!("malformed link '{}', expected '${{section:option}}'", raw)))?;
    let (section, option) = (section.trim(), option.trim());
    validate_identifier(section, line)?;
    validate_identifier(option, line)?;
    Ok(Element::Link {
        section: section.to_string(),
        option: option.to_string(),
    })
}

/// Returns the resource name if the line is an `#include` directive.
///
/// The name may be wrapped in double quotes or angle brackets. Returns `None`
/// for ordinary lines, including comments that merely start with `#include`
/// followed by something other than whitespace.
///
/// # Errors
///
/// Returns [`Error::Syntax`] for a directive without a resource name.
pub fn parse_include(line: &SourceLine) -> Option<Result<String>> {
    let rest = line.text.trim_start().strip_prefix(INCLUDE_DIRECTIVE)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let target = trim_unescaped(delete_comment(rest));
    let target = target
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .or_else(|| target.strip_prefix('<').and_then(|t| t.strip_suffix('>')))
        .unwrap_or(target)
        .trim();
    if target.is_empty() {
        return Some(Err(line.error("include directive without resource name")));
    }
    Some(Ok(unescape(target)))
}

/// Checks a section or option name against the identifier grammar.
///
/// Identifiers start with an ASCII letter, `_`, `.` or `$`; the rest may contain
/// ASCII letters and digits, `_ - . ~ $` and interior spaces.
///
/// # Examples
///
/// ```rust
/// use typed_ini::line::is_identifier;
///
/// assert!(is_identifier("server"));
/// assert!(is_identifier("log.level-2"));
/// assert!(!is_identifier("2fast"));
/// assert!(!is_identifier("a=b"));
/// assert!(!is_identifier(""));
/// ```
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let leading_ok = matches!(
        chars.next(),
        Some(c) if c.is_ascii_alphabetic() || matches!(c, '_' | '.' | '$')
    );
    leading_ok
        && !name.ends_with(' ')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '~' | '$' | ' '))
}

/// Fails with [`Error::Syntax`] at `line` unless `name` is an identifier.
pub fn validate_identifier(name: &str, line: &SourceLine) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(line.error(&format!("'{}' is not a valid identifier", name)))
    }
}

/// Byte index of the first character from `targets` not escaped by a backslash.
#[must_use]
pub fn find_first_nonescaped(text: &str, targets: &[char]) -> Option<usize> {
    let mut escaped = false;
    for (i, ch) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if targets.contains(&ch) {
            return Some(i);
        }
    }
    None
}

/// Cuts the line at the first unescaped comment marker.
#[must_use]
pub fn delete_comment(text: &str) -> &str {
    match find_first_nonescaped(text, &COMMENT_MARKERS) {
        Some(i) => &text[..i],
        None => text,
    }
}

/// Splits on every unescaped `separator`; escapes are left in place.
#[must_use]
pub fn split_unescaped(text: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, ch) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == separator {
            pieces.push(&text[start..i]);
            start = i + ch.len_utf8();
        }
    }
    pieces.push(&text[start..]);
    pieces
}

/// Trims surrounding whitespace except trailing whitespace that is escaped.
#[must_use]
pub fn trim_unescaped(text: &str) -> &str {
    let text = text.trim_start();
    let mut end = text.len();
    while let Some(ch) = text[..end].chars().next_back() {
        if !ch.is_whitespace() {
            break;
        }
        let before = &text[..end - ch.len_utf8()];
        let backslashes = before.bytes().rev().take_while(|b| *b == b'\\').count();
        if backslashes % 2 == 1 {
            break;
        }
        end -= ch.len_utf8();
    }
    &text[..end]
}

/// Removes one level of backslash escaping. A dangling final backslash is kept.
///
/// # Examples
///
/// ```rust
/// use typed_ini::line::unescape;
///
/// assert_eq!(unescape(r"a\;b\\c"), r"a;b\c");
/// ```
#[must_use]
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            out.push(chars.next().unwrap_or('\\'));
        } else {
            out.push(ch);
        }
    }
    out
}

/// Escapes text so that it reads back as a single literal list element.
///
/// Backslashes, comment markers, list separators and `$` are escaped, as is
/// leading and trailing whitespace.
///
/// # Errors
///
/// Returns [`Error::UnsupportedValue`] for text containing a line break.
///
/// # Examples
///
/// ```rust
/// use typed_ini::line::escape;
///
/// assert_eq!(escape("a;b, c").unwrap(), r"a\;b\, c");
/// assert_eq!(escape(" padded ").unwrap(), r"\ padded\ ");
/// ```
pub fn escape(text: &str) -> Result<String> {
    if text.contains(['\n', '\r']) {
        return Err(Error::unsupported_value(format!(
            "{:?} contains a line break",
            text
        )));
    }
    let last = text.char_indices().last().map(|(i, _)| i);
    let mut out = String::with_capacity(text.len() + 4);
    for (i, ch) in text.char_indices() {
        let edge_space = ch.is_whitespace() && (i == 0 || Some(i) == last);
        if edge_space || matches!(ch, '\\' | ';' | '#' | ',' | '$') {
            out.push('\\');
        }
        out.push(ch);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(text: &str) -> SourceLine {
        SourceLine::new("<test>", 4, text)
    }

    fn literal(s: &str) -> Element {
        Element::Literal(s.to_string())
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(classify(&at("")).unwrap(), Token::Blank);
        assert_eq!(classify(&at("   \t")).unwrap(), Token::Blank);
        assert_eq!(classify(&at("; just a comment")).unwrap(), Token::Blank);
        assert_eq!(classify(&at("  # another")).unwrap(), Token::Blank);
    }

    #[test]
    fn test_section_header() {
        assert_eq!(
            classify(&at("[ server ] ; main")).unwrap(),
            Token::Section("server".to_string())
        );
        let err = classify(&at("[server")).unwrap_err();
        assert_eq!(err.line(), Some(4));
        assert!(classify(&at("[9lives]")).unwrap_err().is_syntax());
        assert!(classify(&at("[]")).unwrap_err().is_syntax());
    }

    #[test]
    fn test_option_single_and_list() {
        assert_eq!(
            classify(&at("host = example.com")).unwrap(),
            Token::Option {
                name: "host".to_string(),
                elements: vec![literal("example.com")],
            }
        );
        assert_eq!(
            classify(&at("ports=80 ,443,  8080")).unwrap(),
            Token::Option {
                name: "ports".to_string(),
                elements: vec![literal("80"), literal("443"), literal("8080")],
            }
        );
        assert_eq!(
            classify(&at("empty =")).unwrap(),
            Token::Option {
                name: "empty".to_string(),
                elements: vec![literal("")],
            }
        );
    }

    #[test]
    fn test_value_may_contain_equals() {
        assert_eq!(
            classify(&at("expr = a=b")).unwrap(),
            Token::Option {
                name: "expr".to_string(),
                elements: vec![literal("a=b")],
            }
        );
    }

    #[test]
    fn test_invalid_lines() {
        assert!(classify(&at("no equals sign here")).unwrap_err().is_syntax());
        assert!(classify(&at("= value")).unwrap_err().is_syntax());
        assert!(classify(&at("bad name! = 1")).unwrap_err().is_syntax());
    }

    #[test]
    fn test_escaped_comment_markers() {
        // odd backslash run escapes the marker
        assert_eq!(delete_comment(r"a\;b"), r"a\;b");
        assert_eq!(delete_comment(r"a\\\#b"), r"a\\\#b");
        // even run does not
        assert_eq!(delete_comment(r"a\\;b"), r"a\\");
        assert_eq!(
            classify(&at(r"path = C:\\temp\#1 # trailing")).unwrap(),
            Token::Option {
                name: "path".to_string(),
                elements: vec![literal(r"C:\temp#1")],
            }
        );
    }

    #[test]
    fn test_escaped_whitespace_survives_trim() {
        assert_eq!(trim_unescaped(r"  a\  "), r"a\ ");
        assert_eq!(trim_unescaped(r"a\\  "), r"a\\");
        assert_eq!(
            classify(&at(r"pad = \ x\ ")).unwrap(),
            Token::Option {
                name: "pad".to_string(),
                elements: vec![literal(" x ")],
            }
        );
    }

    #[test]
    fn test_links() {
        assert_eq!(
            classify(&at("copy = ${server:host}, extra")).unwrap(),
            Token::Option {
                name: "copy".to_string(),
                elements: vec![
                    Element::Link {
                        section: "server".to_string(),
                        option: "host".to_string(),
                    },
                    literal("extra"),
                ],
            }
        );
        assert_eq!(
            classify(&at(r"price = \${server:host}")).unwrap(),
            Token::Option {
                name: "price".to_string(),
                elements: vec![literal("${server:host}")],
            }
        );
        assert!(classify(&at("copy = ${server}")).unwrap_err().is_syntax());
    }

    #[test]
    fn test_include_directive() {
        assert_eq!(
            parse_include(&at("  #include other.ini")).unwrap().unwrap(),
            "other.ini"
        );
        assert_eq!(
            parse_include(&at("#include \"with space.ini\" ; note")).unwrap().unwrap(),
            "with space.ini"
        );
        assert_eq!(
            parse_include(&at("#include <base.ini>")).unwrap().unwrap(),
            "base.ini"
        );
        assert!(parse_include(&at("#included by hand")).is_none());
        assert!(parse_include(&at("key = value")).is_none());
        assert!(parse_include(&at("#include   ")).unwrap().unwrap_err().is_syntax());
    }

    #[test]
    fn test_escape_unescape_inverse() {
        for text in ["plain", "a;b#c", "x, y", r"back\slash", " lead", "trail\t", "$HOME"] {
            let escaped = escape(text).unwrap();
            let piece = split_unescaped(&escaped, LIST_SEPARATOR);
            assert_eq!(piece.len(), 1);
            assert_eq!(unescape(trim_unescaped(piece[0])), text);
        }
        assert!(escape("two\nlines").is_err());
    }
}
