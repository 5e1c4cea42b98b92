//! INI Dialect Reference
//!
//! This module documents the INI dialect read and written by this library.
//!
//! # Overview
//!
//! Input is line oriented. Every line is one of: blank, comment, section
//! header, option, or include directive. Line endings may be `\n` or `\r\n`.
//!
//! ```text
//! ; global settings
//! #include common.ini
//!
//! [server]
//! host = example.org         # trailing comments are allowed
//! port = 8080
//! aliases = www, web, api
//! motd = Hello\, world\; welcome
//!
//! [client]
//! server = ${server:host}
//! ```
//!
//! # Comments
//!
//! `;` and `#` start a comment that runs to the end of the line. A marker
//! preceded by an odd number of backslashes is escaped and belongs to the value:
//!
//! ```text
//! path = C:\\temp ; comment, value is C:\temp
//! color = \#ff0000  ; value is #ff0000
//! ```
//!
//! Quotes carry no meaning here. `v = "a;b"` has the value `"a`, and an include
//! name containing a marker needs the backslash too: `#include "a\;b.ini"`.
//!
//! # Sections
//!
//! `[name]` opens a section. Opening a section that already exists appends to
//! it. Options before the first header are rejected.
//!
//! # Options
//!
//! `name = value` or `name = v1, v2, ...`. Elements are split on unescaped
//! commas, then trimmed and unescaped. A line with one element holds a single
//! value, more elements form a list. `name =` holds one empty string, which a
//! list-typed schema option turns into an empty list. Defining the same option
//! twice in one section is an error.
//!
//! # Identifiers
//!
//! Section and option names start with an ASCII letter, `_`, `.` or `$`,
//! continue with ASCII alphanumerics, `_ - . ~ $` or interior spaces, and may
//! not end with a space.
//!
//! # Escaping
//!
//! A backslash makes the following character literal:
//!
//! | Written | Read as |
//! |---------|---------|
//! | `\;` `\#` | comment marker |
//! | `\,` | comma inside a list element |
//! | `\\` | backslash |
//! | `\$` | dollar, disables a link |
//! | `\ ` | leading or trailing space that survives trimming |
//!
//! Values containing line breaks cannot be written.
//!
//! # Links
//!
//! An element of the form `${section:option}` is replaced by the value of an
//! option defined earlier in the input. A lone link copies the target as-is,
//! list or single. Inside a longer list the target's elements are spliced in
//! place. Referring to an option that has not been parsed yet is a syntax error.
//!
//! ```text
//! [paths]
//! base = /srv, /opt
//! all = /usr, ${paths:base}    ; /usr, /srv, /opt
//! ```
//!
//! # Includes
//!
//! A line whose trimmed form starts with `#include` followed by whitespace pulls
//! in another resource at that point. The name may be quoted as `"name"` or
//! `<name>`. Each resource reports its own line numbers in errors. Including a
//! resource that is still being read is an include cycle and fails.
//!
//! ```text
//! #include "defaults.ini"
//! #include <site.ini>
//! ```
//!
//! # Value Kinds
//!
//! Parsed values are text until a schema assigns a kind:
//!
//! | Kind | Accepted literals | Canonical form |
//! |------|-------------------|----------------|
//! | `boolean` | `true yes on y t enabled 1` / `false no off n f disabled 0`, any case | `true` / `false` |
//! | `signed` | decimal, `0x` hex, `0b` binary, leading-`0` octal, optional sign | decimal |
//! | `unsigned` | as `signed`, `-0` allowed | decimal |
//! | `float` | decimal or exponent notation, `inf`, `nan` | shortest round-trip decimal |
//! | `enum` | any text | verbatim |
//! | `string` | any text | verbatim |
//! | `date` | `YYYY-MM-DD HH:MM:SS` | same pattern |
//! | `locale` | any text | verbatim |
//!
//! Numeric literals outside the kind's range are range errors.
//!
//! # Conversions
//!
//! | From \ To | boolean | signed | unsigned | float | enum | string | date | locale |
//! |-----------|---------|--------|----------|-------|------|--------|------|--------|
//! | boolean | ✓ | ✓ | ✓ | ✓ | ✗ | ✓ | ✗ | ✗ |
//! | signed / unsigned / float | `!= 0` | range-checked | range-checked | ✓ | ✗ | ✓ | ✗ | ✗ |
//! | enum | ✗ | ✗ | ✗ | ✗ | ✓ | ✓ | ✗ | ✗ |
//! | string | parse | parse | parse | parse | parse | ✓ | parse | parse |
//! | date | ✗ | ✗ | ✗ | ✗ | ✗ | ✓ | ✓ | ✗ |
//! | locale | ✗ | ✗ | ✗ | ✗ | ✗ | ✓ | ✗ | ✓ |
//!
//! A float converts to an integer kind only when it is finite and integral.
//!
//! # Output
//!
//! Saving writes one `[section]` line per section followed by one line per
//! option, both in insertion order, with values in canonical form and escaped
//! as above. Annotated output additionally writes `;` comment lines with the
//! schema comment, `<requirement>, <arity> <kind>` and any constraint, and
//! `;name =` stubs for declared options that have no value.

// This module contains only documentation; no implementation code
