//! Include-aware line sources.
//!
//! A [`ResourceStack`] turns an initial source plus every resource it pulls in
//! through `#include name` into one logical stream of lines. Included resources
//! are opened through a [`ResourceOpener`], so "files" can live on disk
//! ([`FileOpener`]), in memory ([`MapOpener`]) or anywhere a closure can reach.
//!
//! Re-entering a resource that is still open on the stack is an include cycle
//! and fails with [`Error::Resource`](crate::Error::Resource).
//!
//! ## Examples
//!
//! ```rust
//! use typed_ini::resource::{MapOpener, ResourceStack};
//!
//! let opener = MapOpener::new().with_resource("common.ini", "[common]\nname = shared");
//! let mut stack = ResourceStack::from_str("#include common.ini\n[local]", opener);
//!
//! let mut lines = Vec::new();
//! while let Some(line) = stack.next_line().unwrap() {
//!     lines.push(line.text);
//! }
//! assert_eq!(lines, vec!["[common]", "name = shared", "[local]"]);
//! ```

use crate::line;
use crate::{Error, NameMap, Result};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;

/// Resource name used for sources handed over as a string.
pub const STRING_SOURCE: &str = "<string>";
/// Resource name used for sources handed over as a byte buffer.
pub const BYTES_SOURCE: &str = "<bytes>";
/// Resource name used for sources handed over as a reader.
pub const STREAM_SOURCE: &str = "<stream>";

/// A raw line together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine {
    pub resource: Rc<str>,
    /// 1-based line number within `resource`
    pub number: usize,
    pub text: String,
}

impl SourceLine {
    pub fn new(resource: &str, number: usize, text: impl Into<String>) -> Self {
        SourceLine {
            resource: Rc::from(resource),
            number,
            text: text.into(),
        }
    }

    /// Builds a syntax error pointing at this line.
    #[must_use]
    pub fn error(&self, msg: &str) -> Error {
        Error::syntax(&self.resource, self.number, msg)
    }
}

/// Capability to open a named resource for reading.
pub trait ResourceOpener {
    /// Opens `name`, or fails with the underlying I/O error.
    fn open(&mut self, name: &str) -> io::Result<Box<dyn BufRead>>;

    /// Identity of `name` used for include cycle detection.
    ///
    /// Two names that open the same resource should map to the same identity.
    fn canonical_name(&self, name: &str) -> String {
        name.to_string()
    }
}

impl<F> ResourceOpener for F
where
    F: FnMut(&str) -> io::Result<Box<dyn BufRead>>,
{
    fn open(&mut self, name: &str) -> io::Result<Box<dyn BufRead>> {
        self(name)
    }
}

/// Opens resources as files, relative names resolved against an optional base directory.
#[derive(Debug, Clone, Default)]
pub struct FileOpener {
    base_dir: Option<PathBuf>,
}

impl FileOpener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves relative resource names against `dir` instead of the working directory.
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ResourceOpener for FileOpener {
    fn open(&mut self, name: &str) -> io::Result<Box<dyn BufRead>> {
        Ok(Box::new(BufReader::new(File::open(self.resolve(name))?)))
    }

    /// The resolved path with symlinks followed, or lexically normalized when
    /// the file does not exist.
    fn canonical_name(&self, name: &str) -> String {
        let path = self.resolve(name);
        std::fs::canonicalize(&path)
            .unwrap_or_else(|_| normalize(&path))
            .to_string_lossy()
            .into_owned()
    }
}

/// Drops `.` components and folds `..` into the preceding normal component.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

/// Serves resources from named in-memory strings.
///
/// # Examples
///
/// ```rust
/// use typed_ini::resource::{MapOpener, ResourceOpener};
///
/// let mut opener = MapOpener::new().with_resource("a.ini", "[a]");
/// assert!(opener.open("a.ini").is_ok());
/// assert!(opener.open("b.ini").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapOpener {
    resources: NameMap<String>,
}

impl MapOpener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_resource(mut self, name: &str, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }

    /// Adds or replaces a resource.
    pub fn insert(&mut self, name: &str, content: impl Into<String>) {
        self.resources.insert(name.to_string(), content.into());
    }
}

impl ResourceOpener for MapOpener {
    fn open(&mut self, name: &str) -> io::Result<Box<dyn BufRead>> {
        match self.resources.get(name) {
            Some(content) => Ok(Box::new(Cursor::new(content.clone().into_bytes()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no such resource",
            )),
        }
    }
}

struct Frame<'a> {
    name: Rc<str>,
    key: String,
    reader: Box<dyn BufRead + 'a>,
    line: usize,
}

/// LIFO stack of open line sources.
pub struct ResourceStack<'a> {
    frames: Vec<Frame<'a>>,
    opener: Box<dyn ResourceOpener + 'a>,
}

impl<'a> ResourceStack<'a> {
    /// Creates a stack whose initial source is `reader`, reported as `name`.
    ///
    /// The initial source takes part in cycle detection under `name` verbatim.
    pub fn new<R, O>(name: &str, reader: R, opener: O) -> Self
    where
        R: BufRead + 'a,
        O: ResourceOpener + 'a,
    {
        Self::keyed(name, name.to_string(), reader, opener)
    }

    /// Like [`new`](Self::new), with an explicit identity for cycle detection.
    pub(crate) fn keyed<R, O>(name: &str, key: String, reader: R, opener: O) -> Self
    where
        R: BufRead + 'a,
        O: ResourceOpener + 'a,
    {
        ResourceStack {
            frames: vec![Frame {
                name: Rc::from(name),
                key,
                reader: Box::new(reader),
                line: 0,
            }],
            opener: Box::new(opener),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str<O: ResourceOpener + 'a>(text: &'a str, opener: O) -> Self {
        Self::new(STRING_SOURCE, text.as_bytes(), opener)
    }

    pub fn from_bytes<O: ResourceOpener + 'a>(bytes: &'a [u8], opener: O) -> Self {
        Self::new(BYTES_SOURCE, bytes, opener)
    }

    pub fn from_reader<R, O>(reader: R, opener: O) -> Self
    where
        R: Read + 'a,
        O: ResourceOpener + 'a,
    {
        Self::new(STREAM_SOURCE, BufReader::new(reader), opener)
    }

    /// Opens the initial source through `opener` itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Resource`] naming `name` if it cannot be opened.
    pub fn open<O: ResourceOpener + 'a>(name: &str, mut opener: O) -> Result<Self> {
        let reader = opener.open(name).map_err(|e| Error::resource(name, e))?;
        let key = opener.canonical_name(name);
        Ok(Self::keyed(name, key, reader, opener))
    }

    /// Number of sources currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns the next data line, following include directives.
    ///
    /// Include directives are consumed here and never returned. `Ok(None)`
    /// signals that every source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Resource`] if an include cannot be opened, closes a
    /// cycle or cannot be read, and [`Error::Syntax`] for a directive without name.
    pub fn next_line(&mut self) -> Result<Option<SourceLine>> {
        loop {
            let Some(frame) = self.frames.last_mut() else {
                return Ok(None);
            };

            let mut text = String::new();
            let read = frame
                .reader
                .read_line(&mut text)
                .map_err(|e| Error::resource(&frame.name, e))?;
            if read == 0 {
                tracing::debug!(resource = %frame.name, "resource exhausted");
                self.frames.pop();
                continue;
            }

            frame.line += 1;
            if text.ends_with('\n') {
                text.pop();
                if text.ends_with('\r') {
                    text.pop();
                }
            }
            let line = SourceLine {
                resource: Rc::clone(&frame.name),
                number: frame.line,
                text,
            };

            match line::parse_include(&line) {
                Some(target) => self.push_include(&target?)?,
                None => return Ok(Some(line)),
            }
        }
    }

    fn push_include(&mut self, name: &str) -> Result<()> {
        let key = self.opener.canonical_name(name);
        if self.frames.iter().any(|frame| frame.key == key) {
            return Err(Error::resource(
                name,
                "include cycle, resource is already being read",
            ));
        }
        let reader = self.opener.open(name).map_err(|e| Error::resource(name, e))?;
        tracing::debug!(resource = name, depth = self.frames.len() + 1, "including resource");
        self.frames.push(Frame {
            name: Rc::from(name),
            key,
            reader,
            line: 0,
        });
        Ok(())
    }
}

impl fmt::Debug for ResourceStack<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceStack")
            .field(
                "open",
                &self.frames.iter().map(|frame| &*frame.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}
