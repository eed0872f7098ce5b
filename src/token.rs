//! Contains the core [`Token`] and [`Loc`] types, which represent pieces of game script and
//! where they came from.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::fmt::{Display, Error, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A location in a file.
///
/// `line` 0 means the loc applies to the file as a whole.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Loc {
    pathname: Arc<PathBuf>,
    pub line: u32,
    pub column: u32,
}

impl Loc {
    pub fn for_file(pathname: &Path) -> Self {
        Loc { pathname: Arc::new(pathname.to_path_buf()), line: 0, column: 0 }
    }

    pub fn pathname(&self) -> &Path {
        &self.pathname
    }

    pub fn filename(&self) -> Cow<str> {
        self.pathname.file_name().unwrap_or_else(|| OsStr::new("")).to_string_lossy()
    }

    /// Loc of the first character of the file contents.
    pub(crate) fn start_of(pathname: &Path) -> Self {
        Loc { pathname: Arc::new(pathname.to_path_buf()), line: 1, column: 1 }
    }
}

impl Display for Loc {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        if self.line == 0 {
            write!(f, "{}", self.pathname.display())
        } else {
            write!(f, "{}:{}:{}", self.pathname.display(), self.line, self.column)
        }
    }
}

/// A string from a script file, together with its location.
///
/// Keys, scalar values and loose words are all tokens.
#[derive(Clone, Debug)]
pub struct Token {
    s: String,
    pub loc: Loc,
}

impl Token {
    pub fn new(s: &str, loc: Loc) -> Self {
        Token { s: s.to_string(), loc }
    }

    pub fn from_string(s: String, loc: Loc) -> Self {
        Token { s, loc }
    }

    pub fn as_str(&self) -> &str {
        &self.s
    }

    pub fn is(&self, s: &str) -> bool {
        self.s == s
    }
}

/// Tokens are compared for equality regardless of their loc.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.s == other.s
    }
}

impl Eq for Token {}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.s)
    }
}
