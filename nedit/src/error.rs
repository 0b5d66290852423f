//! Contains the Error and Result type used by the reader and writer.
use std::io;

use thiserror::Error;

use crate::Tag;

/// Various errors that can occur while reading, writing or building NBT.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The underlying reader or writer failed.
    #[error("io error: {0}")]
    Io(#[source] io::Error),

    /// The input is not valid NBT: an unknown tag, a root that is not a
    /// compound, a string that is not valid unicode and so on.
    #[error("invalid nbt: {0}")]
    Malformed(String),

    /// The input ended part way through a document. Kept apart from
    /// [`Error::Malformed`] since it points at truncation rather than
    /// corruption.
    #[error("eof: unexpectedly ran out of input")]
    UnexpectedEof,

    /// A length or nesting depth is beyond what is allowed, either by the
    /// format itself or by [`ReadOpts`][`crate::ReadOpts`].
    #[error("{what} ({len}) exceeds maximum ({max})")]
    LimitExceeded {
        what: &'static str,
        len: usize,
        max: usize,
    },

    /// A value was added to a list declared to hold a different tag.
    #[error("list of {expected} cannot hold a {found}")]
    ListTypeMismatch { expected: Tag, found: Tag },
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
            _ => Error::Io(e),
        }
    }
}

impl Error {
    /// True if the error was caused by the input ending early.
    pub fn is_eof(&self) -> bool {
        matches!(self, Error::UnexpectedEof)
    }

    pub(crate) fn invalid_tag(tag: u8) -> Error {
        Error::Malformed(format!("invalid nbt tag value: {}", tag))
    }

    pub(crate) fn no_root_compound() -> Error {
        Error::Malformed("no root compound".to_owned())
    }

    pub(crate) fn nonunicode_string(data: &[u8]) -> Error {
        Error::Malformed(format!(
            "invalid string, non-unicode: {}",
            String::from_utf8_lossy(data)
        ))
    }

    pub(crate) fn limit(what: &'static str, len: usize, max: usize) -> Error {
        Error::LimitExceeded { what, len, max }
    }

    pub(crate) fn bespoke(msg: impl Into<String>) -> Error {
        Error::Malformed(msg.into())
    }
}
