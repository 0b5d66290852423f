use std::borrow::Cow;

use crate::error::{Error, Result};

/// How names and string payloads are encoded on the wire.
///
/// The format is documented as UTF-8, but Java implementations write strings
/// with `DataOutputStream::writeUTF`, which produces *modified* UTF-8 (CESU-8
/// with NUL written as two bytes). The two only differ for NUL and characters
/// outside the Basic Multilingual Plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strings {
    /// Standard UTF-8.
    #[default]
    Utf8,
    /// Java's modified UTF-8.
    JavaCesu8,
}

impl Strings {
    pub(crate) fn encode(self, s: &str) -> Cow<'_, [u8]> {
        match self {
            Strings::Utf8 => Cow::Borrowed(s.as_bytes()),
            Strings::JavaCesu8 => cesu8::to_java_cesu8(s),
        }
    }

    pub(crate) fn decode(self, data: Vec<u8>) -> Result<String> {
        match self {
            Strings::Utf8 => {
                String::from_utf8(data).map_err(|e| Error::nonunicode_string(e.as_bytes()))
            }
            Strings::JavaCesu8 => match cesu8::from_java_cesu8(&data) {
                Ok(s) => Ok(s.into_owned()),
                Err(_) => Err(Error::nonunicode_string(&data)),
            },
        }
    }
}
