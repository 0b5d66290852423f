//! The binary writer. Most users want [`encode`][`crate::encode`] or
//! [`to_writer`][`crate::to_writer`] rather than this module directly.
use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::error::{Error, Result};
use crate::{Compound, List, Strings, Tag, Value};

/// Options for writing NBT.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOpts {
    pub(crate) strings: Strings,
}

impl WriteOpts {
    pub fn new() -> Self {
        Self::default()
    }

    /// How names and strings are encoded. Defaults to [`Strings::Utf8`]. Use
    /// [`Strings::JavaCesu8`] for byte-exact output with Java implementations.
    pub fn strings(mut self, value: Strings) -> Self {
        self.strings = value;
        self
    }
}

pub(crate) trait WriteNbt: Write {
    fn write_tag(&mut self, tag: Tag) -> Result<()> {
        self.write_u8(tag.into())?;
        Ok(())
    }

    fn write_size_prefixed_bytes(&mut self, data: &[u8]) -> Result<()> {
        let len: u16 = data
            .len()
            .try_into()
            .map_err(|_| Error::limit("string length", data.len(), u16::MAX as usize))?;
        self.write_u16::<BigEndian>(len)?;
        self.write_all(data)?;
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len: i32 = len
            .try_into()
            .map_err(|_| Error::limit("sequence length", len, i32::MAX as usize))?;
        self.write_i32::<BigEndian>(len)?;
        Ok(())
    }
}

impl<T> WriteNbt for T where T: Write {}

/// Writer for NBT documents. Nothing is buffered here, so wrap the inner
/// writer in a `BufWriter` when writing to a file or socket.
///
/// ```
/// use nedit::write::Writer;
/// use nedit::compound;
///
/// # fn main() -> nedit::error::Result<()> {
/// let mut writer = Writer::new(Vec::new());
/// writer.write_document("hello", &compound! { "n" => 1i8 })?;
///
/// let bytes = writer.into_inner();
/// assert_eq!(
///     bytes,
///     [10, 0, 5, b'h', b'e', b'l', b'l', b'o', 1, 0, 1, b'n', 1, 0]
/// );
/// # Ok(())
/// # }
/// ```
pub struct Writer<W: Write> {
    writer: W,
    opts: WriteOpts,
}

impl<W: Write> Writer<W> {
    pub fn new(writer: W) -> Self {
        Self::with_opts(writer, WriteOpts::new())
    }

    pub fn with_opts(writer: W, opts: WriteOpts) -> Self {
        Self { writer, opts }
    }

    /// Consumes this writer, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write a whole document: the compound tag, the root name, and the body
    /// of `compound` ending with its End tag.
    pub fn write_document(&mut self, name: &str, compound: &Compound) -> Result<()> {
        self.writer.write_tag(Tag::Compound)?;
        self.write_size_prefixed_str(name)?;
        self.write_compound(compound)
    }

    /// Write just the payload of a value, with no tag or name in front of it.
    /// This is how list elements appear on the wire.
    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Byte(v) => self.writer.write_i8(*v)?,
            Value::Short(v) => self.writer.write_i16::<BigEndian>(*v)?,
            Value::Int(v) => self.writer.write_i32::<BigEndian>(*v)?,
            Value::Long(v) => self.writer.write_i64::<BigEndian>(*v)?,
            Value::Float(v) => self.writer.write_f32::<BigEndian>(*v)?,
            Value::Double(v) => self.writer.write_f64::<BigEndian>(*v)?,
            Value::String(v) => self.write_size_prefixed_str(v)?,
            Value::List(v) => self.write_list(v)?,
            Value::Compound(v) => self.write_compound(v)?,
            Value::ByteArray(v) => {
                self.writer.write_len(v.len())?;
                let data: Vec<u8> = v.iter().map(|b| *b as u8).collect();
                self.writer.write_all(&data)?;
            }
            Value::IntArray(v) => {
                self.writer.write_len(v.len())?;
                for i in v {
                    self.writer.write_i32::<BigEndian>(*i)?;
                }
            }
            Value::LongArray(v) => {
                self.writer.write_len(v.len())?;
                for i in v {
                    self.writer.write_i64::<BigEndian>(*i)?;
                }
            }
        }
        Ok(())
    }

    fn write_compound(&mut self, compound: &Compound) -> Result<()> {
        for (name, value) in compound {
            self.writer.write_tag(value.tag())?;
            self.write_size_prefixed_str(name)?;
            self.write_value(value)?;
        }
        self.writer.write_tag(Tag::End)
    }

    fn write_list(&mut self, list: &List) -> Result<()> {
        self.writer.write_tag(list.element_tag())?;
        self.writer.write_len(list.len())?;
        for value in list {
            self.write_value(value)?;
        }
        Ok(())
    }

    fn write_size_prefixed_str(&mut self, s: &str) -> Result<()> {
        let data = self.opts.strings.encode(s);
        self.writer.write_size_prefixed_bytes(&data)
    }
}
