//! The binary reader. Most users want [`decode`][`crate::decode`] or
//! [`from_reader`][`crate::from_reader`] rather than this module directly.
//!
//! The reader decodes exactly one document and stops after the End tag of the
//! root compound, leaving anything after it unread:
//!
//! ```
//! use nedit::read::Reader;
//! use nedit::ReadOpts;
//!
//! # fn main() -> nedit::error::Result<()> {
//! let input = [10, 0, 0, 0, 0xff, 0xff];
//! let mut reader = Reader::from_slice(&input, ReadOpts::new());
//!
//! let (name, compound) = reader.read_document()?;
//! assert_eq!(name, "");
//! assert!(compound.is_empty());
//! assert_eq!(reader.into_inner(), &[0xff, 0xff]);
//! # Ok(())
//! # }
//! ```
use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::{Error, Result};
use crate::{Compound, List, Strings, Tag, Value};

/// Sequences of unknown validity never get more than this many elements
/// allocated up front. They grow as elements actually arrive.
const PREALLOC_LIMIT: usize = 4096;

/// Options for reading NBT, mostly limits protecting against hostile input.
///
/// ```
/// use nedit::ReadOpts;
///
/// let opts = ReadOpts::new().max_depth(64).max_seq_len(1 << 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOpts {
    pub(crate) max_depth: usize,
    pub(crate) max_seq_len: usize,
    pub(crate) strings: Strings,
}

impl ReadOpts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum nesting of compounds and lists. The root compound is depth 1.
    /// Defaults to 512, the limit *Minecraft* itself applies.
    pub fn max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }

    /// Maximum declared length of any list or array. Defaults to the largest
    /// length the format can express.
    pub fn max_seq_len(mut self, value: usize) -> Self {
        self.max_seq_len = value;
        self
    }

    /// How names and strings are encoded. Defaults to [`Strings::Utf8`].
    pub fn strings(mut self, value: Strings) -> Self {
        self.strings = value;
        self
    }
}

impl Default for ReadOpts {
    fn default() -> Self {
        Self {
            max_depth: 512,
            max_seq_len: i32::MAX as usize,
            strings: Strings::Utf8,
        }
    }
}

/// Tracks how much input is left when that is known up front.
struct Input<R> {
    reader: R,
    remaining: Option<usize>,
}

impl<R: Read> Read for Input<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        if let Some(remaining) = &mut self.remaining {
            *remaining = remaining.saturating_sub(n);
        }
        Ok(n)
    }
}

/// Reader for a single NBT document.
pub struct Reader<R: Read> {
    input: Input<R>,
    opts: ReadOpts,
    depth: usize,
}

impl<'a> Reader<&'a [u8]> {
    /// Reader over a slice. Knowing the length of the input lets declared
    /// lengths be checked against it before anything is allocated.
    pub fn from_slice(input: &'a [u8], opts: ReadOpts) -> Self {
        Self {
            input: Input {
                reader: input,
                remaining: Some(input.len()),
            },
            opts,
            depth: 0,
        }
    }
}

impl<R: Read> Reader<R> {
    /// Create new reader for the given reader, with default options. Does not
    /// do decompression.
    pub fn new(reader: R) -> Self {
        Self::with_opts(reader, ReadOpts::new())
    }

    pub fn with_opts(reader: R, opts: ReadOpts) -> Self {
        Self {
            input: Input {
                reader,
                remaining: None,
            },
            opts,
            depth: 0,
        }
    }

    /// Consumes this reader, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.input.reader
    }

    /// Read a whole document: the root compound tag, its name and its body.
    pub fn read_document(&mut self) -> Result<(String, Compound)> {
        // A failed read can leave this anywhere.
        self.depth = 0;

        let tag = self.input.read_u8()?;
        if tag != u8::from(Tag::Compound) {
            return Err(Error::no_root_compound());
        }

        let name = self.read_size_prefixed_string()?;
        let compound = self.read_compound()?;
        Ok((name, compound))
    }

    fn read_tag(&mut self) -> Result<Tag> {
        let tag = self.input.read_u8()?;
        Tag::try_from(tag).map_err(|_| Error::invalid_tag(tag))
    }

    fn read_size_prefixed_string(&mut self) -> Result<String> {
        let len = self.input.read_u16::<BigEndian>()? as usize;

        let mut buf = vec![0; len];
        self.input.read_exact(&mut buf)?;

        self.opts.strings.decode(buf)
    }

    fn read_compound(&mut self) -> Result<Compound> {
        self.enter()?;

        let mut compound = Compound::new();
        loop {
            let tag = self.read_tag()?;
            if tag == Tag::End {
                break;
            }

            let name = self.read_size_prefixed_string()?;
            let value = self.read_payload(tag)?;

            // A repeated name replaces the earlier value.
            compound.insert(name, value);
        }

        self.depth -= 1;
        Ok(compound)
    }

    fn read_list(&mut self) -> Result<List> {
        self.enter()?;

        let element_tag = self.read_tag()?;
        let len = self.read_len(element_tag)?;

        // End values have no payload, so a list of them would be a short way
        // to describe a huge amount of nothing. Empty lists of End are how
        // lists with no type are written, so those are fine.
        if element_tag == Tag::End && len != 0 {
            return Err(Error::bespoke(
                "unexpected list of type 'end', which is not supported",
            ));
        }

        let mut values = Vec::with_capacity(self.capacity_for(len));
        for _ in 0..len {
            values.push(self.read_payload(element_tag)?);
        }

        self.depth -= 1;
        Ok(List::from_parts(element_tag, values))
    }

    fn read_payload(&mut self, tag: Tag) -> Result<Value> {
        Ok(match tag {
            Tag::Byte => Value::Byte(self.input.read_i8()?),
            Tag::Short => Value::Short(self.input.read_i16::<BigEndian>()?),
            Tag::Int => Value::Int(self.input.read_i32::<BigEndian>()?),
            Tag::Long => Value::Long(self.input.read_i64::<BigEndian>()?),
            Tag::Float => Value::Float(self.input.read_f32::<BigEndian>()?),
            Tag::Double => Value::Double(self.input.read_f64::<BigEndian>()?),
            Tag::String => Value::String(self.read_size_prefixed_string()?),
            Tag::List => Value::List(self.read_list()?),
            Tag::Compound => Value::Compound(self.read_compound()?),
            Tag::ByteArray => {
                let len = self.read_len(Tag::Byte)?;
                Value::ByteArray(self.read_byte_array(len)?)
            }
            Tag::IntArray => {
                let len = self.read_len(Tag::Int)?;
                let mut values = Vec::with_capacity(self.capacity_for(len));
                for _ in 0..len {
                    values.push(self.input.read_i32::<BigEndian>()?);
                }
                Value::IntArray(values)
            }
            Tag::LongArray => {
                let len = self.read_len(Tag::Long)?;
                let mut values = Vec::with_capacity(self.capacity_for(len));
                for _ in 0..len {
                    values.push(self.input.read_i64::<BigEndian>()?);
                }
                Value::LongArray(values)
            }
            // Only reachable through a list of End, which is rejected before
            // any element is read.
            Tag::End => {
                return Err(Error::bespoke(
                    "unexpected end tag, was expecting payload of a value",
                ))
            }
        })
    }

    fn read_byte_array(&mut self, len: usize) -> Result<Vec<i8>> {
        let mut buf = Vec::with_capacity(self.capacity_for(len));
        (&mut self.input).take(len as u64).read_to_end(&mut buf)?;
        if buf.len() != len {
            return Err(Error::UnexpectedEof);
        }

        Ok(buf.into_iter().map(|b| b as i8).collect())
    }

    /// Read the length of a list or array whose elements are `element_tag`
    /// payloads, and check it against the limits.
    fn read_len(&mut self, element_tag: Tag) -> Result<usize> {
        let len = self.input.read_i32::<BigEndian>()?;
        let len: usize = len
            .try_into()
            .map_err(|_| Error::bespoke(format!("negative length: {}", len)))?;

        if len > self.opts.max_seq_len {
            return Err(Error::limit("sequence length", len, self.opts.max_seq_len));
        }

        if let Some(remaining) = self.input.remaining {
            let needed = len.saturating_mul(element_tag.min_payload_len());
            if needed > remaining {
                return Err(Error::bespoke(format!(
                    "{} {} elements need at least {} bytes, only {} remain",
                    len, element_tag, needed, remaining
                )));
            }
        }

        Ok(len)
    }

    /// Lengths from a slice were already checked against the input, anything
    /// else is only trusted up to a point.
    fn capacity_for(&self, len: usize) -> usize {
        match self.input.remaining {
            Some(_) => len,
            None => len.min(PREALLOC_LIMIT),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.opts.max_depth {
            return Err(Error::limit("nesting depth", self.depth, self.opts.max_depth));
        }
        Ok(())
    }
}
