//! nedit reads and writes NBT, the tag based binary format *Minecraft* uses to
//! store worlds, player data and item metadata.
//!
//! A document is a single root [`Compound`] with a name (usually the empty
//! string). Compounds map names to [`Value`]s in insertion order, and values
//! may themselves be compounds or homogeneous [`List`]s, so documents are
//! trees of arbitrary depth.
//!
//! * To build documents see [`Compound`], [`List`] and the [`compound!`] macro.
//! * To read see [`decode`], [`from_reader`] and [`read::Reader`].
//! * To write see [`encode`], [`to_writer`] and [`write::Writer`].
//! * Compression is handled by [`Compression`].
//!
//! # Quick example
//!
//! ```
//! use nedit::{compound, Compression, List, Value};
//!
//! # fn main() -> nedit::error::Result<()> {
//! let mut inventory = List::new(nedit::Tag::Compound);
//! inventory.push(compound! { "id" => "minecraft:stone", "Count" => 64i8 })?;
//!
//! let player = compound! {
//!     "DataVersion" => 3465,
//!     "Inventory" => inventory,
//! };
//!
//! let bytes = nedit::encode(&player, "", Compression::Gzip)?;
//!
//! // Compression is detected when decoding from a slice.
//! let (name, decoded) = nedit::decode(&bytes)?;
//! assert_eq!(name, "");
//! assert_eq!(decoded.get_int("DataVersion"), Some(3465));
//! assert!(matches!(decoded["Inventory"], Value::List(_)));
//! # Ok(())
//! # }
//! ```
//!
//! # Limits
//!
//! Decoding untrusted input is guarded by [`ReadOpts`]: a maximum nesting
//! depth, a maximum sequence length, and, when the input length is known, a
//! check that declared lengths fit in the bytes that remain.

use std::fmt;
use std::io::{self, Read, Write};

use log::debug;

pub mod compression;
pub mod error;
pub mod read;
pub mod write;

mod compound;
mod list;
mod macros;
mod strings;
mod value;

pub use compound::Compound;
pub use compression::Compression;
pub use list::List;
pub use read::ReadOpts;
pub use strings::Strings;
pub use value::Value;
pub use write::WriteOpts;

use compression::corrupt_as_malformed;
use error::Result;
use read::Reader;
use write::Writer;

#[cfg(test)]
mod test;

/// An NBT tag. This does not carry the value or the name of the data.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other objects, all of the same type.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

impl Tag {
    /// Name of the tag, for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Tag::End => "End",
            Tag::Byte => "Byte",
            Tag::Short => "Short",
            Tag::Int => "Int",
            Tag::Long => "Long",
            Tag::Float => "Float",
            Tag::Double => "Double",
            Tag::ByteArray => "ByteArray",
            Tag::String => "String",
            Tag::List => "List",
            Tag::Compound => "Compound",
            Tag::IntArray => "IntArray",
            Tag::LongArray => "LongArray",
        }
    }

    /// The fewest bytes a payload of this tag can take up on the wire. Arrays,
    /// strings and lists only need their length prefix when empty, a compound
    /// only needs its End byte.
    pub fn min_payload_len(self) -> usize {
        match self {
            Tag::End => 0,
            Tag::Byte => 1,
            Tag::Short => 2,
            Tag::Int => 4,
            Tag::Long => 8,
            Tag::Float => 4,
            Tag::Double => 8,
            Tag::ByteArray => 4,
            Tag::String => 2,
            Tag::List => 5,
            Tag::Compound => 1,
            Tag::IntArray => 4,
            Tag::LongArray => 4,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Written out by hand rather than pulled in through a derive crate. The ids
// are part of the wire format and never change.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> std::result::Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}

/// Serialize a compound and its root name to a `Vec<u8>`, compressing it if
/// asked to.
///
/// ```
/// use nedit::{compound, Compression};
///
/// let bytes = nedit::encode(&compound! {}, "", Compression::None).unwrap();
/// // Compound tag, empty name, End tag.
/// assert_eq!(bytes, [10, 0, 0, 0]);
/// ```
pub fn encode(compound: &Compound, name: &str, compression: Compression) -> Result<Vec<u8>> {
    encode_with_opts(compound, name, compression, WriteOpts::new())
}

/// Like [`encode`], with control over how strings are encoded.
pub fn encode_with_opts(
    compound: &Compound,
    name: &str,
    compression: Compression,
    opts: WriteOpts,
) -> Result<Vec<u8>> {
    to_writer_with_opts(Vec::new(), compound, name, compression, opts)
}

/// Serialize a compound and its root name into `writer`. The writer is handed
/// back once all data, including any compression trailer, has been written
/// and flushed.
pub fn to_writer<W: Write>(
    writer: W,
    compound: &Compound,
    name: &str,
    compression: Compression,
) -> Result<W> {
    to_writer_with_opts(writer, compound, name, compression, WriteOpts::new())
}

/// Like [`to_writer`], with control over how strings are encoded.
pub fn to_writer_with_opts<W: Write>(
    writer: W,
    compound: &Compound,
    name: &str,
    compression: Compression,
    opts: WriteOpts,
) -> Result<W> {
    // If writing fails part way the encoder is dropped here, which releases it
    // along with the underlying writer.
    let mut writer = Writer::with_opts(compression.wrap_writer(writer), opts);
    writer.write_document(name, compound)?;
    let writer = writer.into_inner().finish()?;

    debug!(
        "encoded compound {:?} with {} entries ({:?})",
        name,
        compound.len(),
        compression
    );
    Ok(writer)
}

/// Deserialize a document from a slice, returning the root name and compound.
/// Gzip and zlib compression are detected from the leading bytes.
pub fn decode(bytes: &[u8]) -> Result<(String, Compound)> {
    decode_with_opts(bytes, ReadOpts::new())
}

/// Like [`decode`], with control over the limits applied to the input.
pub fn decode_with_opts(bytes: &[u8], opts: ReadOpts) -> Result<(String, Compound)> {
    match Compression::detect(bytes) {
        Compression::None => {
            let (name, compound) = Reader::from_slice(bytes, opts).read_document()?;
            debug!(
                "decoded compound {:?} with {} entries",
                name,
                compound.len()
            );
            Ok((name, compound))
        }
        compression => {
            let mut reader = Reader::with_opts(compression.wrap_reader(bytes), opts);
            let (name, compound) = reader
                .read_document()
                .map_err(|e| corrupt_as_malformed(compression, e))?;

            // All of the input is here, so run the decoder to the end of the
            // stream. This is what checks the gzip CRC and length trailer.
            io::copy(&mut reader.into_inner(), &mut io::sink())
                .map_err(|e| corrupt_as_malformed(compression, e.into()))?;

            debug!(
                "decoded compound {:?} with {} entries ({:?})",
                name,
                compound.len(),
                compression
            );
            Ok((name, compound))
        }
    }
}

/// Deserialize a document from a reader. No detection happens here: the
/// caller says whether the stream is compressed.
pub fn from_reader<R: Read>(reader: R, compression: Compression) -> Result<(String, Compound)> {
    from_reader_with_opts(reader, compression, ReadOpts::new())
}

/// Like [`from_reader`], with control over the limits applied to the input.
pub fn from_reader_with_opts<R: Read>(
    reader: R,
    compression: Compression,
    opts: ReadOpts,
) -> Result<(String, Compound)> {
    let (name, compound) = Reader::with_opts(compression.wrap_reader(reader), opts)
        .read_document()
        .map_err(|e| corrupt_as_malformed(compression, e))?;

    debug!(
        "decoded compound {:?} with {} entries ({:?})",
        name,
        compound.len(),
        compression
    );
    Ok((name, compound))
}
