//! Optional whole-stream compression around NBT data.
//!
//! NBT files are usually gzip compressed (player data, `level.dat`), while
//! chunks inside region files use zlib. Neither knows anything about tags:
//! the reader and writer work on the decompressed bytes.
use std::io::{self, Read, Write};

use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use log::trace;

use crate::error::{Error, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Compression applied to a whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Raw NBT.
    #[default]
    None,
    /// Gzip, as used by most standalone NBT files.
    Gzip,
    /// Zlib, as used by chunks in region files.
    Zlib,
}

impl Compression {
    /// Guess the compression of some data from its leading bytes.
    ///
    /// Raw NBT always starts with the Compound tag (`0x0a`), which is neither
    /// the gzip magic nor a valid zlib header, so well formed data is never
    /// misidentified.
    ///
    /// ```
    /// use nedit::Compression;
    ///
    /// assert_eq!(Compression::detect(&[0x1f, 0x8b, 8, 0]), Compression::Gzip);
    /// assert_eq!(Compression::detect(&[0x78, 0x9c]), Compression::Zlib);
    /// assert_eq!(Compression::detect(&[10, 0, 0, 0]), Compression::None);
    /// ```
    pub fn detect(data: &[u8]) -> Compression {
        let compression = match data {
            [a, b, ..] if [*a, *b] == GZIP_MAGIC => Compression::Gzip,
            [cmf, flg, ..] if is_zlib_header(*cmf, *flg) => Compression::Zlib,
            _ => Compression::None,
        };
        trace!("detected compression {:?}", compression);
        compression
    }

    /// Wrap a writer so everything written through it is compressed. Call
    /// [`Encoder::finish`] to write the trailer and get the writer back.
    pub fn wrap_writer<W: Write>(self, writer: W) -> Encoder<W> {
        trace!("wrapping writer with {:?}", self);
        let level = flate2::Compression::default();
        match self {
            Compression::None => Encoder::None(writer),
            Compression::Gzip => Encoder::Gzip(GzEncoder::new(writer, level)),
            Compression::Zlib => Encoder::Zlib(ZlibEncoder::new(writer, level)),
        }
    }

    /// Wrap a reader so everything read through it is decompressed.
    pub fn wrap_reader<R: Read>(self, reader: R) -> Decoder<R> {
        trace!("wrapping reader with {:?}", self);
        match self {
            Compression::None => Decoder::None(reader),
            Compression::Gzip => Decoder::Gzip(GzDecoder::new(reader)),
            Compression::Zlib => Decoder::Zlib(ZlibDecoder::new(reader)),
        }
    }
}

// CM must be deflate (8), window size at most 32K, and the two header bytes
// read as a big endian u16 must be a multiple of 31.
fn is_zlib_header(cmf: u8, flg: u8) -> bool {
    cmf & 0x0f == 8 && cmf >> 4 <= 7 && u16::from_be_bytes([cmf, flg]) % 31 == 0
}

/// A writer that may be compressing. Dropping it without calling
/// [`finish`][`Encoder::finish`] releases the underlying writer but may leave
/// the compressed stream incomplete.
pub enum Encoder<W: Write> {
    None(W),
    Gzip(GzEncoder<W>),
    Zlib(ZlibEncoder<W>),
}

impl<W: Write> Encoder<W> {
    /// Flush any buffered data and the compression trailer, returning the
    /// underlying writer.
    pub fn finish(self) -> Result<W> {
        Ok(match self {
            Encoder::None(mut w) => {
                w.flush()?;
                w
            }
            Encoder::Gzip(e) => e.finish()?,
            Encoder::Zlib(e) => e.finish()?,
        })
    }
}

impl<W: Write> Write for Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Encoder::None(w) => w.write(buf),
            Encoder::Gzip(e) => e.write(buf),
            Encoder::Zlib(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Encoder::None(w) => w.flush(),
            Encoder::Gzip(e) => e.flush(),
            Encoder::Zlib(e) => e.flush(),
        }
    }
}

/// A reader that may be decompressing.
pub enum Decoder<R: Read> {
    None(R),
    Gzip(GzDecoder<R>),
    Zlib(ZlibDecoder<R>),
}

impl<R: Read> Decoder<R> {
    /// Consume the decoder, returning the underlying reader.
    pub fn into_inner(self) -> R {
        match self {
            Decoder::None(r) => r,
            Decoder::Gzip(d) => d.into_inner(),
            Decoder::Zlib(d) => d.into_inner(),
        }
    }
}

impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Decoder::None(r) => r.read(buf),
            Decoder::Gzip(d) => d.read(buf),
            Decoder::Zlib(d) => d.read(buf),
        }
    }
}

/// Decompressors report corrupt data as `InvalidInput` or `InvalidData` io
/// errors. Coming out of a decoder those mean the input is bad, not the
/// source.
pub(crate) fn corrupt_as_malformed(compression: Compression, err: Error) -> Error {
    match (compression, err) {
        (Compression::None, err) => err,
        (_, Error::Io(e))
            if matches!(
                e.kind(),
                io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData
            ) =>
        {
            Error::Malformed(format!("corrupt {:?} stream: {}", compression, e))
        }
        (_, err) => err,
    }
}
