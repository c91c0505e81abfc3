//! Simple serialization interface.
//!
//! The serialized representation is a sequence of big-endian 64-bit words that closely mirrors the in-memory representation.
//! For [`crate::VarInt`], the serialized form is the entire backing buffer:
//!
//! * Header: the number of elements and the bit-length of an element.
//! * Data: the packed payload, followed by the scratch slot.
//!
//! The header makes the format self-describing.
//! A serialized structure is always loaded with a single [`Serialize::load`] call.
//!
//! [`Encoder`] provides the same byte stream through [`io::Read`], converting the words in chunks of [`CHUNK_WORDS`] words.

use crate::error::{Error, Result};

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::{env, io, process};

//-----------------------------------------------------------------------------

/// Number of words converted at a time by [`Encoder`].
pub const CHUNK_WORDS: usize = 1024;

// Number of bytes in a serialized word.
const WORD_BYTES: usize = 8;

//-----------------------------------------------------------------------------

/// Serialize a data structure.
///
/// `self.size_in_bytes()` should always be nonzero.
///
/// # Examples
///
/// ```
/// use packed_varint::serialize;
/// use packed_varint::serialize::Serialize;
/// use std::{fs, io};
///
/// #[derive(PartialEq, Eq, Debug)]
/// struct Example(u64, u64);
///
/// impl Serialize for Example {
///     fn serialize_header<T: io::Write>(&self, _: &mut T) -> io::Result<()> {
///         Ok(())
///     }
///
///     fn serialize_data<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
///         writer.write_all(&self.0.to_be_bytes())?;
///         writer.write_all(&self.1.to_be_bytes())?;
///         Ok(())
///     }
///
///     fn load<T: io::Read>(reader: &mut T) -> packed_varint::Result<Self> {
///         let first = serialize::read_word(reader)?;
///         let second = serialize::read_word(reader)?;
///         Ok(Example(first, second))
///     }
///
///     fn size_in_bytes(&self) -> usize {
///         16
///     }
/// }
///
/// let example = Example(123, 456);
/// let filename = serialize::temp_file_name("example");
/// serialize::serialize_to(&example, &filename).unwrap();
///
/// let copy: Example = serialize::load_from(&filename).unwrap();
/// assert_eq!(copy, example);
///
/// fs::remove_file(&filename).unwrap();
/// ```
pub trait Serialize: Sized {
    /// Serializes the struct to the writer.
    ///
    /// Equivalent to calling [`Serialize::serialize_header`] and [`Serialize::serialize_data`].
    ///
    /// # Errors
    ///
    /// Any errors from the writer may be passed through.
    fn serialize<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.serialize_header(writer)?;
        self.serialize_data(writer)?;
        Ok(())
    }

    /// Serializes the header to the writer.
    ///
    /// # Errors
    ///
    /// Any errors from the writer may be passed through.
    fn serialize_header<T: io::Write>(&self, writer: &mut T) -> io::Result<()>;

    /// Serializes the data to the writer.
    ///
    /// # Errors
    ///
    /// Any errors from the writer may be passed through.
    fn serialize_data<T: io::Write>(&self, writer: &mut T) -> io::Result<()>;

    /// Loads the struct from the reader.
    ///
    /// # Errors
    ///
    /// Any errors from the reader are passed through as [`Error::Io`].
    /// Returns [`Error::NotDecodable`] if the data does not describe a valid struct.
    fn load<T: io::Read>(reader: &mut T) -> Result<Self>;

    /// Returns the size of the serialized struct in bytes.
    /// This should be closely related to the size of the in-memory struct.
    fn size_in_bytes(&self) -> usize;
}

//-----------------------------------------------------------------------------

/// Reads a big-endian word from the reader.
///
/// # Errors
///
/// Any errors from the reader will be passed through.
pub fn read_word<T: io::Read>(reader: &mut T) -> io::Result<u64> {
    let mut bytes = [0u8; WORD_BYTES];
    reader.read_exact(&mut bytes)?;
    Ok(u64::from_be_bytes(bytes))
}

/// Reads the rest of the input as big-endian words.
///
/// # Errors
///
/// Any errors from the reader will be passed through.
/// Returns [`Error::NotDecodable`] if the number of bytes is not a multiple of 8.
///
/// # Examples
///
/// ```
/// use packed_varint::serialize;
///
/// let bytes: Vec<u8> = vec![0, 0, 0, 0, 0, 0, 1, 2];
/// assert_eq!(serialize::read_words(&mut bytes.as_slice()).unwrap(), vec![0x102]);
/// assert!(serialize::read_words(&mut &bytes[..7]).is_err());
/// ```
pub fn read_words<T: io::Read>(reader: &mut T) -> Result<Vec<u64>> {
    let mut bytes: Vec<u8> = Vec::new();
    reader.read_to_end(&mut bytes)?;
    if bytes.len() % WORD_BYTES != 0 {
        return Err(Error::NotDecodable);
    }
    let mut words: Vec<u64> = Vec::with_capacity(bytes.len() / WORD_BYTES);
    for chunk in bytes.chunks_exact(WORD_BYTES) {
        let mut word = [0u8; WORD_BYTES];
        word.copy_from_slice(chunk);
        words.push(u64::from_be_bytes(word));
    }
    Ok(words)
}

//-----------------------------------------------------------------------------

/// A reader producing a slice of words as big-endian bytes.
///
/// The words are converted in chunks of [`CHUNK_WORDS`] words as the consumer reads them.
/// The encoder borrows the words, so they cannot change while the encoding is in progress.
///
/// # Examples
///
/// ```
/// use packed_varint::serialize::Encoder;
/// use std::io::Read;
///
/// let words: Vec<u64> = vec![1, 0x0203];
/// let mut encoder = Encoder::new(&words);
/// let mut bytes: Vec<u8> = Vec::new();
/// encoder.read_to_end(&mut bytes).unwrap();
/// assert_eq!(bytes, vec![0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 2, 3]);
/// ```
#[derive(Clone, Debug)]
pub struct Encoder<'a> {
    words: &'a [u64],
    next: usize,
    chunk: Vec<u8>,
    offset: usize,
}

impl<'a> Encoder<'a> {
    /// Creates an encoder for the words.
    pub fn new(words: &'a [u64]) -> Encoder<'a> {
        Encoder {
            words: words,
            next: 0,
            chunk: Vec::with_capacity(CHUNK_WORDS * WORD_BYTES),
            offset: 0,
        }
    }

    /// Returns the total number of bytes the encoder produces.
    pub fn len(&self) -> usize {
        self.words.len() * WORD_BYTES
    }

    /// Returns `true` if the encoder produces no bytes.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    // Converts the next chunk of words. Returns `false` if there are no more words.
    fn fill_chunk(&mut self) -> bool {
        if self.next >= self.words.len() {
            return false;
        }
        let limit = self.words.len().min(self.next + CHUNK_WORDS);
        self.chunk.clear();
        for word in self.words[self.next..limit].iter() {
            self.chunk.extend_from_slice(&word.to_be_bytes());
        }
        self.next = limit;
        self.offset = 0;
        true
    }
}

impl<'a> io::Read for Encoder<'a> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.offset >= self.chunk.len() && !self.fill_chunk() {
            return Ok(0);
        }
        let count = buf.len().min(self.chunk.len() - self.offset);
        buf[..count].copy_from_slice(&self.chunk[self.offset..self.offset + count]);
        self.offset += count;
        Ok(count)
    }
}

//-----------------------------------------------------------------------------

/// Serializes the item to the specified file, creating or overwriting the file if necessary.
///
/// See [`Serialize`] for an example.
///
/// # Errors
///
/// Any errors from [`OpenOptions::open`] and [`Serialize::serialize`] will be passed through.
pub fn serialize_to<T: Serialize, P: AsRef<Path>>(item: &T, filename: P) -> io::Result<()> {
    let mut options = OpenOptions::new();
    let mut file = options.create(true).write(true).truncate(true).open(filename)?;
    item.serialize(&mut file)?;
    Ok(())
}

/// Loads the item from the specified file.
///
/// See [`Serialize`] for an example.
///
/// # Errors
///
/// Any errors from [`OpenOptions::open`] and [`Serialize::load`] will be passed through.
pub fn load_from<T: Serialize, P: AsRef<Path>>(filename: P) -> Result<T> {
    let mut options = OpenOptions::new();
    let mut file = options.read(true).open(filename)?;
    <T as Serialize>::load(&mut file)
}

// Counter used for temporary file names.
static TEMP_FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Returns a name for a temporary file using the provided name part.
///
/// # Examples
///
/// ```
/// use packed_varint::serialize;
///
/// let filename = serialize::temp_file_name("example");
/// assert!(filename.into_os_string().into_string().unwrap().contains("example"));
/// ```
pub fn temp_file_name(name_part: &str) -> PathBuf {
    let count = TEMP_FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let mut buf = env::temp_dir();
    buf.push(format!("{}_{}_{}", name_part, process::id(), count));
    buf
}

//-----------------------------------------------------------------------------

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------
