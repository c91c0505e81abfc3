//! A packed array of unsigned integers of arbitrary fixed bit-length.
//!
//! All elements, the header, and a scratch slot share a single buffer of `u64` words:
//!
//! | words | contents |
//! |---|---|
//! | `0` | length `L` |
//! | `1` | bit-length `B` |
//! | `2 .. 2 + cap` | payload, `cap = ceil(B * L / 64)` |
//! | `2 + cap` | bit-length `B` again, marking the start of the scratch |
//! | `3 + cap ..` | scratch slot of `ceil(B / 64)` words |
//!
//! The payload is a most-significant-bit-first bit sequence (see [`crate::bits`]): element `i` occupies bits `B * i + 128 ..= B * (i + 1) + 127` of the buffer, with its most significant bit first.
//! The scratch slot holds a little-endian value of `B` bits.
//! It is the workspace of multiplication, division, per-element comparison, and sorting, so those operations never allocate.

use crate::bits;
use crate::error::{Error, Result};
use crate::ops::{Element, Sortable};
use crate::serialize::{self, Encoder, Serialize};
use crate::value::Bits;

use std::cmp::Ordering;
use std::io;

use codec::Span;

mod arith;
mod bitwise;
pub mod codec;


//-----------------------------------------------------------------------------

// Word offsets in the buffer.
const LEN_OFFSET: usize = 0;
const WIDTH_OFFSET: usize = 1;
const HEADER_WORDS: usize = 2;

//-----------------------------------------------------------------------------

/// A packed array of `len` unsigned integers, each exactly `width` bits.
///
/// The length and the width are fixed at construction.
/// Operations that read or modify element `i` take the element index and, where needed, an operand [`Bits`] of bit-length `width`.
/// They touch only the words containing element `i` and the scratch slot, so other elements never change.
///
/// `VarInt` implements the following traits:
/// * Basic functionality: [`Element`]
/// * Sorting: [`Sortable`]
/// * Serialization: [`Serialize`]
///
/// Two arrays are equal if they have the same length, width, and elements; the contents of the scratch slot do not matter.
///
/// # Examples
///
/// ```
/// use packed_varint::{Bits, VarInt};
/// use packed_varint::ops::Element;
///
/// let mut v = VarInt::new(11, 100).unwrap();
/// assert_eq!(v.len(), 100);
/// assert_eq!(v.width(), 11);
///
/// v.set(17, &Bits::from_u64(11, 0x4C7)).unwrap();
/// assert_eq!(v.at_u64(17).unwrap(), 0x4C7);
/// assert_eq!(v.at_u64(16).unwrap(), 0);
/// assert_eq!(v.at_u64(18).unwrap(), 0);
///
/// v.add(17, &Bits::from_u64(11, 0x338)).unwrap();
/// assert_eq!(v.at_u64(17).unwrap(), 0x7FF);
/// assert!(v.get(100).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct VarInt {
    data: Vec<u64>,
}

impl VarInt {
    /// Creates an array of `len` elements of `width` bits, all set to `0`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BitLengthNotPositive`] if `width == 0` and [`Error::LengthNotPositive`] if `len == 0`.
    /// Returns [`Error::CapacityOverflow`] if the bit offsets of the buffer do not fit in `usize` or the buffer cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::VarInt;
    ///
    /// let v = VarInt::new(67, 100).unwrap();
    /// assert_eq!(v.raw_words().len(), 2 + 105 + 1 + 2);
    /// assert!(VarInt::new(0, 100).is_err());
    /// assert!(VarInt::new(67, 0).is_err());
    /// assert!(VarInt::new(1 << 40, 1 << 40).is_err());
    /// ```
    pub fn new(width: usize, len: usize) -> Result<VarInt> {
        if width == 0 {
            return Err(Error::BitLengthNotPositive(width));
        }
        if len == 0 {
            return Err(Error::LengthNotPositive(len));
        }
        let overflow = Error::CapacityOverflow { bit_len: width, len: len };
        let words = match Self::buffer_words(width, len) {
            Some(words) => words,
            None => return Err(overflow),
        };
        let mut data: Vec<u64> = Vec::new();
        if data.try_reserve_exact(words).is_err() {
            return Err(overflow);
        }
        data.resize(words, 0);
        data[LEN_OFFSET] = len as u64;
        data[WIDTH_OFFSET] = width as u64;
        data[HEADER_WORDS + Self::payload_words(width, len)] = width as u64;
        Ok(VarInt {
            data: data,
        })
    }

    // Number of payload words for `len` elements of `width` bits.
    // Only valid for dimensions accepted by `buffer_words`.
    #[inline]
    fn payload_words(width: usize, len: usize) -> usize {
        bits::bits_to_words(width * len)
    }

    // Total number of words in the buffer, or `None` if a bit offset in the buffer would not fit in `usize`.
    fn buffer_words(width: usize, len: usize) -> Option<usize> {
        let payload = bits::checked_bits_to_words(width.checked_mul(len)?)?;
        let scratch = bits::checked_bits_to_words(width)?;
        let words = HEADER_WORDS.checked_add(payload)?.checked_add(1)?.checked_add(scratch)?;
        words.checked_mul(bits::WORD_BITS)?;
        Some(words)
    }

    // Index of the first word of the scratch slot.
    #[inline]
    fn scratch_start(&self) -> usize {
        HEADER_WORDS + Self::payload_words(self.width(), self.len()) + 1
    }

    /// Returns the backing buffer, including the header and the scratch slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::{Bits, VarInt};
    ///
    /// let mut v = VarInt::new(4, 10).unwrap();
    /// v.set(0, &Bits::from_u64(4, 0xA)).unwrap();
    /// v.set(9, &Bits::from_u64(4, 0x5)).unwrap();
    /// assert_eq!(v.raw_words(), &[10, 4, 0xA000_0000_0500_0000, 4, 0]);
    /// ```
    pub fn raw_words(&self) -> &[u64] {
        &self.data
    }

    /// Returns the payload words of the buffer.
    pub fn payload(&self) -> &[u64] {
        &self.data[HEADER_WORDS..self.scratch_start() - 1]
    }

    /// Returns the current contents of the scratch slot.
    ///
    /// After [`VarInt::div`] the scratch holds the remainder, and after [`VarInt::rem`] it holds the quotient.
    /// Any operation may overwrite it.
    pub fn scratch(&self) -> Bits {
        Bits::new(self.width(), &self.data[self.scratch_start()..])
    }

    // Splits the buffer into the part containing the elements and the scratch slot.
    #[inline]
    fn split_scratch(&mut self) -> (&mut [u64], &mut [u64]) {
        let start = self.scratch_start();
        self.data.split_at_mut(start)
    }

    //-----------------------------------------------------------------------------

    // Returns the span of element `index`.
    fn span(&self, index: usize) -> Result<Span> {
        if index >= self.len() {
            return Err(Error::IndexOutOfRange { index: index, len: self.len() });
        }
        Ok(Span::new(index, self.width()))
    }

    // Returns the span of element `index` after checking that `value` can be used with it.
    fn operand_span(&self, index: usize, value: &Bits) -> Result<Span> {
        let span = self.span(index)?;
        if value.bit_len() != self.width() {
            return Err(Error::BitLengthMismatch { expected: self.width(), got: value.bit_len() });
        }
        Ok(span)
    }

    //-----------------------------------------------------------------------------

    /// Returns a copy of element `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()`.
    pub fn get(&self, index: usize) -> Result<Bits> {
        let mut result = Bits::zero(self.width());
        self.get_into(index, &mut result)?;
        Ok(result)
    }

    /// Copies element `index` into `out`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()` and [`Error::BitLengthMismatch`] if the bit-length of `out` is not `self.width()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::{Bits, VarInt};
    ///
    /// let mut v = VarInt::new(67, 100).unwrap();
    /// let value = Bits::new(67, &[0x8049_1626_73FA_196E, 0x7]);
    /// v.set(1, &value).unwrap();
    ///
    /// let mut out = Bits::zero(67);
    /// v.get_into(1, &mut out).unwrap();
    /// assert_eq!(out, value);
    /// assert!(v.get_into(1, &mut Bits::zero(64)).is_err());
    /// ```
    pub fn get_into(&self, index: usize, out: &mut Bits) -> Result<()> {
        let span = self.operand_span(index, out)?;
        span.extract(&self.data, out.words_mut());
        Ok(())
    }

    /// Sets element `index` to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()` and [`Error::BitLengthMismatch`] if the bit-length of `value` is not `self.width()`.
    pub fn set(&mut self, index: usize, value: &Bits) -> Result<()> {
        let span = self.operand_span(index, value)?;
        span.overwrite(&mut self.data, value.words());
        Ok(())
    }

    /// Exchanges element `index` and `value`.
    ///
    /// On success, the element holds the old contents of `value`, and `value` holds the old element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()` and [`Error::BitLengthMismatch`] if the bit-length of `value` is not `self.width()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::{Bits, VarInt};
    ///
    /// let mut v = VarInt::new(5, 3).unwrap();
    /// v.set_u64(1, 17).unwrap();
    /// let mut value = Bits::from_u64(5, 9);
    /// v.get_set(1, &mut value).unwrap();
    /// assert_eq!(v.at_u64(1).unwrap(), 9);
    /// assert_eq!(value.to_u64().unwrap(), 17);
    /// ```
    pub fn get_set(&mut self, index: usize, value: &mut Bits) -> Result<()> {
        let span = self.operand_span(index, value)?;
        span.swap(&mut self.data, value.words_mut());
        Ok(())
    }

    /// Compares element `index` with `value`.
    ///
    /// The element is extracted into the scratch slot for the comparison.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()` and [`Error::BitLengthMismatch`] if the bit-length of `value` is not `self.width()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::{Bits, VarInt};
    /// use std::cmp::Ordering;
    ///
    /// let mut v = VarInt::new(70, 2).unwrap();
    /// v.set(0, &Bits::new(70, &[0, 1])).unwrap();
    /// assert_eq!(v.cmp_at(0, &Bits::new(70, &[u64::MAX])).unwrap(), Ordering::Greater);
    /// assert_eq!(v.cmp_at(1, &Bits::zero(70)).unwrap(), Ordering::Equal);
    /// ```
    pub fn cmp_at(&mut self, index: usize, value: &Bits) -> Result<Ordering> {
        let span = self.operand_span(index, value)?;
        let (head, scratch) = self.split_scratch();
        span.extract(head, scratch);
        Ok(bits::cmp_words(scratch, value.words()))
    }

    /// Returns element `index` as a machine integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()` and [`Error::UintOverflow`] if `self.width() > 64`.
    pub fn at_u64(&self, index: usize) -> Result<u64> {
        let span = self.span(index)?;
        if self.width() > bits::WORD_BITS {
            return Err(Error::UintOverflow { bit_len: self.width() });
        }
        Ok(span.read(&self.data, 0))
    }

    /// Sets element `index` to a machine integer truncated to `self.width()` bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()`.
    pub fn set_u64(&mut self, index: usize, value: u64) -> Result<()> {
        let span = self.span(index)?;
        span.write(&mut self.data, 0, value);
        for n in 1..span.words() {
            span.write(&mut self.data, n, 0);
        }
        Ok(())
    }

    /// Returns an iterator over copies of the elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::VarInt;
    ///
    /// let mut v = VarInt::new(8, 4).unwrap();
    /// for i in 0..4 {
    ///     v.set_u64(i, 10 * i as u64).unwrap();
    /// }
    /// let values: Vec<u64> = v.iter().map(|x| x.to_u64().unwrap()).collect();
    /// assert_eq!(values, vec![0, 10, 20, 30]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            parent: self,
            index: 0,
        }
    }

    //-----------------------------------------------------------------------------

    /// Returns a reader producing the serialized array.
    ///
    /// The serialized array is the entire buffer as big-endian words.
    /// The array cannot be modified while the encoder exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::VarInt;
    /// use std::io::Read;
    ///
    /// let mut v = VarInt::new(4, 10).unwrap();
    /// v.set_u64(3, 9).unwrap();
    /// let mut bytes: Vec<u8> = Vec::new();
    /// v.encode().read_to_end(&mut bytes).unwrap();
    /// assert_eq!(bytes.len(), 8 * v.raw_words().len());
    ///
    /// let copy = VarInt::decode(&mut bytes.as_slice()).unwrap();
    /// assert_eq!(copy.raw_words(), v.raw_words());
    /// ```
    pub fn encode(&self) -> Encoder<'_> {
        Encoder::new(&self.data)
    }

    /// Reads a serialized array until the end of the input.
    ///
    /// The contents of the scratch slot, including the marker word, are not validated.
    ///
    /// # Errors
    ///
    /// Any errors from the reader are passed through as [`Error::Io`].
    /// Returns [`Error::NotDecodable`] if the input is not a whole number of words, the header is invalid, the number of words does not match the header, or the unused payload bits are not `0`.
    pub fn decode<T: io::Read>(reader: &mut T) -> Result<VarInt> {
        let data = serialize::read_words(reader)?;
        Self::from_words(data)
    }

    fn from_words(data: Vec<u64>) -> Result<VarInt> {
        if data.len() < HEADER_WORDS {
            return Err(Error::NotDecodable);
        }
        let len = data[LEN_OFFSET] as usize;
        let width = data[WIDTH_OFFSET] as usize;
        if len == 0 || width == 0 {
            return Err(Error::NotDecodable);
        }
        if Self::buffer_words(width, len) != Some(data.len()) {
            return Err(Error::NotDecodable);
        }
        let total_bits = width * len;
        let payload = Self::payload_words(width, len);
        let used = total_bits % bits::WORD_BITS;
        if used > 0 && data[HEADER_WORDS + payload - 1] & bits::low_set(bits::WORD_BITS - used) != 0 {
            return Err(Error::NotDecodable);
        }
        Ok(VarInt {
            data: data,
        })
    }
}

//-----------------------------------------------------------------------------

impl Element for VarInt {
    type Item = Bits;

    #[inline]
    fn len(&self) -> usize {
        self.data[LEN_OFFSET] as usize
    }

    #[inline]
    fn width(&self) -> usize {
        self.data[WIDTH_OFFSET] as usize
    }
}

impl Sortable for VarInt {
    fn less(&self, i: usize, j: usize) -> bool {
        assert!(i < self.len() && j < self.len(), "VarInt::less(): indexes {} and {} out of range for length {}", i, j, self.len());
        let (left, right) = (Span::new(i, self.width()), Span::new(j, self.width()));
        left.cmp_span(&self.data, &right) == Ordering::Less
    }

    fn swap(&mut self, i: usize, j: usize) {
        assert!(i < self.len() && j < self.len(), "VarInt::swap(): indexes {} and {} out of range for length {}", i, j, self.len());
        if i == j {
            return;
        }
        let (left, right) = (Span::new(i, self.width()), Span::new(j, self.width()));
        let (head, scratch) = self.split_scratch();
        right.extract(head, scratch);
        left.swap(head, scratch);
        right.swap(head, scratch);
    }
}

impl PartialEq for VarInt {
    fn eq(&self, other: &Self) -> bool {
        let end = self.scratch_start() - 1;
        self.data.len() == other.data.len() && self.data[..end] == other.data[..end]
    }
}

impl Eq for VarInt {}

//-----------------------------------------------------------------------------

impl Serialize for VarInt {
    fn serialize_header<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        for word in self.data[..HEADER_WORDS].iter() {
            writer.write_all(&word.to_be_bytes())?;
        }
        Ok(())
    }

    fn serialize_data<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        io::copy(&mut Encoder::new(&self.data[HEADER_WORDS..]), writer)?;
        Ok(())
    }

    fn load<T: io::Read>(reader: &mut T) -> Result<Self> {
        Self::decode(reader)
    }

    fn size_in_bytes(&self) -> usize {
        self.data.len() * 8
    }
}

//-----------------------------------------------------------------------------

/// A read-only iterator over [`VarInt`].
///
/// The type of `Item` is [`Bits`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    parent: &'a VarInt,
    index: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = <VarInt as Element>::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.parent.len() {
            None
        } else {
            let result = self.parent.get(self.index).ok();
            self.index += 1;
            result
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.parent.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}

//-----------------------------------------------------------------------------
