//! The bit-window codec mapping an element of a packed array to little-endian words.
//!
//! An element of width `B` occupies a contiguous range of bits in the most-significant-bit-first backing buffer.
//! [`Span`] describes that range and reads and writes it one word-sized window at a time.
//! Window `n` holds value bits `64 * n ..` and ends `64 * n` bits before the last bit of the element, so an element spanning one, two, or three words is handled the same way.
//! Each window itself spans at most two words of the buffer.
//!
//! Every operation touches only the words from [`Span::low`] to [`Span::high`], and only the element's bits within them.

use crate::bits::{self, WORD_BITS};

use std::cmp::Ordering;

//-----------------------------------------------------------------------------

/// Number of bits before the payload of a packed array.
pub const HEADER_BITS: usize = 2 * WORD_BITS;

//-----------------------------------------------------------------------------

/// The location of an element in the backing buffer of a packed array.
///
/// # Examples
///
/// ```
/// use packed_varint::var_int::codec::Span;
///
/// let span = Span::new(1, 67);
/// assert_eq!((span.low(), span.high()), (3, 4));
/// assert_eq!((span.lshift(), span.rshift()), (3, 58));
/// assert_eq!(span.words(), 2);
///
/// let mut data = vec![0u64; 6];
/// span.overwrite(&mut data, &[!0u64, 0x7]);
/// assert_eq!(data[3], !0u64 >> 3);
/// assert_eq!(data[4], !0u64 << 58);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    // Offset of the least significant bit of the element.
    last_bit: usize,
    width: usize,
}

impl Span {
    /// Returns the span of element `index` in an array of `width`-bit elements.
    ///
    /// Behavior is undefined if `width == 0` or the offsets do not fit in `usize`.
    pub fn new(index: usize, width: usize) -> Span {
        Span {
            last_bit: width * (index + 1) - 1 + HEADER_BITS,
            width: width,
        }
    }

    /// Returns the offset of the most significant bit of the element.
    #[inline]
    pub fn first_bit(&self) -> usize {
        self.last_bit + 1 - self.width
    }

    /// Returns the offset of the least significant bit of the element.
    #[inline]
    pub fn last_bit(&self) -> usize {
        self.last_bit
    }

    /// Returns the index of the first buffer word containing bits of the element.
    #[inline]
    pub fn low(&self) -> usize {
        self.first_bit() / WORD_BITS
    }

    /// Returns the index of the last buffer word containing bits of the element.
    #[inline]
    pub fn high(&self) -> usize {
        self.last_bit / WORD_BITS
    }

    /// Returns the number of bits before the element in word [`Span::low`].
    #[inline]
    pub fn lshift(&self) -> usize {
        self.first_bit() % WORD_BITS
    }

    /// Returns the number of bits after the element in word [`Span::high`].
    #[inline]
    pub fn rshift(&self) -> usize {
        WORD_BITS - 1 - self.last_bit % WORD_BITS
    }

    /// Returns the number of words in the value of the element.
    #[inline]
    pub fn words(&self) -> usize {
        bits::bits_to_words(self.width)
    }

    #[inline]
    fn window(&self, n: usize) -> (usize, usize) {
        (self.last_bit - bits::words_to_bits(n), bits::word_width(self.width, n))
    }

    //-----------------------------------------------------------------------------

    /// Reads word `n` of the element value.
    #[inline]
    pub fn read(&self, data: &[u64], n: usize) -> u64 {
        let (last_bit, width) = self.window(n);
        bits::read_window(data, last_bit, width)
    }

    /// Writes word `n` of the element value, truncating it to the width of the word.
    #[inline]
    pub fn write(&self, data: &mut [u64], n: usize, value: u64) {
        let (last_bit, width) = self.window(n);
        bits::write_window(data, last_bit, value, width);
    }

    /// Returns the most significant bit of the element.
    pub fn top_bit(&self, data: &[u64]) -> bool {
        let top = self.words() - 1;
        let width = bits::word_width(self.width, top);
        (self.read(data, top) >> (width - 1)) & 1 != 0
    }

    /// Copies the element value to `out`.
    pub fn extract(&self, data: &[u64], out: &mut [u64]) {
        for n in 0..self.words() {
            out[n] = self.read(data, n);
        }
    }

    /// Replaces the element value with `source`.
    pub fn overwrite(&self, data: &mut [u64], source: &[u64]) {
        for n in 0..self.words() {
            self.write(data, n, source[n]);
        }
    }

    /// Exchanges the element value and `other`.
    pub fn swap(&self, data: &mut [u64], other: &mut [u64]) {
        for n in 0..self.words() {
            let old = self.read(data, n);
            self.write(data, n, other[n]);
            other[n] = old;
        }
    }

    /// Sets the element to `0`.
    pub fn clear(&self, data: &mut [u64]) {
        for n in 0..self.words() {
            self.write(data, n, 0);
        }
    }

    /// Compares the element with a value of the same width.
    pub fn cmp(&self, data: &[u64], other: &[u64]) -> Ordering {
        for n in (0..self.words()).rev() {
            match self.read(data, n).cmp(&other[n]) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }
        Ordering::Equal
    }

    /// Compares the element with another element of the same width in the same buffer.
    pub fn cmp_span(&self, data: &[u64], other: &Span) -> Ordering {
        for n in (0..self.words()).rev() {
            match self.read(data, n).cmp(&other.read(data, n)) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }
        Ordering::Equal
    }

    //-----------------------------------------------------------------------------

    /// Shifts the element left by `shift` bits, discarding the bits shifted out.
    pub fn shift_left(&self, data: &mut [u64], shift: usize) {
        if shift >= self.width {
            self.clear(data);
            return;
        }
        let (word_shift, bit_shift) = (shift / WORD_BITS, shift % WORD_BITS);
        // Words below `n` are still unmodified when word `n` is written.
        for n in (0..self.words()).rev() {
            let mut value = 0;
            if n >= word_shift {
                value = self.read(data, n - word_shift) << bit_shift;
                if bit_shift > 0 && n > word_shift {
                    value |= self.read(data, n - word_shift - 1) >> (WORD_BITS - bit_shift);
                }
            }
            self.write(data, n, value);
        }
    }

    /// Shifts the element right by `shift` bits, discarding the bits shifted out.
    pub fn shift_right(&self, data: &mut [u64], shift: usize) {
        if shift >= self.width {
            self.clear(data);
            return;
        }
        let words = self.words();
        let (word_shift, bit_shift) = (shift / WORD_BITS, shift % WORD_BITS);
        // Words above `n` are still unmodified when word `n` is written.
        for n in 0..words {
            let mut value = 0;
            if n + word_shift < words {
                value = self.read(data, n + word_shift) >> bit_shift;
                if bit_shift > 0 && n + word_shift + 1 < words {
                    value |= self.read(data, n + word_shift + 1) << (WORD_BITS - bit_shift);
                }
            }
            self.write(data, n, value);
        }
    }
}

//-----------------------------------------------------------------------------
