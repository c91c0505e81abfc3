//! Low-level functions for bit manipulation.
//!
//! Packed elements are stored in arrays of `u64` words with the most significant bits first:
//! bit offset `0` of an array is the highest bit of word `0`, and bit offset `63` is its lowest bit.
//! An element ending at bit offset `last_bit` has its least significant bit there, so a window of `width` bits covers offsets `last_bit + 1 - width ..= last_bit`.
//!
//! Multi-word values outside the packed arrays use little-endian word order: word `0` is the least significant.

use std::cmp::Ordering;
use std::ops::{Index, IndexMut};

//-----------------------------------------------------------------------------

/// Number of bits in `u64`.
pub const WORD_BITS: usize = 64;

// Bit shift for transforming a bit offset into an array index.
const INDEX_SHIFT: usize = 6;

// Bit mask for transforming a bit offset into an offset in `u64`.
const OFFSET_MASK: usize = 0b111111;

//-----------------------------------------------------------------------------

const LOW_SET: [u64; 65] = [
    0x0000_0000_0000_0000,

    0x0000_0000_0000_0001, 0x0000_0000_0000_0003, 0x0000_0000_0000_0007, 0x0000_0000_0000_000F,
    0x0000_0000_0000_001F, 0x0000_0000_0000_003F, 0x0000_0000_0000_007F, 0x0000_0000_0000_00FF,
    0x0000_0000_0000_01FF, 0x0000_0000_0000_03FF, 0x0000_0000_0000_07FF, 0x0000_0000_0000_0FFF,
    0x0000_0000_0000_1FFF, 0x0000_0000_0000_3FFF, 0x0000_0000_0000_7FFF, 0x0000_0000_0000_FFFF,

    0x0000_0000_0001_FFFF, 0x0000_0000_0003_FFFF, 0x0000_0000_0007_FFFF, 0x0000_0000_000F_FFFF,
    0x0000_0000_001F_FFFF, 0x0000_0000_003F_FFFF, 0x0000_0000_007F_FFFF, 0x0000_0000_00FF_FFFF,
    0x0000_0000_01FF_FFFF, 0x0000_0000_03FF_FFFF, 0x0000_0000_07FF_FFFF, 0x0000_0000_0FFF_FFFF,
    0x0000_0000_1FFF_FFFF, 0x0000_0000_3FFF_FFFF, 0x0000_0000_7FFF_FFFF, 0x0000_0000_FFFF_FFFF,

    0x0000_0001_FFFF_FFFF, 0x0000_0003_FFFF_FFFF, 0x0000_0007_FFFF_FFFF, 0x0000_000F_FFFF_FFFF,
    0x0000_001F_FFFF_FFFF, 0x0000_003F_FFFF_FFFF, 0x0000_007F_FFFF_FFFF, 0x0000_00FF_FFFF_FFFF,
    0x0000_01FF_FFFF_FFFF, 0x0000_03FF_FFFF_FFFF, 0x0000_07FF_FFFF_FFFF, 0x0000_0FFF_FFFF_FFFF,
    0x0000_1FFF_FFFF_FFFF, 0x0000_3FFF_FFFF_FFFF, 0x0000_7FFF_FFFF_FFFF, 0x0000_FFFF_FFFF_FFFF,

    0x0001_FFFF_FFFF_FFFF, 0x0003_FFFF_FFFF_FFFF, 0x0007_FFFF_FFFF_FFFF, 0x000F_FFFF_FFFF_FFFF,
    0x001F_FFFF_FFFF_FFFF, 0x003F_FFFF_FFFF_FFFF, 0x007F_FFFF_FFFF_FFFF, 0x00FF_FFFF_FFFF_FFFF,
    0x01FF_FFFF_FFFF_FFFF, 0x03FF_FFFF_FFFF_FFFF, 0x07FF_FFFF_FFFF_FFFF, 0x0FFF_FFFF_FFFF_FFFF,
    0x1FFF_FFFF_FFFF_FFFF, 0x3FFF_FFFF_FFFF_FFFF, 0x7FFF_FFFF_FFFF_FFFF, 0xFFFF_FFFF_FFFF_FFFF,
];

//-----------------------------------------------------------------------------

/// Returns an integer with the lowest `n` bits set.
///
/// # Examples
///
/// ```
/// use packed_varint::bits;
///
/// assert_eq!(bits::low_set(13), 0x1FFF);
/// ```
///
/// # Panics
///
/// May panic if `n > 64`.
#[inline]
pub fn low_set(n: usize) -> u64 {
    LOW_SET[n]
}

/// Returns the length of the binary representation of integer `n`.
///
/// # Examples
///
/// ```
/// use packed_varint::bits;
///
/// assert_eq!(bits::bit_len(0), 1);
/// assert_eq!(bits::bit_len(0x1FFF), 13);
/// ```
#[inline]
pub fn bit_len(n: u64) -> usize {
    match n {
        0 => 1,
        _ => WORD_BITS - (n.leading_zeros() as usize),
    }
}

//-----------------------------------------------------------------------------

/// Returns the number of bits that can be stored in `n` integers of type `u64`.
///
/// Behavior is undefined if `n * 64 > usize::MAX`.
///
/// # Examples
///
/// ```
/// use packed_varint::bits;
///
/// assert_eq!(bits::words_to_bits(3), 192);
/// ```
#[inline]
pub fn words_to_bits(n: usize) -> usize {
    n * WORD_BITS
}

/// Returns the number of integers of type `u64` required to store `n` bits.
///
/// Behavior is undefined if `n + 63 > usize::MAX`.
///
/// # Examples
///
/// ```
/// use packed_varint::bits;
///
/// assert_eq!(bits::bits_to_words(64), 1);
/// assert_eq!(bits::bits_to_words(65), 2);
/// ```
#[inline]
pub fn bits_to_words(n: usize) -> usize {
    (n + WORD_BITS - 1) / WORD_BITS
}

/// Returns the number of integers of type `u64` required to store `n` bits, or `None` on overflow.
///
/// # Examples
///
/// ```
/// use packed_varint::bits;
///
/// assert_eq!(bits::checked_bits_to_words(65), Some(2));
/// assert_eq!(bits::checked_bits_to_words(usize::MAX), None);
/// ```
#[inline]
pub fn checked_bits_to_words(n: usize) -> Option<usize> {
    Some(n.checked_add(WORD_BITS - 1)? / WORD_BITS)
}

/// Splits a bit offset into an index in an array of `u64` and an offset within the integer.
///
/// The offset within the integer counts from the most significant bit.
///
/// # Examples
///
/// ```
/// use packed_varint::bits;
///
/// assert_eq!(bits::split_offset(123), (1, 59));
/// ```
#[inline]
pub fn split_offset(bit_offset: usize) -> (usize, usize) {
    (bit_offset >> INDEX_SHIFT, bit_offset & OFFSET_MASK)
}

/// Returns the width of the `n`th word of a `width`-bit value in little-endian word order.
///
/// All words except the most significant one are full.
/// Behavior is undefined if `n >= bits_to_words(width)`.
///
/// # Examples
///
/// ```
/// use packed_varint::bits;
///
/// assert_eq!(bits::word_width(130, 0), 64);
/// assert_eq!(bits::word_width(130, 2), 2);
/// assert_eq!(bits::word_width(128, 1), 64);
/// ```
#[inline]
pub fn word_width(width: usize, n: usize) -> usize {
    let remaining = width - words_to_bits(n);
    if remaining < WORD_BITS { remaining } else { WORD_BITS }
}

//-----------------------------------------------------------------------------

/// Reads a window of at most 64 bits from a most-significant-bit-first bit array.
///
/// The window may span two words.
///
/// # Arguments
///
/// * `array`: The bit array.
/// * `last_bit`: Offset of the least significant bit of the window.
/// * `width`: The width of the window in bits, from 1 to 64.
///
/// # Examples
///
/// ```
/// use packed_varint::bits;
///
/// let array: Vec<u64> = vec![0x0000_0000_0000_0003, 0x8000_0000_0000_0000];
/// assert_eq!(bits::read_window(&array, 64, 3), 0b111);
/// assert_eq!(bits::read_window(&array, 63, 2), 0b11);
/// ```
///
/// # Panics
///
/// May panic if `last_bit + 1 < width` or if the window extends past the end of the array.
pub fn read_window<T: Index<usize, Output = u64> + ?Sized>(array: &T, last_bit: usize, width: usize) -> u64 {
    let (index, offset) = split_offset(last_bit);
    let available = offset + 1;
    let low = array[index] >> (WORD_BITS - available);

    if width <= available {
        low & low_set(width)
    } else {
        (low | (array[index - 1] << available)) & low_set(width)
    }
}

/// Writes a window of at most 64 bits to a most-significant-bit-first bit array.
///
/// Only the bits inside the window are modified.
/// The value is truncated to `width` bits.
///
/// # Arguments
///
/// * `array`: The bit array.
/// * `last_bit`: Offset of the least significant bit of the window.
/// * `value`: The value to be written.
/// * `width`: The width of the window in bits, from 1 to 64.
///
/// # Examples
///
/// ```
/// use packed_varint::bits;
///
/// let mut array: Vec<u64> = vec![0, 0];
/// bits::write_window(&mut array, 64, 0b101, 3);
/// assert_eq!(array, vec![0x0000_0000_0000_0002, 0x8000_0000_0000_0000]);
/// ```
///
/// # Panics
///
/// May panic if `last_bit + 1 < width` or if the window extends past the end of the array.
pub fn write_window<T: IndexMut<usize, Output = u64> + ?Sized>(array: &mut T, last_bit: usize, value: u64, width: usize) {
    let value = value & low_set(width);
    let (index, offset) = split_offset(last_bit);
    let available = offset + 1;
    let shift = WORD_BITS - available;

    if width <= available {
        let mask = low_set(width) << shift;
        array[index] = (array[index] & !mask) | (value << shift);
    } else {
        array[index] = (array[index] & low_set(shift)) | (value << shift);
        let rest = width - available;
        array[index - 1] = (array[index - 1] & !low_set(rest)) | (value >> available);
    }
}

//-----------------------------------------------------------------------------

/// Adds two words and an incoming carry, returning the sum and the outgoing carry.
///
/// # Examples
///
/// ```
/// use packed_varint::bits;
///
/// assert_eq!(bits::add_with_carry(!0u64, 0, true), (0, true));
/// assert_eq!(bits::add_with_carry(2, 3, true), (6, false));
/// ```
#[inline]
pub fn add_with_carry(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, c1) = a.overflowing_add(b);
    let (sum, c2) = sum.overflowing_add(carry as u64);
    (sum, c1 | c2)
}

/// Subtracts a word and an incoming borrow from another word, returning the difference and the outgoing borrow.
///
/// # Examples
///
/// ```
/// use packed_varint::bits;
///
/// assert_eq!(bits::sub_with_borrow(0, 0, true), (!0u64, true));
/// assert_eq!(bits::sub_with_borrow(6, 3, true), (2, false));
/// ```
#[inline]
pub fn sub_with_borrow(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, b1) = a.overflowing_sub(b);
    let (diff, b2) = diff.overflowing_sub(borrow as u64);
    (diff, b1 | b2)
}

/// Multiplies two words, returning the high and the low words of the product.
///
/// # Examples
///
/// ```
/// use packed_varint::bits;
///
/// assert_eq!(bits::mul_wide(!0u64, 2), (1, !0u64 - 1));
/// ```
#[inline]
pub fn mul_wide(a: u64, b: u64) -> (u64, u64) {
    let product = (a as u128) * (b as u128);
    ((product >> WORD_BITS) as u64, product as u64)
}

/// Computes `acc + a * b + carry`, returning the high and the low words of the result.
///
/// The result always fits in two words.
///
/// # Examples
///
/// ```
/// use packed_varint::bits;
///
/// assert_eq!(bits::carrying_mul_add(!0u64, !0u64, !0u64, !0u64), (!0u64, !0u64));
/// ```
#[inline]
pub fn carrying_mul_add(acc: u64, a: u64, b: u64, carry: u64) -> (u64, u64) {
    let (high, low) = mul_wide(a, b);
    let (low, c1) = add_with_carry(low, acc, false);
    let (low, c2) = add_with_carry(low, carry, false);
    (high + (c1 as u64) + (c2 as u64), low)
}

//-----------------------------------------------------------------------------

/// Compares two little-endian multi-word values of the same length as unsigned integers.
///
/// # Examples
///
/// ```
/// use packed_varint::bits;
/// use std::cmp::Ordering;
///
/// assert_eq!(bits::cmp_words(&[5, 1], &[7, 0]), Ordering::Greater);
/// assert_eq!(bits::cmp_words(&[5, 1], &[5, 1]), Ordering::Equal);
/// ```
///
/// # Panics
///
/// May panic if `b` is shorter than `a`.
pub fn cmp_words(a: &[u64], b: &[u64]) -> Ordering {
    for i in (0..a.len()).rev() {
        match a[i].cmp(&b[i]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Shifts a little-endian `width`-bit value left by one bit and sets the lowest bit to `bit`.
///
/// Returns the bit shifted out of the value.
///
/// # Examples
///
/// ```
/// use packed_varint::bits;
///
/// let mut value = vec![0x8000_0000_0000_0001, 0b101];
/// assert!(bits::shl1_words(&mut value, 67, true));
/// assert_eq!(value, vec![0x0000_0000_0000_0003, 0b011]);
/// ```
///
/// # Panics
///
/// May panic if the slice is shorter than `bits_to_words(width)`.
pub fn shl1_words(words: &mut [u64], width: usize, bit: bool) -> bool {
    let len = bits_to_words(width);
    let mut carry = bit as u64;
    for word in words[..len].iter_mut() {
        let next = *word >> (WORD_BITS - 1);
        *word = (*word << 1) | carry;
        carry = next;
    }
    let top = word_width(width, len - 1);
    if top < WORD_BITS {
        carry = (words[len - 1] >> top) & 1;
        words[len - 1] &= low_set(top);
    }
    carry != 0
}

/// Subtracts a little-endian value from another of the same length in place, returning the final borrow.
///
/// # Examples
///
/// ```
/// use packed_varint::bits;
///
/// let mut value = vec![0, 1];
/// assert!(!bits::sub_words(&mut value, &[1, 0]));
/// assert_eq!(value, vec![!0u64, 0]);
/// ```
///
/// # Panics
///
/// May panic if `b` is shorter than `a`.
pub fn sub_words(a: &mut [u64], b: &[u64]) -> bool {
    let mut borrow = false;
    for (i, word) in a.iter_mut().enumerate() {
        let (diff, next) = sub_with_borrow(*word, b[i], borrow);
        *word = diff;
        borrow = next;
    }
    borrow
}

//-----------------------------------------------------------------------------


//-----------------------------------------------------------------------------
