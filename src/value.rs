//! An owned unsigned integer with an explicit bit-length.
//!
//! [`Bits`] is the operand and result type of [`crate::VarInt`] operations.
//! The bit-length is part of the value: two values with the same numeric value but different bit-lengths are different.

use crate::bits;
use crate::error::{Error, Result};
use crate::serialize::{self, Serialize};

use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand::RngCore;

use std::cmp::Ordering;
use std::{fmt, io};

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

// Digits of the supported bases in increasing order of value.
const DIGITS: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

// Separator accepted and ignored when parsing.
const SEPARATOR: char = '_';

/// Smallest supported base for string conversions.
pub const MIN_BASE: u32 = 2;

/// Largest supported base for string conversions.
pub const MAX_BASE: u32 = 62;

//-----------------------------------------------------------------------------

/// An unsigned integer of `bit_len` bits stored in little-endian `u64` words.
///
/// The value uses exactly `bits_to_words(bit_len)` words and the unused high bits of the last word are always `0`.
/// Values are ordered by bit-length first and then numerically.
///
/// # Examples
///
/// ```
/// use packed_varint::Bits;
///
/// let value = Bits::new(67, &[0x8049_1626_73FA_196E, 0x7]);
/// assert_eq!(value.bit_len(), 67);
/// assert_eq!(value.words(), &[0x8049_1626_73FA_196E, 0x7]);
/// assert!(value.to_u64().is_err());
///
/// let small = Bits::from_u64(8, 200);
/// assert_eq!(small.to_u64().unwrap(), 200);
/// assert_eq!(small.to_str_radix(16).unwrap(), "C8");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bits {
    bit_len: usize,
    data: Vec<u64>,
}

impl Bits {
    /// Creates a value of `bit_len` bits from little-endian words.
    ///
    /// Missing words are filled with `0`.
    /// Extra words and bits beyond `bit_len` are discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::Bits;
    ///
    /// let value = Bits::new(70, &[1]);
    /// assert_eq!(value.words(), &[1, 0]);
    /// let truncated = Bits::new(4, &[0xFF, 0xFF]);
    /// assert_eq!(truncated.words(), &[0xF]);
    /// ```
    pub fn new(bit_len: usize, words: &[u64]) -> Bits {
        let mut data = vec![0u64; bits::bits_to_words(bit_len)];
        let count = data.len().min(words.len());
        data[..count].copy_from_slice(&words[..count]);
        Self::clear_unused_bits(&mut data, bit_len);
        Bits {
            bit_len: bit_len,
            data: data,
        }
    }

    /// Creates a value of `bit_len` bits set to `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::Bits;
    ///
    /// let zero = Bits::zero(130);
    /// assert_eq!(zero.bit_len(), 130);
    /// assert!(zero.is_empty());
    /// ```
    pub fn zero(bit_len: usize) -> Bits {
        Bits {
            bit_len: bit_len,
            data: vec![0u64; bits::bits_to_words(bit_len)],
        }
    }

    /// Creates a value of `bit_len` bits from a machine integer, truncating it to `bit_len` bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::Bits;
    ///
    /// assert_eq!(Bits::from_u64(6, 0x3F).to_u64().unwrap(), 0x3F);
    /// assert_eq!(Bits::from_u64(6, 0x40).to_u64().unwrap(), 0);
    /// ```
    pub fn from_u64(bit_len: usize, value: u64) -> Bits {
        Self::new(bit_len, &[value])
    }

    /// Creates a value of `bit_len` bits from a big integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BitLengthMismatch`] if the integer needs more than `bit_len` bits.
    pub fn from_biguint(bit_len: usize, value: &BigUint) -> Result<Bits> {
        let needed = value.bits() as usize;
        if needed > bit_len {
            return Err(Error::BitLengthMismatch { expected: bit_len, got: needed });
        }
        Ok(Self::new(bit_len, &value.to_u64_digits()))
    }

    /// Parses a value of `bit_len` bits from a string of digits in the given base.
    ///
    /// Digits are `0-9`, `A-Z`, and `a-z` with values from 0 to 61, and `_` may be used as a separator.
    /// For bases up to 36, lower case letters have the same values as upper case letters.
    /// An empty string or a string of separators is parsed as `0`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBase`] if `base` is not in `2..=62`, [`Error::NotANumber`] if a character is not a digit in the base, and [`Error::BitLengthMismatch`] if the value needs more than `bit_len` bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::Bits;
    ///
    /// let value = Bits::from_str_radix(16, "ff_ff", 16).unwrap();
    /// assert_eq!(value.to_u64().unwrap(), 0xFFFF);
    /// assert!(Bits::from_str_radix(16, "12", 2).is_err());
    /// ```
    pub fn from_str_radix(bit_len: usize, s: &str, base: u32) -> Result<Bits> {
        if base < MIN_BASE || base > MAX_BASE {
            return Err(Error::InvalidBase(base));
        }
        let mut digits: Vec<u8> = Vec::with_capacity(s.len());
        for c in s.chars() {
            if c == SEPARATOR {
                continue;
            }
            match Self::digit_value(c, base) {
                Some(value) => digits.push(value),
                None => return Err(Error::NotANumber { s: s.to_string(), base: base }),
            }
        }
        if digits.is_empty() {
            return Ok(Self::zero(bit_len));
        }
        let value = BigUint::from_radix_be(&digits, base).ok_or_else(|| Error::NotANumber { s: s.to_string(), base: base })?;
        Self::from_biguint(bit_len, &value)
    }

    /// Creates a value of `bit_len` random bits using the operating system's random number generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::Bits;
    ///
    /// let value = Bits::random(100);
    /// assert_eq!(value.bit_len(), 100);
    /// assert_eq!(value.words()[1] >> 36, 0);
    /// ```
    pub fn random(bit_len: usize) -> Bits {
        Self::random_with(bit_len, &mut OsRng)
    }

    /// Creates a value of `bit_len` random bits using the given random number generator.
    pub fn random_with<R: RngCore + ?Sized>(bit_len: usize, rng: &mut R) -> Bits {
        let mut data: Vec<u64> = (0..bits::bits_to_words(bit_len)).map(|_| rng.next_u64()).collect();
        Self::clear_unused_bits(&mut data, bit_len);
        Bits {
            bit_len: bit_len,
            data: data,
        }
    }

    // Clear the bits beyond `bit_len` in the last word.
    fn clear_unused_bits(data: &mut [u64], bit_len: usize) {
        let len = data.len();
        if let Some(last) = data.last_mut() {
            *last &= bits::low_set(bits::word_width(bit_len, len - 1));
        }
    }

    fn digit_value(c: char, base: u32) -> Option<u8> {
        let value = match c {
            '0'..='9' => c as u32 - '0' as u32,
            'A'..='Z' => c as u32 - 'A' as u32 + 10,
            'a'..='z' if base <= 36 => c as u32 - 'a' as u32 + 10,
            'a'..='z' => c as u32 - 'a' as u32 + 36,
            _ => return None,
        };
        if value < base { Some(value as u8) } else { None }
    }
}

//-----------------------------------------------------------------------------

impl Bits {
    /// Returns the bit-length of the value.
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Returns `true` if the bit-length is `0` or all bits are `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::Bits;
    ///
    /// assert!(Bits::default().is_empty());
    /// assert!(Bits::zero(10).is_empty());
    /// assert!(!Bits::from_u64(10, 1).is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&word| word == 0)
    }

    /// Returns the words of the value, least significant first.
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.data
    }

    // Mutable access for codec outputs. Callers keep the unused bits clear.
    #[inline]
    pub(crate) fn words_mut(&mut self) -> &mut [u64] {
        &mut self.data
    }

    /// Returns the value as a machine integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UintOverflow`] if the bit-length is greater than 64, even if the value itself would fit.
    pub fn to_u64(&self) -> Result<u64> {
        if self.bit_len > bits::WORD_BITS {
            return Err(Error::UintOverflow { bit_len: self.bit_len });
        }
        Ok(self.data.first().copied().unwrap_or(0))
    }

    /// Returns the value as a big integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::Bits;
    /// use num_bigint::BigUint;
    ///
    /// let value = Bits::new(100, &[5, 1]);
    /// assert_eq!(value.to_biguint(), (BigUint::from(1u32) << 64u32) + 5u32);
    /// ```
    pub fn to_biguint(&self) -> BigUint {
        let mut digits: Vec<u32> = Vec::with_capacity(2 * self.data.len());
        for word in self.data.iter() {
            digits.push(*word as u32);
            digits.push((*word >> 32) as u32);
        }
        BigUint::new(digits)
    }

    /// Renders the value as a string of digits in the given base, most significant digit first.
    ///
    /// Uses the digits `0-9`, `A-Z`, and `a-z`.
    /// An empty value (see [`Bits::is_empty`]) is rendered as an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBase`] if `base` is not in `2..=62`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::Bits;
    ///
    /// let value = Bits::from_u64(16, 61 * 62 + 10);
    /// assert_eq!(value.to_str_radix(62).unwrap(), "zA");
    /// assert_eq!(Bits::zero(16).to_str_radix(10).unwrap(), "");
    /// ```
    pub fn to_str_radix(&self, base: u32) -> Result<String> {
        if base < MIN_BASE || base > MAX_BASE {
            return Err(Error::InvalidBase(base));
        }
        if self.is_empty() {
            return Ok(String::new());
        }
        let digits = self.to_biguint().to_radix_be(base);
        Ok(digits.iter().map(|&digit| DIGITS[digit as usize] as char).collect())
    }
}

//-----------------------------------------------------------------------------

impl PartialOrd for Bits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bits {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.bit_len.cmp(&other.bit_len) {
            Ordering::Equal => bits::cmp_words(&self.data, &other.data),
            ordering => ordering,
        }
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

impl From<&Bits> for BigUint {
    fn from(value: &Bits) -> Self {
        value.to_biguint()
    }
}

//-----------------------------------------------------------------------------

impl Serialize for Bits {
    fn serialize_header<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        writer.write_all(&(self.bit_len as u64).to_be_bytes())?;
        Ok(())
    }

    fn serialize_data<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        for word in self.data.iter() {
            writer.write_all(&word.to_be_bytes())?;
        }
        Ok(())
    }

    fn load<T: io::Read>(reader: &mut T) -> Result<Self> {
        let bit_len = serialize::read_word(reader)? as usize;
        let words = bits::checked_bits_to_words(bit_len).ok_or(Error::NotDecodable)?;
        // Capacity is bounded by the input read so far, not by the header.
        let mut data: Vec<u64> = Vec::with_capacity(words.min(serialize::CHUNK_WORDS));
        for _ in 0..words {
            match serialize::read_word(reader) {
                Ok(word) => data.push(word),
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => return Err(Error::NotDecodable),
                Err(err) => return Err(Error::Io(err)),
            }
        }
        let len = data.len();
        if len > 0 && data[len - 1] & !bits::low_set(bits::word_width(bit_len, len - 1)) != 0 {
            return Err(Error::NotDecodable);
        }
        Ok(Bits {
            bit_len: bit_len,
            data: data,
        })
    }

    fn size_in_bytes(&self) -> usize {
        8 * (1 + self.data.len())
    }
}

//-----------------------------------------------------------------------------
