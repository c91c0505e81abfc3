//! Bitwise operations and shifts on the elements of a packed array.
//!
//! These operations never fail on valid indexes and operands.

use super::VarInt;

use crate::error::Result;
use crate::value::Bits;

//-----------------------------------------------------------------------------

impl VarInt {
    /// Replaces element `index` with its bitwise complement within `self.width()` bits.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexOutOfRange`] if `index >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::VarInt;
    ///
    /// let mut v = VarInt::new(7, 3).unwrap();
    /// v.set_u64(1, 0b101_0011).unwrap();
    /// v.not(1).unwrap();
    /// assert_eq!(v.at_u64(1).unwrap(), 0b010_1100);
    /// assert_eq!(v.at_u64(0).unwrap(), 0);
    /// assert_eq!(v.at_u64(2).unwrap(), 0);
    /// ```
    pub fn not(&mut self, index: usize) -> Result<()> {
        let span = self.span(index)?;
        for n in 0..span.words() {
            let word = span.read(&self.data, n);
            span.write(&mut self.data, n, !word);
        }
        Ok(())
    }

    /// Replaces element `index` with its bitwise and with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexOutOfRange`] if `index >= self.len()` and [`crate::Error::BitLengthMismatch`] if the bit-length of `value` is not `self.width()`.
    pub fn and(&mut self, index: usize, value: &Bits) -> Result<()> {
        self.combine(index, value, |a, b| a & b)
    }

    /// Replaces element `index` with its bitwise or with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexOutOfRange`] if `index >= self.len()` and [`crate::Error::BitLengthMismatch`] if the bit-length of `value` is not `self.width()`.
    pub fn or(&mut self, index: usize, value: &Bits) -> Result<()> {
        self.combine(index, value, |a, b| a | b)
    }

    /// Replaces element `index` with its bitwise exclusive or with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexOutOfRange`] if `index >= self.len()` and [`crate::Error::BitLengthMismatch`] if the bit-length of `value` is not `self.width()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::{Bits, VarInt};
    ///
    /// let mut v = VarInt::new(65, 2).unwrap();
    /// let value = Bits::new(65, &[0xF0F0, 1]);
    /// v.set(0, &value).unwrap();
    /// v.xor(0, &value).unwrap();
    /// assert!(v.get(0).unwrap().is_empty());
    /// ```
    pub fn xor(&mut self, index: usize, value: &Bits) -> Result<()> {
        self.combine(index, value, |a, b| a ^ b)
    }

    fn combine<F: Fn(u64, u64) -> u64>(&mut self, index: usize, value: &Bits, op: F) -> Result<()> {
        let span = self.operand_span(index, value)?;
        for n in 0..span.words() {
            let word = span.read(&self.data, n);
            span.write(&mut self.data, n, op(word, value.words()[n]));
        }
        Ok(())
    }

    /// Shifts element `index` left by `shift` bits.
    ///
    /// Bits shifted past the most significant bit are discarded, and a shift of `self.width()` or more bits sets the element to `0`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexOutOfRange`] if `index >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::VarInt;
    ///
    /// let mut v = VarInt::new(10, 2).unwrap();
    /// v.set_u64(0, 0b11_0000_0001).unwrap();
    /// v.lsh(0, 3).unwrap();
    /// assert_eq!(v.at_u64(0).unwrap(), 0b00_0000_1000);
    /// v.lsh(0, 10).unwrap();
    /// assert_eq!(v.at_u64(0).unwrap(), 0);
    /// ```
    pub fn lsh(&mut self, index: usize, shift: usize) -> Result<()> {
        let span = self.span(index)?;
        span.shift_left(&mut self.data, shift);
        Ok(())
    }

    /// Shifts element `index` right by `shift` bits.
    ///
    /// Bits shifted past the least significant bit are discarded, and a shift of `self.width()` or more bits sets the element to `0`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexOutOfRange`] if `index >= self.len()`.
    pub fn rsh(&mut self, index: usize, shift: usize) -> Result<()> {
        let span = self.span(index)?;
        span.shift_right(&mut self.data, shift);
        Ok(())
    }
}

//-----------------------------------------------------------------------------
