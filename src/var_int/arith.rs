//! In-place arithmetic on the elements of a packed array.

use super::VarInt;

use crate::bits::{self, WORD_BITS};
use crate::error::{Error, Result};
use crate::ops::Element;
use crate::value::Bits;

use std::cmp::Ordering;

//-----------------------------------------------------------------------------

impl VarInt {
    /// Adds `value` to element `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()` and [`Error::BitLengthMismatch`] if the bit-length of `value` is not `self.width()`.
    /// Returns [`Error::AdditionOverflow`] if the sum does not fit in `self.width()` bits.
    /// The element then holds the sum modulo `2^width`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::{Bits, Error, VarInt};
    ///
    /// let mut v = VarInt::new(6, 1).unwrap();
    /// v.add(0, &Bits::from_u64(6, 0x3F)).unwrap();
    /// assert_eq!(v.at_u64(0).unwrap(), 0x3F);
    /// let result = v.add(0, &Bits::from_u64(6, 0x01));
    /// assert!(matches!(result, Err(Error::AdditionOverflow { bit_len: 6 })));
    /// assert_eq!(v.at_u64(0).unwrap(), 0);
    /// ```
    pub fn add(&mut self, index: usize, value: &Bits) -> Result<()> {
        let span = self.operand_span(index, value)?;
        let width = self.width();
        let mut carry = false;
        for n in 0..span.words() {
            let (sum, next) = bits::add_with_carry(span.read(&self.data, n), value.words()[n], carry);
            span.write(&mut self.data, n, sum);
            let word_width = bits::word_width(width, n);
            carry = if word_width < WORD_BITS { sum >> word_width != 0 } else { next };
        }
        if carry {
            return Err(Error::AdditionOverflow { bit_len: width });
        }
        Ok(())
    }

    /// Subtracts `value` from element `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()` and [`Error::BitLengthMismatch`] if the bit-length of `value` is not `self.width()`.
    /// Returns [`Error::SubtractionUnderflow`] if `value` is greater than the element.
    /// The element then holds the difference modulo `2^width`.
    pub fn sub(&mut self, index: usize, value: &Bits) -> Result<()> {
        let span = self.operand_span(index, value)?;
        let mut borrow = false;
        for n in 0..span.words() {
            let (diff, next) = bits::sub_with_borrow(span.read(&self.data, n), value.words()[n], borrow);
            span.write(&mut self.data, n, diff);
            borrow = next;
        }
        if borrow {
            return Err(Error::SubtractionUnderflow { bit_len: self.width() });
        }
        Ok(())
    }

    /// Multiplies element `index` by `value`.
    ///
    /// The product is accumulated in the scratch slot and then written to the element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()` and [`Error::BitLengthMismatch`] if the bit-length of `value` is not `self.width()`.
    /// Returns [`Error::MultiplicationOverflow`] if the product does not fit in `self.width()` bits.
    /// The element then holds the product modulo `2^width`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::{Bits, VarInt};
    ///
    /// let mut v = VarInt::new(100, 3).unwrap();
    /// v.set(1, &Bits::new(100, &[u64::MAX])).unwrap();
    /// v.mul(1, &Bits::from_u64(100, 1 << 20)).unwrap();
    /// assert_eq!(v.get(1).unwrap().words(), &[u64::MAX << 20, (1 << 20) - 1]);
    /// assert!(v.mul(1, &Bits::from_u64(100, 1 << 20)).is_err());
    /// ```
    pub fn mul(&mut self, index: usize, value: &Bits) -> Result<()> {
        let span = self.operand_span(index, value)?;
        let width = self.width();
        let words = span.words();
        let (head, scratch) = self.split_scratch();
        clear_words(scratch);

        let mut overflow = false;
        for (i, &multiplier) in value.words().iter().enumerate() {
            if multiplier == 0 {
                continue;
            }
            let mut carry = 0;
            for j in 0..words - i {
                let (high, low) = bits::carrying_mul_add(scratch[i + j], span.read(head, j), multiplier, carry);
                scratch[i + j] = low;
                carry = high;
            }
            if carry != 0 {
                overflow = true;
            }
            // Partial products from the remaining words land beyond the top word.
            for j in words - i..words {
                if span.read(head, j) != 0 {
                    overflow = true;
                }
            }
        }
        let top = bits::word_width(width, words - 1);
        if top < WORD_BITS && scratch[words - 1] >> top != 0 {
            overflow = true;
            scratch[words - 1] &= bits::low_set(top);
        }

        span.overwrite(head, scratch);
        if overflow {
            return Err(Error::MultiplicationOverflow { bit_len: width });
        }
        Ok(())
    }

    /// Divides element `index` by `value`, leaving the remainder in the scratch slot.
    ///
    /// Uses restoring binary division with the scratch slot as the running remainder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()` and [`Error::BitLengthMismatch`] if the bit-length of `value` is not `self.width()`.
    /// Returns [`Error::DivisionByZero`] if `value` is `0`.
    /// The element is not modified in any of these cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::{Bits, VarInt};
    /// use num_bigint::BigUint;
    ///
    /// let mut v = VarInt::new(70, 2).unwrap();
    /// v.set_u64(0, 1000).unwrap();
    /// v.div(0, &Bits::from_u64(70, 7)).unwrap();
    /// assert!(v.at_u64(0).is_err());
    /// assert_eq!(v.get(0).unwrap().to_biguint(), BigUint::from(142u32));
    /// assert_eq!(v.scratch().to_biguint(), BigUint::from(6u32));
    /// assert!(v.div(0, &Bits::zero(70)).is_err());
    /// ```
    pub fn div(&mut self, index: usize, value: &Bits) -> Result<()> {
        let span = self.operand_span(index, value)?;
        if value.is_empty() {
            return Err(Error::DivisionByZero);
        }
        let width = self.width();
        let (head, scratch) = self.split_scratch();

        match span.cmp(head, value.words()) {
            Ordering::Less => {
                span.extract(head, scratch);
                span.clear(head);
            },
            Ordering::Equal => {
                clear_words(scratch);
                span.clear(head);
                span.write(head, 0, 1);
            },
            Ordering::Greater => {
                clear_words(scratch);
                let last = scratch.len() - 1;
                let top = bits::word_width(width, last);
                for _ in 0..width {
                    let bit = span.top_bit(head);
                    span.shift_left(head, 1);
                    let carry = bits::shl1_words(scratch, width, bit);
                    if carry || bits::cmp_words(scratch, value.words()) != Ordering::Less {
                        bits::sub_words(scratch, value.words());
                        scratch[last] &= bits::low_set(top);
                        let low = span.read(head, 0);
                        span.write(head, 0, low | 1);
                    }
                }
            },
        }
        Ok(())
    }

    /// Replaces element `index` with its remainder modulo `value`, leaving the quotient in the scratch slot.
    ///
    /// # Errors
    ///
    /// Same as [`VarInt::div`].
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::{Bits, VarInt};
    ///
    /// let mut v = VarInt::new(12, 4).unwrap();
    /// v.set_u64(2, 1000).unwrap();
    /// v.rem(2, &Bits::from_u64(12, 7)).unwrap();
    /// assert_eq!(v.at_u64(2).unwrap(), 6);
    /// assert_eq!(v.scratch().to_u64().unwrap(), 142);
    /// ```
    pub fn rem(&mut self, index: usize, value: &Bits) -> Result<()> {
        self.div(index, value)?;
        let span = self.span(index)?;
        let (head, scratch) = self.split_scratch();
        span.swap(head, scratch);
        Ok(())
    }

    /// Divides element `index` by `value` and returns the remainder.
    ///
    /// # Errors
    ///
    /// Same as [`VarInt::div`].
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_varint::{Bits, VarInt};
    ///
    /// let mut v = VarInt::new(9, 2).unwrap();
    /// v.set_u64(1, 300).unwrap();
    /// let remainder = v.div_rem(1, &Bits::from_u64(9, 300)).unwrap();
    /// assert_eq!(v.at_u64(1).unwrap(), 1);
    /// assert!(remainder.is_empty());
    /// ```
    pub fn div_rem(&mut self, index: usize, value: &Bits) -> Result<Bits> {
        self.div(index, value)?;
        Ok(self.scratch())
    }
}

//-----------------------------------------------------------------------------

fn clear_words(words: &mut [u64]) {
    for word in words.iter_mut() {
        *word = 0;
    }
}

//-----------------------------------------------------------------------------
