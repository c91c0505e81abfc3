//! Errors reported by packed integer arrays and their operands.

use thiserror::Error;

use std::io;

//-----------------------------------------------------------------------------

/// Errors from [`crate::VarInt`] and [`crate::Bits`] operations.
///
/// Precondition failures (invalid parameters, indexes, or operand bit-lengths) are reported before anything is modified.
/// Range errors from addition, subtraction, and multiplication are reported after the operation, with the element holding the result truncated to its bit-length.
#[derive(Debug, Error)]
pub enum Error {
    /// The bit-length of an array element must be positive.
    #[error("bit length must be positive, got {0}")]
    BitLengthNotPositive(usize),

    /// The number of elements in an array must be positive.
    #[error("length must be positive, got {0}")]
    LengthNotPositive(usize),

    /// The array is too large to be addressed or allocated.
    #[error("{len} elements of {bit_len} bits exceed the addressable capacity")]
    CapacityOverflow { bit_len: usize, len: usize },

    /// Element index past the end of the array.
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The operand does not have the bit-length of the array elements.
    #[error("bit length mismatch: expected {expected}, got {got}")]
    BitLengthMismatch { expected: usize, got: usize },

    /// The value does not fit in a machine word.
    #[error("{bit_len}-bit value does not fit in a machine word")]
    UintOverflow { bit_len: usize },

    /// The sum did not fit in the bit-length.
    #[error("addition overflow with {bit_len}-bit values")]
    AdditionOverflow { bit_len: usize },

    /// The subtrahend was larger than the minuend.
    #[error("subtraction underflow with {bit_len}-bit values")]
    SubtractionUnderflow { bit_len: usize },

    /// The product did not fit in the bit-length.
    #[error("multiplication overflow with {bit_len}-bit values")]
    MultiplicationOverflow { bit_len: usize },

    #[error("division by zero")]
    DivisionByZero,

    /// The string contains a character that is not a digit in the base.
    #[error("{s:?} is not a number in base {base}")]
    NotANumber { s: String, base: u32 },

    /// Supported bases are from 2 to 62.
    #[error("base must be in the range 2..=62, got {0}")]
    InvalidBase(u32),

    /// The serialized data does not describe a valid array.
    #[error("data is not decodable as a packed array")]
    NotDecodable,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type for operations that may fail with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

//-----------------------------------------------------------------------------
