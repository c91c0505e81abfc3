//! # Packed arrays of arbitrary-width unsigned integers
//!
//! A [`VarInt`] stores `len` unsigned integers of exactly `width` bits each in a single buffer of `u64` words, without any per-element overhead.
//! The width can be any positive number of bits, so an element may span one, two, or three words of the buffer.
//! Elements can be read, written, compared, and sorted, and modified in place with multi-precision arithmetic and bitwise operations.
//! Operands and results are [`Bits`] values of the same width.
//!
//! Arithmetic uses a scratch slot stored at the end of the buffer, so the operations do not allocate.
//! The buffer serializes as big-endian words and the serialized form is self-describing.
//!
//! # Examples
//!
//! ```
//! use packed_varint::{Bits, VarInt};
//! use packed_varint::ops::Sortable;
//!
//! let mut v = VarInt::new(100, 3).unwrap();
//! let value = Bits::from_str_radix(100, "1_000_000_000_000_000_000_000", 10).unwrap();
//! v.set(0, &value).unwrap();
//! v.set_u64(1, 42).unwrap();
//! v.mul(1, &value).unwrap();
//! assert_eq!(v.get(1).unwrap().to_string(), "42000000000000000000000");
//!
//! v.sort();
//! assert!(v.get(0).unwrap().is_empty());
//! assert_eq!(v.get(1).unwrap(), value);
//! ```
//!
//! # Notes
//!
//! * Things may not work if `usize` is not 64-bit.
//! * Concurrent modification of the same array is not supported. Separate arrays are independent.

pub mod bits;
pub mod error;
pub mod ops;
pub mod serialize;
pub mod value;
pub mod var_int;

#[cfg(any(test, feature = "bench"))]
#[doc(hidden)]
pub mod internal;

pub use error::{Error, Result};
pub use value::Bits;
pub use var_int::VarInt;
