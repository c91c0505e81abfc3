// Utility functions for tests and benchmarks.

use crate::bits;
use crate::ops::Element;
use crate::value::Bits;
use crate::var_int::VarInt;

use rand::Rng;

//-----------------------------------------------------------------------------

// Returns `len` random `width`-bit values.
pub fn random_values(width: usize, len: usize) -> Vec<Bits> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| Bits::random_with(width, &mut rng)).collect()
}

// Returns a random nonzero `width`-bit value.
pub fn random_nonzero(width: usize) -> Bits {
    let mut rng = rand::thread_rng();
    loop {
        let value = Bits::random_with(width, &mut rng);
        if !value.is_empty() {
            return value;
        }
    }
}

// Returns a random value with at most `bit_len` significant bits, stored as a `width`-bit value.
pub fn random_short(width: usize, bit_len: usize) -> Bits {
    let mut rng = rand::thread_rng();
    let value = Bits::random_with(bit_len.min(width), &mut rng);
    Bits::new(width, value.words())
}

// Returns an array initialized with random values and the values.
pub fn random_var_int(width: usize, len: usize) -> (VarInt, Vec<Bits>) {
    let values = random_values(width, len);
    let mut v = VarInt::new(width, len).unwrap();
    for (index, value) in values.iter().enumerate() {
        v.set(index, value).unwrap();
    }
    (v, values)
}

// Returns a random index in the array.
pub fn random_index(v: &VarInt) -> usize {
    let mut rng = rand::thread_rng();
    rng.gen_range(0, v.len())
}

//-----------------------------------------------------------------------------

// Check that the array contains the expected values and that the unused payload bits are clear.
pub fn check_values(v: &VarInt, truth: &[Bits], name: &str) {
    assert_eq!(v.len(), truth.len(), "[{}]: Invalid length", name);
    for (index, expected) in truth.iter().enumerate() {
        assert_eq!(v.get(index).unwrap(), *expected, "[{}]: Invalid value {}", name, index);
    }
    check_padding(v, name);
}

// Check that all elements except `index` have their expected values.
pub fn check_neighbours(v: &VarInt, truth: &[Bits], index: usize, name: &str) {
    for (i, expected) in truth.iter().enumerate() {
        if i != index {
            assert_eq!(v.get(i).unwrap(), *expected, "[{}]: Neighbour {} of {} changed", name, i, index);
        }
    }
    check_padding(v, name);
}

// Check that the header, the unused payload bits, and the scratch marker have their expected values.
pub fn check_padding(v: &VarInt, name: &str) {
    let words = v.raw_words();
    assert_eq!(words[0], v.len() as u64, "[{}]: Invalid length in the header", name);
    assert_eq!(words[1], v.width() as u64, "[{}]: Invalid width in the header", name);
    let payload = v.payload();
    let used = (v.width() * v.len()) % bits::WORD_BITS;
    if used > 0 {
        let last = payload[payload.len() - 1];
        assert_eq!(last & bits::low_set(bits::WORD_BITS - used), 0, "[{}]: Unused payload bits are set", name);
    }
    assert_eq!(words[2 + payload.len()], v.width() as u64, "[{}]: Invalid scratch marker", name);
}

//-----------------------------------------------------------------------------
