use super::*;

use crate::serialize;

use rand::Rng;

use std::fs;

//-----------------------------------------------------------------------------

#[test]
fn construction() {
    let empty = Bits::default();
    assert_eq!(empty.bit_len(), 0, "Nonzero bit-length for a default value");
    assert!(empty.is_empty(), "Default value is not empty");
    assert!(empty.words().is_empty(), "Default value has words");

    let padded = Bits::new(130, &[1, 2]);
    assert_eq!(padded.words(), &[1, 2, 0], "Missing words were not filled with zeros");

    let masked = Bits::new(65, &[!0u64, !0u64, !0u64]);
    assert_eq!(masked.words(), &[!0u64, 1], "Extra bits were not discarded");

    let from_int = Bits::from_u64(11, 0x4C7);
    assert_eq!(from_int, Bits::new(11, &[0x4C7]), "Machine integer conversion failed");
    assert_ne!(from_int, Bits::new(12, &[0x4C7]), "Bit-length is not a part of the value");
}

#[test]
fn machine_integers() {
    assert_eq!(Bits::from_u64(64, !0u64).to_u64().unwrap(), !0u64, "Invalid 64-bit value");
    assert_eq!(Bits::default().to_u64().unwrap(), 0, "Invalid value for an empty value");
    let wide = Bits::new(67, &[0x8049_1626_73FA_196E, 0x7]);
    assert!(matches!(wide.to_u64(), Err(Error::UintOverflow { bit_len: 67 })), "Converted a 67-bit value to a machine integer");
    let small_but_wide = Bits::from_u64(65, 3);
    assert!(matches!(small_but_wide.to_u64(), Err(Error::UintOverflow { bit_len: 65 })), "The conversion depends on the value instead of the bit-length");
}

#[test]
fn big_integers() {
    let mut rng = rand::thread_rng();
    for bit_len in [1, 63, 64, 65, 128, 129, 191].iter().cloned() {
        let value = Bits::random_with(bit_len, &mut rng);
        let big = value.to_biguint();
        assert!(big.bits() as usize <= bit_len, "Big integer is too long for bit-length {}", bit_len);
        let copy = Bits::from_biguint(bit_len, &big).unwrap();
        assert_eq!(copy, value, "Big integer conversion changed the value for bit-length {}", bit_len);
    }

    let too_large = BigUint::from(1u32) << 70u32;
    assert!(
        matches!(Bits::from_biguint(70, &too_large), Err(Error::BitLengthMismatch { expected: 70, got: 71 })),
        "Accepted a 71-bit big integer as a 70-bit value"
    );
}

#[test]
fn random_values() {
    for bit_len in [1, 13, 64, 100].iter().cloned() {
        let value = Bits::random(bit_len);
        assert_eq!(value.bit_len(), bit_len, "Invalid bit-length for a random value");
        assert_eq!(value.words().len(), bits::bits_to_words(bit_len), "Invalid number of words for a random value");
        let top = bits::word_width(bit_len, value.words().len() - 1);
        assert_eq!(value.words()[value.words().len() - 1] & !bits::low_set(top), 0, "Unused bits are set in a random {}-bit value", bit_len);
    }
}

//-----------------------------------------------------------------------------

#[test]
fn render_and_parse() {
    let value = Bits::new(100, &[0x0123_4567_89AB_CDEF, 0xF]);
    let expected = value.to_biguint();
    for base in MIN_BASE..=MAX_BASE {
        let s = value.to_str_radix(base).unwrap();
        let parsed = Bits::from_str_radix(100, &s, base).unwrap();
        assert_eq!(parsed, value, "Rendering and parsing changed the value in base {}", base);
        if base <= 36 {
            assert_eq!(s, expected.to_str_radix(base).to_uppercase(), "Invalid rendering in base {}", base);
        }
    }

    assert_eq!(Bits::from_u64(8, 255).to_str_radix(16).unwrap(), "FF", "Invalid hexadecimal rendering");
    assert_eq!(Bits::from_u64(8, 36).to_str_radix(62).unwrap(), "a", "Invalid base-62 rendering");
    assert_eq!(Bits::zero(8).to_str_radix(10).unwrap(), "", "An empty value was not rendered as an empty string");
    assert_eq!(format!("{}", Bits::new(70, &[0, 1])), "18446744073709551616", "Invalid decimal display");
}

#[test]
fn parse_errors() {
    assert!(matches!(Bits::from_str_radix(8, "12", 1), Err(Error::InvalidBase(1))), "Accepted base 1");
    assert!(matches!(Bits::from_str_radix(8, "12", 63), Err(Error::InvalidBase(63))), "Accepted base 63");
    assert!(matches!(Bits::zero(8).to_str_radix(63), Err(Error::InvalidBase(63))), "Rendered in base 63");

    match Bits::from_str_radix(8, "1G", 16) {
        Err(Error::NotANumber { s, base }) => {
            assert_eq!(s, "1G", "Invalid string in the error");
            assert_eq!(base, 16, "Invalid base in the error");
        },
        other => panic!("Expected NotANumber, got {:?}", other),
    }
    assert!(matches!(Bits::from_str_radix(8, "1 2", 10), Err(Error::NotANumber { .. })), "Accepted a space");
    assert!(matches!(Bits::from_str_radix(8, "256", 10), Err(Error::BitLengthMismatch { expected: 8, got: 9 })), "Accepted a 9-bit value");

    assert_eq!(Bits::from_str_radix(8, "1_000", 2).unwrap().to_u64().unwrap(), 8, "Separators were not ignored");
    assert_eq!(Bits::from_str_radix(8, "", 10).unwrap(), Bits::zero(8), "An empty string was not parsed as zero");
    assert_eq!(Bits::from_str_radix(8, "aB", 16).unwrap().to_u64().unwrap(), 0xAB, "Parsing is not case-insensitive in base 16");
    assert_eq!(Bits::from_str_radix(16, "a", 62).unwrap().to_u64().unwrap(), 36, "Lower case letters have invalid values in base 62");
}

//-----------------------------------------------------------------------------

#[test]
fn ordering() {
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let a = Bits::random_with(130, &mut rng);
        let b = Bits::random_with(130, &mut rng);
        assert_eq!(a.cmp(&b), a.to_biguint().cmp(&b.to_biguint()), "Ordering is not numeric for {} and {}", a, b);
        assert_eq!(a.cmp(&a), Ordering::Equal, "A value is not equal to itself");
    }

    let short = Bits::from_u64(8, 255);
    let long = Bits::from_u64(9, 0);
    assert!(short < long, "A shorter value is not smaller than a longer one");

    let high = Bits::new(128, &[0, 1]);
    let low = Bits::new(128, &[!0u64, 0]);
    assert!(low < high, "The most significant word does not dominate");
}

#[test]
fn serialize_bits() {
    let mut rng = rand::thread_rng();
    let filename = serialize::temp_file_name("bits");
    for bit_len in [0, 1, 64, 67, 200].iter().cloned() {
        let original = Bits::random_with(bit_len, &mut rng);
        assert_eq!(original.size_in_bytes(), 8 * (1 + bits::bits_to_words(bit_len)), "Invalid serialized size for bit-length {}", bit_len);
        serialize::serialize_to(&original, &filename).unwrap();
        let copy: Bits = serialize::load_from(&filename).unwrap();
        assert_eq!(copy, original, "Serialization changed a {}-bit value", bit_len);
    }
    fs::remove_file(&filename).unwrap();

    let mut bytes = Vec::new();
    bytes.extend_from_slice(&4u64.to_be_bytes());
    bytes.extend_from_slice(&0x10u64.to_be_bytes());
    let result = Bits::load(&mut bytes.as_slice());
    assert!(matches!(result, Err(Error::NotDecodable)), "Loaded a value with unused bits set");

    let value: u64 = rng.gen();
    let truncated = value.to_be_bytes();
    let result = Bits::load(&mut &truncated[..4]);
    assert!(matches!(result, Err(Error::Io(_))), "Loaded a value from a truncated stream");
}

#[test]
fn load_malformed() {
    let huge = u64::MAX.to_be_bytes();
    let result = Bits::load(&mut huge.as_slice());
    assert!(matches!(result, Err(Error::NotDecodable)), "Loaded a value with an overflowing bit-length");

    // Claims 2^40 bits but provides two words.
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&(1u64 << 40).to_be_bytes());
    bytes.extend_from_slice(&1u64.to_be_bytes());
    bytes.extend_from_slice(&2u64.to_be_bytes());
    let result = Bits::load(&mut bytes.as_slice());
    assert!(matches!(result, Err(Error::NotDecodable)), "Loaded a value with missing words");

    let mut partial = Vec::new();
    partial.extend_from_slice(&100u64.to_be_bytes());
    partial.extend_from_slice(&1u64.to_be_bytes());
    partial.extend_from_slice(&[0u8; 5]);
    let result = Bits::load(&mut partial.as_slice());
    assert!(matches!(result, Err(Error::NotDecodable)), "Loaded a value with a partial word");
}

//-----------------------------------------------------------------------------
