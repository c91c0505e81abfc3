use super::*;

use rand::Rng;

use std::io::Read;

//-----------------------------------------------------------------------------

fn random_words(len: usize) -> Vec<u64> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen()).collect()
}

fn expected_bytes(words: &[u64]) -> Vec<u8> {
    let mut result: Vec<u8> = Vec::with_capacity(words.len() * 8);
    for word in words.iter() {
        result.extend_from_slice(&word.to_be_bytes());
    }
    result
}

//-----------------------------------------------------------------------------

#[test]
fn empty_encoder() {
    let words: Vec<u64> = Vec::new();
    let mut encoder = Encoder::new(&words);
    assert!(encoder.is_empty(), "Encoder for no words is not empty");
    assert_eq!(encoder.len(), 0, "Nonzero length for an empty encoder");
    let mut bytes: Vec<u8> = Vec::new();
    encoder.read_to_end(&mut bytes).unwrap();
    assert!(bytes.is_empty(), "Got bytes from an empty encoder");
}

#[test]
fn encoder_chunks() {
    for len in [1, CHUNK_WORDS - 1, CHUNK_WORDS, CHUNK_WORDS + 1, 3 * CHUNK_WORDS + 17].iter().cloned() {
        let words = random_words(len);
        let mut encoder = Encoder::new(&words);
        assert_eq!(encoder.len(), 8 * len, "Invalid encoder length for {} words", len);
        let mut bytes: Vec<u8> = Vec::new();
        encoder.read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, expected_bytes(&words), "Invalid encoding for {} words", len);
    }
}

#[test]
fn encoder_small_reads() {
    let words = random_words(CHUNK_WORDS + 5);
    let mut encoder = Encoder::new(&words);
    let mut bytes: Vec<u8> = Vec::new();
    let mut buf = [0u8; 13];
    loop {
        let count = encoder.read(&mut buf).unwrap();
        if count == 0 {
            break;
        }
        bytes.extend_from_slice(&buf[..count]);
    }
    assert_eq!(bytes, expected_bytes(&words), "Invalid encoding with small reads");
}

#[test]
fn words_round_trip() {
    let words = random_words(2 * CHUNK_WORDS + 3);
    let bytes = expected_bytes(&words);
    let copy = read_words(&mut bytes.as_slice()).unwrap();
    assert_eq!(copy, words, "Reading the words changed them");

    let mut reader = bytes.as_slice();
    assert_eq!(read_word(&mut reader).unwrap(), words[0], "Invalid first word");
    assert_eq!(read_word(&mut reader).unwrap(), words[1], "Invalid second word");
}

#[test]
fn partial_words() {
    let bytes = expected_bytes(&random_words(3));
    for len in 1..8 {
        let result = read_words(&mut &bytes[..bytes.len() - len]);
        assert!(matches!(result, Err(Error::NotDecodable)), "Accepted input with {} missing bytes", len);
    }
    assert!(read_word(&mut &bytes[..5]).is_err(), "Read a word from 5 bytes");
}

#[test]
fn temp_file_names() {
    let first = temp_file_name("names");
    let second = temp_file_name("names");
    assert_ne!(first, second, "Temporary file names are not unique");
}

//-----------------------------------------------------------------------------
