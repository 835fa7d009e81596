//! Unit tests for the obfuscation transform.
//! No filesystem access; all streams run over in-memory buffers.

#![allow(clippy::unwrap_used)]

use std::io::Read;

use proptest::prelude::*;

use crate::{
    config_store::ConfigError,
    obfuscation::{CipherStream, ObfuscationKey, Transform},
};

const KEY_128: &[u8; 16] = b"0123456789abcdef";

#[test]
fn zero_key_zero_iv_matches_aes_block_of_zeros() {
    let mut stream = CipherStream::derive(&[0u8; 16]).unwrap();
    let mut block = [0u8; 16];
    stream.apply(&mut block);

    let expected: [u8; 16] = [
        0x66, 0xe9, 0x4b, 0xd4, 0xef, 0x8a, 0x2c, 0x3b, 0x88, 0x4c, 0xfa, 0x59, 0xca, 0x34, 0x2b,
        0x2e,
    ];
    assert_eq!(block, expected);
}

#[test]
fn accepts_every_aes_key_size() {
    for length in [16, 24, 32] {
        assert!(CipherStream::derive(&vec![7u8; length]).is_ok());
    }
}

#[test]
fn rejects_invalid_key_length() {
    for length in [0, 1, 15, 17, 31, 33, 64] {
        let result = CipherStream::derive(&vec![1u8; length]);
        assert!(matches!(result, Err(ConfigError::KeyInit { length: l }) if l == length));
    }
}

#[test]
fn fresh_streams_are_identical() {
    let key = ObfuscationKey::new(KEY_128.to_vec());
    let mut first = b"version = 3\nname = \"same\"\n".to_vec();
    let mut second = first.clone();

    key.stream().unwrap().apply(&mut first);
    key.stream().unwrap().apply(&mut second);

    assert_eq!(first, second);
}

#[test]
fn reader_deciphers_applied_bytes() {
    let transform = Transform::Stream(ObfuscationKey::new(KEY_128.to_vec()));
    let plaintext = b"[server]\nport = 8080\nhost = \"localhost\"\n".to_vec();

    let mut sealed = plaintext.clone();
    transform.apply(&mut sealed).unwrap();
    assert_ne!(sealed, plaintext);

    let mut reader = transform.reader(sealed.as_slice()).unwrap();
    let mut head = [0u8; 7];
    reader.read_exact(&mut head).unwrap();
    let mut rest = Vec::new();
    reader.read_to_end(&mut rest).unwrap();

    assert_eq!(&head, &plaintext[..7]);
    assert_eq!(rest, &plaintext[7..]);
}

#[test]
fn identity_leaves_bytes_untouched() {
    let mut bytes = b"plain".to_vec();
    Transform::Identity.apply(&mut bytes).unwrap();
    assert_eq!(bytes, b"plain");
    assert!(!Transform::Identity.is_obfuscating());
}

#[test]
fn invalid_key_fails_when_wrapping() {
    let transform = Transform::Stream(ObfuscationKey::from("short"));
    assert!(matches!(
        transform.reader(&b""[..]),
        Err(ConfigError::KeyInit { length: 5 })
    ));
}

#[test]
fn debug_output_redacts_key() {
    let key = ObfuscationKey::new(KEY_128.to_vec());
    let rendered = format!("{key:?}");

    assert!(!rendered.contains("0123456789abcdef"));
    assert!(rendered.contains("REDACTED"));
}

proptest! {
    #[test]
    fn transform_round_trips_and_wrong_key_differs(
        plaintext in proptest::collection::vec(any::<u8>(), 16..512),
        key in proptest::collection::vec(any::<u8>(), 32),
        other in proptest::collection::vec(any::<u8>(), 32),
    ) {
        prop_assume!(key != other);
        let transform = Transform::Stream(ObfuscationKey::new(key));
        let wrong = Transform::Stream(ObfuscationKey::new(other));

        let mut bytes = plaintext.clone();
        transform.apply(&mut bytes).unwrap();

        let mut misread = bytes.clone();
        wrong.apply(&mut misread).unwrap();
        prop_assert_ne!(&misread, &plaintext);

        transform.apply(&mut bytes).unwrap();
        prop_assert_eq!(bytes, plaintext);
    }
}
