use hex_literal::hex;
use rc4::Rc4;
use rc4::rc4::{DEFAULT_BUFFER_SIZE, self_test};
use std::io::Cursor;
use symmetric_cipher::crypto::error::CipherError;

#[test]
fn test_known_vectors() {
    let key = hex!("0123456789abcdef");
    assert_eq!(Rc4::new(&key).unwrap().process(&key), hex!("75b7878099e0c596"));

    for (key, plaintext, expected) in [
        (&b"Key"[..], &b"Plaintext"[..], &hex!("bbf316e8d940af0ad3")[..]),
        (&b"Wiki"[..], &b"pedia"[..], &hex!("1021bf0420")[..]),
        (&b"Secret"[..], &b"Attack at dawn"[..], &hex!("45a01f645fc35b383552544b9bf5")[..]),
    ] {
        assert_eq!(Rc4::new(key).unwrap().process(plaintext), expected);
    }
    assert!(self_test());
}

#[test]
fn test_keystream_continues_across_calls() {
    let key = b"Secret";
    let plaintext = b"Attack at dawn";

    let mut split = Rc4::new(key).unwrap();
    let mut joined = split.process(&plaintext[..5]);
    joined.extend(split.process(&plaintext[5..]));

    assert_eq!(joined, Rc4::new(key).unwrap().process(plaintext));
}

#[test]
fn test_decrypt_with_fresh_instance() {
    let key = b"another key";
    let data: Vec<u8> = (0..=255).cycle().take(10_000).collect();

    let encrypted = Rc4::new(key).unwrap().process(&data);
    assert_ne!(encrypted, data);
    assert_eq!(Rc4::new(key).unwrap().process(&encrypted), data);
}

#[test]
fn test_invalid_keys() {
    assert!(matches!(Rc4::new(&[]), Err(CipherError::InvalidKeyLength { actual: 0, .. })));
    assert!(Rc4::new(&[7u8; 257]).is_err());
    assert!(Rc4::new(&[7u8; 256]).is_ok());
}

#[test]
fn test_stream_matches_buffer() {
    let key = b"stream";
    let data: Vec<u8> = (0..DEFAULT_BUFFER_SIZE * 2 + 17).map(|i| (i * 7) as u8).collect();

    let mut output = Vec::new();
    let written = Rc4::new(key)
        .unwrap()
        .process_stream(Cursor::new(&data), &mut output)
        .unwrap();

    assert_eq!(written, data.len() as u64);
    assert_eq!(output, Rc4::new(key).unwrap().process(&data));
}

#[tokio::test]
async fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plain.bin");
    let encrypted = dir.path().join("nested").join("cipher.bin");
    let decrypted = dir.path().join("plain.out");
    let data: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
    std::fs::write(&input, &data).unwrap();

    let key = b"file key";
    Rc4::new(key)
        .unwrap()
        .process_file_async(&input, &encrypted, 4096)
        .await
        .unwrap();
    assert_eq!(std::fs::read(&encrypted).unwrap(), Rc4::new(key).unwrap().process(&data));

    Rc4::new(key)
        .unwrap()
        .process_file_async(&encrypted, &decrypted, 1000)
        .await
        .unwrap();
    assert_eq!(std::fs::read(&decrypted).unwrap(), data);
}

#[tokio::test]
async fn test_missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Rc4::new(b"k")
        .unwrap()
        .process_file_async(dir.path().join("missing"), dir.path().join("out"), 512)
        .await;
    assert!(matches!(result, Err(CipherError::Io(_))));
}
