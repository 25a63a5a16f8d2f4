use hex_literal::hex;
use std::io::Cursor;
use std::sync::Arc;
use symmetric_cipher::crypto::cipher_context::CipherContext;
use symmetric_cipher::crypto::cipher_traits::CipherAlgorithm;
use symmetric_cipher::crypto::cipher_types::{CipherInput, CipherMode, CipherOutput, PaddingMode};
use symmetric_cipher::crypto::deal::DEAL;
use symmetric_cipher::crypto::des::DES;
use symmetric_cipher::crypto::error::CipherError;
use symmetric_cipher::crypto::triple_des::TripleDES;

/// Printable filler: never zero and larger than any block size, so none of
/// the padding schemes can mistake its tail for padding.
fn letters(len: usize) -> Vec<u8> {
    (0..len).map(|i| b'A' + (i % 26) as u8).collect()
}

fn des() -> Arc<dyn CipherAlgorithm> {
    Arc::new(DES::new(&hex!("13 34 57 79 9B BC DF F1")).unwrap())
}

fn algorithms() -> Vec<(&'static str, Arc<dyn CipherAlgorithm>)> {
    vec![
        ("DES", des()),
        (
            "TripleDES",
            Arc::new(TripleDES::from_key(&letters(24)).unwrap()),
        ),
        ("DEAL", Arc::new(DEAL::new(&letters(16)).unwrap())),
    ]
}

fn iv_for(block_size: usize) -> Vec<u8> {
    (0..block_size as u8).map(|i| i.wrapping_mul(29).wrapping_add(3)).collect()
}

#[test]
fn test_roundtrip_every_mode_padding_and_length() {
    for (name, algorithm) in algorithms() {
        let bs = algorithm.block_size();
        for mode in CipherMode::ALL {
            for padding in PaddingMode::ALL {
                let ctx = CipherContext::new(algorithm.clone(), mode, padding, Some(iv_for(bs)));
                for len in [0, bs - 1, bs, bs + 1, 10 * bs] {
                    let data = letters(len);
                    let encrypted = ctx.cipher(&data).unwrap();
                    assert_eq!(encrypted.len() % bs, 0, "{name} {mode} {padding} len {len}");
                    let decrypted = ctx.decipher(&encrypted).unwrap();
                    assert_eq!(decrypted, data, "{name} {mode} {padding} len {len}");
                }
            }
        }
    }
}

#[test]
fn test_des_cbc_pkcs7_exactly8by() {
    let des: Arc<dyn CipherAlgorithm> =
        Arc::new(DES::new(&hex!("01 02 03 04 05 06 07 08")).unwrap());
    let ctx = CipherContext::new(des, CipherMode::CBC, PaddingMode::PKCS7, None);

    let encrypted = ctx.cipher(b"Exactly8By").unwrap();
    assert_eq!(encrypted.len(), 16);

    let decrypted = ctx.decipher(&encrypted).unwrap();
    assert_eq!(decrypted, b"Exactly8By");
}

#[test]
fn test_deal_ecb_zero_padding_single_block() {
    let deal: Arc<dyn CipherAlgorithm> = Arc::new(DEAL::new(&letters(32)).unwrap());
    let ctx = CipherContext::new(deal, CipherMode::ECB, PaddingMode::Zeros, None);
    let plaintext: Vec<u8> = (0x00..=0x0F).collect();

    let encrypted = ctx.cipher(&plaintext).unwrap();
    assert_eq!(encrypted.len(), 16);
    assert_eq!(ctx.decipher(&encrypted).unwrap(), plaintext);
}

#[test]
fn test_zero_padding_drops_trailing_zero_of_plaintext() {
    let deal: Arc<dyn CipherAlgorithm> = Arc::new(DEAL::new(&letters(32)).unwrap());
    let ctx = CipherContext::new(deal, CipherMode::ECB, PaddingMode::Zeros, None);
    let mut plaintext: Vec<u8> = (0x01..=0x0F).collect();
    plaintext.push(0x00);

    let encrypted = ctx.cipher(&plaintext).unwrap();
    assert_eq!(encrypted.len(), 16);

    let decrypted = ctx.decipher(&encrypted).unwrap();
    assert_eq!(decrypted, &plaintext[..15]);
}

#[test]
fn test_deterministic_modes_repeat() {
    let data = letters(77);
    for mode in [CipherMode::ECB, CipherMode::CBC, CipherMode::CFB, CipherMode::CTR] {
        let ctx = CipherContext::new(des(), mode, PaddingMode::PKCS7, Some(iv_for(8)));
        assert_eq!(ctx.cipher(&data).unwrap(), ctx.cipher(&data).unwrap(), "{mode}");
    }
}

#[test]
fn test_iso10126_varies_only_in_padding_region() {
    let ctx = CipherContext::new(des(), CipherMode::ECB, PaddingMode::ISO10126, None);
    let data = letters(13);

    let first = ctx.cipher(&data).unwrap();
    let second = ctx.cipher(&data).unwrap();

    assert_eq!(first[..8], second[..8]);
    assert_eq!(ctx.decipher(&first).unwrap(), data);
    assert_eq!(ctx.decipher(&second).unwrap(), data);
}

fn stream_encrypt(ctx: &CipherContext, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    ctx.cipher_stream(Cursor::new(data), &mut out).unwrap();
    out
}

fn stream_decrypt(ctx: &CipherContext, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    ctx.decipher_stream(Cursor::new(data), &mut out).unwrap();
    out
}

#[test]
fn test_chunked_stream_matches_whole_buffer() {
    for (name, algorithm) in algorithms() {
        let bs = algorithm.block_size();
        let data = letters(bs * 23 + 5);
        for mode in CipherMode::ALL {
            for padding in [PaddingMode::Zeros, PaddingMode::ANSI_X923, PaddingMode::PKCS7] {
                let whole = CipherContext::new(algorithm.clone(), mode, padding, Some(iv_for(bs)));
                let expected = whole.cipher(&data).unwrap();

                for chunk_blocks in [3, 7] {
                    let ctx = whole.clone().with_chunk_blocks(chunk_blocks).unwrap();
                    let encrypted = stream_encrypt(&ctx, &data);
                    assert_eq!(encrypted, expected, "{name} {mode} {padding} chunk {chunk_blocks}");
                    assert_eq!(
                        stream_decrypt(&ctx, &encrypted),
                        data,
                        "{name} {mode} {padding} chunk {chunk_blocks}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_zero_padding_strips_only_final_chunk_when_streamed() {
    let ctx = CipherContext::new(des(), CipherMode::CBC, PaddingMode::Zeros, None)
        .with_chunk_blocks(1)
        .unwrap();
    let mut plaintext = b"ABCDEFG\0".to_vec();
    plaintext.extend_from_slice(&[0u8; 8]);

    let encrypted = stream_encrypt(&ctx, &plaintext);
    assert_eq!(encrypted, ctx.cipher(&plaintext).unwrap());

    assert_eq!(ctx.decipher(&encrypted).unwrap(), b"ABCDEFG");
    assert_eq!(stream_decrypt(&ctx, &encrypted), b"ABCDEFG\0");
}

#[test]
fn test_stream_of_exact_chunk_multiple_marks_last_chunk_final() {
    let ctx = CipherContext::new(des(), CipherMode::CBC, PaddingMode::PKCS7, None)
        .with_chunk_blocks(4)
        .unwrap();
    let data = letters(ctx.chunk_size() * 2);

    let encrypted = stream_encrypt(&ctx, &data);
    assert_eq!(encrypted, ctx.cipher(&data).unwrap());
    assert_eq!(stream_decrypt(&ctx, &encrypted), data);
}

#[test]
fn test_empty_stream() {
    let ctx = CipherContext::new(des(), CipherMode::OFB, PaddingMode::ANSI_X923, None);
    assert!(stream_encrypt(&ctx, &[]).is_empty());
    assert!(stream_decrypt(&ctx, &[]).is_empty());
}

#[test]
fn test_manual_chunks_with_next_iv() {
    for mode in CipherMode::ALL {
        let ctx = CipherContext::new(des(), mode, PaddingMode::PKCS7, Some(iv_for(8)));
        let data = letters(8 * 9 + 3);
        let (head, tail) = data.split_at(8 * 4);

        let first = ctx.encrypt_chunk(head, ctx.iv(), false).unwrap();
        let iv = ctx.next_iv(ctx.iv(), head, &first);
        let second = ctx.encrypt_chunk(tail, &iv, true).unwrap();

        assert_eq!([first, second].concat(), ctx.cipher(&data).unwrap(), "{mode}");
    }
}

#[test]
fn test_cbc_matches_sequential_reference() {
    let des = DES::new(&hex!("13 34 57 79 9B BC DF F1")).unwrap();
    let iv = iv_for(8);
    let data = letters(8 * 64);

    let mut reference = Vec::new();
    let mut previous = iv.clone();
    for block in data.chunks(8) {
        let mixed: Vec<u8> = block.iter().zip(&previous).map(|(a, b)| a ^ b).collect();
        previous = des.encrypt_block(&mixed);
        reference.extend_from_slice(&previous);
    }

    let mut reference_plain = Vec::new();
    let mut previous = iv.clone();
    for block in reference.chunks(8) {
        let decrypted = des.decrypt_block(block);
        reference_plain.extend(decrypted.iter().zip(&previous).map(|(a, b)| a ^ b));
        previous = block.to_vec();
    }
    assert_eq!(reference_plain, data);

    let ctx = CipherContext::new(Arc::new(des), CipherMode::CBC, PaddingMode::PKCS7, Some(iv));
    let encrypted = ctx.cipher(&data).unwrap();
    assert_eq!(encrypted, reference);
    assert_eq!(ctx.decipher(&encrypted).unwrap(), reference_plain);
}

#[test]
fn test_ctr_decrypt_equals_encrypt_of_ciphertext() {
    let ctx = CipherContext::new(des(), CipherMode::CTR, PaddingMode::PKCS7, Some(vec![0xFF; 8]));
    let data = letters(64);

    let encrypted = ctx.cipher(&data).unwrap();
    assert_eq!(ctx.cipher(&encrypted).unwrap(), data);
}

#[test]
fn test_iv_is_truncated_or_extended() {
    let long = CipherContext::new(des(), CipherMode::CBC, PaddingMode::PKCS7, Some(letters(12)));
    assert_eq!(long.iv(), &letters(8)[..]);

    let short = CipherContext::new(des(), CipherMode::CBC, PaddingMode::PKCS7, Some(vec![1, 2]));
    assert_eq!(short.iv(), &[1, 2, 0, 0, 0, 0, 0, 0]);

    let default = CipherContext::new(des(), CipherMode::CBC, PaddingMode::PKCS7, None);
    assert_eq!(default.iv(), &[0u8; 8]);
}

#[test]
fn test_invalid_arguments() {
    let ctx = CipherContext::new(des(), CipherMode::CBC, PaddingMode::PKCS7, None);

    assert!(matches!(
        ctx.clone().with_chunk_blocks(0),
        Err(CipherError::InvalidArgument(_))
    ));
    assert!(matches!(
        ctx.encrypt_chunk(&letters(9), ctx.iv(), false),
        Err(CipherError::InvalidArgument(_))
    ));
    assert!(matches!(
        ctx.decipher(&letters(9)),
        Err(CipherError::InvalidArgument(_))
    ));
    assert!(matches!(
        ctx.encrypt_chunk(&letters(8), &[0; 3], true),
        Err(CipherError::InvalidArgument(_))
    ));
}

#[test]
fn test_mode_and_padding_names() {
    assert_eq!("cbc".parse::<CipherMode>().unwrap(), CipherMode::CBC);
    assert_eq!("RandomDelta".parse::<CipherMode>().unwrap(), CipherMode::RandomDelta);
    assert_eq!("pkcs7".parse::<PaddingMode>().unwrap(), PaddingMode::PKCS7);
    assert_eq!("ANSI X9.23".parse::<PaddingMode>().unwrap(), PaddingMode::ANSI_X923);
    assert!("gcm".parse::<CipherMode>().is_err());
    assert!("oaep".parse::<PaddingMode>().is_err());

    for mode in CipherMode::ALL {
        assert_eq!(mode.to_string().parse::<CipherMode>().unwrap(), mode);
    }
    for padding in PaddingMode::ALL {
        assert_eq!(padding.to_string().parse::<PaddingMode>().unwrap(), padding);
    }
}

#[test]
fn test_file_roundtrip_with_derived_names() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plain.txt");
    let data = letters(8 * 1500 + 3);
    std::fs::write(&input, &data).unwrap();

    let ctx = CipherContext::new(des(), CipherMode::PCBC, PaddingMode::ANSI_X923, Some(iv_for(8)));

    let encrypted_path = ctx.cipher_file(&input).unwrap();
    assert_eq!(encrypted_path, dir.path().join("plainCip.txt"));
    assert_eq!(std::fs::read(&encrypted_path).unwrap(), ctx.cipher(&data).unwrap());

    let decrypted_path = ctx.decipher_file(&encrypted_path).unwrap();
    assert_eq!(decrypted_path, dir.path().join("plainCipDecip.txt"));
    assert_eq!(std::fs::read(&decrypted_path).unwrap(), data);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = CipherContext::new(des(), CipherMode::ECB, PaddingMode::PKCS7, None);

    let result = ctx.cipher_file(dir.path().join("absent.bin"));
    assert!(matches!(result, Err(CipherError::Io(_))));
}

#[tokio::test]
async fn test_async_file_roundtrip_matches_sync() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.bin");
    let encrypted = dir.path().join("data.enc");
    let decrypted = dir.path().join("data.out");
    let data = letters(16 * 40 + 9);
    std::fs::write(&input, &data).unwrap();

    let deal: Arc<dyn CipherAlgorithm> = Arc::new(DEAL::new(&letters(24)).unwrap());
    for mode in CipherMode::ALL {
        let ctx = CipherContext::new(deal.clone(), mode, PaddingMode::PKCS7, Some(iv_for(16)))
            .with_chunk_blocks(4)
            .unwrap();

        ctx.cipher_file_to_async(&input, &encrypted).await.unwrap();
        assert_eq!(std::fs::read(&encrypted).unwrap(), ctx.cipher(&data).unwrap(), "{mode}");

        ctx.decipher_file_to_async(&encrypted, &decrypted).await.unwrap();
        assert_eq!(std::fs::read(&decrypted).unwrap(), data, "{mode}");
    }
}

#[tokio::test]
async fn test_async_derived_names() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.md");
    std::fs::write(&input, letters(100)).unwrap();

    let ctx = CipherContext::new(des(), CipherMode::RandomDelta, PaddingMode::ISO10126, None);
    let encrypted = ctx.cipher_file_async(&input).await.unwrap();
    assert_eq!(encrypted, dir.path().join("notesCip.md"));

    let decrypted = ctx.decipher_file_async(&encrypted).await.unwrap();
    assert_eq!(std::fs::read(decrypted).unwrap(), letters(100));
}

#[tokio::test]
async fn test_async_encrypt_decrypt_buffers() {
    let ctx = CipherContext::new(des(), CipherMode::CBC, PaddingMode::ANSI_X923, Some(vec![0u8; 8]));
    let plaintext = b"Hello, world!\n";

    let mut encrypted = CipherOutput::Buffer(Vec::new());
    ctx.encrypt(CipherInput::Bytes(plaintext.to_vec()), &mut encrypted)
        .await
        .unwrap();
    let CipherOutput::Buffer(encrypted) = encrypted else {
        panic!("expected buffer output");
    };
    assert_eq!(encrypted.len(), 16);

    let mut decrypted = CipherOutput::Buffer(Vec::new());
    ctx.decrypt(CipherInput::Bytes(encrypted), &mut decrypted)
        .await
        .unwrap();
    let CipherOutput::Buffer(decrypted) = decrypted else {
        panic!("expected buffer output");
    };
    assert_eq!(decrypted, plaintext);
}

#[tokio::test]
async fn test_async_file_into_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bin");
    let data = letters(333);
    std::fs::write(&input, &data).unwrap();

    let ctx = CipherContext::new(des(), CipherMode::CFB, PaddingMode::PKCS7, Some(iv_for(8)))
        .with_chunk_blocks(5)
        .unwrap();
    let mut output = CipherOutput::Buffer(Vec::new());
    ctx.encrypt(CipherInput::File(input), &mut output).await.unwrap();

    let CipherOutput::Buffer(encrypted) = output else {
        panic!("expected buffer output");
    };
    assert_eq!(encrypted, ctx.cipher(&data).unwrap());
}
