use hex_literal::hex;
use rand::RngCore;
use rijndael::Rijndael;
use std::io::Cursor;
use std::sync::Arc;
use symmetric_cipher::crypto::cipher_context::CipherContext;
use symmetric_cipher::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
use symmetric_cipher::crypto::cipher_types::{CipherMode, PaddingMode};
use symmetric_cipher::crypto::error::CipherError;

const FIPS_PLAINTEXT: [u8; 16] = hex!("00112233445566778899aabbccddeeff");

fn sequential_key(len: u8) -> Vec<u8> {
    (0..len).collect()
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rand::rng().fill_bytes(&mut buf);
    buf
}

#[test]
fn test_aes_known_answers() {
    for (key_len, expected) in [
        (16, hex!("69c4e0d86a7b0430d8cdb78070b4c55a")),
        (24, hex!("dda97ca4864cdfe06eaf70a0ec0d7191")),
        (32, hex!("8ea2b7ca516745bfeafc49904b496089")),
    ] {
        let aes = Rijndael::aes(&sequential_key(key_len)).unwrap();
        let cipher = aes.encrypt_block(&FIPS_PLAINTEXT);
        assert_eq!(cipher, expected, "AES-{}", key_len as usize * 8);
        assert_eq!(aes.decrypt_block(&cipher), FIPS_PLAINTEXT);
    }
}

#[test]
fn test_aes128_appendix_b() {
    let aes = Rijndael::aes(&hex!("2b7e151628aed2a6abf7158809cf4f3c")).unwrap();
    let cipher = aes.encrypt_block(&hex!("3243f6a8885a308d313198a2e0370734"));
    assert_eq!(cipher, hex!("3925841d02dc09fbdc118597196a0b32"));
}

#[test]
fn test_wide_blocks() {
    let rijndael = Rijndael::new(&[0u8; 32], 32).unwrap();
    assert_eq!(rijndael.rounds(), 14);
    assert_eq!(
        rijndael.encrypt_block(&[0u8; 32]),
        hex!("c6227e7740b7e53b5cb77865278eab0726f62366d9aabad908936123a1fc8af3")
    );

    let rijndael = Rijndael::new(&[0u8; 16], 24).unwrap();
    assert_eq!(rijndael.rounds(), 12);
    assert_eq!(
        rijndael.encrypt_block(&[0u8; 24]),
        hex!("a92732eb488d8bb98ecd8d95dc9c02e052f250ad369b3849")
    );
}

#[test]
fn test_custom_modulus() {
    let key = sequential_key(16);
    let rijndael = Rijndael::with_modulus(&key, 16, 0x11D).unwrap();
    assert_eq!(rijndael.modulus(), 0x11D);

    let cipher = rijndael.encrypt_block(&FIPS_PLAINTEXT);
    assert_eq!(cipher, hex!("a28c3d89b8282cfa8f3d616e018cbf15"));
    assert_ne!(cipher, Rijndael::aes(&key).unwrap().encrypt_block(&FIPS_PLAINTEXT));
    assert_eq!(rijndael.decrypt_block(&cipher), FIPS_PLAINTEXT);
}

#[test]
fn test_roundtrip_all_sizes_and_moduli() {
    for modulus in [0x11B, 0x11D, 0x1F9] {
        for block_size in [16, 24, 32] {
            for key_size in [16, 24, 32] {
                let rijndael =
                    Rijndael::with_modulus(&random_bytes(key_size), block_size, modulus).unwrap();
                assert_eq!(rijndael.block_size(), block_size);

                let block = random_bytes(block_size);
                let cipher = rijndael.encrypt_block(&block);
                assert_eq!(cipher.len(), block_size);
                assert_eq!(
                    rijndael.decrypt_block(&cipher),
                    block,
                    "modulus {modulus:#05x} block {block_size} key {key_size}"
                );
            }
        }
    }
}

#[test]
fn test_invalid_parameters() {
    assert!(matches!(
        Rijndael::new(&[0u8; 16], 20),
        Err(CipherError::InvalidArgument(_))
    ));
    assert!(matches!(
        Rijndael::with_modulus(&[0u8; 16], 16, 0x11A),
        Err(CipherError::InvalidArgument(_))
    ));
    assert!(matches!(
        Rijndael::aes(&[0u8; 15]),
        Err(CipherError::InvalidKeyLength { .. })
    ));
}

#[test]
fn test_set_key() {
    let mut rijndael = Rijndael::aes(&[0u8; 16]).unwrap();
    rijndael.set_key(&sequential_key(32)).unwrap();

    assert_eq!(rijndael.rounds(), 14);
    assert_eq!(
        rijndael.encrypt_block(&FIPS_PLAINTEXT),
        hex!("8ea2b7ca516745bfeafc49904b496089")
    );
    assert!(rijndael.set_key(&[1, 2, 3]).is_err());
}

#[test]
fn test_modes_with_wide_block() {
    let rijndael: Arc<dyn CipherAlgorithm> = Arc::new(Rijndael::new(&random_bytes(24), 32).unwrap());
    let data: Vec<u8> = (0..32 * 37 + 11).map(|i| b'a' + (i % 26) as u8).collect();

    for mode in CipherMode::ALL {
        for padding in PaddingMode::ALL {
            let ctx = CipherContext::new(rijndael.clone(), mode, padding, Some(random_bytes(32)));
            let encrypted = ctx.cipher(&data).unwrap();
            assert_eq!(encrypted.len() % 32, 0);
            assert_eq!(ctx.decipher(&encrypted).unwrap(), data, "{mode} {padding}");
        }
    }
}

#[tokio::test]
async fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("payload.bin");
    let data = random_bytes(100_003);
    std::fs::write(&input, &data).unwrap();

    let aes: Arc<dyn CipherAlgorithm> = Arc::new(Rijndael::aes(&random_bytes(32)).unwrap());
    let ctx = CipherContext::new(aes, CipherMode::CTR, PaddingMode::PKCS7, Some(random_bytes(16)))
        .with_chunk_blocks(64)
        .unwrap();

    let encrypted = ctx.cipher_file_async(&input).await.unwrap();
    assert_eq!(std::fs::read(&encrypted).unwrap(), ctx.cipher(&data).unwrap());

    let decrypted = ctx.decipher_file_async(&encrypted).await.unwrap();
    assert_eq!(std::fs::read(decrypted).unwrap(), data);
}

#[test]
fn test_chunked_stream_matches_whole_buffer_for_wide_blocks() {
    for block_size in [24, 32] {
        let rijndael: Arc<dyn CipherAlgorithm> =
            Arc::new(Rijndael::new(&sequential_key(32), block_size).unwrap());
        let data: Vec<u8> = (0..block_size * 9 + 7).map(|i| (i * 13 + 5) as u8).collect();
        let iv: Vec<u8> = (0..block_size as u8).collect();

        for mode in CipherMode::ALL {
            let whole = CipherContext::new(
                rijndael.clone(),
                mode,
                PaddingMode::ANSI_X923,
                Some(iv.clone()),
            );
            let expected = whole.cipher(&data).unwrap();

            for chunk_blocks in [1, 4] {
                let ctx = whole.clone().with_chunk_blocks(chunk_blocks).unwrap();

                let mut encrypted = Vec::new();
                ctx.cipher_stream(Cursor::new(&data), &mut encrypted).unwrap();
                assert_eq!(encrypted, expected, "block {block_size} {mode} chunk {chunk_blocks}");

                let mut decrypted = Vec::new();
                ctx.decipher_stream(Cursor::new(&encrypted), &mut decrypted).unwrap();
                assert_eq!(decrypted, data, "block {block_size} {mode} chunk {chunk_blocks}");
            }
        }
    }
}
