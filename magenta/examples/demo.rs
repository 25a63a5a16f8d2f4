use magenta::Magenta;
use rand::RngCore;
use std::sync::Arc;
use symmetric_cipher::crypto::cipher_context::CipherContext;
use symmetric_cipher::crypto::cipher_traits::CipherAlgorithm;
use symmetric_cipher::crypto::cipher_types::{CipherMode, PaddingMode};
use symmetric_cipher::crypto::error::CipherResult;

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rand::rng().fill_bytes(&mut buf);
    buf
}

#[tokio::main]
async fn main() -> CipherResult<()> {
    env_logger::init();

    let text = b"Magenta over GF(2^8) modulo x^8 + x^6 + x^5 + x^2 + 1.";
    for key_size in [16, 24, 32] {
        let magenta = Magenta::new(&random_bytes(key_size))?;
        println!("{}-bit key, {} rounds", key_size * 8, magenta.rounds());

        let magenta: Arc<dyn CipherAlgorithm> = Arc::new(magenta);
        for mode in CipherMode::ALL {
            let ctx = CipherContext::new(magenta.clone(), mode, PaddingMode::PKCS7, Some(random_bytes(16)));
            let encrypted = ctx.cipher(text)?;
            assert_eq!(ctx.decipher(&encrypted)?, text);
            println!("  {mode}: {:02x?}", &encrypted[..16]);
        }
    }

    let dir = tempfile::tempdir()?;
    let input = dir.path().join("demo.txt");
    tokio::fs::write(&input, text.repeat(1000)).await?;
    let ctx = CipherContext::new(
        Arc::new(Magenta::new(&random_bytes(32))?),
        CipherMode::CBC,
        PaddingMode::ISO10126,
        Some(random_bytes(16)),
    );
    let encrypted = ctx.cipher_file_async(&input).await?;
    let decrypted = ctx.decipher_file_async(&encrypted).await?;
    assert_eq!(tokio::fs::read(&decrypted).await?, tokio::fs::read(&input).await?);
    println!("file round trip: {} -> {}", encrypted.display(), decrypted.display());

    Ok(())
}
