use rand::RngCore;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use symmetric_cipher::crypto::cipher_context::CipherContext;
use symmetric_cipher::crypto::cipher_types::{CipherMode, PaddingMode};
use symmetric_cipher::crypto::deal::DEAL;
use symmetric_cipher::crypto::error::CipherResult;

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rand::rng().fill_bytes(&mut buf);
    buf
}

/// Enciphers the file given on the command line (or a generated sample)
/// next to itself and deciphers it back, once per mode.
#[tokio::main]
async fn main() -> CipherResult<()> {
    env_logger::init();

    let dir = tempfile::tempdir()?;
    let input = match env::args().nth(1) {
        Some(path) => {
            let source = PathBuf::from(path);
            let target = dir.path().join(source.file_name().unwrap_or_default());
            fs::copy(&source, &target)?;
            target
        }
        None => {
            let target = dir.path().join("sample.bin");
            fs::write(&target, random_bytes(3 * 1024 * 1024 + 5))?;
            target
        }
    };
    let original = fs::read(&input)?;
    println!("Input {} ({} bytes)", input.display(), original.len());

    let deal = Arc::new(DEAL::new(&random_bytes(24))?);
    for mode in CipherMode::ALL {
        let ctx = CipherContext::new(deal.clone(), mode, PaddingMode::PKCS7, Some(random_bytes(16)));

        let encrypted = ctx.cipher_file_async(&input).await?;
        let decrypted = ctx.decipher_file_async(&encrypted).await?;

        assert_eq!(original, fs::read(&decrypted)?, "DEAL {mode} round trip");
        println!(
            "DEAL {mode}: {} -> {}",
            encrypted.display(),
            decrypted.display()
        );
    }

    Ok(())
}
