use rand::RngCore;
use std::sync::Arc;
use symmetric_cipher::crypto::cipher_context::CipherContext;
use symmetric_cipher::crypto::cipher_traits::CipherAlgorithm;
use symmetric_cipher::crypto::cipher_types::{CipherInput, CipherMode, CipherOutput, PaddingMode};
use symmetric_cipher::crypto::deal::DEAL;
use symmetric_cipher::crypto::des::DES;
use symmetric_cipher::crypto::error::CipherResult;
use symmetric_cipher::crypto::triple_des::TripleDES;

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rand::rng().fill_bytes(&mut buf);
    buf
}

fn into_buffer(output: CipherOutput) -> Vec<u8> {
    match output {
        CipherOutput::Buffer(buffer) => buffer,
        CipherOutput::File(path) => panic!("unexpected file output {}", path.display()),
    }
}

#[tokio::main]
async fn main() -> CipherResult<()> {
    env_logger::init();

    let text = "The quick brown fox jumps over the lazy dog. Symmetric encryption test string!";
    let data = text.as_bytes().to_vec();

    let algorithms: [(&str, Arc<dyn CipherAlgorithm>); 3] = [
        ("DES", Arc::new(DES::new(&random_bytes(8))?)),
        ("3DES", Arc::new(TripleDES::from_key(&random_bytes(24))?)),
        ("DEAL", Arc::new(DEAL::new(&random_bytes(32))?)),
    ];

    for (name, algorithm) in &algorithms {
        for mode in CipherMode::ALL {
            for padding in PaddingMode::ALL {
                let iv = random_bytes(algorithm.block_size());
                let ctx = CipherContext::new(algorithm.clone(), mode, padding, Some(iv));

                let mut encrypted = CipherOutput::Buffer(Vec::new());
                ctx.encrypt(CipherInput::Bytes(data.clone()), &mut encrypted)
                    .await?;
                let encrypted = into_buffer(encrypted);

                let mut decrypted = CipherOutput::Buffer(Vec::new());
                ctx.decrypt(CipherInput::Bytes(encrypted.clone()), &mut decrypted)
                    .await?;
                let decrypted = into_buffer(decrypted);

                assert_eq!(data, decrypted, "{name} failed for {mode}+{padding}");
                println!("{name} {mode}+{padding}: {} -> {} bytes OK", data.len(), encrypted.len());
            }
        }
    }

    Ok(())
}
