use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rijndael::Rijndael;
use rijndael::rijndael::key_schedule::expand_key;
use rijndael::rijndael::sbox::{inv_sbox, sbox};
use std::sync::Arc;
use symmetric_cipher::crypto::cipher_context::CipherContext;
use symmetric_cipher::crypto::cipher_traits::CipherAlgorithm;
use symmetric_cipher::crypto::cipher_types::{CipherInput, CipherMode, CipherOutput, PaddingMode};
use symmetric_cipher::crypto::error::CipherResult;
use symmetric_cipher::gf::GaloisField;
use symmetric_cipher::gf::irreducible::irreducible_polynomials;

fn random_bytes(len: usize, rng: &mut impl RngCore) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rng.fill_bytes(&mut buf);
    buf
}

#[tokio::main]
async fn main() -> CipherResult<()> {
    env_logger::init();

    let moduli = [0x11B, 0x12D];

    println!("=== Key schedule & single block ===");
    let key128 = [
        0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f,
        0x3c,
    ];
    let block = [
        0x32, 0x43, 0xf6, 0xa8, 0x88, 0x5a, 0x30, 0x8d, 0x31, 0x31, 0x98, 0xa2, 0xe0, 0x37, 0x07,
        0x34,
    ];
    for modulus in moduli {
        let field = GaloisField::new(modulus)?;
        let round_keys = expand_key(&key128, field)?;
        println!("modulus {modulus:#05x}: round 1 key {:02x?}", round_keys[1]);

        let cipher = Rijndael::with_modulus(&key128, 16, modulus)?;
        let encrypted = cipher.encrypt_block(&block);
        assert_eq!(cipher.decrypt_block(&encrypted), block);
        println!("  encrypted block {:02x?}", encrypted);

        for x in [0x00u8, 0x53, 0x7f] {
            let y = sbox(x, field);
            assert_eq!(inv_sbox(y, field), x);
            println!("  S({x:#04x}) = {y:#04x}");
        }
    }

    println!("\n=== Irreducible moduli ===");
    let all = irreducible_polynomials();
    println!("{} moduli: {:#05x?}", all.len(), all);

    println!("\n=== Modes, block sizes and key sizes ===");
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    let mut data = random_bytes(1020, &mut rng);
    // zero padding would eat a trailing zero byte
    data.push(0x5A);

    for modulus in moduli {
        for block_size in [16, 24, 32] {
            for key_size in [16, 24, 32] {
                let key = random_bytes(key_size, &mut rng);
                let algorithm: Arc<dyn CipherAlgorithm> =
                    Arc::new(Rijndael::with_modulus(&key, block_size, modulus)?);

                for mode in CipherMode::ALL {
                    for padding in PaddingMode::ALL {
                        let iv = random_bytes(block_size, &mut rng);
                        let ctx = CipherContext::new(algorithm.clone(), mode, padding, Some(iv));

                        let mut encrypted = CipherOutput::Buffer(Vec::new());
                        ctx.encrypt(CipherInput::Bytes(data.clone()), &mut encrypted)
                            .await?;
                        let CipherOutput::Buffer(encrypted) = encrypted else {
                            unreachable!("buffer output requested");
                        };

                        let mut decrypted = CipherOutput::Buffer(Vec::new());
                        ctx.decrypt(CipherInput::Bytes(encrypted), &mut decrypted)
                            .await?;
                        let CipherOutput::Buffer(decrypted) = decrypted else {
                            unreachable!("buffer output requested");
                        };
                        assert_eq!(decrypted, data);
                    }
                }
                println!(
                    "modulus {modulus:#05x} block {} key {}: all modes OK",
                    block_size * 8,
                    key_size * 8
                );
            }
        }
    }

    Ok(())
}
