use crate::rijndael::BLOCK_SIZES;
use crate::rijndael::key_schedule::RijndaelKeyExpansion;
use crate::rijndael::round::{RijndaelRound, add_round_key};
use log::debug;
use symmetric_cipher::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
use symmetric_cipher::crypto::error::{CipherError, CipherResult};
use symmetric_cipher::crypto::key_expansion::KeyExpansion;
use symmetric_cipher::gf::{AES_MODULUS, GaloisField};

/// Rijndael block cipher. With a 16-byte block and the default modulus this
/// is AES.
pub struct Rijndael {
    round: RijndaelRound,
    key_expansion: RijndaelKeyExpansion,
    round_keys: Vec<Vec<u8>>,
    block_size: usize,
    field: GaloisField,
}

impl Rijndael {
    pub fn new(key: &[u8], block_size: usize) -> CipherResult<Self> {
        Self::with_modulus(key, block_size, AES_MODULUS)
    }

    /// AES-128/192/256.
    pub fn aes(key: &[u8]) -> CipherResult<Self> {
        Self::new(key, 16)
    }

    /// Builds the cipher over GF(2^8) modulo `modulus`, which must be an
    /// irreducible polynomial of degree 8.
    pub fn with_modulus(key: &[u8], block_size: usize, modulus: u16) -> CipherResult<Self> {
        if !BLOCK_SIZES.contains(&block_size) {
            return Err(CipherError::invalid_argument(format!(
                "Rijndael block must be 16, 24 or 32 bytes, got {block_size}"
            )));
        }
        let field = GaloisField::new(modulus)?;
        let key_expansion = RijndaelKeyExpansion::new(field, block_size);
        let round_keys = key_expansion.generate_round_keys(key)?;
        debug!(
            "Rijndael: {}-bit block, {}-bit key, {} rounds, modulus {modulus:#05x}",
            block_size * 8,
            key.len() * 8,
            round_keys.len() - 1
        );

        Ok(Rijndael {
            round: RijndaelRound::new(field, block_size),
            key_expansion,
            round_keys,
            block_size,
            field,
        })
    }

    pub fn rounds(&self) -> usize {
        self.round_keys.len() - 1
    }

    pub fn round_keys(&self) -> &[Vec<u8>] {
        &self.round_keys
    }

    pub fn modulus(&self) -> u16 {
        self.field.modulus()
    }
}

impl CipherAlgorithm for Rijndael {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn encrypt_block(&self, block: &[u8]) -> Vec<u8> {
        let nr = self.rounds();
        let mut state = block.to_vec();
        add_round_key(&mut state, &self.round_keys[0]);
        for round_key in &self.round_keys[1..nr] {
            self.round.round(&mut state, round_key);
        }
        self.round.final_round(&mut state, &self.round_keys[nr]);
        state
    }

    fn decrypt_block(&self, block: &[u8]) -> Vec<u8> {
        let nr = self.rounds();
        let mut state = block.to_vec();
        add_round_key(&mut state, &self.round_keys[nr]);
        for round_key in self.round_keys[1..nr].iter().rev() {
            self.round.inverse_round(&mut state, round_key);
        }
        self.round.inverse_final_round(&mut state, &self.round_keys[0]);
        state
    }
}

impl SymmetricCipher for Rijndael {
    fn set_key(&mut self, key: &[u8]) -> CipherResult<()> {
        self.round_keys = self.key_expansion.generate_round_keys(key)?;
        Ok(())
    }
}
