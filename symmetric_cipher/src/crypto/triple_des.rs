use crate::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
use crate::crypto::des::{DES, DES_BLOCK_SIZE};
use crate::crypto::des_key_expansion::DES_KEY_SIZE;
use crate::crypto::error::{CipherError, CipherResult};

/// EDE composition: `C = E_k3(D_k2(E_k1(P)))`.
pub struct TripleDES {
    stages: [DES; 3],
}

impl TripleDES {
    pub fn new(k1: &[u8], k2: &[u8], k3: &[u8]) -> CipherResult<Self> {
        Ok(TripleDES {
            stages: [DES::new(k1)?, DES::new(k2)?, DES::new(k3)?],
        })
    }

    /// Splits a 24-byte key into three DES keys.
    pub fn from_key(key: &[u8]) -> CipherResult<Self> {
        if key.len() != 3 * DES_KEY_SIZE {
            return Err(CipherError::InvalidKeyLength {
                algorithm: "TripleDES",
                expected: "24",
                actual: key.len(),
            });
        }
        let (k1, rest) = key.split_at(DES_KEY_SIZE);
        let (k2, k3) = rest.split_at(DES_KEY_SIZE);
        Self::new(k1, k2, k3)
    }
}

impl CipherAlgorithm for TripleDES {
    fn block_size(&self) -> usize {
        DES_BLOCK_SIZE
    }

    fn encrypt_block(&self, block: &[u8]) -> Vec<u8> {
        let [first, second, third] = &self.stages;
        third.encrypt(&second.decrypt(&first.encrypt(block)))
    }

    fn decrypt_block(&self, block: &[u8]) -> Vec<u8> {
        let [first, second, third] = &self.stages;
        first.decrypt(&second.encrypt(&third.decrypt(block)))
    }
}

impl SymmetricCipher for TripleDES {
    fn set_key(&mut self, key: &[u8]) -> CipherResult<()> {
        *self = Self::from_key(key)?;
        Ok(())
    }
}
