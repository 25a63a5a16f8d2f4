use crate::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
use crate::crypto::des_key_expansion::DesKeyExpansion;
use crate::crypto::des_tables::{FP, IP};
use crate::crypto::des_transformation::DesTransformation;
use crate::crypto::encryption_transformation::EncryptionTransformation;
use crate::crypto::error::CipherResult;
use crate::crypto::feistel_network::{FeistelNetwork, feistel_rounds};
use crate::crypto::key_expansion::KeyExpansion;
use std::sync::Arc;

pub const DES_BLOCK_SIZE: usize = 8;
pub const DES_SUBKEY_SIZE: usize = 6;

pub struct DES {
    feistel_network: FeistelNetwork,
}

impl DES {
    pub fn new(key: &[u8]) -> CipherResult<Self> {
        Self::with_components(key, Arc::new(DesKeyExpansion), Arc::new(DesTransformation))
    }

    /// Wires a custom key schedule and round function into the DES frame
    /// (IP, FP, 64-bit block).
    pub fn with_components(
        key: &[u8],
        key_expansion: Arc<dyn KeyExpansion>,
        transformation: Arc<dyn EncryptionTransformation>,
    ) -> CipherResult<Self> {
        let feistel_network =
            FeistelNetwork::with_permutations(key_expansion, transformation, key, &IP, &FP)?;
        Ok(DES { feistel_network })
    }

    pub fn encrypt(&self, block: &[u8]) -> Vec<u8> {
        self.feistel_network.encrypt(block)
    }

    pub fn decrypt(&self, block: &[u8]) -> Vec<u8> {
        self.feistel_network.decrypt(block)
    }

    pub fn round_keys(&self) -> &[Vec<u8>] {
        self.feistel_network.round_keys()
    }
}

/// Standard DES encryption of one block under the sixteen subkeys of
/// `DesKeyExpansion::expand`, concatenated.
pub(crate) fn encrypt_with_subkeys(block: &[u8], subkeys: &[u8]) -> Vec<u8> {
    feistel_rounds(
        &DesTransformation,
        Some((&IP[..], &FP[..])),
        block,
        subkeys.chunks(DES_SUBKEY_SIZE),
    )
}

impl CipherAlgorithm for DES {
    fn block_size(&self) -> usize {
        DES_BLOCK_SIZE
    }

    fn encrypt_block(&self, block: &[u8]) -> Vec<u8> {
        self.encrypt(block)
    }

    fn decrypt_block(&self, block: &[u8]) -> Vec<u8> {
        self.decrypt(block)
    }
}

impl SymmetricCipher for DES {
    fn set_key(&mut self, key: &[u8]) -> CipherResult<()> {
        self.feistel_network.set_key(key)
    }
}
