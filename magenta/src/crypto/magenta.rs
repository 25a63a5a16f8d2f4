use crate::crypto::magenta_key_expansion::MagentaKeyExpansion;
use crate::crypto::magenta_sbox::sbox;
use crate::crypto::magenta_transformation::MagentaTransformation;
use log::debug;
use std::sync::Arc;
use symmetric_cipher::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
use symmetric_cipher::crypto::error::CipherResult;
use symmetric_cipher::crypto::feistel_network::FeistelNetwork;

pub const MAGENTA_BLOCK_SIZE: usize = 16;

/// Magenta: a 128-bit Feistel cipher whose F-function is a GF(2^8)
/// butterfly network.
pub struct Magenta {
    feistel_network: FeistelNetwork,
}

impl Magenta {
    pub fn new(key: &[u8]) -> CipherResult<Self> {
        let rounds = MagentaKeyExpansion::rounds_for_key(key.len())?;
        let feistel_network = FeistelNetwork::new(
            Arc::new(MagentaKeyExpansion),
            Arc::new(MagentaTransformation::new(sbox()?, rounds)),
            key,
        )?;
        debug!("Magenta: {}-bit key, {rounds} rounds", key.len() * 8);

        Ok(Magenta { feistel_network })
    }

    pub fn rounds(&self) -> usize {
        self.feistel_network.rounds()
    }

    pub fn round_keys(&self) -> &[Vec<u8>] {
        self.feistel_network.round_keys()
    }
}

impl CipherAlgorithm for Magenta {
    fn block_size(&self) -> usize {
        MAGENTA_BLOCK_SIZE
    }

    fn encrypt_block(&self, block: &[u8]) -> Vec<u8> {
        self.feistel_network.encrypt(block)
    }

    fn decrypt_block(&self, block: &[u8]) -> Vec<u8> {
        self.feistel_network.decrypt(block)
    }
}

impl SymmetricCipher for Magenta {
    fn set_key(&mut self, key: &[u8]) -> CipherResult<()> {
        *self = Magenta::new(key)?;
        Ok(())
    }
}
