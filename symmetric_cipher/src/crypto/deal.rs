use crate::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
use crate::crypto::deal_key_expansion::DealKeyExpansion;
use crate::crypto::des_adapter::DesAdapter;
use crate::crypto::error::CipherResult;
use crate::crypto::feistel_network::FeistelNetwork;
use log::debug;
use std::sync::Arc;

pub const DEAL_BLOCK_SIZE: usize = 16;

/// DES-based Feistel cipher with 128-bit blocks and 128/192/256-bit keys.
pub struct DEAL {
    feistel_network: FeistelNetwork,
}

impl DEAL {
    pub fn new(key: &[u8]) -> CipherResult<Self> {
        let rounds = DealKeyExpansion::rounds_for_key(key.len())?;
        let feistel_network = FeistelNetwork::new(
            Arc::new(DealKeyExpansion),
            Arc::new(DesAdapter::new(rounds)),
            key,
        )?;
        debug!("DEAL: {}-bit key, {rounds} rounds", key.len() * 8);

        Ok(DEAL { feistel_network })
    }

    pub fn rounds(&self) -> usize {
        self.feistel_network.rounds()
    }

    pub fn round_keys(&self) -> &[Vec<u8>] {
        self.feistel_network.round_keys()
    }
}

impl CipherAlgorithm for DEAL {
    fn block_size(&self) -> usize {
        DEAL_BLOCK_SIZE
    }

    fn encrypt_block(&self, block: &[u8]) -> Vec<u8> {
        self.feistel_network.encrypt(block)
    }

    fn decrypt_block(&self, block: &[u8]) -> Vec<u8> {
        self.feistel_network.decrypt(block)
    }
}

impl SymmetricCipher for DEAL {
    // the round count follows the key length, so the driver is rebuilt
    fn set_key(&mut self, key: &[u8]) -> CipherResult<()> {
        *self = DEAL::new(key)?;
        Ok(())
    }
}
