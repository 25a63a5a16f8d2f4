use crate::crypto::des::encrypt_with_subkeys;
use crate::crypto::des_key_expansion::{DES_KEY_SIZE, DesKeyExpansion};
use crate::crypto::encryption_transformation::EncryptionTransformation;

/// DEAL round function: DES-ECB of the right half keyed by the round key.
///
/// The DES key schedule of each round key runs once, when the key is set;
/// `transform` receives the expanded subkeys.
pub struct DesAdapter {
    rounds: usize,
}

impl DesAdapter {
    pub fn new(rounds: usize) -> Self {
        DesAdapter { rounds }
    }
}

fn key_block(key: &[u8]) -> [u8; DES_KEY_SIZE] {
    let mut block = [0u8; DES_KEY_SIZE];
    let len = key.len().min(DES_KEY_SIZE);
    block[..len].copy_from_slice(&key[..len]);
    block
}

impl EncryptionTransformation for DesAdapter {
    fn rounds(&self) -> usize {
        self.rounds
    }

    fn prepare_round_key(&self, round_key: &[u8]) -> Vec<u8> {
        DesKeyExpansion::expand(&key_block(round_key)).concat()
    }

    fn transform(&self, data: &[u8], subkeys: &[u8]) -> Vec<u8> {
        encrypt_with_subkeys(data, subkeys)
    }
}
