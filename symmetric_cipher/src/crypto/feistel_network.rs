use crate::crypto::encryption_transformation::EncryptionTransformation;
use crate::crypto::error::{CipherError, CipherResult};
use crate::crypto::key_expansion::KeyExpansion;
use crate::crypto::utils::{permute_des, xor_bytes};
use std::sync::Arc;

/// Generic balanced Feistel driver built from a key schedule and a round
/// function.
///
/// Runs `IP -> rounds -> swap halves -> FP`. Because of the closing swap,
/// decryption is the same procedure with the round keys reversed. The
/// permutations are optional; DES supplies them, DEAL and Magenta do not.
#[derive(Clone)]
pub struct FeistelNetwork {
    key_expansion: Arc<dyn KeyExpansion>,
    transformation: Arc<dyn EncryptionTransformation>,
    initial_permutation: Option<&'static [u8]>,
    final_permutation: Option<&'static [u8]>,
    round_keys: Vec<Vec<u8>>,
    prepared_keys: Vec<Vec<u8>>,
}

impl FeistelNetwork {
    pub fn new(
        key_expansion: Arc<dyn KeyExpansion>,
        transformation: Arc<dyn EncryptionTransformation>,
        key: &[u8],
    ) -> CipherResult<Self> {
        let mut network = Self {
            key_expansion,
            transformation,
            initial_permutation: None,
            final_permutation: None,
            round_keys: Vec::new(),
            prepared_keys: Vec::new(),
        };
        network.set_key(key)?;
        Ok(network)
    }

    pub fn with_permutations(
        key_expansion: Arc<dyn KeyExpansion>,
        transformation: Arc<dyn EncryptionTransformation>,
        key: &[u8],
        initial: &'static [u8],
        final_: &'static [u8],
    ) -> CipherResult<Self> {
        let mut network = Self::new(key_expansion, transformation, key)?;
        network.initial_permutation = Some(initial);
        network.final_permutation = Some(final_);
        Ok(network)
    }

    /// Reruns the key schedule. A schedule shorter than the round count is
    /// rejected; extra keys are ignored.
    pub fn set_key(&mut self, key: &[u8]) -> CipherResult<()> {
        let mut round_keys = self.key_expansion.generate_round_keys(key)?;
        let rounds = self.transformation.rounds();
        if round_keys.len() < rounds {
            return Err(CipherError::invalid_argument(format!(
                "key schedule produced {} round keys, the round function needs {rounds}",
                round_keys.len()
            )));
        }
        round_keys.truncate(rounds);

        self.prepared_keys = round_keys
            .iter()
            .map(|key| self.transformation.prepare_round_key(key))
            .collect();
        self.round_keys = round_keys;
        Ok(())
    }

    pub fn rounds(&self) -> usize {
        self.transformation.rounds()
    }

    pub fn round_keys(&self) -> &[Vec<u8>] {
        &self.round_keys
    }

    pub fn encrypt(&self, block: &[u8]) -> Vec<u8> {
        let keys = self.prepared_keys.iter().map(Vec::as_slice);
        feistel_rounds(self.transformation.as_ref(), self.permutations(), block, keys)
    }

    pub fn decrypt(&self, block: &[u8]) -> Vec<u8> {
        let keys = self.prepared_keys.iter().rev().map(Vec::as_slice);
        feistel_rounds(self.transformation.as_ref(), self.permutations(), block, keys)
    }

    fn permutations(&self) -> Option<(&'static [u8], &'static [u8])> {
        self.initial_permutation.zip(self.final_permutation)
    }
}

/// One pass of the driver with explicit round keys, in the order given.
pub(crate) fn feistel_rounds<'a>(
    transformation: &dyn EncryptionTransformation,
    permutations: Option<(&[u8], &[u8])>,
    block: &[u8],
    keys: impl Iterator<Item = &'a [u8]>,
) -> Vec<u8> {
    debug_assert_eq!(block.len() % 2, 0, "Feistel block must split into equal halves");

    let block = match permutations {
        Some((initial, _)) => permute_des(block, initial),
        None => block.to_vec(),
    };

    let (left, right) = block.split_at(block.len() / 2);
    let mut left = left.to_vec();
    let mut right = right.to_vec();

    for round_key in keys {
        let feistel_out = transformation.transform(&right, round_key);
        let new_right = xor_bytes(&left, &feistel_out);
        left = std::mem::replace(&mut right, new_right);
    }

    let swapped = [right, left].concat();
    match permutations {
        Some((_, final_)) => permute_des(&swapped, final_),
        None => swapped,
    }
}
