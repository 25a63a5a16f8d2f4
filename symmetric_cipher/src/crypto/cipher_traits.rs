use crate::crypto::error::CipherResult;

/// A keyed block cipher: every call consumes and produces exactly one block.
///
/// Implementations are shared across rayon workers, so round keys must be
/// immutable once the cipher is constructed.
pub trait CipherAlgorithm: Send + Sync {
    fn block_size(&self) -> usize;
    fn encrypt_block(&self, block: &[u8]) -> Vec<u8>;
    fn decrypt_block(&self, block: &[u8]) -> Vec<u8>;
}

pub trait SymmetricCipher: CipherAlgorithm {
    /// Replaces the key and regenerates the round keys.
    fn set_key(&mut self, key: &[u8]) -> CipherResult<()>;
}
