use crate::crypto::error::CipherResult;

pub trait KeyExpansion: Send + Sync {
    fn generate_round_keys(&self, key: &[u8]) -> CipherResult<Vec<Vec<u8>>>;
}
