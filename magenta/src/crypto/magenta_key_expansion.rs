use symmetric_cipher::crypto::error::{CipherError, CipherResult};
use symmetric_cipher::crypto::key_expansion::KeyExpansion;

/// Orders the 64-bit key blocks `K1..K4` into a palindromic round-key
/// sequence: `K1 K1 K2 K2 K1 K1`, `K1 K2 K3 K3 K2 K1` or
/// `K1 K2 K3 K4 K4 K3 K2 K1`.
pub struct MagentaKeyExpansion;

impl MagentaKeyExpansion {
    pub fn rounds_for_key(key_len: usize) -> CipherResult<usize> {
        match key_len {
            16 | 24 => Ok(6),
            32 => Ok(8),
            actual => Err(CipherError::InvalidKeyLength {
                algorithm: "Magenta",
                expected: "16, 24 or 32",
                actual,
            }),
        }
    }

    fn order(key_len: usize) -> &'static [usize] {
        match key_len {
            16 => &[0, 0, 1, 1, 0, 0],
            24 => &[0, 1, 2, 2, 1, 0],
            _ => &[0, 1, 2, 3, 3, 2, 1, 0],
        }
    }
}

impl KeyExpansion for MagentaKeyExpansion {
    fn generate_round_keys(&self, key: &[u8]) -> CipherResult<Vec<Vec<u8>>> {
        Self::rounds_for_key(key.len())?;
        let blocks: Vec<&[u8]> = key.chunks_exact(8).collect();
        Ok(Self::order(key.len())
            .iter()
            .map(|&i| blocks[i].to_vec())
            .collect())
    }
}
