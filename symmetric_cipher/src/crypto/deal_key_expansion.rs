use crate::crypto::des::DES;
use crate::crypto::des_key_expansion::DES_KEY_SIZE;
use crate::crypto::error::{CipherError, CipherResult};
use crate::crypto::key_expansion::KeyExpansion;
use crate::crypto::utils::{xor_bytes, xor_in_place};

/// Fixed DES key used to derive DEAL round keys, in little-endian byte order.
const DEAL_SCHEDULE_KEY: u64 = 0x0123_4567_89ab_cdef;
const UPPER_BIT: u64 = 0x8000_0000_0000_0000;

pub struct DealKeyExpansion;

impl DealKeyExpansion {
    pub fn rounds_for_key(key_len: usize) -> CipherResult<usize> {
        match key_len {
            16 | 24 => Ok(6),
            32 => Ok(8),
            actual => Err(CipherError::InvalidKeyLength {
                algorithm: "DEAL",
                expected: "16, 24 or 32",
                actual,
            }),
        }
    }
}

impl KeyExpansion for DealKeyExpansion {
    /// `RK_0 = E(K_0)`; `RK_i = E(K_{i mod s} ^ RK_{i-1})` while `i < s`, then
    /// the same with a walking high bit XORed in, where `s` is the number of
    /// 64-bit key blocks and `E` is DES under the fixed schedule key.
    fn generate_round_keys(&self, key: &[u8]) -> CipherResult<Vec<Vec<u8>>> {
        let rounds = Self::rounds_for_key(key.len())?;
        let key_blocks: Vec<&[u8]> = key.chunks(DES_KEY_SIZE).collect();
        let block_count = key_blocks.len();

        let des = DES::new(&DEAL_SCHEDULE_KEY.to_le_bytes())?;

        let mut round_keys: Vec<Vec<u8>> = Vec::with_capacity(rounds);
        round_keys.push(des.encrypt(key_blocks[0]));

        for i in 1..rounds {
            let mut block = xor_bytes(key_blocks[i % block_count], &round_keys[i - 1]);
            if i >= block_count {
                let constant = UPPER_BIT >> (i - block_count);
                xor_in_place(&mut block, &constant.to_le_bytes());
            }
            round_keys.push(des.encrypt(&block));
        }

        Ok(round_keys)
    }
}
