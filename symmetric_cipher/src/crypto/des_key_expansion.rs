use crate::crypto::des_tables::{PC1, PC2, SHIFT_BITS};
use crate::crypto::error::{CipherError, CipherResult};
use crate::crypto::key_expansion::KeyExpansion;
use crate::crypto::utils::{bits_to_bytes, bytes_to_bits, permute_des};

pub const DES_KEY_SIZE: usize = 8;

pub struct DesKeyExpansion;

impl DesKeyExpansion {
    /// Sixteen 48-bit subkeys for an already validated key.
    pub fn expand(key: &[u8; DES_KEY_SIZE]) -> Vec<Vec<u8>> {
        // PC-1 drops parity bits: 64 -> 56
        let bits = bytes_to_bits(&permute_des(key, &PC1));
        let mut c = bits[..28].to_bitvec();
        let mut d = bits[28..56].to_bitvec();

        let mut round_keys = Vec::with_capacity(SHIFT_BITS.len());
        for &shift in &SHIFT_BITS {
            c.rotate_left(shift);
            d.rotate_left(shift);

            let mut cd = c.clone();
            cd.extend_from_bitslice(&d);

            round_keys.push(permute_des(&bits_to_bytes(&cd), &PC2));
        }

        round_keys
    }
}

impl KeyExpansion for DesKeyExpansion {
    fn generate_round_keys(&self, key: &[u8]) -> CipherResult<Vec<Vec<u8>>> {
        let key: &[u8; DES_KEY_SIZE] =
            key.try_into().map_err(|_| CipherError::InvalidKeyLength {
                algorithm: "DES",
                expected: "8",
                actual: key.len(),
            })?;
        Ok(Self::expand(key))
    }
}
