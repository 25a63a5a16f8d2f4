//! Rijndael with 128/192/256-bit blocks and keys over any GF(2^8) modulus.

pub mod cipher;
pub mod key_schedule;
pub mod round;
pub mod sbox;

pub const BLOCK_SIZES: [usize; 3] = [16, 24, 32];
pub const KEY_SIZES: [usize; 3] = [16, 24, 32];

/// `Nr = max(Nb, Nk) + 6`, with block and key given in bytes.
pub fn rounds_for(block_size: usize, key_size: usize) -> usize {
    block_size.max(key_size) / 4 + 6
}
