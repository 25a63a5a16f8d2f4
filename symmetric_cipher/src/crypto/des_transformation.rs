use crate::crypto::des_tables::{E, P, S_BOXES};
use crate::crypto::encryption_transformation::EncryptionTransformation;
use crate::crypto::utils::{bytes_to_bits, permute_des, xor_bytes};
use bitvec::order::Msb0;
use bitvec::view::BitView;

pub const DES_ROUNDS: usize = 16;

/// DES F-function on a 32-bit half block with a 48-bit round key.
pub struct DesTransformation;

fn substitute(mixed: &[u8]) -> [u8; 4] {
    let bits = bytes_to_bits(mixed);
    let mut output = [0u8; 4];
    let target = output.view_bits_mut::<Msb0>();

    for (box_index, group) in bits.chunks_exact(6).enumerate() {
        let six = group.iter().by_vals().fold(0u8, |acc, bit| (acc << 1) | bit as u8);
        let row = ((six >> 4) & 0b10) | (six & 1);
        let column = (six >> 1) & 0x0F;
        let value = S_BOXES[box_index][row as usize][column as usize];

        for j in 0..4 {
            target.set(box_index * 4 + j, (value >> (3 - j)) & 1 == 1);
        }
    }

    output
}

impl EncryptionTransformation for DesTransformation {
    fn rounds(&self) -> usize {
        DES_ROUNDS
    }

    fn transform(&self, r_block: &[u8], round_key: &[u8]) -> Vec<u8> {
        let expanded = permute_des(r_block, &E);
        let mixed = xor_bytes(&expanded, round_key);
        permute_des(&substitute(&mixed), &P)
    }
}
