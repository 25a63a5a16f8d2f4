use bitvec::order::{BitOrder, Lsb0, Msb0};
use bitvec::prelude::BitVec;
use bitvec::view::BitView;

/// Numbering of the source positions stored in a permutation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexBase {
    Zero,
    One,
}

/// Bit addressing inside a byte: `Big` counts from the most significant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

/// Builds `ceil(table.len() / 8)` bytes where output bit `i` is source bit
/// `table[i]`. Positions outside the source leave the output bit cleared.
pub fn permute_bits(data: &[u8], table: &[u8], base: IndexBase, endian: Endian) -> Vec<u8> {
    match endian {
        Endian::Big => permute_with_order::<Msb0>(data, table, base),
        Endian::Little => permute_with_order::<Lsb0>(data, table, base),
    }
}

fn permute_with_order<O: BitOrder>(data: &[u8], table: &[u8], base: IndexBase) -> Vec<u8> {
    let source = data.view_bits::<O>();
    let mut output = vec![0u8; table.len().div_ceil(8)];
    let target = output.view_bits_mut::<O>();

    for (i, &position) in table.iter().enumerate() {
        let index = match base {
            IndexBase::Zero => Some(position as usize),
            IndexBase::One => (position as usize).checked_sub(1),
        };
        if let Some(index) = index.filter(|&index| index < source.len()) {
            target.set(i, source[index]);
        }
    }

    output
}

/// DES-style tables: 1-based, most significant bit first.
pub fn permute_des(data: &[u8], table: &[u8]) -> Vec<u8> {
    permute_bits(data, table, IndexBase::One, Endian::Big)
}

pub fn bytes_to_bits(input: &[u8]) -> BitVec<u8, Msb0> {
    BitVec::from_slice(input)
}

/// Packs bits MSB-first; a trailing partial byte is zero-filled on the right.
pub fn bits_to_bytes(bits: &BitVec<u8, Msb0>) -> Vec<u8> {
    let mut bits = bits.clone();
    bits.set_uninitialized(false);
    bits.into_vec()
}

pub fn xor_bytes(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b).map(|(x, y)| x ^ y).collect()
}

pub fn xor_in_place(target: &mut [u8], other: &[u8]) {
    for (t, o) in target.iter_mut().zip(other) {
        *t ^= o;
    }
}
