use crate::rijndael::sbox::SBoxes;
use symmetric_cipher::gf::GaloisField;

const MIX: [u8; 4] = [0x02, 0x01, 0x01, 0x03];
const INV_MIX: [u8; 4] = [0x0E, 0x09, 0x0D, 0x0B];

/// One Rijndael round over a column-major state: byte `4c + r` is row `r`
/// of column `c`.
#[derive(Debug, Clone, Copy)]
pub struct RijndaelRound {
    field: GaloisField,
    sbox: &'static SBoxes,
    columns: usize,
    shifts: [usize; 4],
}

impl RijndaelRound {
    pub fn new(field: GaloisField, block_size: usize) -> Self {
        let columns = block_size / 4;
        let shifts = match columns {
            8 => [0, 1, 3, 4],
            _ => [0, 1, 2, 3],
        };
        RijndaelRound {
            field,
            sbox: SBoxes::for_field(field),
            columns,
            shifts,
        }
    }

    pub fn round(&self, state: &mut [u8], round_key: &[u8]) {
        self.sub_bytes(state);
        self.shift_rows(state);
        self.mix_columns(state, &MIX);
        add_round_key(state, round_key);
    }

    pub fn final_round(&self, state: &mut [u8], round_key: &[u8]) {
        self.sub_bytes(state);
        self.shift_rows(state);
        add_round_key(state, round_key);
    }

    pub fn inverse_round(&self, state: &mut [u8], round_key: &[u8]) {
        self.inverse_final_round(state, round_key);
        self.mix_columns(state, &INV_MIX);
    }

    pub fn inverse_final_round(&self, state: &mut [u8], round_key: &[u8]) {
        self.inv_shift_rows(state);
        self.inv_sub_bytes(state);
        add_round_key(state, round_key);
    }

    fn sub_bytes(&self, state: &mut [u8]) {
        for byte in state.iter_mut() {
            *byte = self.sbox.substitute(*byte);
        }
    }

    fn inv_sub_bytes(&self, state: &mut [u8]) {
        for byte in state.iter_mut() {
            *byte = self.sbox.invert(*byte);
        }
    }

    fn shift_rows(&self, state: &mut [u8]) {
        let nb = self.columns;
        let original = state.to_vec();
        for row in 1..4 {
            for column in 0..nb {
                state[column * 4 + row] = original[((column + self.shifts[row]) % nb) * 4 + row];
            }
        }
    }

    fn inv_shift_rows(&self, state: &mut [u8]) {
        let nb = self.columns;
        let original = state.to_vec();
        for row in 1..4 {
            for column in 0..nb {
                state[((column + self.shifts[row]) % nb) * 4 + row] = original[column * 4 + row];
            }
        }
    }

    /// Multiplies every column by `coefficients` (lowest power first) modulo
    /// `x^4 + 1`.
    fn mix_columns(&self, state: &mut [u8], coefficients: &[u8; 4]) {
        for column in state.chunks_exact_mut(4) {
            let original = [column[0], column[1], column[2], column[3]];
            for (k, out) in column.iter_mut().enumerate() {
                *out = (0..4).fold(0, |acc, i| {
                    acc ^ self.field.multiply(coefficients[i], original[(k + 4 - i) % 4])
                });
            }
        }
    }
}

pub fn add_round_key(state: &mut [u8], round_key: &[u8]) {
    for (byte, key) in state.iter_mut().zip(round_key) {
        *byte ^= key;
    }
}
