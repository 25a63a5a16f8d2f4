use symmetric_cipher::crypto::encryption_transformation::EncryptionTransformation;

pub const HALF_BLOCK: usize = 8;

/// Magenta's F-function: `E3(right || round_key)`.
pub struct MagentaTransformation {
    sbox: &'static [u8; 256],
    rounds: usize,
}

impl MagentaTransformation {
    pub fn new(sbox: &'static [u8; 256], rounds: usize) -> Self {
        MagentaTransformation { sbox, rounds }
    }

    fn f(&self, x: u8) -> u8 {
        self.sbox[x as usize]
    }

    fn a(&self, x: u8, y: u8) -> u8 {
        self.f(x ^ self.f(y))
    }

    /// Pairs byte `i` with byte `i + 8` and interleaves the PE outputs.
    fn pi(&self, x: &[u8; 16]) -> [u8; 16] {
        let mut out = [0u8; 16];
        for i in 0..HALF_BLOCK {
            out[2 * i] = self.a(x[i], x[i + HALF_BLOCK]);
            out[2 * i + 1] = self.a(x[i + HALF_BLOCK], x[i]);
        }
        out
    }

    fn t(&self, x: &[u8; 16]) -> [u8; 16] {
        (0..4).fold(*x, |state, _| self.pi(&state))
    }

    /// `C(1) = T(X)`, `C(k) = T(X ^ S(C(k - 1)))`.
    fn c(&self, x: &[u8; 16], iterations: usize) -> [u8; 16] {
        let mut c = self.t(x);
        for _ in 1..iterations {
            let s = even_odd(&c);
            let mut mixed = *x;
            for (m, s) in mixed.iter_mut().zip(s) {
                *m ^= s;
            }
            c = self.t(&mixed);
        }
        c
    }

    pub fn e3(&self, x: &[u8; 16]) -> [u8; HALF_BLOCK] {
        let c = self.c(x, 3);
        let mut even = [0u8; HALF_BLOCK];
        even.copy_from_slice(&even_odd(&c)[..HALF_BLOCK]);
        even
    }
}

/// Even-indexed bytes followed by odd-indexed bytes.
fn even_odd(x: &[u8; 16]) -> [u8; 16] {
    let mut out = [0u8; 16];
    for i in 0..HALF_BLOCK {
        out[i] = x[2 * i];
        out[i + HALF_BLOCK] = x[2 * i + 1];
    }
    out
}

impl EncryptionTransformation for MagentaTransformation {
    fn rounds(&self) -> usize {
        self.rounds
    }

    fn transform(&self, input: &[u8], round_key: &[u8]) -> Vec<u8> {
        let mut x = [0u8; 16];
        for (dst, src) in x.iter_mut().zip(input.iter().chain(round_key)) {
            *dst = *src;
        }
        self.e3(&x).to_vec()
    }
}
