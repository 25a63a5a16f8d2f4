use crate::crypto::error::{CipherError, CipherResult};
use crate::gf::AES_MODULUS;
use crate::gf::irreducible::is_field_modulus;

/// GF(2^8) under a modulus that has been checked to be irreducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GaloisField {
    modulus: u16,
}

impl Default for GaloisField {
    fn default() -> Self {
        GaloisField {
            modulus: AES_MODULUS,
        }
    }
}

impl GaloisField {
    pub fn new(modulus: u16) -> CipherResult<Self> {
        if !is_field_modulus(modulus) {
            return Err(CipherError::invalid_argument(format!(
                "modulus {modulus:#05x} is not an irreducible polynomial of degree 8"
            )));
        }
        Ok(GaloisField { modulus })
    }

    pub fn modulus(&self) -> u16 {
        self.modulus
    }

    pub fn add(&self, a: u8, b: u8) -> u8 {
        a ^ b
    }

    /// Shift-and-add multiplication, reducing whenever bit 8 appears.
    pub fn multiply(&self, a: u8, mut b: u8) -> u8 {
        let mut result = 0u8;
        let mut shifted = a as u16;
        while b > 0 {
            if b & 1 != 0 {
                result ^= shifted as u8;
            }
            shifted <<= 1;
            if shifted & 0x100 != 0 {
                shifted ^= self.modulus;
            }
            b >>= 1;
        }
        result
    }

    pub fn power(&self, base: u8, mut exponent: u32) -> u8 {
        let mut result = 1u8;
        let mut base = base;
        while exponent > 0 {
            if exponent & 1 != 0 {
                result = self.multiply(result, base);
            }
            base = self.multiply(base, base);
            exponent >>= 1;
        }
        result
    }

    /// `a^254`, since every non-zero element satisfies `a^255 = 1`.
    pub fn inverse(&self, a: u8) -> CipherResult<u8> {
        if a == 0 {
            return Err(CipherError::Domain(
                "zero has no multiplicative inverse".to_string(),
            ));
        }
        Ok(self.power(a, 254))
    }
}

/// One-off product under an unchecked modulus; validates it first.
pub fn multiply(a: u8, b: u8, modulus: u16) -> CipherResult<u8> {
    Ok(GaloisField::new(modulus)?.multiply(a, b))
}

pub fn inverse(a: u8, modulus: u16) -> CipherResult<u8> {
    GaloisField::new(modulus)?.inverse(a)
}
