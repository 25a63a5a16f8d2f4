//! Arithmetic over GF(2) polynomials and the field GF(2^8) they induce.

pub mod arithmetic;
pub mod irreducible;

pub use arithmetic::GaloisField;

/// `x^8 + x^4 + x^3 + x + 1`
pub const AES_MODULUS: u16 = 0x11B;
