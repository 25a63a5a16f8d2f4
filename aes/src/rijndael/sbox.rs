use log::debug;
use once_cell::sync::OnceCell;
use symmetric_cipher::gf::GaloisField;

const AFFINE_CONSTANT: u8 = 0x63;

/// Forward and inverse substitution tables for one field.
#[derive(Debug)]
pub struct SBoxes {
    forward: [u8; 256],
    inverse: [u8; 256],
}

// Every degree-8 modulus has bit 8 set, so its low byte identifies it.
static CACHE: [OnceCell<SBoxes>; 256] = [const { OnceCell::new() }; 256];

impl SBoxes {
    /// Tables for `field`, built on first request and shared afterwards.
    pub fn for_field(field: GaloisField) -> &'static SBoxes {
        CACHE[(field.modulus() & 0xFF) as usize].get_or_init(|| SBoxes::build(field))
    }

    fn build(field: GaloisField) -> SBoxes {
        debug!("building Rijndael S-boxes for modulus {:#05x}", field.modulus());
        let mut forward = [0u8; 256];
        let mut inverse = [0u8; 256];
        for x in 0..=255u8 {
            // zero maps to zero before the affine step
            let b = field.inverse(x).unwrap_or(0);
            let s = b
                ^ b.rotate_left(1)
                ^ b.rotate_left(2)
                ^ b.rotate_left(3)
                ^ b.rotate_left(4)
                ^ AFFINE_CONSTANT;
            forward[x as usize] = s;
            inverse[s as usize] = x;
        }
        SBoxes { forward, inverse }
    }

    pub fn substitute(&self, x: u8) -> u8 {
        self.forward[x as usize]
    }

    pub fn invert(&self, x: u8) -> u8 {
        self.inverse[x as usize]
    }
}

pub fn sbox(x: u8, field: GaloisField) -> u8 {
    SBoxes::for_field(field).substitute(x)
}

pub fn inv_sbox(x: u8, field: GaloisField) -> u8 {
    SBoxes::for_field(field).invert(x)
}
