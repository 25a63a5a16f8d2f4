use log::debug;
use once_cell::sync::OnceCell;
use symmetric_cipher::crypto::error::CipherResult;
use symmetric_cipher::gf::GaloisField;

/// `x^8 + x^6 + x^5 + x^2 + 1`
pub const MAGENTA_MODULUS: u16 = 0x165;

static SBOX: OnceCell<[u8; 256]> = OnceCell::new();

/// `f(x) = alpha^x` for `x < 255` with `alpha = 2`, and `f(255) = 0`.
pub fn sbox() -> CipherResult<&'static [u8; 256]> {
    SBOX.get_or_try_init(|| {
        let field = GaloisField::new(MAGENTA_MODULUS)?;
        debug!("building Magenta S-box over {MAGENTA_MODULUS:#05x}");
        let mut table = [0u8; 256];
        for (x, entry) in table.iter_mut().enumerate().take(255) {
            *entry = field.power(2, x as u32);
        }
        Ok(table)
    })
}
