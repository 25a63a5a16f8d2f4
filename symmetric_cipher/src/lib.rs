pub mod crypto;
pub mod gf;

pub use crypto::cipher_context::*;
pub use crypto::cipher_traits::*;
pub use crypto::cipher_types::*;
pub use crypto::error::{CipherError, CipherResult};
