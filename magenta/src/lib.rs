pub mod crypto;

pub use crypto::magenta::Magenta;
