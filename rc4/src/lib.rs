pub mod rc4;

pub use rc4::Rc4;
