pub mod magenta;
pub mod magenta_key_expansion;
pub mod magenta_sbox;
pub mod magenta_transformation;
