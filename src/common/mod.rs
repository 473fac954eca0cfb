pub mod bch;
pub mod bit_buffer;
pub mod codec;
pub mod ec;
pub mod error;
pub mod galois;
pub mod iter;
pub mod mask;
pub mod metadata;
pub mod poly;
