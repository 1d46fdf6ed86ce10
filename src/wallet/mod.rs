pub mod encoder;

pub use encoder::{encode, encode_bytes, parse_byte_literal, ConversionError, KEYPAIR_LEN};
