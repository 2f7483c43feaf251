//! Category page state encoding for URL fragments.

pub mod lz_string;
pub mod data_definitions;
pub mod hash_codec;
