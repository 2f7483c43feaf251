//! Serializable state types carried in URLs.

pub mod url_param;
