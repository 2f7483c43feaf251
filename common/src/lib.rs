//! Common library exports shared between the state codec and the filter helpers.

extern crate serde;


pub mod filter_request;
pub mod category_subset;
pub mod guided_wizard;
pub mod hash_state;
pub mod product;
