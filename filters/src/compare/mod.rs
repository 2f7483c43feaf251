//! Product comparison list and its persistence.

mod compare_list;
pub use compare_list::{CompareBlockReason, CompareList, CompareListItem};

pub mod product_identity;
pub mod storage;
