//! Filter assembly for category pages: merging, subset and wizard conversion,
//! the compare list and the product search payload.

pub mod config;
pub mod merge;
pub mod subsets;
pub mod nudge;
pub mod wizard;
pub mod compare;
pub mod search;
