//! Population reporting: summary statistics and the triaged alert list.
//!
//! Both functions read the caller's records and never mutate them.

mod alerts;
mod summary;

pub use alerts::*;
pub use summary::*;
