//! Export of records and reports.

mod records;
mod report;

pub use records::*;
pub use report::*;
