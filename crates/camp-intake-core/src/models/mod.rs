//! Domain models for the camp intake system.

mod classification;
mod patient;
mod report;

pub use classification::*;
pub use patient::*;
pub use report::*;
