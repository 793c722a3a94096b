//! Health metric derivation.
//!
//! Pipeline: raw text → units / BMI → classifier

mod bmi;
mod classifier;
mod units;

pub use bmi::*;
pub use classifier::*;
pub use units::*;
