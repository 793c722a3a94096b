//! Patient intake: raw field validation, record normalization and the
//! session's record collection.

mod collection;
mod normalizer;
pub mod validation;

pub use collection::*;
pub use normalizer::*;
pub use validation::{ValidationError, ValidationResult};
