//! Solution validation.
//!
//! - [`validate`] — every coverage, duplication and capacity violation
//! - [`is_valid`] — boolean form used as a precondition check

mod validator;

pub use validator::{is_valid, validate};
