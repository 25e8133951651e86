//! Turning raw request fields into a solvable instance.
//!
//! - [`validate`] — ordered well-formedness checks, fail-fast
//! - [`normalize`] — demand padding and advisory capacity sizing

mod error;
mod normalize;
mod raw;
mod validate;

pub use error::ValidationError;
pub use normalize::{normalize, NormalizedInstance};
pub use raw::RawInstance;
pub use validate::{validate, Validated};
