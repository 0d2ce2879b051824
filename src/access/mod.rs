//! Typed, path-labeled reads over untyped key-value data.

mod accessor;
mod coerce;
mod error;

pub use accessor::TypedAccessor;
pub use error::AccessError;
