pub mod access;
mod error;
pub mod source;
pub mod value;

pub use access::{AccessError, TypedAccessor};
pub use error::Error;
pub use source::SourceError;
pub use value::{Map, Value};
