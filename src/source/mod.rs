//! Turning the process environment or document text into a [`Map`](crate::Map).

mod env;
mod error;
mod parse;

pub use env::{env_map, ENV_LABEL};
pub use error::SourceError;
pub use parse::{parse_json, parse_toml};
