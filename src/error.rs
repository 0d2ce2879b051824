use crate::access::AccessError;
use crate::source::SourceError;
use thiserror::Error;

/// Top-level error type for the dragon-access library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("access error: {0}")]
    Access(#[from] AccessError),

    #[error("source error: {0}")]
    Source(#[from] SourceError),
}
