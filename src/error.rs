/*!
 * Error kinds reported by range generation, counting and the sampling loop.
 */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Command line value (or pool parameter) out of its allowed domain.
    #[error("{0}")]
    InvalidArgument(String),
    /// Internal helper called against its contract.
    #[error("{0}")]
    InvalidInput(String),
    #[error("unable to allocate memory for {ranges} ranges")]
    Allocation { ranges: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
