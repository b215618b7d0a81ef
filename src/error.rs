//! Error types for the reference database.
//!
//! Only two kinds of failure ever reach callers: rejected configuration
//! (detected before a build starts) and query targets that fall outside
//! the paper. Numeric degeneracies inside the axiom constructors are the
//! expected fate of most parent combinations and are absorbed locally by
//! discarding the candidate; cancellation of a build is not an error and
//! returns a smaller but consistent database.

use thiserror::Error;

/// Errors surfaced to callers of the database.
#[derive(Error, Debug)]
pub enum Error {
    /// An option value was rejected at build time. Not recoverable
    /// without reconfiguring.
    #[error("configuration error: {0}")]
    Config(String),

    /// A query target was outside the paper or degenerate. The database
    /// is unaffected.
    #[error("{0}")]
    TargetOutOfRange(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
