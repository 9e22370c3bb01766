//! Error types for tree construction and querying.
//!
//! Every failure here is a programmer error (querying an empty tree, asking for
//! more dimensions than the points provide) and is surfaced immediately; there is
//! no retry logic anywhere in this crate. Range queries and traversals never fail,
//! an empty result is a valid answer for them.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Nearest-neighbor search on a tree with no root. An empty tree has no
    /// nearest neighbor, so this cannot be answered with a sentinel value.
    #[error("nearest-neighbor query on an empty tree")]
    EmptyTree,

    /// The requested dimensionality is zero or larger than the number of
    /// coordinates an input point actually provides.
    #[error("invalid dimensionality {requested}: points provide {available} coordinate(s)")]
    InvalidDimension { requested: usize, available: usize },
}
