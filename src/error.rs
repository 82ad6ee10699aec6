//! Error types for statline.

use thiserror::Error;

/// Errors from compound key construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The base name plus subscript reservations exceeds the fixed key budget.
    ///
    /// Each subscript reserves 4 bytes regardless of its actual digit count,
    /// so `needed` can exceed the rendered length of the key.
    #[error(
        "compound key for `{base}` needs {needed} bytes but the limit is {max}, \
         shorten the base name"
    )]
    TooLong {
        base: String,
        needed: usize,
        max: usize,
    },
}
