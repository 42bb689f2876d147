//! Error types for quantpair core types.

use thiserror::Error;

/// A tick that violates the data model invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TickError {
    /// The symbol is empty.
    #[error("Tick has an empty symbol")]
    EmptySymbol,

    /// The price is not a positive finite number.
    #[error("Invalid tick price: {0}")]
    InvalidPrice(f64),

    /// The quantity is negative or not finite.
    #[error("Invalid tick quantity: {0}")]
    InvalidQty(f64),

    /// The timestamp is outside the representable calendar range.
    #[error("Invalid tick timestamp: {0}")]
    InvalidTimestamp(i64),
}

/// Invalid analytics configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    /// No symbols were supplied.
    #[error("At least one symbol is required")]
    NoSymbols,

    /// The rolling window is zero.
    #[error("Rolling window must be at least 1, got {0}")]
    InvalidWindow(usize),

    /// The z-score threshold is negative or not finite.
    #[error("Z-score threshold must be a finite non-negative number, got {0}")]
    InvalidThreshold(f64),
}
