//! CLI command implementations.

pub(crate) mod analyze;
pub(crate) mod bars;
pub(crate) mod prune;
pub(crate) mod stream;
pub(crate) mod ticks;
