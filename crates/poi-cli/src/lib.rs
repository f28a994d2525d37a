//! Points-of-interest CLI library.
//!
//! Command handlers and output formatting for the `poi-cli` binary. Handlers
//! take the store and the output writer as arguments so they can be driven
//! from tests without a process.

pub mod commands;
pub mod output;
