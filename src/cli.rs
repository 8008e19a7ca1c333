//! Command line interface for the `lucerna` binary.

pub mod args;
pub mod commands;
pub mod output;
