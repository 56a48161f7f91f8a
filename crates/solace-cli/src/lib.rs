//! Command handlers behind the `solace` binary.

pub mod answers;
pub mod commands;
