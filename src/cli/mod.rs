//! Command-line interface.

mod args;
pub mod build;
pub mod serve;

pub use args::{BuildArgs, Cli, Commands};
