//! Shared utilities.

pub mod fs;
pub mod mime;
pub mod platform;
