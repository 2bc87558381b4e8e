//! Input handling module

pub mod glob_resolver;

pub use glob_resolver::{resolve_inputs, InputSource};
