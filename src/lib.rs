#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]
#![doc = include_str!("../README.md")]

/// Module containing the typed class file model and its codec.
pub mod jvm;
pub(crate) mod macros;
