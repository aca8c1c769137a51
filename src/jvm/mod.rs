//! Module containing the class file model and the codec that reads and writes it.

pub mod attribute;
pub mod bytecode;
pub mod class_file;
pub mod constant_pool;
pub mod errors;
pub mod method;

pub use attribute::Attribute;
pub use class_file::{ClassFile, Version};
pub use constant_pool::ConstantPool;
pub use errors::{EncodeError, Error};
pub use method::Method;

/// A [`Result`](std::result::Result) type for decoding and resolving class file elements.
pub type Result<T> = std::result::Result<T, Error>;
