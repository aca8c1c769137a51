//! Attributes attached to class files and methods.

use std::borrow::Cow;

use super::{ConstantPool, Error};
use crate::macros::see_jvm_spec;

/// A named attribute with an uninterpreted body.
///
/// The length written before the body is always derived from [`Self::data`].
#[doc = see_jvm_spec!(4, 7)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Attribute {
    /// The index of a `CONSTANT_Utf8` entry holding the name of the attribute.
    pub name_index: u16,
    /// The body of the attribute.
    pub data: Vec<u8>,
}

impl Attribute {
    /// Creates an attribute named by the entry at `name_index`.
    #[must_use]
    pub const fn new(name_index: u16, data: Vec<u8>) -> Self {
        Self { name_index, data }
    }

    /// Resolves the name of the attribute in `constant_pool`.
    /// # Errors
    /// See [`ConstantPool::get_str`].
    pub fn name<'a>(&self, constant_pool: &'a ConstantPool) -> Result<Cow<'a, str>, Error> {
        constant_pool.get_str(self.name_index)
    }
}
