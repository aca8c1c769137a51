//! Methods declared in a class file.

use std::borrow::Cow;

use bitflags::bitflags;

use super::{Attribute, ConstantPool, Error};
use crate::macros::see_jvm_spec;

/// A method declared in a class file.
#[doc = see_jvm_spec!(4, 6)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// The access flags of the method.
    pub access_flags: AccessFlags,
    /// The index of a `CONSTANT_Utf8` entry holding the name of the method.
    pub name_index: u16,
    /// The index of a `CONSTANT_Utf8` entry holding the descriptor of the method.
    pub descriptor_index: u16,
    /// The attributes of the method, in the order they are stored.
    pub attributes: Vec<Attribute>,
}

impl Method {
    /// Creates a method without attributes.
    #[must_use]
    pub const fn new(access_flags: AccessFlags, name_index: u16, descriptor_index: u16) -> Self {
        Self {
            access_flags,
            name_index,
            descriptor_index,
            attributes: Vec::new(),
        }
    }

    /// Resolves the name of the method in `constant_pool`.
    /// # Errors
    /// See [`ConstantPool::get_str`].
    pub fn name<'a>(&self, constant_pool: &'a ConstantPool) -> Result<Cow<'a, str>, Error> {
        constant_pool.get_str(self.name_index)
    }

    /// Resolves the descriptor of the method in `constant_pool`.
    /// # Errors
    /// See [`ConstantPool::get_str`].
    pub fn descriptor<'a>(&self, constant_pool: &'a ConstantPool) -> Result<Cow<'a, str>, Error> {
        constant_pool.get_str(self.descriptor_index)
    }
}

bitflags! {
    /// The access flags of a [`Method`].
    #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
    pub struct AccessFlags: u16 {
        /// Declared `public`.
        const PUBLIC = 0x0001;
        /// Declared `private`.
        const PRIVATE = 0x0002;
        /// Declared `protected`.
        const PROTECTED = 0x0004;
        /// Declared `static`.
        const STATIC = 0x0008;
        /// Declared `final`; must not be overridden.
        const FINAL = 0x0010;
        /// Declared `synchronized`.
        const SYNCHRONIZED = 0x0020;
        /// A bridge method generated by the compiler.
        const BRIDGE = 0x0040;
        /// Takes a variable number of arguments.
        const VARARGS = 0x0080;
        /// Declared `native`.
        const NATIVE = 0x0100;
        /// Declared `abstract`; no implementation is provided.
        const ABSTRACT = 0x0400;
        /// Declared `strictfp`.
        const STRICT = 0x0800;
        /// Not present in the source code.
        const SYNTHETIC = 0x1000;
    }
}
