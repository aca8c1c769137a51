//! The top-level structure of a JVM class file.

use std::{borrow::Cow, io::Write};

use bitflags::bitflags;

use super::{
    Attribute, ConstantPool, EncodeError, Error, Method,
    bytecode::{ByteReader, FromBytecode, Sink, ToBytecode, VecSink, WriterSink},
    constant_pool::{ClassInfo, Entry, Utf8Info},
};
use crate::macros::see_jvm_spec;

/// The binary name of `java.lang.Object`.
pub const JAVA_LANG_OBJECT: &str = "java/lang/Object";

/// A decoded JVM class file.
///
/// Indices into the constant pool are kept as they are stored. They are resolved only when
/// one of the lookup methods is called.
#[doc = see_jvm_spec!(4, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFile {
    /// The version of the class file.
    pub version: Version,
    /// The constant pool.
    pub constant_pool: ConstantPool,
    /// The access flags of the class.
    pub access_flags: AccessFlags,
    /// The index of the `CONSTANT_Class` entry for this class.
    pub this_class: u16,
    /// The index of the `CONSTANT_Class` entry for the superclass.
    pub super_class: u16,
    /// The methods declared by the class.
    pub methods: Vec<Method>,
    /// The attributes of the class.
    pub attributes: Vec<Attribute>,
}

impl ClassFile {
    /// Creates a public class named `class_name` extending `super_name`, with no members.
    ///
    /// The constant pool holds the name of the class at `1`, the class itself at `2`, the name
    /// of the superclass at `3`, and the superclass at `4`.
    #[must_use]
    pub fn new(class_name: &str, super_name: &str) -> Self {
        let mut constant_pool = ConstantPool::new();
        let name_index = constant_pool.push(Entry::Utf8(Utf8Info::from(class_name)));
        let this_class = constant_pool.push(Entry::Class(ClassInfo { name_index }));
        let super_name_index = constant_pool.push(Entry::Utf8(Utf8Info::from(super_name)));
        let super_class = constant_pool.push(Entry::Class(ClassInfo {
            name_index: super_name_index,
        }));
        Self {
            version: Version::DEFAULT,
            constant_pool,
            access_flags: AccessFlags::DEFAULT,
            this_class,
            super_class,
            methods: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Creates a public class named `class_name` extending `java/lang/Object`.
    #[must_use]
    pub fn with_object_super(class_name: &str) -> Self {
        Self::new(class_name, JAVA_LANG_OBJECT)
    }

    /// Decodes a class file from the start of `bytes`. Bytes after the last attribute are
    /// ignored.
    /// # Errors
    /// See [`Error`] for more information.
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_reader(&mut ByteReader::new(bytes))
    }

    /// Encodes the class file into `sink`.
    /// # Errors
    /// See [`EncodeError`] for more information.
    pub fn to_sink<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<(), EncodeError> {
        self.write_to(sink)
    }

    /// Encodes the class file into `writer`.
    /// # Errors
    /// See [`EncodeError`] for more information.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<W, EncodeError> {
        let mut sink = WriterSink::new(writer);
        self.write_to(&mut sink)?;
        Ok(sink.into_inner())
    }

    /// Encodes the class file into a new buffer.
    /// # Errors
    /// [`EncodeError::LengthOverflow`] if a list or a body is too long for its length prefix.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut sink = VecSink::new();
        self.write_to(&mut sink)?;
        Ok(sink.into_inner())
    }

    /// Resolves the binary name of this class.
    /// # Errors
    /// See [`ConstantPool::get_class_name`].
    pub fn class_name(&self) -> Result<Cow<'_, str>, Error> {
        self.constant_pool.get_class_name(self.this_class)
    }

    /// Resolves the binary name of the superclass.
    /// # Errors
    /// See [`ConstantPool::get_class_name`].
    pub fn super_class_name(&self) -> Result<Cow<'_, str>, Error> {
        self.constant_pool.get_class_name(self.super_class)
    }
}

/// The version of a class file.
#[doc = see_jvm_spec!(4, 1)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("{major}.{minor}")]
pub struct Version {
    /// The major version number.
    pub major: u16,
    /// The minor version number.
    pub minor: u16,
}

impl Version {
    /// The version written by [`ClassFile::new`], which is Java 11.
    pub const DEFAULT: Self = Self::new(55, 0);

    /// Creates a version.
    #[must_use]
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    /// Gets the Java release that produces this major version.
    ///
    /// Every major version below 49 is reported as release 1.
    #[must_use]
    pub const fn java_release(&self) -> u16 {
        if self.major < 49 { 1 } else { self.major - 44 }
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::DEFAULT
    }
}

bitflags! {
    /// The access flags of a [`ClassFile`].
    #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
    pub struct AccessFlags: u16 {
        /// Declared `public`; may be accessed from outside its package.
        const PUBLIC = 0x0001;
        /// Declared `final`; no subclasses allowed.
        const FINAL = 0x0010;
        /// Treat superclass methods specially when invoked by `invokespecial`.
        const SUPER = 0x0020;
        /// Is an interface, not a class.
        const INTERFACE = 0x0200;
        /// Declared `abstract`; must not be instantiated.
        const ABSTRACT = 0x0400;
        /// Not present in the source code.
        const SYNTHETIC = 0x1000;
        /// Declared as an annotation interface.
        const ANNOTATION = 0x2000;
        /// Declared as an enum class.
        const ENUM = 0x4000;
        /// Is a module, not a class or interface.
        const MODULE = 0x8000;
    }
}

impl AccessFlags {
    /// The flags set by [`ClassFile::new`].
    pub const DEFAULT: Self = Self::PUBLIC.union(Self::SUPER);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jvm::method;

    #[test]
    fn builder_pool_layout() {
        let class = ClassFile::new("MyClass", "java/lang/Object");
        assert_eq!(class.this_class, 2);
        assert_eq!(class.super_class, 4);
        assert_eq!(class.constant_pool.len(), 4);
        assert_eq!(class.constant_pool.count(), 5);
        assert_eq!(class.access_flags.bits(), 0x0021);
        assert_eq!(class.version, Version::new(55, 0));
        assert_eq!(class.class_name().unwrap(), "MyClass");
        assert_eq!(class.super_class_name().unwrap(), "java/lang/Object");
    }

    #[test]
    fn object_super() {
        let class = ClassFile::with_object_super("a/b/C");
        assert_eq!(class, ClassFile::new("a/b/C", JAVA_LANG_OBJECT));
    }

    #[test]
    fn name_lookups_surface_pool_errors() {
        let mut class = ClassFile::new("A", "B");
        class.this_class = 0;
        class.super_class = 1;
        assert_eq!(class.class_name(), Err(Error::ReservedIndexAccess));
        assert!(matches!(
            class.super_class_name(),
            Err(Error::TypeMismatch {
                index: 1,
                expected: "CONSTANT_Class",
                found: "CONSTANT_Utf8",
            })
        ));

        class.this_class = 9;
        assert_eq!(class.class_name(), Err(Error::IndexOutOfRange(9)));
    }

    #[test]
    fn java_release() {
        assert_eq!(Version::new(45, 3).java_release(), 1);
        assert_eq!(Version::new(49, 0).java_release(), 5);
        assert_eq!(Version::new(55, 0).java_release(), 11);
        assert_eq!(Version::new(61, 0).java_release(), 17);
    }

    #[test]
    fn version_display() {
        assert_eq!(Version::new(61, 0).to_string(), "61.0");
        assert_eq!(Version::default().to_string(), "55.0");
    }

    #[test]
    fn to_writer_matches_to_bytes() {
        let mut class = ClassFile::with_object_super("Foo");
        class.methods.push(method::Method::new(method::AccessFlags::PUBLIC, 1, 3));
        let written = class.to_writer(Vec::new()).unwrap();
        assert_eq!(written, class.to_bytes().unwrap());
    }
}
