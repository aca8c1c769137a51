use itertools::Itertools;

use super::{
    ByteReader, EncodeError, Error, FromBytecode, Sink, ToBytecode,
    attribute::attributes_from_reader,
};
use crate::jvm::{ClassFile, ConstantPool, Method, Version, class_file::AccessFlags};

/// The magic number every class file starts with.
pub const JAVA_CLASS_MAGIC: u32 = 0xCAFE_BABE;

impl FromBytecode for ClassFile {
    fn from_reader(reader: &mut ByteReader<'_>) -> Result<Self, Error> {
        let mut header = reader.read_header(10)?;
        let magic: u32 = header.read_value_unchecked();
        if magic != JAVA_CLASS_MAGIC {
            return Err(Error::InvalidMagic(magic));
        }
        let minor = header.read_value_unchecked();
        let major = header.read_value_unchecked();
        let constant_pool_count: u16 = header.read_value_unchecked();
        let constant_pool =
            ConstantPool::from_reader(reader, constant_pool_count.saturating_sub(1))?;

        let mut class_info = reader.read_header(8)?;
        let access_flags = AccessFlags::from_bits_retain(class_info.read_value_unchecked());
        let this_class = class_info.read_value_unchecked();
        let super_class = class_info.read_value_unchecked();
        let interfaces_count: u16 = class_info.read_value_unchecked();
        if interfaces_count != 0 {
            return Err(Error::NotImplemented("interfaces"));
        }
        let fields_count: u16 = reader.read_value()?;
        if fields_count != 0 {
            return Err(Error::NotImplemented("fields"));
        }

        let methods_count: u16 = reader.read_value()?;
        let methods = (0..methods_count)
            .map(|_| Method::from_reader(reader))
            .try_collect()?;
        let attributes = attributes_from_reader(reader)?;

        Ok(Self {
            version: Version { major, minor },
            constant_pool,
            access_flags,
            this_class,
            super_class,
            methods,
            attributes,
        })
    }
}

impl ToBytecode for ClassFile {
    fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<(), EncodeError> {
        sink.write_value(JAVA_CLASS_MAGIC)?;
        sink.write_value(self.version.minor)?;
        sink.write_value(self.version.major)?;
        sink.write_value(self.constant_pool.count())?;
        self.constant_pool.write_to(sink)?;
        sink.write_value(self.access_flags.bits())?;
        sink.write_value(self.this_class)?;
        sink.write_value(self.super_class)?;
        // interfaces and fields
        sink.write_value(0u16)?;
        sink.write_value(0u16)?;
        self.methods.write_to(sink)?;
        self.attributes.write_to(sink)?;
        Ok(())
    }
}
