use super::{
    ByteReader, EncodeError, Error, FromBytecode, Sink, ToBytecode, attribute::read_attributes,
    write_length,
};
use crate::jvm::{Method, method::AccessFlags};

impl FromBytecode for Method {
    fn from_reader(reader: &mut ByteReader<'_>) -> Result<Self, Error> {
        let mut header = reader.read_header(8)?;
        let access_flags = AccessFlags::from_bits_retain(header.read_value_unchecked());
        let name_index = header.read_value_unchecked();
        let descriptor_index = header.read_value_unchecked();
        let attributes_count: u16 = header.read_value_unchecked();
        let attributes = read_attributes(reader, attributes_count)?;
        Ok(Self {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        })
    }
}

impl ToBytecode for Method {
    fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<(), EncodeError> {
        sink.write_value(self.access_flags.bits())?;
        sink.write_value(self.name_index)?;
        sink.write_value(self.descriptor_index)?;
        self.attributes.write_to(sink)?;
        Ok(())
    }
}

impl ToBytecode for [Method] {
    /// Writes the number of methods followed by each method.
    fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<(), EncodeError> {
        write_length::<u16, _>(sink, self.len())?;
        self.iter().try_for_each(|method| method.write_to(sink))
    }
}
