use itertools::Itertools;

use super::{ByteReader, EncodeError, Error, FromBytecode, Sink, ToBytecode, write_length};
use crate::jvm::Attribute;

impl FromBytecode for Attribute {
    fn from_reader(reader: &mut ByteReader<'_>) -> Result<Self, Error> {
        let mut header = reader.read_header(6)?;
        let name_index = header.read_value_unchecked();
        let length: u32 = header.read_value_unchecked();
        // A body longer than the address space can never be present in the buffer.
        let length = usize::try_from(length).unwrap_or(usize::MAX);
        let data = reader.read_bytes(length)?.to_vec();
        Ok(Self { name_index, data })
    }
}

impl ToBytecode for Attribute {
    fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<(), EncodeError> {
        sink.write_value(self.name_index)?;
        write_length::<u32, _>(sink, self.data.len())?;
        sink.write_bytes(&self.data)?;
        Ok(())
    }
}

impl ToBytecode for [Attribute] {
    /// Writes the number of attributes followed by each attribute.
    fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<(), EncodeError> {
        write_length::<u16, _>(sink, self.len())?;
        self.iter().try_for_each(|attribute| attribute.write_to(sink))
    }
}

/// Decodes a `u16` count followed by that many attributes.
pub(super) fn attributes_from_reader(reader: &mut ByteReader<'_>) -> Result<Vec<Attribute>, Error> {
    let count: u16 = reader.read_value()?;
    read_attributes(reader, count)
}

/// Decodes exactly `count` attributes.
pub(super) fn read_attributes(
    reader: &mut ByteReader<'_>,
    count: u16,
) -> Result<Vec<Attribute>, Error> {
    (0..count)
        .map(|_| Attribute::from_reader(reader))
        .try_collect()
}
