use super::{ByteReader, EncodeError, Error, FromBytecode, Sink, ToBytecode, write_length};
use crate::jvm::constant_pool::{
    ClassInfo, ConstantPool, Entry, MAX_ENTRIES, MethodRefInfo, NameAndTypeInfo, Tag, Utf8Info,
};

impl ConstantPool {
    /// Decodes exactly `entry_count` entries from the given reader.
    ///
    /// Note that `entry_count` is the number of entries, not the count stored in a class file.
    /// # Errors
    /// - [`Error::Overflow`] if `entry_count` is larger than [`MAX_ENTRIES`].
    /// - Otherwise the first error raised by an entry. No partially decoded pool is returned.
    pub fn from_reader(reader: &mut ByteReader<'_>, entry_count: u16) -> Result<Self, Error> {
        if usize::from(entry_count) > MAX_ENTRIES {
            return Err(Error::Overflow);
        }
        let mut constant_pool = Self::new();
        for _ in 0..entry_count {
            let entry = Entry::from_reader(reader)?;
            constant_pool.push(entry);
        }
        Ok(constant_pool)
    }
}

impl ToBytecode for ConstantPool {
    /// Writes the entries only. The stored count is written by the enclosing class file.
    fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<(), EncodeError> {
        self.entries()
            .iter()
            .try_for_each(|entry| entry.write_to(sink))
    }
}

impl FromBytecode for Entry {
    fn from_reader(reader: &mut ByteReader<'_>) -> Result<Self, Error> {
        let tag: u8 = reader.read_value()?;
        let entry = match Tag::try_from(tag)? {
            Tag::Utf8 => Self::Utf8(Utf8Info::from_reader(reader)?),
            Tag::Class => Self::Class(ClassInfo::from_reader(reader)?),
            Tag::MethodRef => Self::MethodRef(MethodRefInfo::from_reader(reader)?),
            Tag::NameAndType => Self::NameAndType(NameAndTypeInfo::from_reader(reader)?),
        };
        Ok(entry)
    }
}

impl ToBytecode for Entry {
    fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<(), EncodeError> {
        sink.write_value(self.tag() as u8)?;
        match self {
            Self::Utf8(it) => it.write_to(sink),
            Self::Class(it) => it.write_to(sink),
            Self::MethodRef(it) => it.write_to(sink),
            Self::NameAndType(it) => it.write_to(sink),
        }
    }
}

impl FromBytecode for Utf8Info {
    fn from_reader(reader: &mut ByteReader<'_>) -> Result<Self, Error> {
        let length: u16 = reader.read_value()?;
        let bytes = reader.read_bytes(usize::from(length))?;
        Ok(Self::from_bytes(bytes.to_vec()))
    }
}

impl ToBytecode for Utf8Info {
    fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<(), EncodeError> {
        write_length::<u16, _>(sink, self.as_bytes().len())?;
        sink.write_bytes(self.as_bytes())?;
        Ok(())
    }
}

impl FromBytecode for ClassInfo {
    fn from_reader(reader: &mut ByteReader<'_>) -> Result<Self, Error> {
        let name_index = reader.read_value()?;
        Ok(Self { name_index })
    }
}

impl ToBytecode for ClassInfo {
    fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<(), EncodeError> {
        sink.write_value(self.name_index)?;
        Ok(())
    }
}

impl FromBytecode for MethodRefInfo {
    fn from_reader(reader: &mut ByteReader<'_>) -> Result<Self, Error> {
        let mut fields = reader.read_header(4)?;
        let class_index = fields.read_value_unchecked();
        let name_and_type_index = fields.read_value_unchecked();
        Ok(Self {
            class_index,
            name_and_type_index,
        })
    }
}

impl ToBytecode for MethodRefInfo {
    fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<(), EncodeError> {
        sink.write_value(self.class_index)?;
        sink.write_value(self.name_and_type_index)?;
        Ok(())
    }
}

impl FromBytecode for NameAndTypeInfo {
    fn from_reader(reader: &mut ByteReader<'_>) -> Result<Self, Error> {
        let mut fields = reader.read_header(4)?;
        let name_index = fields.read_value_unchecked();
        let descriptor_index = fields.read_value_unchecked();
        Ok(Self {
            name_index,
            descriptor_index,
        })
    }
}

impl ToBytecode for NameAndTypeInfo {
    fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<(), EncodeError> {
        sink.write_value(self.name_index)?;
        sink.write_value(self.descriptor_index)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jvm::bytecode::VecSink;
    use proptest::prelude::*;

    fn parse_entry(bytes: &[u8]) -> Result<Entry, Error> {
        Entry::from_reader(&mut ByteReader::new(bytes))
    }

    fn entry_bytes(entry: &Entry) -> Vec<u8> {
        let mut sink = VecSink::new();
        entry.write_to(&mut sink).unwrap();
        sink.into_inner()
    }

    fn tagged(tag: u8, payload: &[u8]) -> Vec<u8> {
        let mut bytes = vec![tag];
        bytes.extend_from_slice(payload);
        bytes
    }

    /// Generates the encoding of one well-formed entry.
    fn arb_constant_pool_info() -> impl Strategy<Value = Vec<u8>> {
        let utf8 = prop::collection::vec(any::<u8>(), 0..50).prop_map(|content| {
            let mut payload = u16::try_from(content.len()).unwrap().to_be_bytes().to_vec();
            payload.extend(content);
            tagged(1, &payload)
        });
        let class = any::<[u8; 2]>().prop_map(|it| tagged(7, &it));
        let method_ref = any::<[u8; 4]>().prop_map(|it| tagged(10, &it));
        let name_and_type = any::<[u8; 4]>().prop_map(|it| tagged(12, &it));
        prop_oneof![utf8, class, method_ref, name_and_type]
    }

    prop_compose! {
        fn arb_constant_pool_bytes()(
            entries in prop::collection::vec(arb_constant_pool_info(), 0..=100)
        ) -> (u16, Vec<u8>) {
            let count = u16::try_from(entries.len()).unwrap();
            (count, entries.into_iter().flatten().collect())
        }
    }

    #[test]
    fn invalid_tag() {
        assert_eq!(parse_entry(&[0xFF]), Err(Error::InvalidTag(0xFF)));
    }

    #[test]
    fn missing_tag() {
        assert!(matches!(parse_entry(&[]), Err(Error::Truncated { .. })));
    }

    #[test]
    fn parses_class_entry() {
        let entry = parse_entry(&[0x07, 0x00, 0x01]).unwrap();
        assert_eq!(entry, Entry::Class(ClassInfo { name_index: 1 }));
    }

    #[test]
    fn parses_method_ref_entry() {
        let entry = parse_entry(&[0x0A, 0x00, 0x01, 0x00, 0x02]).unwrap();
        assert_eq!(
            entry,
            Entry::MethodRef(MethodRefInfo {
                class_index: 1,
                name_and_type_index: 2,
            })
        );
    }

    #[test]
    fn parses_name_and_type_entry() {
        let entry = parse_entry(&[0x0C, 0x00, 0x02, 0x00, 0x04]).unwrap();
        assert_eq!(
            entry,
            Entry::NameAndType(NameAndTypeInfo {
                name_index: 2,
                descriptor_index: 4,
            })
        );
    }

    #[test]
    fn parses_utf8_entry() {
        let entry = parse_entry(&[0x01, 0x00, 0x01, b'A']).unwrap();
        assert_eq!(entry, Entry::Utf8(Utf8Info::from("A")));

        let entry = parse_entry(b"\x01\x00\x05Class").unwrap();
        let Entry::Utf8(info) = entry else {
            panic!("Expected a CONSTANT_Utf8 entry");
        };
        assert_eq!(info.as_bytes().len(), 5);
        assert_eq!(info.text(), "Class");
    }

    #[test]
    fn truncated_utf8_body() {
        assert_eq!(
            parse_entry(&[0x01, 0x00, 0x03, b'A']),
            Err(Error::Truncated {
                expected: 3,
                remaining: 1
            })
        );
    }

    #[test]
    fn truncated_fixed_size_entries() {
        assert!(matches!(parse_entry(&[0x07, 0x00]), Err(Error::Truncated { .. })));
        assert!(matches!(
            parse_entry(&[0x0A, 0x00, 0x01, 0x00]),
            Err(Error::Truncated { expected: 4, .. })
        ));
        assert!(matches!(
            parse_entry(&[0x0C, 0x00]),
            Err(Error::Truncated { expected: 4, .. })
        ));
    }

    #[test]
    fn parses_entire_pool() {
        let bytes = [0x01, 0x00, 0x01, b'A', 0x07, 0x00, 0x01];
        let mut reader = ByteReader::new(&bytes);
        let pool = ConstantPool::from_reader(&mut reader, 2).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get_class_name(2).unwrap(), "A");
        assert!(reader.is_empty());
    }

    #[test]
    fn pool_stops_at_first_bad_entry() {
        let bytes = [0x07, 0x00, 0x01, 0x05, 0x00, 0x00];
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(
            ConstantPool::from_reader(&mut reader, 2),
            Err(Error::InvalidTag(5))
        );
    }

    #[test]
    fn rejects_count_beyond_capacity() {
        let mut reader = ByteReader::new(&[]);
        assert_eq!(
            ConstantPool::from_reader(&mut reader, u16::MAX),
            Err(Error::Overflow)
        );
    }

    #[test]
    fn writes_class_entry() {
        let entry = Entry::from(ClassInfo { name_index: 16 });
        assert_eq!(entry_bytes(&entry), [0x07, 0x00, 0x10]);
    }

    #[test]
    fn writes_method_ref_entry() {
        let entry = Entry::from(MethodRefInfo {
            class_index: 1,
            name_and_type_index: 2,
        });
        assert_eq!(entry_bytes(&entry), [0x0A, 0x00, 0x01, 0x00, 0x02]);
    }

    #[test]
    fn writes_name_and_type_entry() {
        let entry = Entry::from(NameAndTypeInfo {
            name_index: 2,
            descriptor_index: 4,
        });
        assert_eq!(entry_bytes(&entry), [0x0C, 0x00, 0x02, 0x00, 0x04]);
    }

    #[test]
    fn writes_utf8_entry() {
        let entry = Entry::from(Utf8Info::from("MyClass"));
        assert_eq!(entry_bytes(&entry), b"\x01\x00\x07MyClass");
    }

    #[test]
    fn utf8_longer_than_prefix() {
        let entry = Entry::from(Utf8Info::from_bytes(vec![b'a'; 70_000]));
        let mut sink = VecSink::new();
        assert!(matches!(
            entry.write_to(&mut sink),
            Err(EncodeError::LengthOverflow(_))
        ));
    }

    proptest! {
        #[test]
        fn from_reader((count, bytes) in arb_constant_pool_bytes()) {
            let mut reader = ByteReader::new(&bytes);
            let constant_pool = ConstantPool::from_reader(&mut reader, count);
            prop_assert!(constant_pool.is_ok());
            prop_assert!(reader.is_empty());
        }

        #[test]
        fn from_reader_err_on_wrong_count((count, bytes) in arb_constant_pool_bytes()) {
            let mut reader = ByteReader::new(&bytes);
            let constant_pool = ConstantPool::from_reader(&mut reader, count + 1);
            prop_assert!(
                matches!(constant_pool, Err(Error::Truncated { .. })),
                "expected a truncation error"
            );
        }

        #[test]
        fn write_reproduces_input((count, bytes) in arb_constant_pool_bytes()) {
            let mut reader = ByteReader::new(&bytes);
            let constant_pool = ConstantPool::from_reader(&mut reader, count).unwrap();
            let mut sink = VecSink::new();
            constant_pool.write_to(&mut sink).unwrap();
            prop_assert_eq!(sink.view(), bytes.as_slice());
        }

        #[test]
        fn entry_inverse(entry in any::<Entry>()) {
            let bytes = entry_bytes(&entry);
            prop_assert_eq!(parse_entry(&bytes), Ok(entry));
        }
    }
}
