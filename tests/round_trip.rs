use keyhole::jvm::{
    Attribute, ClassFile, Method, Version,
    bytecode::{Sink, VecSink, WriterSink},
    class_file::AccessFlags,
    constant_pool::{MethodRefInfo, NameAndTypeInfo, Utf8Info},
    method,
};
use proptest::prelude::*;

fn sample_class() -> ClassFile {
    let mut class = ClassFile::with_object_super("org/example/Greeter");
    let pool = &mut class.constant_pool;
    let init = pool.append(Utf8Info::from("<init>")).unwrap();
    let void = pool.append(Utf8Info::from("()V")).unwrap();
    let code = pool.append(Utf8Info::from("Code")).unwrap();
    let name_and_type = pool
        .append(NameAndTypeInfo {
            name_index: init,
            descriptor_index: void,
        })
        .unwrap();
    pool.append(MethodRefInfo {
        class_index: 4,
        name_and_type_index: name_and_type,
    })
    .unwrap();

    let mut constructor = Method::new(method::AccessFlags::PUBLIC, init, void);
    constructor
        .attributes
        .push(Attribute::new(code, vec![0x2A, 0xB7, 0x00, 0x09, 0xB1]));
    class.methods.push(constructor);
    class.attributes.push(Attribute::new(code, Vec::new()));
    class
}

#[test]
fn builder_output() {
    let class = ClassFile::new("MyClass", "java/lang/Object");
    let mut sink = VecSink::new();
    class.to_sink(&mut sink).unwrap();

    let mut expected = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x37, 0x00, 0x05];
    expected.extend([0x01, 0x00, 0x07]);
    expected.extend(b"MyClass");
    expected.extend([0x07, 0x00, 0x01]);
    expected.extend([0x01, 0x00, 0x10]);
    expected.extend(b"java/lang/Object");
    expected.extend([0x07, 0x00, 0x03]);
    expected.extend([0x00, 0x21, 0x00, 0x02, 0x00, 0x04]);
    expected.extend([0x00; 8]);
    assert_eq!(sink.view(), expected.as_slice());
}

#[test]
fn decode_of_encode_is_identity() {
    let class = sample_class();
    let bytes = class.to_bytes().unwrap();
    let parsed = ClassFile::parse(&bytes).unwrap();
    assert_eq!(parsed, class);
    assert_eq!(parsed.class_name().unwrap(), "org/example/Greeter");
    assert_eq!(parsed.to_bytes().unwrap(), bytes);
}

#[test]
fn sinks_agree() {
    let class = sample_class();
    let mut vec_sink = VecSink::new();
    class.to_sink(&mut vec_sink).unwrap();
    let mut writer_sink = WriterSink::new(Vec::new());
    class.to_sink(&mut writer_sink).unwrap();
    assert_eq!(writer_sink.into_inner(), vec_sink.into_inner());
}

#[test]
fn encodes_after_existing_content() {
    fn encode_into<S: Sink>(class: &ClassFile, sink: &mut S) {
        class.to_sink(sink).unwrap();
    }
    let mut sink = VecSink::from(vec![0xFF]);
    encode_into(&ClassFile::with_object_super("A"), &mut sink);
    assert_eq!(sink.view()[..5], [0xFF, 0xCA, 0xFE, 0xBA, 0xBE]);
}

#[test]
fn oversized_attribute_list_fails_to_encode() {
    let mut class = ClassFile::with_object_super("A");
    class.attributes = vec![Attribute::new(1, Vec::new()); usize::from(u16::MAX) + 1];
    assert!(matches!(
        class.to_bytes(),
        Err(keyhole::jvm::EncodeError::LengthOverflow(_))
    ));
}

fn arb_attribute() -> impl Strategy<Value = Attribute> {
    (any::<u16>(), prop::collection::vec(any::<u8>(), 0..16))
        .prop_map(|(name_index, data)| Attribute::new(name_index, data))
}

prop_compose! {
    fn arb_class_file()(
        class_name in "[a-z]{1,8}(/[A-Z][a-z]{0,8}){1,3}",
        super_name in "[a-z]{1,8}/[A-Z][a-z]{0,8}",
        major in 45u16..=69,
        minor in any::<u16>(),
        flags in any::<u16>(),
        methods in prop::collection::vec(
            (any::<u16>(), any::<u16>(), any::<u16>(), prop::collection::vec(arb_attribute(), 0..3)),
            0..4,
        ),
        attributes in prop::collection::vec(arb_attribute(), 0..4),
    ) -> ClassFile {
        let mut class = ClassFile::new(&class_name, &super_name);
        class.version = Version::new(major, minor);
        class.access_flags = AccessFlags::from_bits_retain(flags);
        class.methods = methods
            .into_iter()
            .map(|(flags, name_index, descriptor_index, attributes)| Method {
                access_flags: method::AccessFlags::from_bits_retain(flags),
                name_index,
                descriptor_index,
                attributes,
            })
            .collect();
        class.attributes = attributes;
        class
    }
}

proptest! {
    #[test]
    fn round_trip(class in arb_class_file()) {
        let bytes = class.to_bytes().unwrap();
        let parsed = ClassFile::parse(&bytes).unwrap();
        prop_assert_eq!(parsed.to_bytes().unwrap(), bytes);
        prop_assert_eq!(parsed, class);
    }

    #[test]
    fn prefixes_are_truncated(class in arb_class_file(), cut in any::<prop::sample::Index>()) {
        let bytes = class.to_bytes().unwrap();
        let len = cut.index(bytes.len());
        let is_truncated = matches!(
            ClassFile::parse(&bytes[..len]),
            Err(keyhole::jvm::Error::Truncated { .. })
        );
        prop_assert!(is_truncated);
    }
}
