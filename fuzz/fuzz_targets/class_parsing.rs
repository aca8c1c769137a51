#![no_main]

use keyhole::jvm::ClassFile;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(class) = ClassFile::parse(data) {
        let bytes = class.to_bytes().expect("A decoded class must be encodable");
        assert_eq!(ClassFile::parse(&bytes), Ok(class));
    }
});
