mod sealed {
    pub trait Sealed {}
}

/// An unsigned scalar of 1, 2, or 4 bytes stored big-endian in a class file.
pub trait BigEndian: Copy + sealed::Sealed {
    /// The number of bytes in the encoded representation.
    const WIDTH: usize;

    /// The encoded representation.
    type Bytes: AsRef<[u8]>;

    /// Converts the value into its big-endian bytes.
    fn to_big_endian(self) -> Self::Bytes;

    /// Converts big-endian bytes back into a value.
    ///
    /// # Panics
    /// Panics if `bytes` is not exactly [`Self::WIDTH`] bytes long.
    fn from_big_endian(bytes: &[u8]) -> Self;
}

macro_rules! impl_big_endian_for {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl BigEndian for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();

                type Bytes = [u8; std::mem::size_of::<$t>()];

                fn to_big_endian(self) -> Self::Bytes {
                    self.to_be_bytes()
                }

                fn from_big_endian(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    buf.copy_from_slice(bytes);
                    Self::from_be_bytes(buf)
                }
            }
        )*
    };
}

impl_big_endian_for!(u8, u16, u32);
