use super::{BigEndian, Error};

/// A forward-only cursor over an in-memory buffer.
///
/// A read either consumes exactly the bytes it asks for or fails with
/// [`Error::Truncated`] and leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    remaining: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader positioned at the start of `bytes`.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self {
            remaining: bytes,
            position: 0,
        }
    }

    /// Reads `len` bytes and advances the reader by `len` bytes.
    ///
    /// # Errors
    /// [`Error::Truncated`] if fewer than `len` bytes remain.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let Some((head, tail)) = self.remaining.split_at_checked(len) else {
            return Err(Error::Truncated {
                expected: len,
                remaining: self.remaining.len(),
            });
        };
        self.remaining = tail;
        self.position += len;
        Ok(head)
    }

    /// Reads a big-endian scalar and advances the reader by its width.
    ///
    /// # Errors
    /// [`Error::Truncated`] if fewer than [`BigEndian::WIDTH`] bytes remain.
    pub fn read_value<T: BigEndian>(&mut self) -> Result<T, Error> {
        self.read_bytes(T::WIDTH).map(T::from_big_endian)
    }

    /// Reads a big-endian scalar without checking the remaining length.
    ///
    /// Only for readers over a header chunk already obtained with [`Self::read_bytes`].
    ///
    /// # Panics
    /// Panics if fewer than [`BigEndian::WIDTH`] bytes remain.
    pub(super) fn read_value_unchecked<T: BigEndian>(&mut self) -> T {
        let (head, tail) = self.remaining.split_at(T::WIDTH);
        self.remaining = tail;
        self.position += T::WIDTH;
        T::from_big_endian(head)
    }

    /// Reads a fixed-size header chunk and returns a reader over it.
    pub(super) fn read_header(&mut self, len: usize) -> Result<ByteReader<'a>, Error> {
        self.read_bytes(len).map(ByteReader::new)
    }

    /// Returns the bytes that have not been read yet.
    #[must_use]
    pub const fn remaining(&self) -> &'a [u8] {
        self.remaining
    }

    /// Returns `true` if every byte has been read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Returns the number of bytes consumed so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}
