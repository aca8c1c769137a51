use std::io::{self, Write};

use super::BigEndian;

/// A destination for big-endian scalars.
///
/// Encoders are written against this trait only, so an in-memory [`VecSink`] and a
/// stream-backed [`WriterSink`] are interchangeable.
pub trait Sink {
    /// Writes `value` in big-endian byte order.
    ///
    /// # Errors
    /// Forwards any error raised by the destination.
    fn write_value<T: BigEndian>(&mut self, value: T) -> io::Result<()>;

    /// Writes every byte of `bytes` in order.
    ///
    /// # Errors
    /// Forwards any error raised by the destination.
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        bytes.iter().try_for_each(|&byte| self.write_value(byte))
    }
}

/// A [`Sink`] accumulating the output in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VecSink {
    buffer: Vec<u8>,
}

impl VecSink {
    /// Creates an empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Returns everything written so far.
    #[must_use]
    pub fn view(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the sink and returns the written bytes.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

impl From<Vec<u8>> for VecSink {
    /// Creates a sink appending to `buffer`.
    fn from(buffer: Vec<u8>) -> Self {
        Self { buffer }
    }
}

impl Sink for VecSink {
    fn write_value<T: BigEndian>(&mut self, value: T) -> io::Result<()> {
        self.buffer.extend_from_slice(value.to_big_endian().as_ref());
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }
}

/// A [`Sink`] forwarding the output to an [`io::Write`], such as a file.
#[derive(Debug)]
pub struct WriterSink<W> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    /// Creates a sink writing to `inner`.
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn write_value<T: BigEndian>(&mut self, value: T) -> io::Result<()> {
        self.inner.write_all(value.to_big_endian().as_ref())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)
    }
}
