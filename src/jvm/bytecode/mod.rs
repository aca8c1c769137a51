//! The codec for the JVM class file format.
//!
//! Decoding walks a [`ByteReader`] over an in-memory buffer, bottom-up from scalars to the
//! whole [`ClassFile`](super::ClassFile). Encoding writes the same fields in the same order
//! into any [`Sink`].
mod attribute;
mod class_file;
mod constant_pool;
mod endian;
mod method_info;
mod reader;
mod sink;

use std::num::TryFromIntError;

pub use class_file::JAVA_CLASS_MAGIC;
pub use endian::BigEndian;
pub use reader::ByteReader;
pub use sink::{Sink, VecSink, WriterSink};

use super::{EncodeError, Error};

/// Trait for decoding a class file element from a [`ByteReader`].
pub trait FromBytecode: Sized {
    /// Decodes the element and advances the reader past it.
    ///
    /// # Errors
    /// See [`Error`] for more information.
    fn from_reader(reader: &mut ByteReader<'_>) -> Result<Self, Error>;
}

/// Trait for encoding a class file element into a [`Sink`].
pub trait ToBytecode {
    /// Writes the element in its binary representation.
    ///
    /// # Errors
    /// See [`EncodeError`] for more information.
    fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<(), EncodeError>;
}

fn write_length<Len, S>(sink: &mut S, length: usize) -> Result<(), EncodeError>
where
    Len: BigEndian + TryFrom<usize, Error = TryFromIntError>,
    S: Sink + ?Sized,
{
    let length = Len::try_from(length)?;
    sink.write_value(length)?;
    Ok(())
}
