//! Errors raised while decoding, resolving, and encoding class files.

use std::{io, num::TryFromIntError};

/// An error that occurs when decoding a class file or resolving a constant pool index.
///
/// Every variant is permanent: decoding stops at the first failure and no partial result is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Fewer bytes remain in the input than the current step requires.
    #[error("Unexpected end of input: expected {expected} bytes, but only {remaining} remain")]
    Truncated {
        /// The number of bytes the step needed.
        expected: usize,
        /// The number of bytes that were left.
        remaining: usize,
    },
    /// The header is present but does not start with `0xCAFEBABE`.
    #[error("Invalid magic number {0:#010x}, the buffer does not contain a class file")]
    InvalidMagic(u32),
    /// A constant pool tag does not match any supported entry kind.
    #[error("Unexpected constant pool tag {0}")]
    InvalidTag(u8),
    /// A structurally valid element which is not supported yet is present.
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
    /// The index is past the end of the constant pool.
    #[error("Constant pool index {0} is out of range")]
    IndexOutOfRange(u16),
    /// Index `0` is reserved and never refers to an entry.
    #[error("Constant pool index 0 is reserved")]
    ReservedIndexAccess,
    /// The entry at the index is not of the requested kind.
    #[error("Mismatched constant pool entry at index {index}, expected {expected}, but found {found}")]
    TypeMismatch {
        /// The index that was resolved.
        index: u16,
        /// The kind of entry that was requested.
        expected: &'static str,
        /// The kind of entry that is stored at the index.
        found: &'static str,
    },
    /// The constant pool cannot hold any more entries.
    #[error("The constant pool is full")]
    Overflow,
}

/// An error that occurs when encoding a class file into a [`Sink`](super::bytecode::Sink).
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The underlying writer failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// A list or a body is longer than its length prefix can express.
    #[error("Length does not fit in its prefix: {0}")]
    LengthOverflow(#[from] TryFromIntError),
}
