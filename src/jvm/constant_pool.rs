//! Constant pool in a JVM class file.

use std::borrow::Cow;

use super::Error;
use crate::macros::see_jvm_spec;

/// The largest number of entries a constant pool can hold.
///
/// The stored count is the number of entries plus one and must fit in a `u16`.
pub const MAX_ENTRIES: usize = u16::MAX as usize - 1;

/// Where an external, 1-based index points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Reserved,
    Entry(usize),
}

/// A JVM constant pool.
///
/// Entries are addressed with 1-based indices. Index `0` is reserved and never resolves.
#[doc = see_jvm_spec!(4, 4)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantPool {
    entries: Vec<Entry>,
    resolution_table: Vec<Slot>,
}

impl ConstantPool {
    /// Creates a new empty constant pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            resolution_table: vec![Slot::Reserved],
        }
    }

    /// Creates a constant pool holding `entries` in order, the first one at index `1`.
    /// # Errors
    /// - [`Error::Overflow`] if there are more than [`MAX_ENTRIES`] entries.
    pub fn from_entries<I>(entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut pool = Self::new();
        for entry in entries {
            pool.append(entry)?;
        }
        Ok(pool)
    }

    /// Appends an entry and returns the index assigned to it.
    ///
    /// The index is always the number of entries already present plus one.
    /// # Errors
    /// - [`Error::Overflow`] if the constant pool is full.
    pub fn append(&mut self, entry: impl Into<Entry>) -> Result<u16, Error> {
        if self.entries.len() >= MAX_ENTRIES {
            return Err(Error::Overflow);
        }
        Ok(self.push(entry.into()))
    }

    /// Appends without checking the capacity. Callers must stay below [`MAX_ENTRIES`].
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Every caller keeps the number of entries below MAX_ENTRIES, \
                  so the new index always fits in a u16."
    )]
    pub(crate) fn push(&mut self, entry: Entry) -> u16 {
        self.resolution_table.push(Slot::Entry(self.entries.len()));
        self.entries.push(entry);
        (self.resolution_table.len() - 1) as u16
    }

    /// Gets the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the constant pool has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets the count stored in a class file. Note that this is NOT the number of entries.
    #[doc = see_jvm_spec!(4, 1)]
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The pool never holds more than MAX_ENTRIES entries, \
                  so the count always fits in a u16."
    )]
    pub fn count(&self) -> u16 {
        self.resolution_table.len() as u16
    }

    /// Gets the entries in the order they are stored.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Iterates over the entries together with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &Entry)> {
        (1..=self.count().saturating_sub(1)).zip(self.entries.iter())
    }

    /// Gets the constant pool entry at the given index.
    /// # Errors
    /// - [`Error::ReservedIndexAccess`] if `index` is `0`.
    /// - [`Error::IndexOutOfRange`] if `index` is past the last entry.
    pub fn get_entry(&self, index: u16) -> Result<&Entry, Error> {
        match self.resolution_table.get(usize::from(index)) {
            Some(&Slot::Entry(position)) => Ok(&self.entries[position]),
            Some(Slot::Reserved) => Err(Error::ReservedIndexAccess),
            None => Err(Error::IndexOutOfRange(index)),
        }
    }

    /// Gets the entry at the given index as a `T`.
    ///
    /// Resolving the same index twice yields references to the same stored entry.
    /// # Errors
    /// - [`Error::ReservedIndexAccess`] if `index` is `0`.
    /// - [`Error::IndexOutOfRange`] if `index` is past the last entry.
    /// - [`Error::TypeMismatch`] if the entry is not a `T`.
    pub fn resolve<T: PoolEntry>(&self, index: u16) -> Result<&T, Error> {
        let entry = self.get_entry(index)?;
        T::from_entry(entry).ok_or(Error::TypeMismatch {
            index,
            expected: T::KIND,
            found: entry.kind(),
        })
    }

    /// Gets the text of the `CONSTANT_Utf8` entry at the given index.
    /// # Errors
    /// See [`ConstantPool::resolve`].
    pub fn get_str(&self, index: u16) -> Result<Cow<'_, str>, Error> {
        self.resolve::<Utf8Info>(index).map(Utf8Info::text)
    }

    /// Gets the binary name of the `CONSTANT_Class` entry at the given index.
    /// # Errors
    /// See [`ConstantPool::resolve`]. Both the class entry and its name entry are checked.
    pub fn get_class_name(&self, index: u16) -> Result<Cow<'_, str>, Error> {
        let &ClassInfo { name_index } = self.resolve(index)?;
        self.get_str(name_index)
    }
}

impl Default for ConstantPool {
    fn default() -> Self {
        Self::new()
    }
}

/// The tag byte that starts every constant pool entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Tag {
    /// `CONSTANT_Utf8`
    Utf8 = 1,
    /// `CONSTANT_Class`
    Class = 7,
    /// `CONSTANT_Methodref`
    MethodRef = 10,
    /// `CONSTANT_NameAndType`
    NameAndType = 12,
}

impl TryFrom<u8> for Tag {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Utf8),
            7 => Ok(Self::Class),
            10 => Ok(Self::MethodRef),
            12 => Ok(Self::NameAndType),
            it => Err(Error::InvalidTag(it)),
        }
    }
}

/// An entry in the [`ConstantPool`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Entry {
    /// A UTF-8 string.
    #[doc = see_jvm_spec!(4, 4, 7)]
    Utf8(Utf8Info),
    /// A class.
    #[doc = see_jvm_spec!(4, 4, 1)]
    Class(ClassInfo),
    /// A method reference.
    #[doc = see_jvm_spec!(4, 4, 2)]
    MethodRef(MethodRefInfo),
    /// A name and type.
    #[doc = see_jvm_spec!(4, 4, 6)]
    NameAndType(NameAndTypeInfo),
}

impl Entry {
    /// Returns the tag of this constant pool entry.
    #[must_use]
    pub const fn tag(&self) -> Tag {
        match self {
            Self::Utf8(_) => Tag::Utf8,
            Self::Class(_) => Tag::Class,
            Self::MethodRef(_) => Tag::MethodRef,
            Self::NameAndType(_) => Tag::NameAndType,
        }
    }

    /// Gets the kind of this constant pool entry.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Utf8(_) => Utf8Info::KIND,
            Self::Class(_) => ClassInfo::KIND,
            Self::MethodRef(_) => MethodRefInfo::KIND,
            Self::NameAndType(_) => NameAndTypeInfo::KIND,
        }
    }
}

/// The content of a `CONSTANT_Utf8` entry.
///
/// The bytes are kept exactly as read; they are only decoded on request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Utf8Info {
    bytes: Vec<u8>,
}

impl Utf8Info {
    /// Creates an entry holding `bytes` as they should appear in the class file.
    #[must_use]
    pub const fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Gets the raw bytes of the string.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decodes the string from the modified UTF-8 used in class files.
    ///
    /// Bytes that are not valid modified UTF-8 are decoded lossily.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        cesu8::from_java_cesu8(&self.bytes)
            .unwrap_or_else(|_| String::from_utf8_lossy(&self.bytes))
    }
}

impl From<&str> for Utf8Info {
    fn from(value: &str) -> Self {
        Self::from_bytes(cesu8::to_java_cesu8(value).into_owned())
    }
}

/// The content of a `CONSTANT_Class` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct ClassInfo {
    /// The index in the constant pool of its binary name.
    /// The entry at that index must be a [`Entry::Utf8`].
    pub name_index: u16,
}

/// The content of a `CONSTANT_Methodref` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct MethodRefInfo {
    /// The index in the constant pool of the class containing the method.
    /// The entry at that index must be a [`Entry::Class`].
    pub class_index: u16,
    /// The index in the constant pool of the name and type of the method.
    /// The entry at that index must be a [`Entry::NameAndType`].
    pub name_and_type_index: u16,
}

/// The content of a `CONSTANT_NameAndType` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct NameAndTypeInfo {
    /// The index in the constant pool of the UTF-8 string containing the name.
    /// The entry at that index must be a [`Entry::Utf8`].
    pub name_index: u16,
    /// The index in the constant pool of the UTF-8 string containing the descriptor.
    /// The entry at that index must be a [`Entry::Utf8`].
    pub descriptor_index: u16,
}

/// A kind of entry that [`ConstantPool::resolve`] can look up.
pub trait PoolEntry {
    /// The name of the entry kind, such as `CONSTANT_Class`.
    const KIND: &'static str;

    /// Gets the content of `entry` if it is of this kind.
    fn from_entry(entry: &Entry) -> Option<&Self>;
}

macro_rules! impl_pool_entry {
    ($($variant:ident($t:ty) => $kind:literal),* $(,)?) => {
        $(
            impl PoolEntry for $t {
                const KIND: &'static str = $kind;

                fn from_entry(entry: &Entry) -> Option<&Self> {
                    if let Entry::$variant(it) = entry {
                        Some(it)
                    } else {
                        None
                    }
                }
            }
        )*
    };
}

impl_pool_entry! {
    Utf8(Utf8Info) => "CONSTANT_Utf8",
    Class(ClassInfo) => "CONSTANT_Class",
    MethodRef(MethodRefInfo) => "CONSTANT_Methodref",
    NameAndType(NameAndTypeInfo) => "CONSTANT_NameAndType",
}
