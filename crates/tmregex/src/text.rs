//! Encoded line text.
//!
//! The regex engine works on UTF-8 byte offsets, while editors address text
//! in UTF-16 (or UTF-32) code units. An [`EncodedText`] wraps one line for one
//! tokenization pass and owns the mapping between the two offset spaces.
//!
//! Invariants
//! - The mapping is computed once, in the constructor, and never changes.
//! - Only byte offsets that fall on a code-point boundary are mapped. Asking
//!   for any other offset is a caller bug.
//! - Identity is carried by a [`BufferId`], not by content. Two buffers built
//!   from the same string are different buffers as far as the matcher memo is
//!   concerned.

use core::sync::atomic::{AtomicU64, Ordering};

use bstr::ByteSlice;

use crate::error::TextError;

static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(0);

const UNMAPPED: usize = usize::MAX;

/// Process-unique identity of an [`EncodedText`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(u64);

impl BufferId {
    fn next() -> Self {
        Self(NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The code unit the caller counts columns in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeUnit {
    /// UTF-16 code units; characters outside the BMP take two.
    #[default]
    Utf16,
    /// Unicode scalar values; every character takes one.
    Utf32,
}

impl CodeUnit {
    fn width(self, ch: char) -> usize {
        match self {
            CodeUnit::Utf16 => ch.len_utf16(),
            CodeUnit::Utf32 => 1,
        }
    }
}

#[derive(Debug)]
enum OffsetMap {
    /// ASCII text: byte offsets and code-unit offsets coincide.
    Identity,
    Table {
        /// Indexed by byte offset, `UNMAPPED` inside a multi-byte sequence.
        byte_to_unit: Vec<usize>,
        /// Indexed by code-unit offset, `UNMAPPED` on a low surrogate.
        unit_to_byte: Vec<usize>,
    },
}

impl OffsetMap {
    fn build(text: &str, code_unit: CodeUnit) -> (usize, Self) {
        if text.is_ascii() {
            return (text.len(), OffsetMap::Identity);
        }

        let mut byte_to_unit = vec![UNMAPPED; text.len() + 1];
        let mut unit_to_byte = Vec::with_capacity(text.len() + 1);
        let mut units = 0;
        for (byte, ch) in text.char_indices() {
            let width = code_unit.width(ch);
            byte_to_unit[byte] = units;
            unit_to_byte.push(byte);
            unit_to_byte.extend(core::iter::repeat_n(UNMAPPED, width - 1));
            units += width;
        }
        byte_to_unit[text.len()] = units;
        unit_to_byte.push(text.len());

        (
            units,
            OffsetMap::Table {
                byte_to_unit,
                unit_to_byte,
            },
        )
    }
}

/// One line of text, prepared for searching.
#[derive(Debug)]
pub struct EncodedText {
    id: BufferId,
    text: String,
    code_unit: CodeUnit,
    unit_len: usize,
    map: OffsetMap,
}

impl EncodedText {
    /// Wraps `text`, counting columns in UTF-16 code units.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_code_unit(text, CodeUnit::Utf16)
    }

    /// Wraps `text`, counting columns in the given code unit.
    pub fn with_code_unit(text: impl Into<String>, code_unit: CodeUnit) -> Self {
        let text = text.into();
        let (unit_len, map) = OffsetMap::build(&text, code_unit);
        Self {
            id: BufferId::next(),
            text,
            code_unit,
            unit_len,
            map,
        }
    }

    /// Decodes UTF-16 input.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::InvalidUtf16`] on the first unpaired surrogate.
    pub fn from_utf16(units: &[u16]) -> Result<Self, TextError> {
        let mut text = String::with_capacity(units.len());
        let mut position = 0;
        for decoded in char::decode_utf16(units.iter().copied()) {
            let ch = decoded.map_err(|_| TextError::InvalidUtf16 { position })?;
            position += ch.len_utf16();
            text.push(ch);
        }
        Ok(Self::with_code_unit(text, CodeUnit::Utf16))
    }

    /// Wraps raw bytes, replacing invalid UTF-8 sequences with U+FFFD.
    pub fn from_utf8_lossy(bytes: &[u8]) -> Self {
        Self::new(bytes.to_str_lossy().into_owned())
    }

    /// Identity used by the matcher memo.
    #[must_use]
    pub fn id(&self) -> BufferId {
        self.id
    }

    /// The text as the engine sees it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// UTF-8 encoding of the text.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Length in UTF-8 bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.text.len()
    }

    /// Length in the caller's code units.
    #[must_use]
    pub fn unit_len(&self) -> usize {
        self.unit_len
    }

    /// The code unit used for [`unit_offset`](Self::unit_offset).
    #[must_use]
    pub fn code_unit(&self) -> CodeUnit {
        self.code_unit
    }

    /// Translates a byte offset into a code-unit offset, or `None` when the
    /// offset is past the end or inside an encoded character.
    #[must_use]
    pub fn try_unit_offset(&self, byte: usize) -> Option<usize> {
        match &self.map {
            OffsetMap::Identity => (byte <= self.text.len()).then_some(byte),
            OffsetMap::Table { byte_to_unit, .. } => {
                byte_to_unit.get(byte).copied().filter(|&u| u != UNMAPPED)
            }
        }
    }

    /// Translates a byte offset into a code-unit offset.
    ///
    /// # Panics
    ///
    /// Panics if `byte` is not a code-point boundary of this text. Offsets
    /// obtained from this buffer or from captures produced against it are
    /// always mapped.
    #[must_use]
    pub fn unit_offset(&self, byte: usize) -> usize {
        match self.try_unit_offset(byte) {
            Some(unit) => unit,
            None => panic!(
                "byte offset {byte} is not a character boundary of a {}-byte buffer",
                self.text.len()
            ),
        }
    }

    /// Translates a code-unit offset into a byte offset, or `None` when the
    /// offset is past the end or points at the second half of a surrogate
    /// pair.
    #[must_use]
    pub fn try_byte_offset(&self, unit: usize) -> Option<usize> {
        match &self.map {
            OffsetMap::Identity => (unit <= self.text.len()).then_some(unit),
            OffsetMap::Table { unit_to_byte, .. } => {
                unit_to_byte.get(unit).copied().filter(|&b| b != UNMAPPED)
            }
        }
    }

    /// Translates a code-unit offset into a byte offset.
    ///
    /// # Panics
    ///
    /// Panics if `unit` is past the end or splits a surrogate pair.
    #[must_use]
    pub fn byte_offset(&self, unit: usize) -> usize {
        match self.try_byte_offset(unit) {
            Some(byte) => byte,
            None => panic!(
                "code-unit offset {unit} is not a character boundary of a {}-unit buffer",
                self.unit_len
            ),
        }
    }
}
