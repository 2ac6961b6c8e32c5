//! Access widths and typed values.
//!
//! An [`AccessType`] determines the width of every load and store performed on the
//! mapped page; an [`AccessValue`] carries one value of that width.

use std::fmt::{self, Display, Formatter, UpperHex};

use crate::error::{PokeError, Result};

/// Width of a single load or store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccessType {
    /// 1 byte, selected by `b`
    Byte,
    /// 2 bytes, selected by `h`
    Halfword,
    /// 4 bytes, selected by `l` or `w`
    #[default]
    Word,
}

impl AccessType {
    /// Selects the access type from a type code.
    ///
    /// Only the first character is considered and it is matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`PokeError::IllegalAccessType`] for unknown codes and
    /// [`PokeError::Usage`] for an empty code.
    pub fn from_code(code: &str) -> Result<Self> {
        let c = code
            .chars()
            .next()
            .ok_or_else(|| PokeError::Usage("empty data type".into()))?
            .to_ascii_lowercase();
        match c {
            'b' => Ok(AccessType::Byte),
            'h' => Ok(AccessType::Halfword),
            'l' | 'w' => Ok(AccessType::Word),
            c => Err(PokeError::IllegalAccessType(c)),
        }
    }

    /// Number of bytes accessed.
    pub const fn len(&self) -> usize {
        match self {
            AccessType::Byte => 1,
            AccessType::Halfword => 2,
            AccessType::Word => 4,
        }
    }

    /// Number of hex digits needed to print one value.
    pub const fn digits(&self) -> usize {
        self.len() * 2
    }

    /// Truncates `value` to this width.
    pub fn truncate(&self, value: u64) -> AccessValue {
        match self {
            AccessType::Byte => AccessValue::Byte(value as u8),
            AccessType::Halfword => AccessValue::Halfword(value as u16),
            AccessType::Word => AccessValue::Word(value as u32),
        }
    }
}

/// A value read from or written to the mapped page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessValue {
    /// 8-bit value
    Byte(u8),
    /// 16-bit value
    Halfword(u16),
    /// 32-bit value
    Word(u32),
}

impl AccessValue {
    /// Access type matching the width of this value.
    pub fn access_type(&self) -> AccessType {
        match self {
            AccessValue::Byte(_) => AccessType::Byte,
            AccessValue::Halfword(_) => AccessType::Halfword,
            AccessValue::Word(_) => AccessType::Word,
        }
    }

    /// Returns the value zero-extended to `u64`.
    pub fn as_u64(&self) -> u64 {
        match *self {
            AccessValue::Byte(v) => v as u64,
            AccessValue::Halfword(v) => v as u64,
            AccessValue::Word(v) => v as u64,
        }
    }
}

/// Lowercase hex, zero-padded to the access width (`aa`, `beef`, `0000cafe`).
impl Display for AccessValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:0width$x}",
            self.as_u64(),
            width = self.access_type().digits()
        )
    }
}

impl UpperHex for AccessValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        UpperHex::fmt(&self.as_u64(), f)
    }
}
