use super::{MappedPage, PhysAddr};
use crate::access::{AccessType, AccessValue};
use crate::error::Result;

/// A moving position inside a [`MappedPage`].
///
/// Tracks both the byte offset into the page and the physical address it corresponds
/// to. Every access is checked by the page, so stepping past the end yields
/// [`PokeError::OutOfRange`](crate::PokeError::OutOfRange) instead of touching
/// unmapped memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessCursor {
    offset: usize,
    addr: PhysAddr,
    access: AccessType,
}

impl AccessCursor {
    /// Creates a cursor at `addr`, accessing `access`-sized values.
    pub fn new(addr: PhysAddr, access: AccessType) -> Self {
        AccessCursor {
            offset: addr.page_offset(),
            addr,
            access,
        }
    }

    /// Physical address of the next access.
    pub fn addr(&self) -> PhysAddr {
        self.addr
    }

    /// Byte offset of the next access within the page.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Reads the value at the cursor and advances past it.
    pub fn read_next(&mut self, page: &MappedPage<'_>) -> Result<AccessValue> {
        let value = page.read(self.offset, self.access)?;
        self.offset += self.access.len();
        self.addr = self.addr + self.access.len();
        Ok(value)
    }

    /// Reads the value at the cursor without moving.
    pub fn peek(&self, page: &MappedPage<'_>) -> Result<AccessValue> {
        page.read(self.offset, self.access)
    }

    /// Stores `value`, truncated to the cursor's access width, without moving.
    ///
    /// Returns the value actually stored.
    pub fn write(&self, page: &mut MappedPage<'_>, value: u64) -> Result<AccessValue> {
        let value = self.access.truncate(value);
        page.write(self.offset, value)?;
        Ok(value)
    }
}
