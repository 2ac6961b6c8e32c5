use std::fmt::{Debug, Formatter, LowerHex};
use std::ops::Add;

use crate::util::PAGE_MASK;

#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
/// Physical memory address.
///
/// A newtype wrapper around a physical address value.
pub struct PhysAddr(usize);

impl Debug for PhysAddr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("PhysAddr(0x{:02x})", self.0))
    }
}

impl PhysAddr {
    /// Creates a new physical address.
    pub const fn new(addr: usize) -> Self {
        PhysAddr(addr)
    }

    /// Returns the address as a usize.
    pub const fn as_usize(&self) -> usize {
        self.0
    }

    /// Start of the page containing this address.
    pub const fn page_base(&self) -> PhysAddr {
        PhysAddr(self.0 & !PAGE_MASK)
    }

    /// Offset of this address within its page.
    pub const fn page_offset(&self) -> usize {
        self.0 & PAGE_MASK
    }

    /// Returns `true` if the address is a multiple of `align`.
    pub const fn is_aligned(&self, align: usize) -> bool {
        self.0 % align == 0
    }
}

impl From<usize> for PhysAddr {
    fn from(addr: usize) -> Self {
        PhysAddr(addr)
    }
}

impl From<PhysAddr> for usize {
    fn from(addr: PhysAddr) -> usize {
        addr.0
    }
}

impl LowerHex for PhysAddr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        LowerHex::fmt(&self.0, f)
    }
}

impl Add<usize> for PhysAddr {
    type Output = PhysAddr;

    fn add(self, rhs: usize) -> Self::Output {
        PhysAddr(self.0.wrapping_add(rhs))
    }
}
