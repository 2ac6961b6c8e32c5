use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::os::unix::io::AsRawFd;
use std::ptr::{self, NonNull};

use libc::{MAP_FAILED, MAP_SHARED, PROT_READ, PROT_WRITE, mmap, munmap};
use log::{debug, trace, warn};

use super::{PhysAddr, PhysMemDevice};
use crate::access::{AccessType, AccessValue};
use crate::error::{PokeError, Result};
use crate::util::{PAGE_SIZE, system_page_size};

/// One page of a physical memory device mapped into the address space.
///
/// The mapping is shared and read-write, so stores reach the device. All
/// accesses go through [`read`](MappedPage::read) and [`write`](MappedPage::write),
/// which refuse to touch memory outside the page and use volatile loads/stores.
///
/// The page borrows the device it was mapped from and therefore cannot outlive it.
/// It is unmapped by [`unmap`](MappedPage::unmap), or silently when dropped.
pub struct MappedPage<'a> {
    ptr: NonNull<u8>,
    base: PhysAddr,
    _device: PhantomData<&'a PhysMemDevice>,
}

impl<'a> MappedPage<'a> {
    /// Maps the page of `device` that contains `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`PokeError::Os`] if `mmap` fails.
    pub fn map(device: &'a PhysMemDevice, addr: PhysAddr) -> Result<Self> {
        let system_page = system_page_size();
        if system_page != PAGE_SIZE {
            warn!(
                "System page size is {} bytes, mapping {} bytes",
                system_page, PAGE_SIZE
            );
        }

        let base = addr.page_base();
        let p = unsafe {
            mmap(
                ptr::null_mut(),
                PAGE_SIZE,
                PROT_READ | PROT_WRITE,
                MAP_SHARED,
                device.as_raw_fd(),
                base.as_usize() as libc::off_t,
            )
        };
        if p == MAP_FAILED {
            return Err(PokeError::last_os_error());
        }
        let Some(ptr) = NonNull::new(p as *mut u8) else {
            return Err(PokeError::last_os_error());
        };
        debug!("Memory mapped at address {:p}.", ptr);

        Ok(MappedPage {
            ptr,
            base,
            _device: PhantomData,
        })
    }

    /// Physical address of the first byte of the page.
    pub fn base(&self) -> PhysAddr {
        self.base
    }

    /// Reads one value of width `access` at byte `offset` into the page.
    ///
    /// # Errors
    ///
    /// Returns [`PokeError::OutOfRange`] if the access does not fit into the page
    /// and [`PokeError::Misaligned`] if `offset` is not aligned to the access width.
    pub fn read(&self, offset: usize, access: AccessType) -> Result<AccessValue> {
        self.check(offset, access)?;
        // SAFETY: `check` guarantees that the access lies within the mapped page and
        // is naturally aligned.
        let value = unsafe {
            let p = self.ptr.as_ptr().add(offset);
            match access {
                AccessType::Byte => AccessValue::Byte(ptr::read_volatile(p)),
                AccessType::Halfword => AccessValue::Halfword(ptr::read_volatile(p as *const u16)),
                AccessType::Word => AccessValue::Word(ptr::read_volatile(p as *const u32)),
            }
        };
        trace!("read {:?} at {:?}", value, self.base + offset);
        Ok(value)
    }

    /// Writes `value` at byte `offset` into the page.
    ///
    /// # Errors
    ///
    /// Same as [`read`](MappedPage::read).
    pub fn write(&mut self, offset: usize, value: AccessValue) -> Result<()> {
        self.check(offset, value.access_type())?;
        trace!("write {:?} at {:?}", value, self.base + offset);
        // SAFETY: see `read`.
        unsafe {
            let p = self.ptr.as_ptr().add(offset);
            match value {
                AccessValue::Byte(v) => ptr::write_volatile(p, v),
                AccessValue::Halfword(v) => ptr::write_volatile(p as *mut u16, v),
                AccessValue::Word(v) => ptr::write_volatile(p as *mut u32, v),
            }
        }
        Ok(())
    }

    /// Checks that `len` bytes starting at `offset` lie within the page.
    ///
    /// # Errors
    ///
    /// Returns [`PokeError::OutOfRange`] otherwise.
    pub fn check_span(&self, offset: usize, len: usize) -> Result<()> {
        match offset.checked_add(len) {
            Some(end) if end <= PAGE_SIZE => Ok(()),
            _ => Err(PokeError::OutOfRange { offset, len }),
        }
    }

    fn check(&self, offset: usize, access: AccessType) -> Result<()> {
        self.check_span(offset, access.len())?;
        let addr = self.base + offset;
        if !addr.is_aligned(access.len()) {
            return Err(PokeError::Misaligned {
                addr,
                len: access.len(),
            });
        }
        Ok(())
    }

    /// Unmaps the page.
    ///
    /// # Errors
    ///
    /// Returns [`PokeError::Os`] if `munmap` fails.
    pub fn unmap(self) -> Result<()> {
        let page = ManuallyDrop::new(self);
        if unsafe { munmap(page.ptr.as_ptr() as *mut libc::c_void, PAGE_SIZE) } == -1 {
            return Err(PokeError::last_os_error());
        }
        debug!("Memory unmapped at address {:p}.", page.ptr);
        Ok(())
    }
}

impl Drop for MappedPage<'_> {
    fn drop(&mut self) {
        unsafe { munmap(self.ptr.as_ptr() as *mut libc::c_void, PAGE_SIZE) };
    }
}
