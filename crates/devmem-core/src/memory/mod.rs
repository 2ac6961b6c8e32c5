//! The `memory` module provides access to physical memory through a memory device.
//!
//! The `memory` module provides the following abstractions:
//! - `PhysAddr`: A physical address, split into page base and page offset.
//! - `PhysMemDevice`: An open physical memory device such as `/dev/mem`.
//! - `MappedPage`: One page of the device mapped into the process, with checked volatile accesses.
//! - `AccessCursor`: A moving, bounds-checked position inside a `MappedPage`.
mod cursor;
mod device;
mod mapped_page;
mod phys_addr;

pub use self::cursor::AccessCursor;
pub use self::device::PhysMemDevice;
pub use self::mapped_page::MappedPage;
pub use self::phys_addr::PhysAddr;
