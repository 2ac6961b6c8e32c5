//! # devmem3 Core
//!
//! `devmem-core` reads and writes arbitrary physical memory by mapping one page of a
//! physical memory device (usually `/dev/mem`) and performing typed loads and stores
//! inside it. It is meant for peeking and poking hardware registers during board
//! bring-up and driver debugging.
//!
//! ## Main Components
//!
//! - [`MemoryPoker`] - Runs a [`PokeRequest`]: opens the device, maps the page,
//!   dumps the requested values and optionally writes one value.
//!
//! - [`memory`] module - [`memory::PhysAddr`], [`memory::PhysMemDevice`],
//!   [`memory::MappedPage`] and the bounds-checked [`memory::AccessCursor`].
//!
//! - [`access`] module - Access widths ([`AccessType`]) and typed values ([`AccessValue`]).
//!
//! - [`util`] module - Page constants and `strtoul`-style number parsing.
//!
//! ## Safety
//!
//! Writing physical memory is inherently dangerous. Nothing prevents a request from
//! targeting RAM in use by the kernel or a device register with side effects.
//!
//! ## Platform Support
//!
//! Linux (or any Unix with a mappable `/dev/mem`). Accessing `/dev/mem` requires root
//! privileges and a kernel that permits it (`CONFIG_STRICT_DEVMEM` restricts the
//! accessible ranges).

#![warn(missing_docs)]

pub mod access;
pub mod dump;
mod error;
pub mod memory;
mod poker;
pub mod request;
pub mod util;

pub use crate::access::{AccessType, AccessValue};
pub use crate::error::{PokeError, Result};
pub use crate::poker::{MemoryPoker, PokeReport, WriteReport};
pub use crate::request::{Mode, PokeRequest};
