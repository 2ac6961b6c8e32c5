//! # devmem3
//!
//! devmem3 reads and writes any location in physical memory. It maps the page of
//! `/dev/mem` that contains the target address and performs byte, halfword or word
//! accesses inside it, which makes it useful for inspecting and changing hardware
//! registers while bringing up a board or debugging a driver.
//!
//! ## Quickstart guide
//!
//! ```sh
//! cargo build --release
//! # dump four words starting at 0xfe200000
//! sudo target/release/devmem3 r fe200000 l 4
//! # write 0x1 to the halfword at 0xfe200000
//! sudo target/release/devmem3 w fe200000 h 1
//! ```
//!
//! Use `--device <PATH>` to map another file instead of `/dev/mem`, and
//! `RUST_LOG=debug` to see where the page was mapped.
//!
//! ## Modules
//!
//! - `access`: Access widths and typed values.
//! - `dump`: Row formatting of the read phase.
//! - `memory`: Physical addresses, the memory device, the mapped page and its cursor.
//! - `request`: The command line grammar.
//! - `util`: Page constants and number parsing.
//!
//! ## External Crates
//!
//! - `log`: Used for logging throughout the crate.
//! - `libc`: `mmap`/`munmap` of the memory device.
pub use devmem_core::*;
