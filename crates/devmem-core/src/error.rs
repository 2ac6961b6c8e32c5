use std::io;
use std::panic::Location;

use thiserror::Error;

use crate::memory::PhysAddr;
use crate::util::strerror;

/// Errors that can occur while poking physical memory.
#[derive(Debug, Error)]
pub enum PokeError {
    /// The command line is incomplete or malformed.
    #[error("{0}")]
    Usage(String),
    /// The access type code is not one of `b`, `h`, `l` or `w`.
    #[error("Illegal data type '{0}'.")]
    IllegalAccessType(char),
    /// An operating system call failed.
    #[error(
        "Error at line {}, file {} ({}) [{}]",
        .location.line(),
        .location.file(),
        errno(.source),
        describe(.source)
    )]
    Os {
        /// Source position that issued the failing call
        location: &'static Location<'static>,
        /// Error reported by the operating system
        source: io::Error,
    },
    /// An access does not fit into the mapped page.
    #[error("Access of {len} bytes at page offset {offset:#x} exceeds the mapped page")]
    OutOfRange {
        /// Offset into the page
        offset: usize,
        /// Number of bytes accessed
        len: usize,
    },
    /// An access is not naturally aligned.
    #[error("Address {addr:?} is not aligned to {len} bytes")]
    Misaligned {
        /// Target address
        addr: PhysAddr,
        /// Access width in bytes
        len: usize,
    },
    /// Writing the results failed.
    #[error(transparent)]
    Output(#[from] io::Error),
}

/// Result type for devmem3 operations.
pub type Result<T> = std::result::Result<T, PokeError>;

impl PokeError {
    /// Wraps an OS error, recording the caller's source position.
    #[track_caller]
    pub fn os(source: io::Error) -> Self {
        PokeError::Os {
            location: Location::caller(),
            source,
        }
    }

    /// Captures `errno` of the last failed OS call, recording the caller's source position.
    #[track_caller]
    pub fn last_os_error() -> Self {
        PokeError::Os {
            location: Location::caller(),
            source: io::Error::last_os_error(),
        }
    }

    /// Process exit code for this error.
    ///
    /// Invalid access types exit with 2, every other failure with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            PokeError::IllegalAccessType(_) => 2,
            _ => 1,
        }
    }
}

fn errno(err: &io::Error) -> i32 {
    err.raw_os_error().unwrap_or(0)
}

fn describe(err: &io::Error) -> String {
    match err.raw_os_error() {
        Some(code) => strerror(code),
        None => err.to_string(),
    }
}
