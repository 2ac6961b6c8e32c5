//! Utility functions and constants used throughout devmem3.
//!
//! This module provides:
//! - Constants for memory operations ([`PAGE_SIZE`], [`PAGE_MASK`], [`ROW_BYTES`])
//! - Number parsing helpers following C `strtoul` conventions ([`parse_hex`], [`parse_int`])
//! - [`strerror`] for describing OS error numbers

mod constants;

pub use self::constants::*;

use std::ffi::CStr;

/// Parses a hexadecimal number, with or without a `0x`/`0X` prefix.
///
/// Returns `None` if the input is empty, contains non-hex digits (including a sign), or does
/// not fit into `u64`.
///
/// # Examples
///
/// ```
/// use devmem_core::util::parse_hex;
///
/// assert_eq!(parse_hex("1000"), Some(0x1000));
/// assert_eq!(parse_hex("0xFFFFFFFF"), Some(0xffff_ffff));
/// assert_eq!(parse_hex("zz"), None);
/// ```
pub fn parse_hex(s: &str) -> Option<u64> {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

/// Parses an integer with the base detected from its prefix.
///
/// `0x`/`0X` selects hexadecimal, a leading `0` selects octal, anything else is decimal.
///
/// # Examples
///
/// ```
/// use devmem_core::util::parse_int;
///
/// assert_eq!(parse_int("16"), Some(16));
/// assert_eq!(parse_int("0x10"), Some(16));
/// assert_eq!(parse_int("020"), Some(16));
/// ```
pub fn parse_int(s: &str) -> Option<u64> {
    let s = s.trim();
    let (digits, radix) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (hex, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

/// Returns the system's description for an OS error number.
pub fn strerror(errno: i32) -> String {
    // SAFETY: strerror returns a pointer to a NUL-terminated static or thread-local string.
    unsafe { CStr::from_ptr(libc::strerror(errno)) }
        .to_string_lossy()
        .into_owned()
}

/// Returns the page size reported by the operating system.
pub fn system_page_size() -> usize {
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size <= 0 { PAGE_SIZE } else { size as usize }
}
