//! Command line grammar.
//!
//! ```text
//! r <address-hex> [type] [count]
//! w <address-hex> <type> <data-hex> [count]
//! ```

use log::warn;

use crate::access::AccessType;
use crate::error::{PokeError, Result};
use crate::memory::PhysAddr;
use crate::util::{parse_hex, parse_int};

/// What to do after the read phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Only read.
    Read,
    /// Read, then store `data` right after the last value read.
    Write {
        /// Value to store, truncated to the access width
        data: u64,
    },
}

/// A fully parsed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PokeRequest {
    /// Read or write
    pub mode: Mode,
    /// Physical address of the first access
    pub addr: PhysAddr,
    /// Width of every access
    pub access: AccessType,
    /// Number of values read before the optional write (1 in read mode, 0 in write mode
    /// unless given)
    pub count: usize,
}

impl PokeRequest {
    /// Parses the positional arguments, excluding the program name.
    ///
    /// The mode is taken from the first character of the first argument. In read mode
    /// the count is the fourth argument and defaults to 1. In write mode the data is the
    /// fourth and the count the fifth; without a count nothing is read and the data is
    /// stored at the address itself.
    ///
    /// # Errors
    ///
    /// Returns [`PokeError::IllegalAccessType`] for an unknown type code and
    /// [`PokeError::Usage`] for anything else that is missing or malformed.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let arg = |i: usize| nth(args, i);

        let (Some(mode), Some(addr)) = (arg(0), arg(1)) else {
            return Err(PokeError::Usage("missing mode or address".into()));
        };
        let is_write = match mode.chars().next() {
            Some('r') => false,
            Some('w') => true,
            _ => return Err(PokeError::Usage(format!("unknown mode '{mode}'"))),
        };
        let addr = parse_hex(addr)
            .and_then(|a| usize::try_from(a).ok())
            .map(PhysAddr::new)
            .ok_or_else(|| PokeError::Usage(format!("invalid address '{addr}'")))?;
        let access = match arg(2) {
            Some(code) => AccessType::from_code(code)?,
            None => AccessType::default(),
        };

        let (mode, count, default_count) = if is_write {
            let data = arg(3)
                .ok_or_else(|| PokeError::Usage("missing data to write".into()))?;
            let data = parse_hex(data)
                .ok_or_else(|| PokeError::Usage(format!("invalid data '{data}'")))?;
            (Mode::Write { data }, arg(4), 0)
        } else {
            if let Some(extra) = arg(4) {
                warn!("Ignoring extra argument '{}' in read mode", extra);
            }
            (Mode::Read, arg(3), 1)
        };
        let count = match count {
            Some(count) => parse_int(count)
                .and_then(|c| usize::try_from(c).ok())
                .ok_or_else(|| PokeError::Usage(format!("invalid count '{count}'")))?,
            None => default_count,
        };

        Ok(PokeRequest {
            mode,
            addr,
            access,
            count,
        })
    }
}

fn nth<S: AsRef<str>>(args: &[S], i: usize) -> Option<&str> {
    args.get(i).map(|s| s.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_defaults() {
        let req = PokeRequest::parse(&["r", "1000"]).unwrap();
        assert_eq!(
            req,
            PokeRequest {
                mode: Mode::Read,
                addr: PhysAddr::new(0x1000),
                access: AccessType::Word,
                count: 1,
            }
        );
    }

    #[test]
    fn test_read_with_count() {
        let req = PokeRequest::parse(&["read", "0x1000", "B", "3"]).unwrap();
        assert_eq!(req.mode, Mode::Read);
        assert_eq!(req.access, AccessType::Byte);
        assert_eq!(req.count, 3);

        assert_eq!(PokeRequest::parse(&["r", "0", "h", "0x10"]).unwrap().count, 16);
        assert_eq!(PokeRequest::parse(&["r", "0", "h", "010"]).unwrap().count, 8);
        assert_eq!(PokeRequest::parse(&["r", "0", "h", "0"]).unwrap().count, 0);
    }

    #[test]
    fn test_write() {
        let req = PokeRequest::parse(&["w", "2000", "l", "FFFFFFFF"]).unwrap();
        assert_eq!(req.mode, Mode::Write { data: 0xffff_ffff });
        assert_eq!(req.addr, PhysAddr::new(0x2000));
        assert_eq!(req.access, AccessType::Word);
        // no read pass, the store hits the address itself.
        assert_eq!(req.count, 0);

        let req = PokeRequest::parse(&["w", "2000", "b", "0x5a", "4"]).unwrap();
        assert_eq!(req.mode, Mode::Write { data: 0x5a });
        assert_eq!(req.count, 4);
    }

    #[test]
    fn test_usage_errors() {
        let empty: [&str; 0] = [];
        assert!(matches!(PokeRequest::parse(&empty), Err(PokeError::Usage(_))));
        assert!(matches!(PokeRequest::parse(&["r"]), Err(PokeError::Usage(_))));
        assert!(matches!(
            PokeRequest::parse(&["x", "1000"]),
            Err(PokeError::Usage(_))
        ));
        assert!(matches!(
            PokeRequest::parse(&["", "1000"]),
            Err(PokeError::Usage(_))
        ));
        assert!(matches!(
            PokeRequest::parse(&["r", "nothex"]),
            Err(PokeError::Usage(_))
        ));
        assert!(matches!(
            PokeRequest::parse(&["w", "1000", "l"]),
            Err(PokeError::Usage(_))
        ));
        assert!(matches!(
            PokeRequest::parse(&["w", "1000", "l", "zz"]),
            Err(PokeError::Usage(_))
        ));
        assert!(matches!(
            PokeRequest::parse(&["r", "1000", "b", "many"]),
            Err(PokeError::Usage(_))
        ));
    }

    #[test]
    fn test_illegal_type() {
        assert!(matches!(
            PokeRequest::parse(&["r", "1000", "x"]),
            Err(PokeError::IllegalAccessType('x'))
        ));
        // the type is checked before the data.
        assert!(matches!(
            PokeRequest::parse(&["w", "1000", "q"]),
            Err(PokeError::IllegalAccessType('q'))
        ));
    }
}
