//! Tabular output of the read phase.

use std::io::{self, Write};

use crate::access::AccessValue;
use crate::memory::PhysAddr;
use crate::util::ROW_BYTES;

/// Writes values as rows of [`ROW_BYTES`] bytes, each labelled with its start address.
///
/// ```text
///
/// 00001000: aa bb cc dd ee ff 00 11 22 33 44 55 66 77 88 99
/// 00001010: 01 02
///
/// ```
pub struct HexDump<W: Write> {
    out: W,
    consumed: usize,
}

impl<W: Write> HexDump<W> {
    /// Creates an empty dump writing to `out`.
    pub fn new(out: W) -> Self {
        HexDump { out, consumed: 0 }
    }

    /// Appends `value`, read from `addr`, starting a new row when needed.
    pub fn push(&mut self, addr: PhysAddr, value: AccessValue) -> io::Result<()> {
        if self.consumed % ROW_BYTES == 0 {
            write!(self.out, "\n{:08x}:", addr)?;
        }
        write!(self.out, " {}", value)?;
        self.consumed += value.access_type().len();
        Ok(())
    }

    /// Terminates the dump and flushes the writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.write_all(b"\n\n")?;
        self.out.flush()?;
        Ok(self.out)
    }
}
