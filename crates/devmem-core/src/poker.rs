use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::access::AccessValue;
use crate::dump::HexDump;
use crate::error::{PokeError, Result};
use crate::memory::{AccessCursor, MappedPage, PhysAddr, PhysMemDevice};
use crate::request::{Mode, PokeRequest};
use crate::util::DEV_MEM;

/// Reads and writes physical memory through a memory device.
///
/// Each [`run`](MemoryPoker::run) opens the device, maps the page containing the
/// requested address, dumps `count` values, optionally stores one value right after
/// them (at the address itself when `count` is 0), and releases the mapping and the
/// device again.
///
/// Writes are not guarded in any way. Poking the wrong physical address can hang or
/// corrupt the running system.
#[derive(Clone, Debug)]
pub struct MemoryPoker {
    device: PathBuf,
}

/// The values accessed by one [`MemoryPoker::run`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PokeReport {
    /// Every value of the read phase with the address it was read from
    pub values: Vec<(PhysAddr, AccessValue)>,
    /// The store of the write phase, if any
    pub write: Option<WriteReport>,
}

/// Outcome of the single store in write mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteReport {
    /// Address the value was stored at
    pub addr: PhysAddr,
    /// Value requested, before truncation
    pub data: u64,
    /// Value stored, truncated to the access width
    pub written: AccessValue,
    /// Value read back immediately after the store
    pub readback: AccessValue,
}

impl Default for MemoryPoker {
    fn default() -> Self {
        MemoryPoker::new(DEV_MEM)
    }
}

impl MemoryPoker {
    /// Creates a poker operating on the device at `device`.
    pub fn new(device: impl Into<PathBuf>) -> Self {
        MemoryPoker {
            device: device.into(),
        }
    }

    /// Path of the memory device.
    pub fn device(&self) -> &Path {
        &self.device
    }

    /// Executes `request`, writing the dump and the write report to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`PokeError::Os`] if the device cannot be opened, mapped or unmapped,
    /// [`PokeError::OutOfRange`] if the accesses do not fit into the page containing
    /// the address, [`PokeError::Misaligned`] for unaligned accesses and
    /// [`PokeError::Output`] if writing to `out` fails.
    pub fn run<W: Write>(&self, request: &PokeRequest, out: &mut W) -> Result<PokeReport> {
        info!("{:?} on {}", request, self.device.display());
        let device = PhysMemDevice::open(&self.device)?;
        let mut page = MappedPage::map(&device, request.addr)?;

        let len = request.access.len();
        let offset = request.addr.page_offset();
        let accesses = match request.mode {
            Mode::Read => request.count,
            Mode::Write { .. } => request.count.saturating_add(1),
        };
        let span = accesses
            .checked_mul(len)
            .ok_or(PokeError::OutOfRange {
                offset,
                len: usize::MAX,
            })?;
        page.check_span(offset, span)?;
        debug!("{} accesses of {} bytes from page offset {:#x}", accesses, len, offset);

        let mut report = PokeReport::default();
        let mut cursor = AccessCursor::new(request.addr, request.access);
        let mut dump = HexDump::new(&mut *out);
        for _ in 0..request.count {
            let addr = cursor.addr();
            let value = cursor.read_next(&page)?;
            dump.push(addr, value)?;
            report.values.push((addr, value));
        }
        dump.finish()?;

        if let Mode::Write { data } = request.mode {
            let written = cursor.write(&mut page, data)?;
            if written.as_u64() != data {
                warn!(
                    "Value 0x{:X} truncated to {} bits",
                    data,
                    request.access.len() * 8
                );
            }
            let readback = cursor.peek(&page)?;
            writeln!(out, "Written 0x{:X}; readback 0x{:X}", data, readback)?;
            out.flush()?;
            report.write = Some(WriteReport {
                addr: cursor.addr(),
                data,
                written,
                readback,
            });
        }

        page.unmap()?;
        device.close();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::AccessType;
    use crate::util::PAGE_SIZE;
    use std::io::{Seek, SeekFrom};
    use tempfile::NamedTempFile;

    fn device_with(offset: u64, bytes: &[u8]) -> anyhow::Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(&vec![0u8; 4 * PAGE_SIZE])?;
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(file)
    }

    fn run(file: &NamedTempFile, args: &[&str]) -> anyhow::Result<(PokeReport, String)> {
        let request = PokeRequest::parse(args)?;
        let mut out = Vec::new();
        let report = MemoryPoker::new(file.path()).run(&request, &mut out)?;
        Ok((report, String::from_utf8(out)?))
    }

    #[test]
    fn test_read_bytes() -> anyhow::Result<()> {
        let file = device_with(0x1000, &[0xaa, 0xbb, 0xcc])?;
        let (report, out) = run(&file, &["r", "1000", "b", "3"])?;
        assert_eq!(out, "\n00001000: aa bb cc\n\n");
        assert_eq!(report.values.len(), 3);
        assert_eq!(report.values[2], (PhysAddr::new(0x1002), AccessValue::Byte(0xcc)));
        assert!(report.write.is_none());
        Ok(())
    }

    #[test]
    fn test_write_word() -> anyhow::Result<()> {
        let file = device_with(0x2000, &[0x11, 0x22, 0x33, 0x44])?;
        let (report, out) = run(&file, &["w", "2000", "l", "FFFFFFFF"])?;
        assert_eq!(out, "\n\nWritten 0xFFFFFFFF; readback 0xFFFFFFFF\n");
        assert!(report.values.is_empty());
        let write = report.write.unwrap();
        assert_eq!(write.addr, PhysAddr::new(0x2000));
        assert_eq!(write.written, AccessValue::Word(0xffff_ffff));
        assert_eq!(write.readback, write.written);

        let bytes = std::fs::read(file.path())?;
        assert_eq!(&bytes[0x2000..0x2004], &[0xff; 4]);
        assert_eq!(&bytes[0x2004..0x2008], &[0; 4]);
        Ok(())
    }

    #[test]
    fn test_write_after_count_values() -> anyhow::Result<()> {
        let file = device_with(0x2000, &[0x11, 0x22, 0x33, 0x44])?;
        let (report, out) = run(&file, &["w", "2000", "l", "cafe", "1"])?;
        assert!(out.starts_with("\n00002000: "));
        assert!(out.ends_with("\n\nWritten 0xCAFE; readback 0xCAFE\n"));
        assert_eq!(
            report.values,
            vec![(
                PhysAddr::new(0x2000),
                AccessValue::Word(u32::from_ne_bytes([0x11, 0x22, 0x33, 0x44]))
            )]
        );
        // the store lands right after the values read.
        assert_eq!(report.write.unwrap().addr, PhysAddr::new(0x2004));
        Ok(())
    }

    #[test]
    fn test_write_truncates() -> anyhow::Result<()> {
        let file = device_with(0, &[])?;
        let (report, out) = run(&file, &["w", "3000", "h", "12345"])?;
        // the requested value is reported, the readback shows what was stored.
        assert_eq!(out, "\n\nWritten 0x12345; readback 0x2345\n");
        let write = report.write.unwrap();
        assert_eq!(write.addr, PhysAddr::new(0x3000));
        assert_eq!(write.data, 0x12345);
        assert_eq!(write.written, AccessValue::Halfword(0x2345));
        assert_eq!(write.readback, AccessValue::Halfword(0x2345));
        Ok(())
    }

    #[test]
    fn test_span_crossing_page_fails_before_output() -> anyhow::Result<()> {
        let file = device_with(0, &[])?;
        let request = PokeRequest::parse(&["r", "1ffc", "l", "2"])?;
        let mut out = Vec::new();
        let err = MemoryPoker::new(file.path())
            .run(&request, &mut out)
            .unwrap_err();
        assert!(matches!(err, PokeError::OutOfRange { offset: 0xffc, len: 8 }));
        assert!(out.is_empty());

        // the write needs room for one more value.
        let request = PokeRequest::parse(&["w", "1ffc", "l", "0", "1"])?;
        assert!(matches!(
            MemoryPoker::new(file.path()).run(&request, &mut out),
            Err(PokeError::OutOfRange { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_missing_device() {
        let request = PokeRequest {
            mode: Mode::Read,
            addr: PhysAddr::new(0),
            access: AccessType::Byte,
            count: 1,
        };
        let err = MemoryPoker::new("/nonexistent/devmem3/mem")
            .run(&request, &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, PokeError::Os { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_default_device() {
        assert_eq!(MemoryPoker::default().device(), Path::new("/dev/mem"));
    }
}
