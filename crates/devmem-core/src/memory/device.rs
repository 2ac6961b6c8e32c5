use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{PokeError, Result};

/// An open handle to a physical memory device such as `/dev/mem`.
///
/// The device is opened for synchronous read/write access. The handle is closed
/// when dropped or by calling [`close`](PhysMemDevice::close).
#[derive(Debug)]
pub struct PhysMemDevice {
    file: File,
    path: PathBuf,
}

impl PhysMemDevice {
    /// Opens the device at `path` with `O_RDWR | O_SYNC`.
    ///
    /// # Errors
    ///
    /// Returns [`PokeError::Os`] if the device cannot be opened, e.g. because it
    /// does not exist or the caller lacks the required privileges.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = match OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(path)
        {
            Ok(file) => file,
            Err(e) => return Err(PokeError::os(e)),
        };
        debug!("{} opened.", path.display());
        Ok(PhysMemDevice {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Path the device was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Closes the device.
    pub fn close(self) {
        debug!("{} closed.", self.path.display());
    }
}

impl AsRawFd for PhysMemDevice {
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}
