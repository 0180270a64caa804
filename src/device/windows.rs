use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// See [parent module docs](index.html)
#[derive(Debug)]
pub struct Device {
	pub file: File,
}

impl Device {
	/// `path` is expected to name the physical device, e.g. `\\.\PhysicalDrive1`
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
		Ok(Device {
			// IOCTL_SCSI_PASS_THROUGH_DIRECT requires GENERIC_READ|GENERIC_WRITE on the handle
			file: OpenOptions::new().read(true).write(true).open(path)?,
		})
	}
}
