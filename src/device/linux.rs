use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// See [parent module docs](index.html)
#[derive(Debug)]
pub struct Device {
	pub file: File,
}

impl Device {
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
		Ok(Device {
			// not O_RDONLY: SG_IO against some targets (and, later, formatting) wants a R/W descriptor
			file: OpenOptions::new().read(true).write(true).open(path)?,
		})
	}
}
