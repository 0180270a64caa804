/*!
The SCSI passthrough primitive.

[`Device::scsi_passthrough`](../device/struct.Device.html#method.scsi_passthrough)
validates a hand-crafted CDB plus data buffer and submits it, once, to the OS
passthrough control path (`SG_IO` on Linux, `IOCTL_SCSI_PASS_THROUGH_DIRECT`
on Windows). Everything else in this crate funnels through it.

The outcome is a single [`Error`](enum.Error.html) taxonomy with three shapes:

* `Ok(())` — the device accepted the command and reported GOOD status;
* `Err(Error::Status(_))` — the device (or the bridge firmware in front of it)
  rejected the command. This is hardware talking, not a software bug: callers
  probing for a working bridge dialect must treat it as "try the next one";
* any other `Err(_)` — either a contract violation caught locally before any
  I/O was attempted, or an OS-level transport failure.
*/

#[cfg(unix)]
mod linux;
#[cfg(windows)]
mod windows;

use std::ops;

use device::Device;
use Direction;

/// CDB opcode of the JMicron vendor ATA passthrough
pub const JMICRON_ATA_PASSTHROUGH: u8 = 0xdf;
/// CDB opcode of the SunPlus vendor ATA passthrough
pub const SUNPLUS_ATA_PASSTHROUGH: u8 = 0xf8;

quick_error! {
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	pub enum Error {
		/// CDB must be 1 to 16 bytes long
		CdbLength { display("Invalid CDB length") }
		/// caught before any I/O is attempted
		Buffer { display("Buffer must be aligned to a 16-byte boundary and less than 64KB in size") }
		/// unreachable with [`Direction`](../enum.Direction.html) being a closed enum; kept so every historical result code still renders
		InvalidDirection { display("Invalid direction") }
		ExtendedCdb { display("Extended and variable length CDB commands are not supported") }
		/// opcodes above 0xC0 are rejected, apart from the special JMicron/SunPlus modes
		Opcode { display("Opcodes above 0xC0 are not supported") }
		Timeout { display("Timeout") }
		InvalidParameter { display("Invalid passthrough request parameter") }
		Unknown { display("Unknown transport error") }
		/// non-GOOD status byte reported by the device itself
		Status(status: u8) { display("SCSI status: 0x{:02X}", status) }
	}
}

/**
Command Descriptor Block: a fixed-length byte sequence of 1 to 16 bytes.

The length is pinned at construction time; indexing is checked against it, so
an encoder that miscounts its own layout panics in tests instead of quietly
submitting trailing garbage to a device.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cdb {
	buf: [u8; 16],
	len: usize,
}

impl Cdb {
	/// Returns a zero-filled CDB that is fixed at `len` bytes. Panics unless `1 ≤ len ≤ 16`.
	pub fn new(len: usize) -> Cdb {
		assert!(len >= 1 && len <= 16);
		Cdb { buf: [0; 16], len: len }
	}
	pub fn len(&self) -> usize { self.len }
	pub fn as_bytes(&self) -> &[u8] { &self.buf[..self.len] }
}

impl ops::Index<usize> for Cdb {
	type Output = u8;
	fn index(&self, index: usize) -> &u8 {
		&self.buf[..self.len][index]
	}
}
impl ops::IndexMut<usize> for Cdb {
	fn index_mut(&mut self, index: usize) -> &mut u8 {
		&mut self.buf[..self.len][index]
	}
}

// sanity checks shared by both platform backends; must not touch the device
fn validate(cdb: &[u8], data: &[u8]) -> Result<(), Error> {
	if cdb.is_empty() || cdb.len() > 16 {
		return Err(Error::CdbLength);
	}

	// the transfer length field of the passthrough request is 16 bits wide,
	// and host controllers are picky about DMA alignment;
	// an empty buffer means nothing is transferred, so its address is irrelevant
	if data.len() > 0xffff || (!data.is_empty() && data.as_ptr() as usize % 0x10 != 0) {
		return Err(Error::Buffer);
	}

	// direction: nothing to check, Direction is a closed enum

	// 0x7e/0x7f introduce extended and variable-length CDBs, see SPC-4
	if cdb[0] == 0x7e || cdb[0] == 0x7f {
		return Err(Error::ExtendedCdb);
	}

	if cdb[0] >= 0xc0 && cdb[0] != JMICRON_ATA_PASSTHROUGH && cdb[0] != SUNPLUS_ATA_PASSTHROUGH {
		return Err(Error::Opcode);
	}

	Ok(())
}

impl Device {
	/**
	Executes `cdb` against the device, filling (or sending) `data` if `dir` says so.

	`data` is only borrowed for the duration of the call; it must start on a
	16-byte boundary and be under 64KB in size. `timeout` is in seconds and is
	enforced by the OS layer — once submitted, the command runs to completion
	or times out, there is no cancellation.

	Blocks the calling thread. Concurrent calls against the same device are
	the caller's problem to serialize.
	*/
	pub fn scsi_passthrough(&self, cdb: &[u8], dir: Direction, data: &mut [u8], timeout: u32) -> Result<(), Error> {
		validate(cdb, data)?;
		self.do_platform_cmd(cdb, dir, data, timeout)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	// guarantees a known alignment for slices derived from it
	#[repr(C, align(16))]
	struct Aligned([u8; 64]);

	#[test]
	fn cdb_length() {
		let buf = Aligned([0; 64]);
		assert_eq!(validate(&[], &buf.0), Err(Error::CdbLength));
		assert_eq!(validate(&[0u8; 17], &buf.0), Err(Error::CdbLength));
		assert_eq!(validate(&[0u8; 16], &buf.0), Ok(()));
		assert_eq!(validate(&[0u8; 1], &buf.0), Ok(()));
	}

	#[test]
	fn buffer_alignment() {
		let buf = Aligned([0; 64]);
		assert_eq!(validate(&[0u8; 6], &buf.0[1..]), Err(Error::Buffer));
		assert_eq!(validate(&[0u8; 6], &buf.0[16..]), Ok(()));
		// no transfer, no alignment requirement
		assert_eq!(validate(&[0u8; 6], &buf.0[1..1]), Ok(()));
	}

	#[test]
	fn buffer_length() {
		// the transfer length field is 16 bits wide
		let buf = vec![0u8; 0x10000];
		assert_eq!(validate(&[0u8; 6], &buf), Err(Error::Buffer));
	}

	#[test]
	fn opcodes() {
		let buf = Aligned([0; 64]);
		assert_eq!(validate(&[0x7e], &buf.0), Err(Error::ExtendedCdb));
		assert_eq!(validate(&[0x7f], &buf.0), Err(Error::ExtendedCdb));
		assert_eq!(validate(&[0xc1], &buf.0), Err(Error::Opcode));
		assert_eq!(validate(&[0xff], &buf.0), Err(Error::Opcode));
		// vendor passthrough modes are exempt
		assert_eq!(validate(&[JMICRON_ATA_PASSTHROUGH], &buf.0), Ok(()));
		assert_eq!(validate(&[SUNPLUS_ATA_PASSTHROUGH], &buf.0), Ok(()));
		// order: extended CDB check precedes everything opcode-related
		assert_eq!(validate(&[0x7e; 17], &buf.0), Err(Error::CdbLength));
	}

	#[test]
	fn status_rendering() {
		assert_eq!(format!("{}", Error::Status(0x02)), "SCSI status: 0x02");
		assert_eq!(format!("{}", Error::Status(0xff)), "SCSI status: 0xFF");
	}
}
