/*!
The IDENTIFY DEVICE workflow: the part that actually answers "can I reach the
ATA disk behind this USB adapter, and does it speak S.M.A.R.T.?".

[`identify_device`](fn.identify_device.html) walks the
[bridge dialects](../bridge/index.html) in priority order against a single
512-byte sector buffer; the first dialect the hardware accepts wins. Partial
failure is the normal mode of operation here — a real disk behind a JMicron
bridge first rejects SAT, and that rejection is diagnostics, not a problem.
*/

use std::mem;

use ata::{Registers, Command};
use ata::data::id;
use bridge;
use device::Device;
use scsi;
use utils::hexdump;

/// Passthrough timeout, in seconds, that the CLI and other casual callers use
pub const DEFAULT_TIMEOUT: u32 = 2;

/**
The sector that IDENTIFY DEVICE fills: exactly 512 bytes, aligned the way the
passthrough primitive demands.
*/
#[repr(C, align(16))]
pub struct IdentifySector(pub [u8; 512]);

// a layout surprise here would mean silently misinterpreting device data,
// so refuse to build instead
const_assert_eq!(mem::size_of::<IdentifySector>(), 512);

impl ::std::fmt::Debug for IdentifySector {
	fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
		write!(f, "IdentifySector({:?}…)", &self.0[..8])
	}
}

quick_error! {
	#[derive(Debug)]
	pub enum Error {
		/// every dialect was tried and every dialect failed; payload carries each bridge's failure reason, in attempt order
		NoBridge(tried: Vec<(&'static str, scsi::Error)>) {
			display("no supported ATA passthrough bridge found")
		}
	}
}

/// What [`identify_device`](fn.identify_device.html) learned
#[derive(Debug)]
pub struct Identify {
	/// name of the bridge dialect the device accepted
	pub bridge: &'static str,
	pub id: id::Id,
}

impl Identify {
	pub fn smart_supported(&self) -> bool {
		self.id.smart.is_supported()
	}
}

/**
Issues ATA IDENTIFY DEVICE through every known bridge dialect until one works.

`timeout` is in seconds and applies to each attempt separately.

## Errors

Returns [`Error::NoBridge`](enum.Error.html) only after all five dialects were
tried and rejected; individual rejections along the way are expected and are
only surfaced through the error payload (and the log).
*/
pub fn identify_device(dev: &Device, timeout: u32) -> Result<Identify, Error> {
	let regs = Registers {
		command: Command::Identify as u8,
		..Default::default()
	};

	let mut sector = IdentifySector([0; 512]);

	let name = bridge::first_working(&bridge::BRIDGES, |bridge| {
		bridge.ata_passthrough(dev, &regs, &mut sector.0, timeout)
	}).map_err(Error::NoBridge)?;

	let id = id::parse_id(&sector.0);
	if id.smart.is_supported() {
		debug!("raw IDENTIFY data:\n{}", hexdump(&sector.0));
		info!("S.M.A.R.T. support detected ({})", id.smart);
	} else {
		info!("no S.M.A.R.T. support");
	}

	Ok(Identify {
		bridge: name,
		id: id,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use ata;
	use Direction;

	#[test]
	fn identify_registers() {
		// what every bridge encoder is fed by this workflow
		let regs = Registers { command: Command::Identify as u8, ..Default::default() };
		assert_eq!(regs.features, 0);
		assert_eq!(regs.device, 0); // must be 0 for identify
		assert_eq!(ata::direction(regs.command, regs.features), Direction::In);
	}

	#[test]
	fn sector_is_transport_clean() {
		// the buffer this module allocates must pass transport validation as-is
		let sector = IdentifySector([0; 512]);
		assert_eq!(sector.0.as_ptr() as usize % 0x10, 0);
		assert_eq!(sector.0.len(), 512);
	}
}
