/*!
Cypress ATACB vendor passthrough. UNTESTED on real hardware.

See drivers/usb/storage/cypress_atacb.c in the Linux kernel.
*/

use ata::{self, Command, Registers};
use scsi::{Cdb, Error};
use Direction;

const CYPRESS_ATA_PASSTHROUGH: u8 = 0x24;

pub fn encode(regs: &Registers, data_len: usize) -> Result<(Cdb, Direction), Error> {
	let dir = ata::direction(regs.command, regs.features);

	let mut cdb = Cdb::new(16);
	cdb[0] = CYPRESS_ATA_PASSTHROUGH;
	cdb[1] = CYPRESS_ATA_PASSTHROUGH; // yes, twice
	if regs.command == Command::Identify as u8 || regs.command == Command::IdentifyPacketDevice as u8 {
		cdb[2] = 1 << 7; // IdentifyPacketDevice selector
	}
	cdb[3] = 0xff - (1<<0) - (1<<6); // taskfile validity: features, sector count, lba low/mid/high, device
	cdb[4] = 1; // units are blocks rather than bytes

	cdb[6] = regs.features;
	cdb[7] = (data_len >> 9) as u8; // sector count
	cdb[8] = regs.lba_low;
	cdb[9] = regs.lba_mid;
	cdb[10] = regs.lba_high;
	cdb[11] = regs.device;
	cdb[12] = regs.command;

	Ok((cdb, dir))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identify_cdb() {
		let regs = Registers { command: Command::Identify as u8, ..Default::default() };

		let (cdb, dir) = encode(&regs, 512).unwrap();
		assert_eq!(dir, Direction::In);
		assert_eq!(cdb.as_bytes(), [
			0x24, 0x24, 0x80, 0xbe, 0x01, 0x00, 0x00, 0x01,
			0x00, 0x00, 0x00, 0x00, 0xec, 0x00, 0x00, 0x00,
		]);
	}

	#[test]
	fn packet_device_bit() {
		let regs = Registers { command: Command::IdentifyPacketDevice as u8, ..Default::default() };
		let (cdb, _) = encode(&regs, 512).unwrap();
		assert_eq!(cdb[2], 0x80);

		let regs = Registers { command: Command::SMART as u8, ..Default::default() };
		let (cdb, _) = encode(&regs, 512).unwrap();
		assert_eq!(cdb[2], 0x00);
	}
}
