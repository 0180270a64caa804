/*!
SunPlus vendor passthrough. UNTESTED on real hardware.
*/

use ata::{self, Registers};
use scsi::{self, Cdb, Error};
use Direction;

pub fn encode(regs: &Registers, data_len: usize) -> Result<(Cdb, Direction), Error> {
	let dir = ata::direction(regs.command, regs.features);

	let mut cdb = Cdb::new(12);
	cdb[0] = scsi::SUNPLUS_ATA_PASSTHROUGH;
	cdb[2] = 0x22;
	if data_len != 0 {
		cdb[3] = match dir {
			Direction::In => 0x10,
			Direction::Out => 0x11,
			Direction::None => 0x00,
		};
	}
	cdb[4] = (data_len >> 9) as u8;
	cdb[5] = regs.features;
	cdb[6] = (data_len >> 9) as u8; // sector count
	cdb[7] = regs.lba_low;
	cdb[8] = regs.lba_mid;
	cdb[9] = regs.lba_high;
	cdb[10] = regs.device | 0xa0;
	cdb[11] = regs.command;

	Ok((cdb, dir))
}

#[cfg(test)]
mod tests {
	use super::*;
	use ata::Command;

	#[test]
	fn identify_cdb() {
		let regs = Registers { command: Command::Identify as u8, ..Default::default() };

		let (cdb, dir) = encode(&regs, 512).unwrap();
		assert_eq!(dir, Direction::In);
		assert_eq!(cdb.as_bytes(), [
			0xf8, 0x00, 0x22, 0x10, 0x01, 0x00,
			0x01, 0x00, 0x00, 0x00, 0xa0, 0xec,
		]);
	}

	#[test]
	fn no_transfer_no_flag() {
		let regs = Registers { command: 0xe7, ..Default::default() };

		let (cdb, dir) = encode(&regs, 0).unwrap();
		assert_eq!(dir, Direction::None);
		assert_eq!(cdb[3], 0x00);
		// the upper-nibble mask is applied to the device register unconditionally
		assert_eq!(cdb[10], 0xa0);
	}
}
