/*!
SCSI/ATA Translation: the standard way, for bridges that bother to follow it.

See T10/04-262r8 (ATA Command Pass-Through) and ATA8-ACS.
*/

use ata::{self, Registers};
use scsi::{Cdb, Error};
use Direction;

/// opcode: ATA PASS-THROUGH (12)
const SAT_ATA_PASSTHROUGH_12: u8 = 0xa1;

pub fn encode(regs: &Registers, data_len: usize) -> Result<(Cdb, Direction), Error> {
	let extend = 0;     // for 48-bit ATA commands (out of scope here)
	let ck_cond = 0;    // set to 1 to read register(s) back
	let byte_block = 1; // 0 -> T_LENGTH is in bytes, 1 -> in 512-byte blocks
	let mut protocol = 3;  // non-data
	let mut t_dir = 1;     // 0 -> to device, 1 -> from device
	let mut t_length = 0;  // 0 -> no data transferred

	// SAT carries the transfer length in the sector count register
	if data_len % 512 != 0 {
		return Err(Error::Buffer);
	}

	let dir = ata::direction(regs.command, regs.features);
	if data_len != 0 {
		match dir {
			Direction::None => (),
			Direction::In => {
				protocol = 4; // PIO data-in
				t_length = 2; // the transfer length is specified in the sector count field
			},
			Direction::Out => {
				protocol = 5; // PIO data-out
				t_length = 2;
				t_dir = 0;    // to device
			},
		}
	}

	let mut cdb = Cdb::new(12);
	cdb[0] = SAT_ATA_PASSTHROUGH_12;
	cdb[1] = (protocol << 1) | extend;
	cdb[2] = (ck_cond << 5) | (t_dir << 3) | (byte_block << 2) | t_length;
	cdb[3] = regs.features;
	cdb[4] = (data_len >> 9) as u8; // sector count
	cdb[5] = regs.lba_low;
	cdb[6] = regs.lba_mid;
	cdb[7] = regs.lba_high;
	cdb[8] = regs.device; // must be 0 for IDENTIFY
	cdb[9] = regs.command;

	Ok((cdb, dir))
}

#[cfg(test)]
mod tests {
	use super::*;
	use ata::Command;

	fn identify() -> Registers {
		Registers { command: Command::Identify as u8, ..Default::default() }
	}

	#[test]
	fn identify_cdb() {
		let (cdb, dir) = encode(&identify(), 512).unwrap();
		assert_eq!(dir, Direction::In);
		assert_eq!(cdb.as_bytes(), [
			0xa1, 0x08, 0x0e, 0x00, 0x01, 0x00,
			0x00, 0x00, 0x00, 0xec, 0x00, 0x00,
		]);
	}

	#[test]
	fn rejects_partial_sectors() {
		// must fail locally, before any I/O is attempted
		assert_eq!(encode(&identify(), 511), Err(Error::Buffer));
		assert_eq!(encode(&identify(), 513), Err(Error::Buffer));
	}

	#[test]
	fn sector_count() {
		let (cdb, _) = encode(&identify(), 512).unwrap();
		assert_eq!(cdb[4], 1);
		let (cdb, _) = encode(&identify(), 1024).unwrap();
		assert_eq!(cdb[4], 2);
	}

	#[test]
	fn non_data() {
		let (cdb, dir) = encode(&Registers { command: 0xe7, ..Default::default() }, 0).unwrap();
		assert_eq!(dir, Direction::None);
		assert_eq!(cdb[1], 3 << 1); // non-data protocol
		assert_eq!(cdb[4], 0);
	}
}
