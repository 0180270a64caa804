/*!
JMicron (JM20329 and friends) vendor passthrough, and the Prolific PL3507
variant of it.

The two dialects share one layout; the only difference is that JMicron takes
two extra trailing vendor bytes (0x06 0x7b) that the Prolific form truncates
away, leaving a 12-byte CDB.
*/

use ata::{self, Registers};
use scsi::{self, Cdb, Error};
use Direction;

fn encode_jmpl(regs: &Registers, data_len: usize, prolific: bool) -> Result<(Cdb, Direction), Error> {
	let dir = ata::direction(regs.command, regs.features);

	let mut cdb = Cdb::new(if prolific { 12 } else { 14 });
	cdb[0] = scsi::JMICRON_ATA_PASSTHROUGH;
	// 0x10 unless something is actually pushed towards the device
	cdb[1] = if data_len != 0 && dir == Direction::Out { 0x00 } else { 0x10 };
	cdb[3] = (data_len >> 8) as u8;
	cdb[4] = data_len as u8;
	cdb[5] = regs.features;
	cdb[6] = (data_len >> 9) as u8; // sector count
	cdb[7] = regs.lba_low;
	cdb[8] = regs.lba_mid;
	cdb[9] = regs.lba_high;
	cdb[10] = regs.device; // must be 0 for IDENTIFY
	cdb[11] = regs.command;
	if !prolific {
		cdb[12] = 0x06;
		cdb[13] = 0x7b;
	}

	Ok((cdb, dir))
}

pub fn encode(regs: &Registers, data_len: usize) -> Result<(Cdb, Direction), Error> {
	encode_jmpl(regs, data_len, false)
}

/// UNTESTED on real hardware
pub fn encode_prolific(regs: &Registers, data_len: usize) -> Result<(Cdb, Direction), Error> {
	encode_jmpl(regs, data_len, true)
}

#[cfg(test)]
mod tests {
	use super::*;
	use ata::{Command, SMARTFeature};

	fn identify() -> Registers {
		Registers { command: Command::Identify as u8, ..Default::default() }
	}

	#[test]
	fn identify_cdb() {
		let (cdb, dir) = encode(&identify(), 512).unwrap();
		assert_eq!(dir, Direction::In);
		assert_eq!(cdb.as_bytes(), [
			0xdf, 0x10, 0x00, 0x02, 0x00, 0x00, 0x01,
			0x00, 0x00, 0x00, 0x00, 0xec, 0x06, 0x7b,
		]);
	}

	#[test]
	fn identify_cdb_prolific() {
		// same thing sans the two trailing vendor bytes
		let (cdb, dir) = encode_prolific(&identify(), 512).unwrap();
		assert_eq!(dir, Direction::In);
		assert_eq!(cdb.as_bytes(), [
			0xdf, 0x10, 0x00, 0x02, 0x00, 0x00, 0x01,
			0x00, 0x00, 0x00, 0x00, 0xec,
		]);
	}

	#[test]
	fn outbound_flag() {
		let regs = Registers {
			command: Command::SMART as u8,
			features: SMARTFeature::WriteLogSector as u8,
			lba_mid: 0x4f,
			lba_high: 0xc2,
			..Default::default()
		};

		let (cdb, dir) = encode(&regs, 512).unwrap();
		assert_eq!(dir, Direction::Out);
		assert_eq!(cdb[1], 0x00);

		// …but not when there is no data to push
		let (cdb, _) = encode(&regs, 0).unwrap();
		assert_eq!(cdb[1], 0x10);
	}
}
