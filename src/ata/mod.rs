/*!
Register-level ATA bits: the handful of commands this crate may ever emit, the
28-bit taskfile subset that the USB bridge dialects understand, and the rule
that decides which way (if at all) a given command moves data.

Parsed reply structures live in the [`data` module](data/index.html).
*/

pub mod data;

use Direction;

/// ATA commands we *may* use. Far from a complete command set.
#[derive(Debug, Clone, Copy)]
pub enum Command {
	DataSetManagement = 0x06,
	ReadLogExt = 0x2f,
	IdentifyPacketDevice = 0xa1,
	SMART = 0xb0,
	Identify = 0xec,
}

/// Values for the features register of [`Command::SMART`](enum.Command.html)
#[derive(Debug, Clone, Copy)]
pub enum SMARTFeature {
	ReadValues = 0xd0, // 'SMART READ DATA' in ATA8-ACS, which is a bit unclear to people not familiar with ATA… or sometimes even to some who knows ATA well
	ReadThresholds = 0xd1,
	ReadLogSector = 0xd5,
	WriteLogSector = 0xd6,
	ReturnStatus = 0xda,
}

/**
Input taskfile registers of a 28-bit ATA command.

The sector count register is deliberately absent: every bridge dialect derives
it from the length of the data buffer (in 512-byte sectors), so carrying it
here would only invite disagreement between the two.
*/
// data port is omitted for obvious reasons
#[derive(Debug, Clone, Copy, Default)]
pub struct Registers {
	pub features: u8,

	pub lba_low: u8,
	pub lba_mid: u8,
	pub lba_high: u8,
	pub device: u8, // aka drive/head, device/head, select

	pub command: u8,
}

/**
Maps a (command, features) pair to the direction the data is expected to flow.

Only covers the commands from [`Command`](enum.Command.html); everything else
is reported as `Direction::None`. Every bridge encoder starts here, both to
pick its own CDB fields and to tell the transport which way to set up the
transfer.
*/
pub fn direction(command: u8, features: u8) -> Direction {
	// most SMART subcommands read data from the device, but there's a couple of exceptions
	let smart_out = command == Command::SMART as u8 &&
		(features == SMARTFeature::ReturnStatus as u8 || features == SMARTFeature::WriteLogSector as u8);

	match command {
		c if c == Command::Identify as u8 => Direction::In,
		c if c == Command::ReadLogExt as u8 => Direction::In,
		c if c == Command::SMART as u8 && !smart_out => Direction::In,
		c if c == Command::SMART as u8 => Direction::Out,
		c if c == Command::DataSetManagement as u8 => Direction::Out,
		_ => Direction::None,
	}
}
