/*!
USB-to-ATA/SATA bridge chip dialects.

There is a standard way to wrap an ATA command into a SCSI CDB (SAT, see
T10/04-262r8), and then there are vendors. Each submodule here encodes the
same abstract taskfile into the CDB layout one particular family of bridge
chips was reverse-engineered to expect. None of them can be told apart up
front, so [`first_working`](fn.first_working.html) simply tries them in a
fixed priority order until the device stops objecting: four rejections
followed by a success is the *normal* outcome, not an error.
*/

pub mod sat;
pub mod jmicron;
pub mod sunplus;
pub mod cypress;

use ata::Registers;
use device::Device;
use scsi::{self, Cdb};
use Direction;

/**
One bridge dialect: a name for diagnostics plus its CDB encoder.

Encoders are pure: given the taskfile and the length of the data buffer they
produce the CDB and the transfer direction, or fail locally (before any I/O)
if the dialect cannot express the request.
*/
#[derive(Debug, Clone, Copy)]
pub struct Bridge {
	pub name: &'static str,
	encode: fn(&Registers, usize) -> Result<(Cdb, Direction), scsi::Error>,
}

impl Bridge {
	pub fn encode(&self, regs: &Registers, data_len: usize) -> Result<(Cdb, Direction), scsi::Error> {
		(self.encode)(regs, data_len)
	}

	/// Encodes `regs` in this bridge's dialect and submits it through the passthrough primitive. No retries.
	pub fn ata_passthrough(&self, dev: &Device, regs: &Registers, data: &mut [u8], timeout: u32) -> Result<(), scsi::Error> {
		let (cdb, dir) = (self.encode)(regs, data.len())?;
		dev.scsi_passthrough(cdb.as_bytes(), dir, data, timeout)
	}
}

/// The bridges we will try, in order
pub static BRIDGES: [Bridge; 5] = [
	Bridge { name: "SAT", encode: sat::encode },
	Bridge { name: "JMicron", encode: jmicron::encode },
	Bridge { name: "Prolific", encode: jmicron::encode_prolific },
	Bridge { name: "SunPlus", encode: sunplus::encode },
	Bridge { name: "Cypress", encode: cypress::encode },
];

/**
Runs `attempt` against each bridge in turn, strictly sequentially, stopping at
the first one that succeeds and returning its name.

Attempts are never issued in parallel: each one pokes the same piece of
hardware and has to be fully resolved before the next dialect is risked. If
every bridge fails, returns the per-bridge failure reasons, in attempt order,
for diagnostics.
*/
pub fn first_working<F>(bridges: &[Bridge], mut attempt: F) -> Result<&'static str, Vec<(&'static str, scsi::Error)>>
	where F: FnMut(&Bridge) -> Result<(), scsi::Error>
{
	let mut failures = Vec::with_capacity(bridges.len());

	for bridge in bridges {
		match attempt(bridge) {
			Ok(()) => {
				info!("success using {}", bridge.name);
				return Ok(bridge.name);
			},
			Err(err) => {
				debug!("no joy with: {} ({})", bridge.name, err);
				failures.push((bridge.name, err));
			},
		}
	}

	Err(failures)
}

#[cfg(test)]
mod tests {
	use super::*;
	use scsi::Error;

	#[test]
	fn priority_order() {
		let names: Vec<_> = BRIDGES.iter().map(|b| b.name).collect();
		assert_eq!(names, ["SAT", "JMicron", "Prolific", "SunPlus", "Cypress"]);
	}

	#[test]
	fn stops_at_first_success() {
		let mut attempted = vec![];

		let result = first_working(&BRIDGES, |bridge| {
			attempted.push(bridge.name);
			match bridge.name {
				"Prolific" => Ok(()),
				// CHECK CONDITION, i.e. "the device said no"
				_ => Err(Error::Status(0x02)),
			}
		});

		assert_eq!(result, Ok("Prolific"));
		// SunPlus and Cypress must not have been poked
		assert_eq!(attempted, ["SAT", "JMicron", "Prolific"]);
	}

	#[test]
	fn aggregates_all_failures() {
		let result = first_working(&BRIDGES, |_| Err(Error::Timeout));

		let failures = result.unwrap_err();
		assert_eq!(failures.len(), 5);
		assert_eq!(failures[0], ("SAT", Error::Timeout));
		assert_eq!(failures[4], ("Cypress", Error::Timeout));
	}
}
