/*!
Parser for the 512-byte sector that IDENTIFY DEVICE returns.

Only the fields this crate actually consumes are decoded: the identification
strings (which feed the manufacturer heuristic) and the S.M.A.R.T. feature
state (which is the whole point of the exercise). The rest of the 256 words
are left for a proper querying tool to chew on.
*/

use std::fmt;

fn bytes_to_words(data: &[u8]) -> Vec<u16> {
	let mut output = Vec::with_capacity(data.len() / 2);

	// IDENTIFY data is a sequence of 16-bit words the device pushed out through a 16-bit data port,
	// hence the pairwise swap on little-endian hosts
	for i in 0 .. data.len()/2 {
		if cfg!(target_endian = "little") {
			output.push(
				((data[2 * i + 1] as u16) << 8)
				+ (data[2 * i] as u16)
			);
		} else {
			output.push(
				((data[2 * i] as u16) << 8)
				+ (data[2 * i + 1] as u16)
			);
		}
	}

	output
}

// TODO make sure characters are in the range of 0x20 to (and including) 0x7e
fn read_string(arr: &[u16], start: usize, fin: usize) -> String {
	let mut output = String::with_capacity((fin - start) * 2);

	for i in start..(fin+1) {
		output.push((arr[i] >> 8) as u8 as char);
		output.push((arr[i] & 0xff) as u8 as char);
	}

	String::from(output.trim())
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub enum Ternary {
	Unsupported, Disabled, Enabled
}

impl Ternary {
	pub fn is_supported(&self) -> bool {
		*self != Ternary::Unsupported
	}
}

impl fmt::Display for Ternary {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Ternary::Unsupported => write!(f, "not supported"),
			Ternary::Disabled    => write!(f, "supported, disabled"),
			Ternary::Enabled     => write!(f, "supported, enabled"),
		}
	}
}

/// Device identification, as reported by IDENTIFY DEVICE
#[derive(Debug)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct Id {
	pub is_ata: bool, // probably redundant
	pub incomplete: bool, // content of words other that 0 or 2 might be invalid

	pub serial: String,
	pub firmware: String,
	pub model: String,

	pub smart: Ternary,
}

fn is_set(word: u16, bit: usize) -> bool {
	word & (1<<bit) != 0
}
fn make_ternary(data: &[u16], word_sup: usize, bit_sup: usize, word_enabled: usize, bit_enabled: usize) -> Ternary {
	if !is_set(data[word_sup], bit_sup) {
		Ternary::Unsupported
	} else {
		if is_set(data[word_enabled], bit_enabled) { Ternary::Enabled }
		else { Ternary::Disabled }
	}
}

/// Decodes a raw IDENTIFY DEVICE sector. `data` must be at least 512 bytes long.
pub fn parse_id(data: &[u8]) -> Id {
	let data = bytes_to_words(data);

	Id {
		is_ata: !is_set(data[0], 15),
		incomplete: is_set(data[0], 2),

		serial: read_string(&data, 10, 19),
		firmware: read_string(&data, 23, 26),
		model: read_string(&data, 27, 46),

		// w82:0 is 'SMART feature set is supported', w85:0 is '… enabled';
		// these are the 'command set supported/enabled' words
		smart: make_ternary(&data, 82, 0, 85, 0),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn put_string(data: &mut [u8], word_start: usize, s: &str) {
		// inverse of read_string: swap bytes pairwise
		let b = s.as_bytes();
		for i in 0 .. b.len()/2 {
			data[word_start*2 + 2*i] = b[2*i + 1];
			data[word_start*2 + 2*i + 1] = b[2*i];
		}
	}

	fn put_word(data: &mut [u8], word: usize, value: u16) {
		data[word*2] = (value & 0xff) as u8;
		data[word*2 + 1] = (value >> 8) as u8;
	}

	#[test]
	fn parse_crafted_sector() {
		let mut data = vec![0u8; 512];
		put_string(&mut data, 27, "WDC WD10EZEX-00BN5A0                    ");
		put_string(&mut data, 10, "WD-WCC3F1234567     ");
		put_string(&mut data, 23, "01.01A01");
		put_word(&mut data, 82, 1 << 0); // SMART supported
		put_word(&mut data, 85, 1 << 0); // SMART enabled

		let id = parse_id(&data);
		assert_eq!(id.model, "WDC WD10EZEX-00BN5A0");
		assert_eq!(id.serial, "WD-WCC3F1234567");
		assert_eq!(id.firmware, "01.01A01");
		assert_eq!(id.smart, Ternary::Enabled);
		assert!(id.smart.is_supported());
	}

	#[test]
	fn smart_ternary() {
		let mut data = vec![0u8; 512];
		assert_eq!(parse_id(&data).smart, Ternary::Unsupported);
		assert!(!parse_id(&data).smart.is_supported());

		put_word(&mut data, 82, 1 << 0);
		assert_eq!(parse_id(&data).smart, Ternary::Disabled);
		assert!(parse_id(&data).smart.is_supported());
	}
}
