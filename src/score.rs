/*!
The best-effort "is this actually a hard disk?" heuristic.

There is no foolproof way to tell a USB HDD from a USB flash drive: plenty of
flash drives report themselves as fixed, some (SanDisk Extreme) grew
S.M.A.R.T. support, SSDs blur the line entirely, and some vendors (e.g. ALI)
ship both flash controllers and IDE/SATA bridges under one vendor id. So this
module makes no promise whatsoever — it merely adds up weak evidence into a
score the caller can use to decide how loud a warning to show before
formatting something.

The rule tables are fixed, process-wide and read-only; their declared order is
load-bearing (first match wins), so resist the urge to sort them.
*/

struct StrScore {
	name: &'static str,
	score: i32,
}

struct VidScore {
	vid: u16,
	score: i32,
}

// If a disk id starts with these, we consider it likely to be an HDD.
// The list from http://knowledge.seagate.com/articles/en_US/FAQ/204763en is a
// start, but not entirely accurate for our usage as some models are prefixed
// with the manufacturer name.
// '#' means any single decimal digit.
static MANUFACTURER_STR: [StrScore; 14] = [
	StrScore { name: "HP ", score: 10 },
	StrScore { name: "ST#", score: 10 },
	StrScore { name: "MX#", score: 10 },
	StrScore { name: "WDC", score: 10 },
	StrScore { name: "IBM", score: 10 },
	StrScore { name: "STM#", score: 10 },
	StrScore { name: "HTS#", score: 10 },
	StrScore { name: "MAXTOR", score: 10 },
	StrScore { name: "HITACHI", score: 10 },
	StrScore { name: "SEAGATE", score: 10 },
	StrScore { name: "SAMSUNG", score: 10 },
	StrScore { name: "FUJITSU", score: 10 },
	StrScore { name: "TOSHIBA", score: 10 },
	StrScore { name: "QUANTUM", score: 10 },
];

// USB vendor ids of known USB-to-IDE/SATA bridge makers, http://www.linux-usb.org/usb.ids
static MANUFACTURER_VID: [VidScore; 4] = [
	VidScore { vid: 0x04b4, score: 10 }, // Cypress
	VidScore { vid: 0x067b, score: 10 }, // Prolific
	VidScore { vid: 0x0bc2, score: 10 }, // Seagate
	VidScore { vid: 0x152d, score: 10 }, // JMicron
];

fn str_rule_matches(rule: &StrScore, strid: &[u8]) -> bool {
	let name = rule.name.as_bytes();
	let wc = name[name.len() - 1] == b'#';
	let plen = if wc { name.len() - 1 } else { name.len() };

	strid[..plen].eq_ignore_ascii_case(&name[..plen])
		&& (!wc || strid[plen].is_ascii_digit())
}

/**
Scores the likelihood that the device at hand is a hard disk.

Pure and deterministic: identical evidence always yields the identical score.
Inputs are whatever identity evidence the caller managed to collect — the
fixed/removable drive-type flag, the USB vendor id, and the human-readable
identification string (e.g. the IDENTIFY model).

Each rule table contributes at most once: the first matching manufacturer
prefix and the first matching vendor id.

TODO: lower the score for well-known flash drive makers (ADATA, SanDisk, …).
*/
pub fn is_hdd(drive_is_fixed: bool, vid: u16, strid: &str) -> i32 {
	let mut score = 0;

	if drive_is_fixed {
		score += 3;
	}

	let strid = strid.as_bytes();
	for rule in MANUFACTURER_STR.iter() {
		// XXX the table order quietly guarantees that no longer prefix that would
		// not have matched precedes a shorter one that would; keep it that way
		if rule.name.len() > strid.len() {
			break;
		}
		if str_rule_matches(rule, strid) {
			score += rule.score;
			break;
		}
	}

	for rule in MANUFACTURER_VID.iter() {
		if vid == rule.vid {
			score += rule.score;
			break;
		}
	}

	score
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fixture_scores() {
		// fixed flag + model prefix
		assert_eq!(is_hdd(true, 0x0000, "WDC WD10EZEX"), 13);
		// vendor id only
		assert_eq!(is_hdd(false, 0x152d, "Unknown"), 10);
		// no evidence at all
		assert_eq!(is_hdd(false, 0x0000, "SanDisk Ultra"), 0);
	}

	#[test]
	fn wildcard_prefix() {
		// '#' stands for exactly one decimal digit
		assert_eq!(is_hdd(false, 0, "ST3500312CS"), 10);
		assert_eq!(is_hdd(false, 0, "STQ3500"), 0);
		assert_eq!(is_hdd(false, 0, "HTS541010A9E680"), 10);
	}

	#[test]
	fn case_insensitive() {
		assert_eq!(is_hdd(false, 0, "Seagate Expansion"), 10);
		assert_eq!(is_hdd(false, 0, "toshiba mq01abd1"), 10);
	}

	#[test]
	fn first_match_wins_no_accumulation() {
		// matches both "ST#" and, were the scan to continue, nothing else;
		// two table hits (string + vid) are independent though
		assert_eq!(is_hdd(true, 0x0bc2, "ST9500325AS"), 3 + 10 + 10);
	}

	#[test]
	fn short_input() {
		// shorter than every prefix in the table
		assert_eq!(is_hdd(false, 0, "ST"), 0);
		assert_eq!(is_hdd(false, 0, ""), 0);
	}

	#[test]
	fn idempotence() {
		let a = is_hdd(true, 0x04b4, "HITACHI HTS545050");
		let b = is_hdd(true, 0x04b4, "HITACHI HTS545050");
		assert_eq!(a, b);
	}
}
