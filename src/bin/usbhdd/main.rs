#![warn(
	missing_debug_implementations,
	trivial_casts,
	trivial_numeric_casts,
	unused_import_braces,
	unused_qualifications,
)]

extern crate usbhdd;

use usbhdd::Device;
use usbhdd::identify::{self, DEFAULT_TIMEOUT};
use usbhdd::score;

#[macro_use]
extern crate clap;
use clap::{App, Arg};

#[macro_use]
extern crate serde_json;

extern crate log;
extern crate env_logger;
use log::LevelFilter;
use env_logger::Builder as LogBuilder;

use std::process::exit;

fn parse_vid(s: &str) -> Option<u16> {
	let s = s.trim_start_matches("0x");
	u16::from_str_radix(s, 16).ok()
}

fn main() {
	let args = App::new("usbhdd")
		.about("tells USB hard disks from USB flash drives (no promises though)")
		.version(crate_version!())
		.arg(Arg::with_name("debug")
			.short("d")
			.long("debug")
			.multiple(true)
			.help("Verbose output: set once to log bridge attempts, twice to also dump raw IDENTIFY data\ncan also be set through env_logger's RUST_LOG env")
		)
		.arg(Arg::with_name("json")
			.long("json")
			.help("Export data in JSON format")
		)
		.arg(Arg::with_name("fixed")
			.long("fixed")
			.help("The OS reports this drive as fixed (non-removable); feeds the heuristic score")
		)
		.arg(Arg::with_name("vid")
			.long("vid")
			.takes_value(true)
			.help("USB vendor id of the adapter, hex (e.g. 152d); feeds the heuristic score")
		)
		.arg(Arg::with_name("timeout")
			.short("T")
			.long("timeout")
			.takes_value(true)
			.help("Per-attempt passthrough timeout, in seconds")
		)
		.arg(Arg::with_name("device")
			.help("Device to query (/dev/sdX, \\\\.\\PhysicalDriveN)")
			.required(true)
			.index(1)
		)
		.get_matches();

	let mut log = LogBuilder::new();
	if let Ok(var) = std::env::var("RUST_LOG") {
		log.parse(&var);
	}
	// -d takes precedence over RUST_LOG which some might export globally for some reasons
	log.filter(Some("usbhdd"), {
		use self::LevelFilter::*;
		match args.occurrences_of("debug") {
			0 => Warn,
			1 => Info,
			_ => Debug,
		}
	});
	log.init();

	let path = args.value_of("device").unwrap(); // clap would not let it be absent
	let timeout = match args.value_of("timeout") {
		Some(t) => t.parse().unwrap_or_else(|_| {
			eprint!("Invalid timeout: {}\n", t);
			exit(1);
		}),
		None => DEFAULT_TIMEOUT,
	};

	let fixed = args.is_present("fixed");
	let vid = match args.value_of("vid") {
		Some(v) => parse_vid(v).unwrap_or_else(|| {
			eprint!("Invalid vendor id: {}\n", v);
			exit(1);
		}),
		None => 0,
	};

	let dev = Device::open(path).unwrap_or_else(|err| {
		eprint!("Cannot open {}: {}\n", path, err);
		exit(1);
	});

	let identified = match identify::identify_device(&dev, timeout) {
		Ok(id) => Some(id),
		Err(identify::Error::NoBridge(tried)) => {
			for (bridge, err) in tried {
				eprint!("no joy with: {} ({})\n", bridge, err);
			}
			eprint!("no supported ATA passthrough bridge found\n");
			None
		},
	};

	// the model string the device reported is better evidence than nothing
	let strid = identified.as_ref()
		.map(|id| id.id.model.clone())
		.unwrap_or_else(String::new);
	let score = score::is_hdd(fixed, vid, &strid);

	if args.is_present("json") {
		let id = identified.as_ref();
		print!("{}\n", json!({
			"bridge": id.map(|id| id.bridge),
			"model": id.map(|id| &id.id.model),
			"serial": id.map(|id| &id.id.serial),
			"firmware": id.map(|id| &id.id.firmware),
			"smart": id.map(|id| id.smart_supported()),
			"score": score,
		}));
	} else {
		if let Some(ref id) = identified {
			print!("bridge:   {}\n", id.bridge);
			print!("model:    {}\n", id.id.model);
			print!("serial:   {}\n", id.id.serial);
			print!("firmware: {}\n", id.id.firmware);
			print!("S.M.A.R.T.: {}\n", id.id.smart);
		}
		print!("HDD likelihood score: {}\n", score);
	}
}
