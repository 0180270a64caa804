pub fn hexdump(data: &[u8]) -> String {
	// ' {:02x}' ×16, offset column, ascii column
	let mut dump = String::with_capacity((data.len()/16 + 1) * 72);
	let mut ascii = String::with_capacity(16);

	for (i, chunk) in data.chunks(16).enumerate() {
		dump.push_str(&format!("{:04x}:", i * 16));
		for b in chunk {
			dump.push_str(&format!(" {:02x}", b));
			ascii.push(
				if *b >= 0x20 && *b <= 0x7e { *b as char }
				// ' ' and '.' are ambiguous, and a string of '�'s is just unreadable
				else { '░' }
			);
		}
		dump.push(' ');
		dump.push_str(&ascii);
		ascii.truncate(0);
		dump.push('\n');
	}
	dump
}
