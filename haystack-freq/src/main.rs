use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use haystack_core::stats::{frequencies, is_russian_char};

/// Counts character n-gram frequencies in a text file.
///
/// The text is lowercased and only windows made entirely of Russian
/// letters are counted; output is one line per distinct window in
/// descending-frequency order.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// Text file to analyse.
	path: PathBuf,

	/// Window width in characters.
	width: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
	env_logger::init();
	let args = Args::parse();

	let started = Instant::now();
	let text = std::fs::read_to_string(&args.path)?.to_lowercase();

	for (window, frequency) in frequencies(&text, is_russian_char, args.width) {
		println!("{} - {:.6}", window, frequency);
	}
	println!("Done in {:.3} s", started.elapsed().as_secs_f64());

	Ok(())
}
