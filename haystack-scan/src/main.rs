use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;

use haystack_core::generator::Manifest;
use haystack_core::scan::{ScanReport, search_tree};

/// Searches every file under a directory for a signature byte string.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// Directory to scan.
	root: PathBuf,

	/// File holding the needle bytes, or the literal string itself.
	signature: String,

	/// Manifest to verify the scan against; any divergence exits
	/// non-zero. Paths are compared as recorded, so run from the same
	/// directory the generator ran from.
	#[arg(long)]
	expect: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
	env_logger::init();
	let args = Args::parse();

	let needle =
		std::fs::read(&args.signature).unwrap_or_else(|_| args.signature.clone().into_bytes());

	let started = Instant::now();
	let report = search_tree(&args.root, &needle)?;
	let elapsed = started.elapsed().as_secs_f64();

	for found in &report.matches {
		println!("{}: found at byte position {}", found.path.display(), found.start);
	}

	let megabytes = report.bytes_scanned as f64 / (1 << 20) as f64;
	println!(
		"Searched {} files ({:.0} MB in total) in {:.3} seconds.",
		report.files_scanned, megabytes, elapsed
	);
	if elapsed > 0.0 {
		println!("Average search speed: {:.1} MB/s", megabytes / elapsed);
	}

	if let Some(manifest_path) = &args.expect {
		let manifest = Manifest::load(manifest_path)?;
		let mismatches = cross_check(&manifest, &report);
		for mismatch in &mismatches {
			eprintln!("{mismatch}");
		}
		if !mismatches.is_empty() {
			return Err(format!(
				"{} mismatches against {}",
				mismatches.len(),
				manifest_path.display()
			)
			.into());
		}
		println!("All {} recorded placements verified", manifest.signed_entries().count());
	}

	Ok(())
}

/// Compares scan hits against the manifest's recorded placements.
///
/// Three divergences are reported: a recorded placement the scan missed,
/// a hit in a file the manifest records as clean, and a hit at a
/// different offset than recorded. Files unknown to the manifest are
/// ignored.
fn cross_check(manifest: &Manifest, report: &ScanReport) -> Vec<String> {
	let recorded: HashMap<&Path, Option<u64>> = manifest
		.entries
		.iter()
		.map(|entry| (Path::new(&entry.path), entry.signature_offset))
		.collect();
	let found: HashMap<&Path, u64> =
		report.matches.iter().map(|m| (m.path.as_path(), m.start)).collect();

	let mut mismatches = Vec::new();

	for (path, offset) in &recorded {
		match (offset, found.get(path)) {
			(Some(offset), None) => mismatches.push(format!(
				"missing: {} should carry the signature at {}",
				path.display(),
				offset
			)),
			(Some(offset), Some(start)) if start != offset => mismatches.push(format!(
				"moved: {} matched at {} but was placed at {}",
				path.display(),
				start,
				offset
			)),
			(None, Some(start)) => mismatches.push(format!(
				"unexpected: {} matched at {} but is recorded clean",
				path.display(),
				start
			)),
			_ => {}
		}
	}

	mismatches.sort();
	mismatches
}
