use std::collections::HashSet;
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use haystack_core::generator::{Manifest, TreeSpec, generate_tree};

/// Generates a randomized directory tree with signature-stamped files.
///
/// A known fraction of files carries the signature at a random offset;
/// every placement is recorded in a binary manifest so search tools can
/// be verified against ground truth.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// Root directory of the generated tree.
	#[arg(long, default_value = "test-dir-tree")]
	root: PathBuf,

	/// Recursion depth; files are still generated at depth 0.
	#[arg(long, default_value_t = 2)]
	depth: u32,

	/// Minimum approximate file size in bytes.
	#[arg(long, default_value_t = 0)]
	min_size: u64,

	/// Maximum approximate file size in bytes.
	#[arg(long, default_value_t = 64 << 20)]
	max_size: u64,

	/// Minimum number of files per directory.
	#[arg(long, default_value_t = 1)]
	min_files: usize,

	/// Maximum number of files per directory.
	#[arg(long, default_value_t = 20)]
	max_files: usize,

	/// Minimum number of subdirectories per directory.
	#[arg(long, default_value_t = 1)]
	min_dirs: usize,

	/// Maximum number of subdirectories per directory.
	#[arg(long, default_value_t = 3)]
	max_dirs: usize,

	/// Marker string embedded into a random subset of files.
	#[arg(long, default_value = "small hidden text 123 456")]
	signature: String,

	/// Per-file probability of embedding the signature.
	#[arg(long, default_value_t = 0.5)]
	signature_chance: f64,

	/// Also generate a flat outlier pass of 1-2 multi-GiB files at the
	/// same root.
	#[arg(long)]
	outlier: bool,

	/// Where the raw signature bytes are written.
	#[arg(long, default_value = "signature.file")]
	signature_file: PathBuf,

	/// Where the generation manifest is written.
	#[arg(long, default_value = "manifest.bin")]
	manifest: PathBuf,

	/// Seed for reproducible generation; drawn from the OS when omitted.
	#[arg(long)]
	seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
	env_logger::init();
	let args = Args::parse();

	let signature = args.signature.clone().into_bytes();
	let spec = TreeSpec {
		depth: args.depth,
		min_file_size: args.min_size,
		max_file_size: args.max_size,
		min_files: args.min_files,
		max_files: args.max_files,
		min_dirs: args.min_dirs,
		max_dirs: args.max_dirs,
		signature: Some(signature.clone()),
		signature_chance: args.signature_chance,
		..TreeSpec::default()
	};
	spec.validate()?;

	let mut rng = match args.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	let mut entries = generate_tree(&mut rng, &args.root, &spec)?;

	if args.outlier {
		info!("generating outlier files");
		let outlier = TreeSpec {
			depth: 0,
			min_file_size: 1 << 30,
			max_file_size: 2 << 30,
			min_files: 1,
			max_files: 2,
			min_dirs: 0,
			max_dirs: 0,
			..spec.clone()
		};
		entries.extend(generate_tree(&mut rng, &args.root, &outlier)?);

		// The outlier pass reuses f_0/f_1 names at the root; keep the
		// latest record per path.
		let mut seen = HashSet::new();
		entries.reverse();
		entries.retain(|entry| seen.insert(entry.path.clone()));
		entries.reverse();
	}

	std::fs::write(&args.signature_file, &signature)?;

	let manifest = Manifest::new(entries);
	manifest.save(&args.manifest)?;

	println!(
		"Generated {} files under {} ({} carrying the signature)",
		manifest.entries.len(),
		args.root.display(),
		manifest.signed_entries().count()
	);
	println!(
		"Signature written to {}, manifest to {}",
		args.signature_file.display(),
		args.manifest.display()
	);

	Ok(())
}
