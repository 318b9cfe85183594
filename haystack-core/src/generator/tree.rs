use std::fs;
use std::io;
use std::path::Path;

use rand::Rng;

use super::file::{Content, generate_file};
use super::manifest::FileEntry;
use super::spec::TreeSpec;

/// Recursively generates a randomized directory tree under `root`.
///
/// Each directory receives a uniformly random number of files within the
/// spec's bounds, named `f_0.file`, `f_1.file`, …, with random content and
/// an independent per-file chance of carrying the signature. While depth
/// remains, a random number of subdirectories named `d_0.dir`, … is
/// recursed into with depth reduced by one; at depth 0 files are still
/// generated but no further subdirectories are.
///
/// Returns one `FileEntry` per generated file, in creation order, ready to
/// be stored in a `Manifest`. The same seed and spec always reproduce the
/// same tree.
///
/// # Errors
/// The caller is expected to have run `TreeSpec::validate`; any filesystem
/// error aborts generation and propagates, leaving the partial tree behind.
pub fn generate_tree<R: Rng>(
	rng: &mut R,
	root: &Path,
	spec: &TreeSpec,
) -> io::Result<Vec<FileEntry>> {
	let mut entries = Vec::new();
	fill_directory(rng, root, spec.depth, spec, &mut entries)?;
	Ok(entries)
}

fn fill_directory<R: Rng>(
	rng: &mut R,
	dir: &Path,
	depth: u32,
	spec: &TreeSpec,
	entries: &mut Vec<FileEntry>,
) -> io::Result<()> {
	fs::create_dir_all(dir)?;

	let file_count = rng.random_range(spec.min_files..=spec.max_files);
	for i in 0..file_count {
		let path = dir.join(format!("f_{i}.file"));
		let approx_size = rng.random_range(spec.min_file_size..=spec.max_file_size);
		let signature = spec
			.signature
			.as_deref()
			.filter(|_| rng.random_bool(spec.signature_chance));

		let report =
			generate_file(rng, &path, approx_size, signature, Content::Random, spec.chunk_size)?;
		entries.push(FileEntry {
			path: path.to_string_lossy().into_owned(),
			size: report.size,
			signature_offset: report.signature_offset,
		});
	}

	if depth == 0 {
		return Ok(());
	}

	let dir_count = rng.random_range(spec.min_dirs..=spec.max_dirs);
	for i in 0..dir_count {
		fill_directory(rng, &dir.join(format!("d_{i}.dir")), depth - 1, spec, entries)?;
	}

	Ok(())
}
