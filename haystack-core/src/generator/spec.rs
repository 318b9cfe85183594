use serde::{Deserialize, Serialize};

use super::file::DEFAULT_CHUNK_SIZE;

/// Parameters driving one tree generation run.
///
/// All ranges are inclusive on both ends. Sizes are approximate targets:
/// the writer meets or slightly exceeds them (see `generate_file`).
///
/// # Invariants
/// - `min_file_size <= max_file_size`
/// - `min_files <= max_files` and `min_dirs <= max_dirs`
/// - `signature_chance` lies in `[0.0, 1.0]`
/// - `chunk_size > 0`
///
/// Enforced by `validate`, which callers run before generating.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TreeSpec {
	/// Remaining recursion levels. Files are still generated at depth 0,
	/// subdirectories are not.
	pub depth: u32,

	/// Approximate per-file size bounds in bytes.
	pub min_file_size: u64,
	pub max_file_size: u64,

	/// Per-directory file count bounds.
	pub min_files: usize,
	pub max_files: usize,

	/// Per-directory subdirectory count bounds.
	pub min_dirs: usize,
	pub max_dirs: usize,

	/// Marker bytes embedded into a random subset of files, if set.
	pub signature: Option<Vec<u8>>,

	/// Independent per-file probability of embedding the signature.
	pub signature_chance: f64,

	/// Write granularity in bytes.
	pub chunk_size: usize,
}

impl Default for TreeSpec {
	fn default() -> Self {
		Self {
			depth: 0,
			min_file_size: 0,
			max_file_size: 0,
			min_files: 0,
			max_files: 0,
			min_dirs: 0,
			max_dirs: 0,
			signature: None,
			signature_chance: 0.0,
			chunk_size: DEFAULT_CHUNK_SIZE,
		}
	}
}

impl TreeSpec {
	/// Checks every range and probability bound.
	///
	/// # Errors
	/// Returns a description of the first violated bound.
	pub fn validate(&self) -> Result<(), String> {
		if self.min_file_size > self.max_file_size {
			return Err(format!(
				"File size range is inverted: {} > {}",
				self.min_file_size, self.max_file_size
			));
		}
		if self.min_files > self.max_files {
			return Err(format!(
				"File count range is inverted: {} > {}",
				self.min_files, self.max_files
			));
		}
		if self.min_dirs > self.max_dirs {
			return Err(format!(
				"Directory count range is inverted: {} > {}",
				self.min_dirs, self.max_dirs
			));
		}
		if !(0.0..=1.0).contains(&self.signature_chance) {
			return Err("Signature chance must be between 0.0 and 1.0".to_owned());
		}
		if self.chunk_size == 0 {
			return Err("Chunk size must be positive".to_owned());
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn valid_spec() -> TreeSpec {
		TreeSpec {
			depth: 2,
			min_file_size: 0,
			max_file_size: 4096,
			min_files: 1,
			max_files: 5,
			min_dirs: 1,
			max_dirs: 3,
			signature: Some(b"marker".to_vec()),
			signature_chance: 0.5,
			..TreeSpec::default()
		}
	}

	#[test]
	fn accepts_valid_spec() {
		assert!(valid_spec().validate().is_ok());
	}

	#[test]
	fn rejects_inverted_size_range() {
		let spec = TreeSpec { min_file_size: 10, max_file_size: 5, ..valid_spec() };
		assert!(spec.validate().is_err());
	}

	#[test]
	fn rejects_inverted_count_ranges() {
		let spec = TreeSpec { min_files: 8, max_files: 2, ..valid_spec() };
		assert!(spec.validate().is_err());

		let spec = TreeSpec { min_dirs: 4, max_dirs: 1, ..valid_spec() };
		assert!(spec.validate().is_err());
	}

	#[test]
	fn rejects_out_of_range_chance() {
		for chance in [-0.1, 1.5] {
			let spec = TreeSpec { signature_chance: chance, ..valid_spec() };
			assert!(spec.validate().is_err());
		}
	}

	#[test]
	fn rejects_zero_chunk_size() {
		let spec = TreeSpec { chunk_size: 0, ..valid_spec() };
		assert!(spec.validate().is_err());
	}
}
