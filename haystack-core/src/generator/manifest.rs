use std::error::Error;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One generated file, as recorded at generation time.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
	/// Path as written, relative to the invocation directory.
	pub path: String,
	/// Actual size in bytes.
	pub size: u64,
	/// Byte offset of the embedded signature, if the file carries one.
	pub signature_offset: Option<u64>,
}

/// Ground-truth record of a generation run.
///
/// Stored as a compact postcard binary so scan results can later be
/// checked against what was actually planted where.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
	pub entries: Vec<FileEntry>,
}

impl Manifest {
	pub fn new(entries: Vec<FileEntry>) -> Self {
		Self { entries }
	}

	/// Serializes the manifest to `path`.
	///
	/// # Errors
	/// Fails on serialization or filesystem errors.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn Error>> {
		let bytes = postcard::to_stdvec(self)?;
		fs::write(path, bytes)?;
		Ok(())
	}

	/// Loads a manifest previously written by `save`.
	///
	/// # Errors
	/// Fails on filesystem errors or if the bytes are not a manifest.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
		let bytes = fs::read(path)?;
		Ok(postcard::from_bytes(&bytes)?)
	}

	/// Entries that carry an embedded signature.
	pub fn signed_entries(&self) -> impl Iterator<Item = &FileEntry> {
		self.entries.iter().filter(|e| e.signature_offset.is_some())
	}
}
