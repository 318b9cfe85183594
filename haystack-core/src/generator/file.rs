use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};
use std::path::Path;

use log::{info, warn};
use rand::Rng;

/// Default write granularity (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1 << 16;

/// What the body of a generated file is made of.
#[derive(Clone, Copy, Debug)]
pub enum Content {
	/// Pseudo-random bytes drawn from the RNG handle.
	Random,
	/// A single repeated filler byte.
	Fill(u8),
}

/// Outcome of a single file generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
	/// Actual number of bytes written.
	pub size: u64,
	/// Byte offset of the embedded signature, if one was placed.
	pub signature_offset: Option<u64>,
}

/// Writes a file of approximately `approx_size` bytes, optionally stamping
/// `signature` over existing bytes at a random offset.
///
/// Content is written in chunks of `chunk_size` bytes:
/// - `approx_size >= chunk_size` writes `approx_size / chunk_size + 1` full
///   chunks, so the actual size meets the target and overshoots it by at
///   most one chunk.
/// - `approx_size < chunk_size` writes a single chunk of exactly
///   `approx_size` bytes.
///
/// The signature overwrite is in place and never changes the file length:
/// the offset is drawn uniformly from `[0, size - signature.len()]` so the
/// signature always fits entirely. Files shorter than the signature skip
/// the embed with a warning. Each placement is logged with its offset.
///
/// The parent directory must already exist.
///
/// # Errors
/// Any filesystem error propagates unhandled; no cleanup is attempted.
pub fn generate_file<R: Rng>(
	rng: &mut R,
	path: &Path,
	approx_size: u64,
	signature: Option<&[u8]>,
	content: Content,
	chunk_size: usize,
) -> io::Result<FileReport> {
	let mut file = File::create(path)?;
	let mut buf = match content {
		Content::Random => vec![0u8; chunk_size],
		Content::Fill(byte) => vec![byte; chunk_size],
	};

	let mut size = 0u64;
	if approx_size >= chunk_size as u64 {
		// One extra chunk so the target is always met or exceeded.
		for _ in 0..approx_size / chunk_size as u64 + 1 {
			if matches!(content, Content::Random) {
				rng.fill(&mut buf[..]);
			}
			file.write_all(&buf)?;
			size += chunk_size as u64;
		}
	} else {
		let short = &mut buf[..approx_size as usize];
		if matches!(content, Content::Random) {
			rng.fill(&mut short[..]);
		}
		file.write_all(short)?;
		size += approx_size;
	}

	let mut signature_offset = None;
	if let Some(signature) = signature.filter(|s| !s.is_empty()) {
		if size < signature.len() as u64 {
			warn!(
				"{}: {} bytes is too small for a {}-byte signature, skipping embed",
				path.display(),
				size,
				signature.len()
			);
		} else {
			let offset = rng.random_range(0..=size - signature.len() as u64);
			info!("{}: signature at offset {}", path.display(), offset);
			file.seek(SeekFrom::Start(offset))?;
			file.write_all(signature)?;
			signature_offset = Some(offset);
		}
	}

	Ok(FileReport { size, signature_offset })
}
