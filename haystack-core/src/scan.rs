use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::debug;
use memchr::memmem::Finder;
use walkdir::WalkDir;

/// First occurrence of the needle within one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
	pub path: PathBuf,
	/// Size of the matched file in bytes.
	pub size: u64,
	/// Byte offset where the needle starts.
	pub start: u64,
	/// Byte offset one past the end of the needle.
	pub end: u64,
}

/// Aggregated outcome of a tree scan.
#[derive(Debug, Default)]
pub struct ScanReport {
	pub matches: Vec<Match>,
	pub files_scanned: u64,
	pub bytes_scanned: u64,
}

/// Read granularity for streamed searching (1 MiB).
const READ_CHUNK: usize = 1 << 20;

/// Searches a single file for the first occurrence of `needle`.
///
/// The file is streamed through a fixed buffer, carrying the last
/// `needle.len() - 1` bytes across reads so occurrences spanning a buffer
/// boundary are still found. Memory use is bounded regardless of file
/// size.
///
/// Returns `Ok(None)` for an empty needle or a file shorter than the
/// needle.
///
/// # Errors
/// Propagates filesystem errors (missing file, permissions, read faults).
pub fn search_file(path: &Path, needle: &[u8]) -> io::Result<Option<Match>> {
	if needle.is_empty() {
		return Ok(None);
	}

	let file = File::open(path)?;
	let size = file.metadata()?.len();
	if size < needle.len() as u64 {
		return Ok(None);
	}

	let finder = Finder::new(needle);
	let found = scan_reader(file, &finder, needle.len(), READ_CHUNK)?;

	Ok(found.map(|start| Match {
		path: path.to_owned(),
		size,
		start,
		end: start + needle.len() as u64,
	}))
}

/// Streams `reader` through a `chunk`-sized window and returns the
/// absolute offset of the first needle occurrence.
fn scan_reader<R: Read>(
	mut reader: R,
	finder: &Finder,
	needle_len: usize,
	chunk: usize,
) -> io::Result<Option<u64>> {
	let overlap = needle_len - 1;
	let mut buf = vec![0u8; overlap + chunk];
	let mut filled = 0usize;
	// Absolute offset of buf[0] within the stream.
	let mut offset = 0u64;

	loop {
		let read = fill(&mut reader, &mut buf[filled..])?;
		filled += read;

		if filled >= needle_len {
			if let Some(pos) = finder.find(&buf[..filled]) {
				return Ok(Some(offset + pos as u64));
			}
		}
		if read == 0 {
			return Ok(None);
		}

		// Keep the tail so a hit straddling this read and the next one
		// stays in the window.
		let keep = overlap.min(filled);
		let discard = filled - keep;
		buf.copy_within(discard..filled, 0);
		offset += discard as u64;
		filled = keep;
	}
}

/// Reads until `buf` is full or the stream ends.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
	let mut total = 0;
	while total < buf.len() {
		match reader.read(&mut buf[total..]) {
			Ok(0) => break,
			Ok(n) => total += n,
			Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
			Err(e) => return Err(e),
		}
	}
	Ok(total)
}

/// Walks `root` in sorted order and searches every regular file for
/// `needle`, collecting the first hit per file.
///
/// # Errors
/// The first traversal or read error aborts the scan.
pub fn search_tree(root: &Path, needle: &[u8]) -> io::Result<ScanReport> {
	let mut report = ScanReport::default();

	for entry in WalkDir::new(root).sort_by_file_name() {
		let entry = entry.map_err(io::Error::from)?;
		if !entry.file_type().is_file() {
			continue;
		}

		debug!("scanning {}", entry.path().display());
		report.files_scanned += 1;
		report.bytes_scanned += entry.metadata().map_err(io::Error::from)?.len();

		if let Some(found) = search_file(entry.path(), needle)? {
			report.matches.push(found);
		}
	}

	Ok(report)
}

#[cfg(test)]
mod tests {
	use super::*;

	use std::io::Cursor;

	fn write_with_needle(dir: &Path, name: &str, len: usize, needle: &[u8], at: usize) -> PathBuf {
		let mut data = vec![b'.'; len];
		data[at..at + needle.len()].copy_from_slice(needle);
		let path = dir.join(name);
		std::fs::write(&path, data).unwrap();
		path
	}

	#[test]
	fn finds_needle_at_known_offset() {
		let dir = tempfile::tempdir().unwrap();
		let needle = b"hidden text";
		let path = write_with_needle(dir.path(), "a.file", 4096, needle, 1234);

		let found = search_file(&path, needle).unwrap().unwrap();
		assert_eq!(found.start, 1234);
		assert_eq!(found.end, 1234 + needle.len() as u64);
		assert_eq!(found.size, 4096);
	}

	#[test]
	fn reports_first_occurrence_only() {
		let dir = tempfile::tempdir().unwrap();
		let mut data = vec![b'.'; 1000];
		data[100..103].copy_from_slice(b"sig");
		data[500..503].copy_from_slice(b"sig");
		let path = dir.path().join("twice.file");
		std::fs::write(&path, data).unwrap();

		let found = search_file(&path, b"sig").unwrap().unwrap();
		assert_eq!(found.start, 100);
	}

	#[test]
	fn absent_needle_yields_none() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("clean.file");
		std::fs::write(&path, vec![b'.'; 2048]).unwrap();

		assert_eq!(search_file(&path, b"needle").unwrap(), None);
	}

	#[test]
	fn file_shorter_than_needle_yields_none() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("tiny.file");
		std::fs::write(&path, b"ab").unwrap();

		assert_eq!(search_file(&path, b"abcdef").unwrap(), None);
	}

	#[test]
	fn empty_needle_yields_none() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("any.file");
		std::fs::write(&path, b"data").unwrap();

		assert_eq!(search_file(&path, b"").unwrap(), None);
	}

	#[test]
	fn finds_needle_spanning_read_boundary() {
		let needle = b"boundary-marker";
		let chunk = 256;

		// Place the needle so it straddles the first read window.
		let mut data = vec![b'.'; 1024];
		let at = chunk + (needle.len() - 1) - 7;
		data[at..at + needle.len()].copy_from_slice(needle);

		let finder = Finder::new(needle);
		let found = scan_reader(Cursor::new(&data), &finder, needle.len(), chunk).unwrap();
		assert_eq!(found, Some(at as u64));
	}

	#[test]
	fn finds_needle_at_stream_tail() {
		let needle = b"tail";
		let mut data = vec![b'.'; 500];
		let at = data.len() - needle.len();
		data[at..].copy_from_slice(needle);

		let finder = Finder::new(needle);
		let found = scan_reader(Cursor::new(&data), &finder, needle.len(), 128).unwrap();
		assert_eq!(found, Some(at as u64));
	}

	#[test]
	fn tree_scan_collects_hits_across_nesting() {
		let dir = tempfile::tempdir().unwrap();
		let needle = b"planted";

		std::fs::create_dir_all(dir.path().join("d_0.dir/d_0.dir")).unwrap();
		let hit_a = write_with_needle(dir.path(), "f_0.file", 300, needle, 12);
		write_with_needle(dir.path(), "f_1.file", 300, b"nothing", 12);
		let hit_b =
			write_with_needle(&dir.path().join("d_0.dir/d_0.dir"), "f_0.file", 600, needle, 577);

		let report = search_tree(dir.path(), needle).unwrap();

		assert_eq!(report.files_scanned, 3);
		assert_eq!(report.bytes_scanned, 1200);
		let mut paths: Vec<_> = report.matches.iter().map(|m| m.path.clone()).collect();
		paths.sort();
		assert_eq!(paths, [hit_b, hit_a]);
		assert!(report.matches.iter().any(|m| m.start == 577));
	}
}
