//! Randomized directory-tree generation.
//!
//! The generator builds a tree of files with approximate sizes and random
//! content, optionally stamping a subset of files with a signature byte
//! string at a random offset. Every generated file is recorded in a
//! `Manifest` so downstream search tooling can be verified against known
//! ground truth.

/// Generation parameters (depth, size/count ranges, signature policy).
pub mod spec;

/// Chunked single-file generation with optional signature embedding.
pub mod file;

/// Recursive tree generation driven by a `TreeSpec`.
pub mod tree;

/// Binary manifest of generated files and signature placements.
pub mod manifest;

pub use file::{Content, FileReport, generate_file, DEFAULT_CHUNK_SIZE};
pub use manifest::{FileEntry, Manifest};
pub use spec::TreeSpec;
pub use tree::generate_tree;
