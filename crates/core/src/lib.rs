//! huffpack-core: multi-file archiver built on canonical Huffman coding
//!
//! This library provides the core components for an archiver that:
//! - Compresses one or more files into a single contiguous bitstream
//! - Serializes each file's code table as (symbol order, length counts),
//!   never raw code values
//! - Reconstructs files losslessly, rejecting malformed archives precisely
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `alphabet`: the shared 259-symbol alphabet and wire constants
//! - `bitio`: low-level bit reading/writing, LSB-first
//! - `huffman`: canonical Huffman code construction and reconstruction
//! - `encode`: per-file encoding units into one archive stream
//! - `decode`: unit-by-unit archive extraction
//! - `stats`: end-of-run statistics
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured; malformed input is rejected,
//!   never tolerated
//! - **One source of truth**: encoder and decoder share the alphabet
//!   constants and the canonical code assignment, so they agree bit-for-bit
//! - **Sequential**: files are processed strictly in order against a single
//!   exclusively-owned stream; no concurrency, no rewinding

pub mod alphabet;
pub mod bitio;
pub mod decode;
pub mod encode;
pub mod error;
pub mod huffman;
pub mod stats;

// Re-export commonly used types
pub use decode::{ArchiveDecoder, ArchiveEntry};
pub use encode::ArchiveEncoder;
pub use error::{Error, Result};
pub use stats::ArchiveStats;
