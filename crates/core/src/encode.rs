//! Archive encoding: one encoding unit per input file.
//!
//! # Unit Layout
//!
//! ```text
//! +---------------------+
//! | symbol count k      |  9 bits
//! +---------------------+
//! | k symbol ids        |  9 bits each, canonical order
//! +---------------------+
//! | per-length counts   |  9 bits each, lengths 1..=max
//! |                     |  (absent entirely when k == 1)
//! +---------------------+
//! | filename symbols    |  canonical codes
//! | FILENAME_END        |
//! +---------------------+
//! | content symbols     |  canonical codes
//! | terminator          |  ONE_MORE_FILE or ARCHIVE_END
//! +---------------------+
//! ```
//!
//! Units are packed back to back with no byte alignment anywhere; only the
//! final byte of the whole archive is zero-padded.
//!
//! The histogram for a unit covers the file's content bytes, its filename
//! bytes, and the three control symbols forced to at least one occurrence
//! each — so every control action always has a valid code, even for an
//! empty file.

use std::io::Write;

use crate::alphabet::{ALPHABET_SIZE, ARCHIVE_END, FILENAME_END, ONE_MORE_FILE, SYMBOL_BITS};
use crate::bitio::BitWriter;
use crate::error::Result;
use crate::huffman::{Codebook, Histogram};
use crate::stats::ArchiveStats;

/// Count symbol frequencies for one encoding unit: content bytes plus
/// filename bytes, with the three control symbols seeded to 1.
pub fn frequency_histogram(name: &[u8], content: &[u8]) -> Histogram {
    let mut freqs = [0u64; ALPHABET_SIZE];

    freqs[FILENAME_END as usize] = 1;
    freqs[ONE_MORE_FILE as usize] = 1;
    freqs[ARCHIVE_END as usize] = 1;

    for &byte in content {
        freqs[byte as usize] += 1;
    }
    for &byte in name {
        freqs[byte as usize] += 1;
    }

    freqs
}

/// Streams files into a single archive bitstream.
///
/// The session owns the terminator decision: each unit's closing symbol is
/// written when the *next* call arrives — ONE_MORE_FILE when another
/// `add_file` follows, ARCHIVE_END from `finish`. Both are encoded with the
/// unit's own code table, so the table is held until the unit is closed.
pub struct ArchiveEncoder<W: Write> {
    writer: BitWriter<W>,
    /// Code table of the unit still awaiting its terminator
    open_unit: Option<Codebook>,
    stats: ArchiveStats,
}

impl<W: Write> ArchiveEncoder<W> {
    /// Start an archive session over a byte sink.
    pub fn new(sink: W) -> Self {
        Self {
            writer: BitWriter::new(sink),
            open_unit: None,
            stats: ArchiveStats::new(),
        }
    }

    /// Append one file to the archive.
    ///
    /// `name` is an opaque byte sequence recreated verbatim on extraction.
    pub fn add_file(&mut self, name: &[u8], content: &[u8]) -> Result<()> {
        if let Some(book) = self.open_unit.take() {
            book.encode_symbol(&mut self.writer, ONE_MORE_FILE)?;
        }

        let freqs = frequency_histogram(name, content);
        let book = Codebook::from_frequencies(&freqs)?;

        self.write_code_table(&book)?;

        for &byte in name {
            book.encode_symbol(&mut self.writer, byte as u16)?;
        }
        book.encode_symbol(&mut self.writer, FILENAME_END)?;

        for &byte in content {
            book.encode_symbol(&mut self.writer, byte as u16)?;
        }

        self.stats.record_file(content.len() as u64);
        self.open_unit = Some(book);
        Ok(())
    }

    /// Terminate the archive: ARCHIVE_END for the last unit, then drain the
    /// bit buffer, zero-padding the final byte. Returns the sink and the
    /// run's statistics.
    pub fn finish(mut self) -> Result<(W, ArchiveStats)> {
        if let Some(book) = self.open_unit.take() {
            book.encode_symbol(&mut self.writer, ARCHIVE_END)?;
        }

        self.writer.flush_all()?;
        self.stats.output_bytes = self.writer.bytes_written();

        let sink = self.writer.finish()?;
        Ok((sink, self.stats))
    }

    /// Statistics collected so far (output bytes settle at `finish`).
    pub fn stats(&self) -> &ArchiveStats {
        &self.stats
    }

    /// Header: 9-bit symbol count, the canonical symbol order, then one
    /// 9-bit count per code length from 1 to the maximum. Length 0 is never
    /// transmitted — a single-symbol table sends k = 1 and nothing else.
    fn write_code_table(&mut self, book: &Codebook) -> Result<()> {
        self.writer
            .push_bits(book.symbol_count() as u64, SYMBOL_BITS)?;

        for &symbol in book.order() {
            self.writer.push_bits(symbol as u64, SYMBOL_BITS)?;
        }

        for &count in &book.counts_by_len()[1..] {
            self.writer.push_bits(count as u64, SYMBOL_BITS)?;
        }

        Ok(())
    }
}
