//! Archive decoding: walking the bitstream unit by unit.
//!
//! Each call to `next_entry` reads one encoding unit — code-table header,
//! filename, content, terminator — and returns the reconstructed file. The
//! decoder never rewinds: headers are validated as they stream past, and any
//! inconsistency aborts the run with a format error.
//!
//! # End-of-archive detection
//!
//! The format has no length fields and no magic number; the only delimiter
//! is the terminator symbol of each unit, cross-checked against how much
//! stream remains. At most one byte of zero padding may follow ARCHIVE_END,
//! and ONE_MORE_FILE must actually be followed by more than that.

use std::io::Read;

use crate::alphabet::{ARCHIVE_END, FILENAME_END, ONE_MORE_FILE, PADDING_BITS, SYMBOL_BITS};
use crate::bitio::BitReader;
use crate::error::{BitIoError, Error, FormatError, Result};
use crate::huffman::{CanonicalDecoder, Codebook};

/// One file reconstructed from the archive. The name is the opaque byte
/// sequence stored at compress time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: Vec<u8>,
    pub data: Vec<u8>,
}

/// Streams encoding units out of an archive.
pub struct ArchiveDecoder<R> {
    reader: BitReader<R>,
    done: bool,
}

impl<R: Read> ArchiveDecoder<R> {
    /// Start decoding an archive from a byte source.
    pub fn new(src: R) -> Self {
        Self {
            reader: BitReader::new(src),
            done: false,
        }
    }

    /// Decode the next file, or `None` once the archive has cleanly ended.
    pub fn next_entry(&mut self) -> Result<Option<ArchiveEntry>> {
        if self.done {
            return Ok(None);
        }

        // Nothing but padding left before any unit started: an empty archive.
        if self.reader.bits_buffered()? <= PADDING_BITS {
            self.done = true;
            return Ok(None);
        }

        let (order, counts_by_len) = self.read_code_table()?;
        let book = Codebook::from_table(order, counts_by_len)?;
        let decoder = CanonicalDecoder::new(&book);

        // A single zero-length code cannot include the control symbols every
        // unit must end with, and would decode forever without consuming a
        // bit. Conforming encoders always emit at least the three controls.
        if decoder.is_zero_length() {
            return Err(FormatError::DegenerateTable.into());
        }

        let mut name = Vec::new();
        loop {
            let symbol = decoder.decode_symbol(&mut self.reader)?;
            match symbol {
                FILENAME_END => break,
                ONE_MORE_FILE | ARCHIVE_END => {
                    return Err(FormatError::ControlSymbolInName(symbol).into());
                }
                literal => name.push(literal as u8),
            }
        }

        let mut data = Vec::new();
        let terminator = loop {
            let symbol = decoder.decode_symbol(&mut self.reader)?;
            match symbol {
                FILENAME_END => return Err(FormatError::FilenameEndInContent.into()),
                ONE_MORE_FILE | ARCHIVE_END => break symbol,
                literal => data.push(literal as u8),
            }
        };

        // The terminator must agree with how much stream is left.
        let remaining = self.reader.bits_buffered()?;
        if remaining <= PADDING_BITS {
            if terminator != ARCHIVE_END {
                return Err(FormatError::MoreFilesExpected.into());
            }
            self.done = true;
        } else if terminator != ONE_MORE_FILE {
            return Err(FormatError::TrailingData { bits: remaining }.into());
        }

        Ok(Some(ArchiveEntry { name, data }))
    }

    /// Decode every remaining file.
    pub fn unpack(mut self) -> Result<Vec<ArchiveEntry>> {
        let mut entries = Vec::new();
        while let Some(entry) = self.next_entry()? {
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Header: 9-bit declared symbol count, that many 9-bit ids in canonical
    /// order, then 9-bit per-length counts accumulated until they account
    /// for every declared symbol. A declared count of 1 carries no length
    /// entries at all (the lone symbol's code is zero-length).
    fn read_code_table(&mut self) -> Result<(Vec<u16>, Vec<u16>)> {
        let declared = self.reader.read_bits(SYMBOL_BITS)? as usize;
        if declared == 0 {
            return Err(FormatError::EmptySymbolTable.into());
        }

        let mut order = Vec::with_capacity(declared);
        for _ in 0..declared {
            order.push(self.reader.read_bits(SYMBOL_BITS)? as u16);
        }

        if declared == 1 {
            return Ok((order, vec![1]));
        }

        let mut counts_by_len = vec![0u16];
        let mut accounted = 0usize;

        while accounted < declared {
            let count = match self.reader.read_bits(SYMBOL_BITS) {
                Ok(c) => c as u16,
                Err(Error::BitIo(BitIoError::InsufficientBits { .. })) => {
                    return Err(FormatError::LengthHistogramUnderflow {
                        declared,
                        accounted,
                    }
                    .into());
                }
                Err(e) => return Err(e),
            };
            counts_by_len.push(count);
            accounted += count as usize;
        }

        if accounted > declared {
            return Err(FormatError::LengthHistogramOverflow {
                declared,
                accounted,
            }
            .into());
        }

        Ok((order, counts_by_len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decoder(bytes: Vec<u8>) -> ArchiveDecoder<Cursor<Vec<u8>>> {
        ArchiveDecoder::new(Cursor::new(bytes))
    }

    #[test]
    fn test_empty_stream_is_empty_archive() {
        let entries = decoder(Vec::new()).unpack().unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_known_wire_bytes() {
        // The single-empty-file-named-"a" unit pinned in the encoder tests
        let entries = decoder(vec![4, 194, 0, 12, 40, 16, 0, 1, 28])
            .unpack()
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, b"a");
        assert!(entries[0].data.is_empty());
    }

    #[test]
    fn test_zero_symbol_count_rejected() {
        // k = 0 followed by padding
        let err = decoder(vec![0, 0]).unpack().unwrap_err();
        assert!(matches!(
            err,
            Error::Format(FormatError::EmptySymbolTable)
        ));
    }

    #[test]
    fn test_single_symbol_unit_rejected() {
        // k = 1, symbol id 65: reconstructs a zero-length code, which no
        // well-formed unit can carry
        let err = decoder(vec![1, 130, 0]).unpack().unwrap_err();
        assert!(matches!(err, Error::Format(FormatError::DegenerateTable)));
    }

    #[test]
    fn test_truncated_header_rejected() {
        // k = 4 but the stream ends inside the first symbol id
        let err = decoder(vec![4, 194]).unpack().unwrap_err();
        assert!(matches!(
            err,
            Error::BitIo(BitIoError::InsufficientBits { .. })
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        // All-ones: declares 511 symbols, stream ends long before that
        let err = decoder(vec![0xFF; 8]).unpack().unwrap_err();
        assert!(matches!(
            err,
            Error::BitIo(BitIoError::InsufficientBits { .. })
        ));
    }

    #[test]
    fn test_done_after_archive_end() {
        let mut d = decoder(vec![4, 194, 0, 12, 40, 16, 0, 1, 28]);
        assert!(d.next_entry().unwrap().is_some());
        assert!(d.next_entry().unwrap().is_none());
        assert!(d.next_entry().unwrap().is_none());
    }
}
