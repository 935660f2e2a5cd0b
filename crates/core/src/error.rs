//! Error types for the archiver.
//!
//! All operations return structured errors rather than panicking.
//! Every error is fatal to the current run: a malformed archive aborts
//! decompression immediately, with no retry and no partial recovery.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: reading/writing bits against byte streams
/// - Huffman: code construction or table reconstruction failures
/// - Format: a malformed or inconsistent archive bitstream
/// - I/O: file system operations
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of stream)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Huffman code construction or reconstruction error
    #[error("huffman code error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Archive bitstream is malformed or inconsistent
    #[error("archive format error: {0}")]
    Format(#[from] FormatError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Fewer bits remain in the stream than a field requires.
    /// This is the truncated-archive signal.
    #[error("insufficient bits: requested {requested}, available {available}")]
    InsufficientBits { requested: u32, available: u32 },

    /// Requested more bits in one call than the look-ahead window holds
    #[error("invalid bit count: {0}")]
    InvalidBitCount(u32),

    /// Raw byte write attempted while bits were still pending
    #[error("raw byte write with {pending} bits pending")]
    UnalignedRawWrite { pending: u32 },
}

/// Canonical Huffman code errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// No symbols with non-zero frequency (cannot build a code)
    #[error("empty frequency table: cannot build code")]
    EmptyFrequencyTable,

    /// A code length exceeds what a u64 code value can carry
    #[error("code length {length} exceeds maximum")]
    CodeLengthTooLong { length: usize },

    /// The length histogram assigns more codes of some length than fit;
    /// the canonical counter would overflow its width
    #[error("oversubscribed code lengths at length {length}")]
    OversubscribedLengths { length: usize },

    /// A symbol id outside the 259-symbol alphabet
    #[error("symbol {0} outside alphabet")]
    SymbolOutOfRange(u16),

    /// A symbol appeared twice in a transmitted canonical order
    #[error("symbol {0} appears twice in canonical order")]
    DuplicateSymbol(u16),

    /// Asked to encode a symbol the code table does not cover
    #[error("no code for symbol {0}")]
    MissingCode(u16),
}

/// Archive bitstream format errors (decode side).
#[derive(Debug, Error)]
pub enum FormatError {
    /// A unit header declared zero present symbols
    #[error("empty symbol table in unit header")]
    EmptySymbolTable,

    /// Stream ended before the length histogram accounted for all symbols
    #[error("length histogram too short: declared {declared} symbols, accounted {accounted}")]
    LengthHistogramUnderflow { declared: usize, accounted: usize },

    /// The length histogram accounted for more symbols than declared
    #[error("length histogram too long: declared {declared} symbols, accounted {accounted}")]
    LengthHistogramOverflow { declared: usize, accounted: usize },

    /// A single-symbol table cannot carry the control symbols a unit needs
    #[error("degenerate single-symbol code table in unit header")]
    DegenerateTable,

    /// The look-ahead bits match no code in the table within the maximum length
    #[error("bit sequence matches no code within {max_len} bits")]
    InvalidCode { max_len: usize },

    /// A control symbol other than FILENAME_END appeared inside a filename
    #[error("control symbol {0} inside filename")]
    ControlSymbolInName(u16),

    /// FILENAME_END appeared in file-content position
    #[error("filename terminator inside file content")]
    FilenameEndInContent,

    /// ONE_MORE_FILE was decoded but only trailing padding remains
    #[error("archive promises another file but the stream is exhausted")]
    MoreFilesExpected,

    /// ARCHIVE_END was decoded with data still remaining in the stream
    #[error("{bits} bits of data remain after archive end")]
    TrailingData { bits: u32 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
