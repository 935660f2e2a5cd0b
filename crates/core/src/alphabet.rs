//! Shared constants for the archive alphabet and wire format.
//!
//! The encoder and decoder must agree bit-for-bit, so every fixed quantity of
//! the format is defined exactly once here: the alphabet of 259 symbols
//! (256 literal byte values plus three control symbols), the fixed 9-bit
//! width used for symbol ids and header counts, and the trailing-padding
//! threshold that delimits the end of the archive.

/// Number of literal byte symbols (ids 0-255).
pub const LITERAL_COUNT: usize = 256;

/// Terminates a filename inside an encoding unit.
pub const FILENAME_END: u16 = 256;

/// Terminates a file's content; another file follows.
pub const ONE_MORE_FILE: u16 = 257;

/// Terminates a file's content; the archive ends.
pub const ARCHIVE_END: u16 = 258;

/// Total number of symbols: 256 literals + 3 control symbols.
pub const ALPHABET_SIZE: usize = 259;

/// Fixed width of symbol ids and header counts on the wire.
///
/// 9 bits suffice: 2^9 = 512 > 259, and no header field can exceed the
/// alphabet size.
pub const SYMBOL_BITS: u32 = 9;

/// Longest canonical code the implementation carries (codes live in a u64).
///
/// Depth 65 would require Fibonacci-like frequency sums in the tens of
/// terabytes, so this bounds malformed tables, not real inputs.
pub const MAX_CODE_LEN: usize = 64;

/// At most one byte of zero padding may trail the final encoding unit.
pub const PADDING_BITS: u32 = 8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_symbols_follow_literals() {
        assert_eq!(FILENAME_END as usize, LITERAL_COUNT);
        assert_eq!(ONE_MORE_FILE, FILENAME_END + 1);
        assert_eq!(ARCHIVE_END, ONE_MORE_FILE + 1);
        assert_eq!(ALPHABET_SIZE, LITERAL_COUNT + 3);
    }

    #[test]
    fn test_symbol_bits_cover_alphabet() {
        assert!(ALPHABET_SIZE <= 1 << SYMBOL_BITS);
    }
}
