//! Canonical Huffman coding over the 259-symbol archive alphabet.
//!
//! The tree only ever contributes code *lengths*: leaf depth determines how
//! many bits a symbol costs, and the actual bit patterns are assigned
//! canonically from the lengths alone. That makes the table transmissible as
//! (symbol order, count-of-symbols-per-length) with no raw codes on the wire.
//!
//! # Canonical construction
//!
//! Present symbols are ordered by ascending code length, ties broken by
//! ascending symbol id. The first symbol receives the all-zero code of its
//! length; every following symbol takes the previous code incremented as a
//! big-endian counter within its length, zero-extended on the right when the
//! length grows.
//!
//! # Symmetry
//!
//! `Codebook::from_frequencies` (encoder) and `Codebook::from_table`
//! (decoder, fed exactly what the stream carries) run the same assignment and
//! must produce identical codes. This is the core correctness property of the
//! archive format and is what the round-trip tests ultimately exercise.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::io::{Read, Write};

use crate::alphabet::{ALPHABET_SIZE, MAX_CODE_LEN};
use crate::bitio::{BitReader, BitWriter};
use crate::error::{FormatError, HuffmanError, Result};

/// Per-unit symbol frequency histogram.
pub type Histogram = [u64; ALPHABET_SIZE];

/// One canonical code: `len` bits, first transmitted bit is the most
/// significant bit of `value`. A zero-length code (single-symbol table)
/// occupies no bits at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub value: u64,
    pub len: u8,
}

/// A canonical Huffman code table over the archive alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codebook {
    /// Per-symbol code, `None` for absent symbols
    codes: Vec<Option<Code>>,
    /// Present symbols in canonical order
    order: Vec<u16>,
    /// `counts_by_len[l]` = number of symbols with code length `l`;
    /// index 0 is nonzero only for a single-symbol table
    counts_by_len: Vec<u16>,
}

impl Codebook {
    /// Build the canonical code for one encoding unit from its histogram.
    ///
    /// # Errors
    /// - `HuffmanError::EmptyFrequencyTable` if every count is zero
    /// - `HuffmanError::CodeLengthTooLong` if a leaf sits deeper than a u64
    ///   code can express (unreachable for u64 frequency sums)
    pub fn from_frequencies(freqs: &Histogram) -> Result<Self> {
        let lengths = code_lengths(freqs)?;
        let order = canonical_order(freqs, &lengths);

        let lens: Vec<u8> = order.iter().map(|&s| lengths[s as usize]).collect();
        let codes = assign_canonical_codes(&order, &lens)?;

        let max_len = lens.last().copied().unwrap_or(0) as usize;
        let mut counts_by_len = vec![0u16; max_len + 1];
        for &len in &lens {
            counts_by_len[len as usize] += 1;
        }

        Ok(Self {
            codes,
            order,
            counts_by_len,
        })
    }

    /// Reconstruct the code table from what the stream carries: the canonical
    /// symbol order and the per-length symbol counts. Runs the same canonical
    /// assignment as `from_frequencies`; raw frequencies are never needed.
    ///
    /// A single-symbol table is passed as `counts_by_len = [1]` (one
    /// zero-length code), mirroring the header that transmits a symbol count
    /// of 1 and no length entries.
    ///
    /// # Errors
    /// - `HuffmanError::SymbolOutOfRange` for ids outside the alphabet
    /// - `HuffmanError::DuplicateSymbol` if a symbol appears twice
    /// - `HuffmanError::OversubscribedLengths` if more codes of some length
    ///   are declared than fit in that many bits
    /// - `HuffmanError::CodeLengthTooLong` if the histogram reaches past the
    ///   maximum code length
    /// - `FormatError::LengthHistogram{Underflow,Overflow}` if the counts do
    ///   not sum to the number of ordered symbols
    pub fn from_table(order: Vec<u16>, counts_by_len: Vec<u16>) -> Result<Self> {
        if order.is_empty() {
            return Err(HuffmanError::EmptyFrequencyTable.into());
        }

        if counts_by_len.len() > MAX_CODE_LEN + 1 {
            return Err(HuffmanError::CodeLengthTooLong {
                length: counts_by_len.len() - 1,
            }
            .into());
        }

        for &symbol in &order {
            if symbol as usize >= ALPHABET_SIZE {
                return Err(HuffmanError::SymbolOutOfRange(symbol).into());
            }
        }

        let accounted: usize = counts_by_len.iter().map(|&c| c as usize).sum();
        if accounted < order.len() {
            return Err(FormatError::LengthHistogramUnderflow {
                declared: order.len(),
                accounted,
            }
            .into());
        }
        if accounted > order.len() {
            return Err(FormatError::LengthHistogramOverflow {
                declared: order.len(),
                accounted,
            }
            .into());
        }

        let mut lens = Vec::with_capacity(order.len());
        for (len, &count) in counts_by_len.iter().enumerate() {
            for _ in 0..count {
                lens.push(len as u8);
            }
        }

        let codes = assign_canonical_codes(&order, &lens)?;

        Ok(Self {
            codes,
            order,
            counts_by_len,
        })
    }

    /// The canonical code for `symbol`, if it is present in this table.
    pub fn code(&self, symbol: u16) -> Option<Code> {
        self.codes.get(symbol as usize).copied().flatten()
    }

    /// Present symbols in canonical order.
    pub fn order(&self) -> &[u16] {
        &self.order
    }

    /// Number of symbols with each code length; index 0 unused on the wire.
    pub fn counts_by_len(&self) -> &[u16] {
        &self.counts_by_len
    }

    /// Length of the longest code in the table.
    pub fn max_code_len(&self) -> usize {
        self.counts_by_len.len() - 1
    }

    /// Number of present symbols.
    pub fn symbol_count(&self) -> usize {
        self.order.len()
    }

    /// Emit `symbol`'s code, most significant bit first.
    ///
    /// # Errors
    /// `HuffmanError::MissingCode` if the symbol has no code in this table —
    /// the encoder's histogram covers every symbol it emits, so this guards
    /// against misuse, not against valid inputs.
    pub fn encode_symbol<W: Write>(&self, writer: &mut BitWriter<W>, symbol: u16) -> Result<()> {
        let code = self
            .code(symbol)
            .ok_or(HuffmanError::MissingCode(symbol))?;

        for bit in (0..code.len).rev() {
            writer.push_bit((code.value >> bit) & 1 == 1)?;
        }

        Ok(())
    }
}

/// Compute per-symbol code lengths from a histogram: build the Huffman tree
/// in a flat arena via a min-priority queue, then read off leaf depths.
/// Absent symbols keep length 0; a lone present symbol also gets length 0
/// (its code is empty).
///
/// Queue ties are broken by arena insertion index, so lengths are identical
/// across runs for the same histogram.
pub fn code_lengths(freqs: &Histogram) -> Result<[u8; ALPHABET_SIZE]> {
    enum Node {
        Leaf(u16),
        Internal(usize, usize),
    }

    let mut arena: Vec<Node> = Vec::new();
    let mut queue: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();

    for (symbol, &weight) in freqs.iter().enumerate() {
        if weight == 0 {
            continue;
        }
        queue.push(Reverse((weight, arena.len())));
        arena.push(Node::Leaf(symbol as u16));
    }

    if queue.is_empty() {
        return Err(HuffmanError::EmptyFrequencyTable.into());
    }

    while queue.len() > 1 {
        let Reverse((wa, a)) = queue.pop().expect("queue has two nodes");
        let Reverse((wb, b)) = queue.pop().expect("queue has two nodes");

        queue.push(Reverse((wa + wb, arena.len())));
        arena.push(Node::Internal(a, b));
    }

    let Reverse((_, root)) = queue.pop().expect("queue ends with the root");

    let mut lengths = [0u8; ALPHABET_SIZE];
    let mut stack = vec![(root, 0usize)];

    while let Some((index, depth)) = stack.pop() {
        match arena[index] {
            Node::Leaf(symbol) => {
                if depth > MAX_CODE_LEN {
                    return Err(HuffmanError::CodeLengthTooLong { length: depth }.into());
                }
                lengths[symbol as usize] = depth as u8;
            }
            Node::Internal(left, right) => {
                stack.push((left, depth + 1));
                stack.push((right, depth + 1));
            }
        }
    }

    Ok(lengths)
}

/// Present symbols ordered by (code length, symbol id) — the strict total
/// order both sides of the format agree on.
pub fn canonical_order(freqs: &Histogram, lengths: &[u8; ALPHABET_SIZE]) -> Vec<u16> {
    let mut order: Vec<u16> = (0..ALPHABET_SIZE as u16)
        .filter(|&s| freqs[s as usize] > 0)
        .collect();

    order.sort_by_key(|&s| (lengths[s as usize], s));
    order
}

/// Assign canonical codes to `order[i]` with length `lens[i]`.
///
/// `lens` must be non-decreasing (it comes from the canonical sort on the
/// encoder side and from the length histogram on the decoder side). The
/// counter-overflow check is what rejects oversubscribed tables: incrementing
/// past the all-ones code of the current length means the declared lengths
/// cannot form a prefix-free code.
fn assign_canonical_codes(order: &[u16], lens: &[u8]) -> Result<Vec<Option<Code>>> {
    debug_assert_eq!(order.len(), lens.len());
    debug_assert!(lens.windows(2).all(|w| w[0] <= w[1]));

    let mut codes: Vec<Option<Code>> = vec![None; ALPHABET_SIZE];

    let mut value: u64 = 0;
    let mut prev_len: u32 = lens.first().map(|&l| l as u32).unwrap_or(0);

    for (i, (&symbol, &len)) in order.iter().zip(lens.iter()).enumerate() {
        let len = len as u32;

        if i > 0 {
            value = value
                .checked_add(1)
                .ok_or(HuffmanError::OversubscribedLengths {
                    length: prev_len as usize,
                })?;

            if prev_len < 64 && value >> prev_len != 0 {
                return Err(HuffmanError::OversubscribedLengths {
                    length: prev_len as usize,
                }
                .into());
            }

            value <<= len - prev_len;
        }

        let slot = &mut codes[symbol as usize];
        if slot.is_some() {
            return Err(HuffmanError::DuplicateSymbol(symbol).into());
        }
        *slot = Some(Code {
            value,
            len: len as u8,
        });

        prev_len = len;
    }

    Ok(codes)
}

/// Decoding lookup: per code length, the first canonical code value, the
/// number of codes, and the offset of the first symbol in canonical order.
/// Resolving a symbol is a range check per length instead of a map probe;
/// the shortest matching prefix still wins because the code is prefix-free.
#[derive(Debug, Clone)]
pub struct CanonicalDecoder {
    order: Vec<u16>,
    counts: Vec<u16>,
    first_code: Vec<u64>,
    first_index: Vec<usize>,
}

impl CanonicalDecoder {
    /// Build the lookup from a reconstructed (or freshly built) codebook.
    pub fn new(codebook: &Codebook) -> Self {
        let counts = codebook.counts_by_len().to_vec();
        let max_len = counts.len() - 1;

        let mut first_code = vec![0u64; max_len + 1];
        let mut first_index = vec![0usize; max_len + 1];

        let mut code: u64 = 0;
        let mut index: usize = 0;

        for len in 1..=max_len {
            code = (code + counts[len - 1] as u64) << 1;
            index += counts[len - 1] as usize;
            first_code[len] = code;
            first_index[len] = index;
        }

        Self {
            order: codebook.order().to_vec(),
            counts,
            first_code,
            first_index,
        }
    }

    /// Length of the longest code this table can match.
    pub fn max_code_len(&self) -> usize {
        self.counts.len() - 1
    }

    /// True when the table holds a single zero-length code: decoding then
    /// resolves immediately and consumes no stream bits.
    pub fn is_zero_length(&self) -> bool {
        self.max_code_len() == 0
    }

    /// Decode one symbol, pulling bits until the accumulated prefix matches
    /// a code.
    ///
    /// # Errors
    /// - `FormatError::InvalidCode` if no code matches within the maximum
    ///   length (corrupt stream or an incomplete table's unused pattern)
    /// - bit I/O errors if the stream runs out mid-code
    pub fn decode_symbol<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u16> {
        if self.is_zero_length() {
            return Ok(self.order[0]);
        }

        let mut acc: u64 = 0;

        for len in 1..=self.max_code_len() {
            acc = (acc << 1) | reader.read_bits(1)?;

            let count = self.counts[len] as u64;
            if count > 0 && acc >= self.first_code[len] {
                let offset = acc - self.first_code[len];
                if offset < count {
                    return Ok(self.order[self.first_index[len] + offset as usize]);
                }
            }
        }

        Err(FormatError::InvalidCode {
            max_len: self.max_code_len(),
        }
        .into())
    }
}
