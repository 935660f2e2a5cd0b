//! Run statistics for an archiving session.
//!
//! The system is single-threaded and fully synchronous, so statistics are a
//! plain struct updated in place by the encoder and printed once by the
//! caller at the end of a run.

/// Byte and file counts for one compression run.
#[derive(Debug, Clone, Default)]
pub struct ArchiveStats {
    /// Files written into the archive
    pub files: u64,

    /// Total content bytes read from input files
    pub input_bytes: u64,

    /// Total bytes emitted into the archive
    pub output_bytes: u64,
}

impl ArchiveStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one input file's content size.
    pub fn record_file(&mut self, content_bytes: u64) {
        self.files += 1;
        self.input_bytes += content_bytes;
    }

    /// Archive size as a fraction of input size (1.0 = no change).
    ///
    /// An archive of empty files has a positive size over zero input bytes;
    /// that reports as 0.0 rather than dividing by zero.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.output_bytes as f64 / self.input_bytes as f64
    }

    /// Print the end-of-run summary in human-readable form.
    pub fn print(&self) {
        println!("Files archived: {}", self.files);
        println!("Input bytes:    {}", self.input_bytes);
        println!("Archive bytes:  {}", self.output_bytes);
        if self.input_bytes > 0 {
            println!("Ratio:          {:.1}%", self.ratio() * 100.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accumulates() {
        let mut stats = ArchiveStats::new();
        stats.record_file(100);
        stats.record_file(0);
        stats.record_file(900);

        assert_eq!(stats.files, 3);
        assert_eq!(stats.input_bytes, 1000);
    }

    #[test]
    fn test_ratio() {
        let stats = ArchiveStats {
            files: 1,
            input_bytes: 200,
            output_bytes: 50,
        };
        assert!((stats.ratio() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_with_no_input() {
        let stats = ArchiveStats {
            files: 1,
            input_bytes: 0,
            output_bytes: 9,
        };
        assert_eq!(stats.ratio(), 0.0);
    }
}
