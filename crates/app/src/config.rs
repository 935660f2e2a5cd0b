//! Command-line surface for the archiver.
//!
//! Parses the argument list into a `Command`. Everything here is a
//! collaborator of the core: usage decisions live in this crate, the core
//! only ever sees opened streams and opaque filename bytes.

/// What one invocation asks the tool to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `-c <archive> <file1> [file2 ...]`
    Compress {
        archive: String,
        inputs: Vec<String>,
    },

    /// `-d <archive>`
    Decompress { archive: String },

    /// `-h`
    Help,

    /// No arguments at all: point at `-h`
    Hint,

    /// Any other first argument
    Unknown,
}

impl Command {
    /// Parse the arguments after the program name.
    ///
    /// Compression requires an archive name and at least one input file;
    /// anything less is a usage error.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let Some(flag) = args.first() else {
            return Ok(Command::Hint);
        };

        match flag.as_str() {
            "-h" => Ok(Command::Help),

            "-c" => {
                if args.len() < 3 {
                    return Err(
                        "too few arguments: -c needs an archive name and at least one file"
                            .to_string(),
                    );
                }
                Ok(Command::Compress {
                    archive: args[1].clone(),
                    inputs: args[2..].to_vec(),
                })
            }

            "-d" => match args.get(1) {
                Some(archive) => Ok(Command::Decompress {
                    archive: archive.clone(),
                }),
                None => Err("-d requires an archive name".to_string()),
            },

            _ => Ok(Command::Unknown),
        }
    }
}

pub fn print_hint() {
    println!("Use \"-h\" to get help");
}

pub fn print_help() {
    println!("huffpack: multi-file archiver with canonical Huffman coding");
    println!();
    println!("USAGE:");
    println!("    huffpack -c <archive> <file1> [file2 ...]");
    println!("        Archive the named files into <archive>.");
    println!();
    println!("    huffpack -d <archive>");
    println!("        Extract <archive> into the current directory,");
    println!("        recreating each stored filename.");
    println!();
    println!("    huffpack -h");
    println!("        Print this help.");
}
