//! huffpack: multi-file Huffman archiver.
//!
//! Thin shell over `huffpack-core`: parses the command, opens files, and
//! reports errors. Any failure aborts the run with exit code 1; output files
//! of an aborted run are left in an undefined state.

use std::fs;
use std::fs::File;
use std::io;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process;

use huffpack_core::{ArchiveDecoder, ArchiveEncoder, Error, Result};

mod config;
use config::Command;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let command = match Command::from_args(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("error: {message}");
            process::exit(1);
        }
    };

    let outcome = match command {
        Command::Hint => {
            config::print_hint();
            return;
        }
        Command::Help => {
            config::print_help();
            return;
        }
        Command::Unknown => {
            println!("Unknown flags");
            return;
        }
        Command::Compress { archive, inputs } => compress(&archive, &inputs),
        Command::Decompress { archive } => decompress(&archive),
    };

    if let Err(error) = outcome {
        eprintln!("error: {error}");
        process::exit(1);
    }
}

fn compress(archive: &str, inputs: &[String]) -> Result<()> {
    let sink = File::create(archive).map_err(|e| cannot_open(archive, e))?;
    let mut encoder = ArchiveEncoder::new(BufWriter::new(sink));

    for name in inputs {
        let content = fs::read(name).map_err(|e| cannot_open(name, e))?;
        encoder.add_file(name.as_bytes(), &content)?;
    }

    let (_, stats) = encoder.finish()?;
    stats.print();
    Ok(())
}

fn decompress(archive: &str) -> Result<()> {
    let source = File::open(archive).map_err(|e| cannot_open(archive, e))?;
    let mut decoder = ArchiveDecoder::new(BufReader::new(source));

    while let Some(entry) = decoder.next_entry()? {
        let path = stored_name_to_path(&entry.name);
        fs::write(&path, &entry.data)
            .map_err(|e| cannot_open(&path.display().to_string(), e))?;
        println!("extracted {}", path.display());
    }

    Ok(())
}

fn cannot_open(name: &str, error: io::Error) -> Error {
    io::Error::new(
        error.kind(),
        format!("cannot open file named {name}: {error}"),
    )
    .into()
}

/// Stored names are opaque bytes. On Unix they map onto the filesystem
/// verbatim; elsewhere the closest available conversion is lossy UTF-8.
#[cfg(unix)]
fn stored_name_to_path(name: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    PathBuf::from(OsStr::from_bytes(name))
}

#[cfg(not(unix))]
fn stored_name_to_path(name: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(name).into_owned())
}
