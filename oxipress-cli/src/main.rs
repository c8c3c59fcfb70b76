//! OxiPress CLI - adaptive LZW compression
//!
//! Compresses, decompresses and tests `.Z`-style LZW streams from files or
//! standard streams.

mod commands;
mod utils;

use clap::{ArgAction, Parser};
use commands::{RunOptions, cmd_compress, cmd_decompress, cmd_test};
use oxipress_lzw::{DEFAULT_MAX_BITS, LzwConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxipress")]
#[command(author, version, about = "Adaptive LZW compressor - Pure Rust")]
#[command(long_about = "
OxiPress compresses a byte stream with adaptive LZW. The output starts with
the 3-byte header 0x1F 0x9D (0x80 | max_bits), followed by LSB-first codes
that grow from 9 bits up to the maximum width.

INPUT and OUTPUT default to stdin and stdout; '-' also names the std stream.

Examples:
  oxipress notes.txt notes.txt.Z
  oxipress -d notes.txt.Z notes.txt
  oxipress -t notes.txt.Z
  oxipress -b 32 < big.bin > big.bin.Z
  cat data.Z | oxipress -d -v --json > data
")]
struct Cli {
    /// Decompress INPUT instead of compressing it
    #[arg(short, long, conflicts_with = "test")]
    decompress: bool,

    /// Check that INPUT decompresses cleanly; nothing is written
    #[arg(short, long)]
    test: bool,

    /// Maximum code width in bits when compressing (16 or 32)
    #[arg(short, long, value_name = "BITS", default_value_t = DEFAULT_MAX_BITS, value_parser = parse_bits)]
    bits: u8,

    /// Print a summary and enable debug logging (-vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Show a progress bar (file input only)
    #[arg(short = 'P', long)]
    progress: bool,

    /// Print run statistics as JSON to stderr
    #[arg(long)]
    json: bool,

    /// Input file, '-' for stdin
    input: Option<PathBuf>,

    /// Output file, '-' for stdout
    #[arg(conflicts_with = "test")]
    output: Option<PathBuf>,
}

/// Validate `-b` at parse time so a bad width is a usage error.
fn parse_bits(value: &str) -> Result<u8, String> {
    let bits: u8 = value
        .parse()
        .map_err(|e| format!("'{}' is not a bit count: {}", value, e))?;
    LzwConfig::new(bits)
        .map(|config| config.max_bits())
        .map_err(|e| e.to_string())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = RunOptions {
        verbose: cli.verbose > 0,
        progress: cli.progress,
        json: cli.json,
    };
    let input = cli.input.as_deref();
    let output = cli.output.as_deref();

    let result = if cli.test {
        cmd_test(input, &options)
    } else if cli.decompress {
        if cli.bits != DEFAULT_MAX_BITS {
            log::debug!("-b {} ignored: the width is read from the header", cli.bits);
        }
        cmd_decompress(input, output, &options)
    } else {
        LzwConfig::new(cli.bits)
            .map_err(Into::into)
            .and_then(|config| cmd_compress(input, output, config, &options))
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
