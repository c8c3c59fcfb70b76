//! Command implementations for OxiPress CLI.

pub mod compress;
pub mod decompress;

pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use test::cmd_test;

/// Reporting options shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Print a human summary to stderr.
    pub verbose: bool,
    /// Show a progress bar while reading a file.
    pub progress: bool,
    /// Print run statistics as JSON to stderr.
    pub json: bool,
}
