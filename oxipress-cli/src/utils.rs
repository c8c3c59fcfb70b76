//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::error::Error;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, StdoutLock, Write};
use std::path::{Path, PathBuf};

/// Name used for the standard streams in messages.
const STDIN_NAME: &str = "<stdin>";
const STDOUT_NAME: &str = "<stdout>";

/// Whether `path` names a standard stream (absent or `-`).
pub fn is_std_stream(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p == Path::new("-"))
}

/// Create a byte progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░ "));
    }
    pb
}

/// An opened input stream.
pub struct Input {
    /// Display name.
    pub name: String,
    /// Size in bytes, known for regular files only.
    pub len: Option<u64>,
    pub reader: Box<dyn Read>,
}

/// Open `path` for reading, or stdin.
pub fn open_input(path: Option<&Path>) -> io::Result<Input> {
    match path {
        Some(path) if !is_std_stream(Some(path)) => {
            let file = File::open(path)?;
            let len = file.metadata().ok().filter(|m| m.is_file()).map(|m| m.len());
            Ok(Input {
                name: path.display().to_string(),
                len,
                reader: Box::new(file),
            })
        }
        _ => Ok(Input {
            name: STDIN_NAME.to_string(),
            len: None,
            reader: Box::new(io::stdin().lock()),
        }),
    }
}

/// Destination for decompressed or compressed bytes.
pub enum Output {
    Stdout(BufWriter<StdoutLock<'static>>),
    File {
        path: PathBuf,
        writer: BufWriter<File>,
    },
}

impl Output {
    /// Create `path` for writing, or use stdout.
    pub fn create(path: Option<&Path>) -> io::Result<Self> {
        match path {
            Some(path) if !is_std_stream(Some(path)) => Ok(Output::File {
                path: path.to_path_buf(),
                writer: BufWriter::new(File::create(path)?),
            }),
            _ => Ok(Output::Stdout(BufWriter::new(io::stdout().lock()))),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Output::Stdout(_) => STDOUT_NAME.to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    /// Run `job` against this output and flush it.
    ///
    /// If either step fails, a file output is deleted so no truncated
    /// result is left behind.
    pub fn complete<T, E>(
        mut self,
        job: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, Box<dyn Error>>
    where
        E: Into<Box<dyn Error>>,
    {
        let result: Result<T, Box<dyn Error>> = match job(&mut self) {
            Ok(value) => self.flush().map(|()| value).map_err(Into::into),
            Err(e) => Err(e.into()),
        };
        if result.is_err() {
            self.abandon();
        }
        result
    }

    fn abandon(self) {
        if let Output::File { path, writer } = self {
            // Close before removing.
            drop(writer);
            match fs::remove_file(&path) {
                Ok(()) => log::debug!("removed partial output {}", path.display()),
                Err(e) => log::warn!("could not remove {}: {}", path.display(), e),
            }
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.write_all(buf),
            Output::File { writer, .. } => writer.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Machine-readable run report.
#[derive(Serialize)]
struct Report<'a, S: Serialize> {
    operation: &'a str,
    input: &'a str,
    output: &'a str,
    ratio: f64,
    space_savings: f64,
    stats: &'a S,
}

/// Print run statistics as JSON to stderr.
pub fn print_json_report<S: Serialize>(
    operation: &str,
    input: &str,
    output: &str,
    ratio: f64,
    space_savings: f64,
    stats: &S,
) -> Result<(), serde_json::Error> {
    let report = Report {
        operation,
        input,
        output,
        ratio,
        space_savings,
        stats,
    };
    eprintln!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
