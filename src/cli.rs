//! Command-line argument parsing
//!
//! Supports:
//! - Showing a file as a table (default) or its info report
//! - Reading without a header row
//! - Copying the parsed document to another file
//! - Storing the effective reader settings as config defaults

use clap::Parser;
use std::path::PathBuf;

use crate::config::CsviewConfig;
use crate::csv::ReadOptions;

/// Largest accepted `--max-line-length` (16 MiB)
pub const MAX_LINE_LENGTH_LIMIT: usize = 16 * 1024 * 1024;

/// Largest accepted `--buffer-size` (16 MiB)
pub const MAX_BUFFER_SIZE_LIMIT: usize = 16 * 1024 * 1024;

/// View simple CSV files in the terminal
#[derive(Parser, Debug)]
#[command(name = "csview", version, about = "View simple CSV files in the terminal")]
pub struct CliArgs {
    /// CSV file to read
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Treat the first line as data instead of a header
    #[arg(long)]
    pub no_header: bool,

    /// Print row/column counts instead of the table
    #[arg(short = 'i', long)]
    pub info: bool,

    /// Print the info report as JSON (implies --info)
    #[arg(long)]
    pub json: bool,

    /// Write the parsed document to this file
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Split lines longer than N bytes into several rows
    #[arg(long, value_name = "N")]
    pub max_line_length: Option<usize>,

    /// Read the file N bytes at a time
    #[arg(long, value_name = "N")]
    pub buffer_size: Option<usize>,

    /// Store the header, buffer and line length settings as the new defaults
    #[arg(long)]
    pub save_config: bool,
}

/// What to print after reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Info,
    InfoJson,
}

/// Configuration derived from CLI arguments and the config file
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub mode: OutputMode,
    pub read_options: ReadOptions,
    pub save_config: bool,
}

impl CliArgs {
    /// Merge the arguments over the config file defaults
    pub fn into_config(self, config: &CsviewConfig) -> Result<RunConfig, String> {
        let mut read_options = config.read_options();
        if self.no_header {
            read_options.has_header = false;
        }
        read_options.max_line_len = match self.max_line_length {
            Some(n) => check_size("--max-line-length", n, MAX_LINE_LENGTH_LIMIT)?,
            None => check_size(
                "max_line_length in config",
                read_options.max_line_len,
                MAX_LINE_LENGTH_LIMIT,
            )?,
        };
        read_options.buffer_size = match self.buffer_size {
            Some(n) => check_size("--buffer-size", n, MAX_BUFFER_SIZE_LIMIT)?,
            None => check_size(
                "buffer_size in config",
                read_options.buffer_size,
                MAX_BUFFER_SIZE_LIMIT,
            )?,
        };

        let mode = if self.json {
            OutputMode::InfoJson
        } else if self.info {
            OutputMode::Info
        } else {
            OutputMode::Table
        };

        Ok(RunConfig {
            input: self.path,
            output: self.output,
            mode,
            read_options,
            save_config: self.save_config,
        })
    }
}

fn check_size(name: &str, value: usize, limit: usize) -> Result<usize, String> {
    if value == 0 {
        Err(format!("{} must be at least 1", name))
    } else if value > limit {
        Err(format!("{} must be at most {} (got {})", name, limit, value))
    } else {
        Ok(value)
    }
}
