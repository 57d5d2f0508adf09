//! Process-List and Trace Loading.
//!
//! This module turns the two text inputs of a run into typed records. It provides:
//! 1. **Process list:** One `<label> <total_memory_bytes>` line per process; the process index
//!    is the position among non-blank lines and the label is kept only for reporting.
//! 2. **Trace:** One `<process_index> <byte_address>` line per access, read lazily so each
//!    event is fully simulated before the next line is parsed.
//!
//! Blank lines are skipped in both inputs, and fields after the second are ignored. Any other
//! malformed line is a [`SimError::Format`] carrying the input name and 1-based line number.
//!
//! Trace fields are read as signed integers: a negative process index or address is a
//! well-formed line that the simulator rejects as an invalid reference.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::common::error::{Result, SimError};

/// One process from the process list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProcessSpec {
    /// Leading token of the line (not used by the simulation).
    pub label: String,
    /// Size of the process's virtual address space, in bytes.
    pub total_memory: u64,
}

impl ProcessSpec {
    /// Creates a process record.
    pub fn new(label: impl Into<String>, total_memory: u64) -> Self {
        Self {
            label: label.into(),
            total_memory,
        }
    }
}

/// One memory access from the trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TraceEvent {
    /// Index of the accessing process in the process list.
    pub pid: i64,
    /// 1-based byte address within the process's address space.
    pub address: i64,
}

impl TraceEvent {
    /// Creates a trace event.
    pub const fn new(pid: i64, address: i64) -> Self {
        Self { pid, address }
    }
}

/// Returns the first two whitespace-separated fields of a non-blank line.
fn split_pair<'a>(line: &'a str, source_name: &str, line_no: usize) -> Result<(&'a str, &'a str)> {
    let mut fields = line.split_whitespace();
    match (fields.next(), fields.next()) {
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(SimError::format(
            source_name,
            line_no,
            format!("invalid line format '{line}', expected two fields"),
        )),
    }
}

/// Parses one numeric field, naming it in the error.
fn parse_field<T: FromStr>(value: &str, what: &str, source_name: &str, line_no: usize) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| SimError::format(source_name, line_no, format!("invalid {what} '{value}': {e}")))
}

/// Opens `path` for buffered reading.
fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Parses a process list.
///
/// # Arguments
///
/// * `reader` - Source of process-list text.
/// * `source_name` - Name used in error messages.
///
/// # Errors
///
/// Returns [`SimError::Format`] for malformed lines and [`SimError::Io`] for read failures.
pub fn parse_process_list<R: BufRead>(reader: R, source_name: &str) -> Result<Vec<ProcessSpec>> {
    let mut processes = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| SimError::Io {
            path: PathBuf::from(source_name),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let (label, memory) = split_pair(&line, source_name, line_no)?;
        let total_memory = parse_field(memory, "total memory", source_name, line_no)?;
        processes.push(ProcessSpec::new(label, total_memory));
    }
    Ok(processes)
}

/// Reads and parses the process list at `path`.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file cannot be opened or read, and [`SimError::Format`] for
/// malformed lines.
pub fn load_process_list(path: &Path) -> Result<Vec<ProcessSpec>> {
    parse_process_list(open(path)?, &path.display().to_string())
}

/// Lazy trace parser yielding one event per non-blank line.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: Lines<R>,
    source_name: String,
    line_no: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps `reader`, naming it `source_name` in errors.
    pub fn new(reader: R, source_name: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            source_name: source_name.into(),
            line_no: 0,
        }
    }

    /// Parses one trace line.
    fn parse_line(&self, line: &str) -> Result<TraceEvent> {
        let (pid, address) = split_pair(line, &self.source_name, self.line_no)?;
        Ok(TraceEvent {
            pid: parse_field(pid, "process index", &self.source_name, self.line_no)?,
            address: parse_field(address, "address", &self.source_name, self.line_no)?,
        })
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens the trace at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(open(path)?, path.display().to_string()))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_no += 1;
            let line = match line {
                Ok(line) => line,
                Err(source) => {
                    return Some(Err(SimError::Io {
                        path: PathBuf::from(&self.source_name),
                        source,
                    }));
                }
            };
            if !line.trim().is_empty() {
                return Some(self.parse_line(&line));
            }
        }
    }
}

/// Parses a whole trace into memory.
///
/// # Errors
///
/// Returns the first [`SimError::Format`] or [`SimError::Io`] encountered.
pub fn parse_trace<R: BufRead>(reader: R, source_name: &str) -> Result<Vec<TraceEvent>> {
    TraceReader::new(reader, source_name).collect()
}
