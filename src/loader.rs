//! Process record loader.
//!
//! Reads process records from delimited text. The loader performs no
//! semantic checks; run [`validate_processes`](crate::validation::validate_processes)
//! on its output.
//!
//! # Format
//!
//! ```text
//! id, arrival, burst, memory[, priority]
//! 1, 0, 5, 120
//! 2  1  3  0  4
//! ```
//!
//! - Fields are separated by commas and/or whitespace.
//! - A first line with no numeric field at all is a header and is skipped.
//!   Any other line is a record, so a typo in the first row is reported
//!   like any other malformed record.
//! - Blank lines and lines starting with `#` are ignored.
//!
//! Five-field records put memory before priority. Files written for the
//! `id arrival burst priority memory` layout must swap the last two columns
//! first; both orders parse, so the loader cannot tell them apart.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::models::{Process, ProcessId};

/// Errors raised while reading process records.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected 4 or 5 fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: invalid {field} '{value}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
}

const FIELD_NAMES: [&str; 5] = ["process id", "arrival time", "burst time", "memory", "priority"];

/// Parses process records from text.
///
/// # Example
///
/// ```
/// use u_procsim::loader::parse_processes;
///
/// let text = "id,arrival,burst,memory\n1,0,5,0\n2,1,3,120\n";
/// let processes = parse_processes(text).unwrap();
/// assert_eq!(processes.len(), 2);
/// assert_eq!(processes[1].memory_required, 120);
/// ```
pub fn parse_processes(text: &str) -> Result<Vec<Process>, LoadError> {
    let mut processes = Vec::new();
    let mut seen_record_line = false;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();

        if !seen_record_line {
            seen_record_line = true;
            if is_header(&fields) {
                debug!(line = line_no, "skipping header");
                continue;
            }
        }

        processes.push(parse_record(line_no, &fields)?);
    }

    Ok(processes)
}

/// Reads and parses a process record file.
pub fn load_processes(path: impl AsRef<Path>) -> Result<Vec<Process>, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let processes = parse_processes(&text)?;
    debug!(path = %path.display(), count = processes.len(), "loaded processes");
    Ok(processes)
}

fn is_header(fields: &[&str]) -> bool {
    fields.iter().all(|f| f.parse::<i64>().is_err())
}

fn parse_record(line: usize, fields: &[&str]) -> Result<Process, LoadError> {
    if !(4..=5).contains(&fields.len()) {
        return Err(LoadError::FieldCount {
            line,
            found: fields.len(),
        });
    }

    let number = |i: usize| -> Result<i64, LoadError> {
        fields[i].parse::<i64>().map_err(|_| LoadError::InvalidNumber {
            line,
            field: FIELD_NAMES[i],
            value: fields[i].to_string(),
        })
    };

    let id = fields[0]
        .parse::<ProcessId>()
        .map_err(|_| LoadError::InvalidNumber {
            line,
            field: FIELD_NAMES[0],
            value: fields[0].to_string(),
        })?;

    let mut process = Process::new(id, number(1)?, number(2)?).with_memory(number(3)?);
    if fields.len() == 5 {
        let priority = fields[4]
            .parse::<i32>()
            .map_err(|_| LoadError::InvalidNumber {
                line,
                field: FIELD_NAMES[4],
                value: fields[4].to_string(),
            })?;
        process = process.with_priority(priority);
    }
    Ok(process)
}
