//! JSON line I/O for the CLI
//!
//! - Input: one JSON object per line, blank lines ignored
//! - Output: one JSON object per line, flushed after every line
//! - UTF-8 only

use std::io::{BufRead, Write};

use super::errors::CliResult;

/// Iterate the non-blank request lines of `input`
pub fn read_requests<R: BufRead>(input: R) -> impl Iterator<Item = CliResult<String>> {
    input
        .lines()
        .map(|line| line.map_err(Into::into))
        .filter(|line| !matches!(line, Ok(text) if text.trim().is_empty()))
}

/// Write one JSON string as a line
pub fn write_json<W: Write>(output: &mut W, json_str: &str) -> CliResult<()> {
    writeln!(output, "{}", json_str)?;
    output.flush()?;

    Ok(())
}
