//! Event stream ingestion
//!
//! Reads line-delimited `go test -json` logs from a file or standard input
//! and decodes every line into an [`Event`]. Each line is a self-contained
//! JSON record; a decode failure on any line is fatal for the whole run,
//! there is no skip-bad-lines mode.

use crate::error::{Error, Result};
use crate::event::Event;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Decode a full event log from any buffered reader.
///
/// Returns the events in input order. The first malformed line aborts with
/// [`Error::Decode`] carrying its 1-based line number.
pub fn read_events<R: BufRead>(reader: R) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let event = serde_json::from_str(&line).map_err(|source| Error::Decode {
            line: index + 1,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}

/// Read an event log from a file on disk.
pub fn read_events_from_file(path: &Path) -> Result<Vec<Event>> {
    let file = File::open(path)?;
    read_events(BufReader::new(file))
}

/// Read an event log from standard input.
pub fn read_events_from_stdin() -> Result<Vec<Event>> {
    let stdin = io::stdin();
    read_events(stdin.lock())
}
