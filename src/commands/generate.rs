//! Generate an HTML report from a go test JSON log

use crate::aggregate;
use crate::commands::Command;
use crate::error::Result;
use crate::event_stream;
use crate::report;
use crate::report::layout::{self, EmbeddedLayout, FileLayout, ReportStats};
use crate::ui::UI;
use std::fs;
use std::path::PathBuf;

/// The report-generation command: read events, aggregate, render, compose,
/// and write the finished document in one shot.
pub struct GenerateCommand {
    file: Option<PathBuf>,
    output: PathBuf,
    layout: Option<PathBuf>,
}

impl GenerateCommand {
    /// Creates a command reading from `file` (stdin when `None`), writing
    /// the report to `output`, with an optional custom layout template.
    pub fn new(file: Option<PathBuf>, output: PathBuf, layout: Option<PathBuf>) -> Self {
        GenerateCommand {
            file,
            output,
            layout,
        }
    }
}

impl Command for GenerateCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let events = match &self.file {
            Some(path) => event_stream::read_events_from_file(path)?,
            None => event_stream::read_events_from_stdin()?,
        };

        let model = aggregate::aggregate(&events)?;
        let fragment = report::render(&model);
        let stats = ReportStats::from(&model);

        let document = match &self.layout {
            Some(path) => layout::compose(&FileLayout::new(path), &fragment, &stats)?,
            None => layout::compose(&EmbeddedLayout, &fragment, &stats)?,
        };

        // The whole document is produced in memory and written once
        fs::write(&self.output, document)?;

        ui.output(&format!("Report written to {}", self.output.display()))?;
        Ok(0)
    }

    fn name(&self) -> &str {
        "generate"
    }

    fn help(&self) -> &str {
        "Generate an HTML report from a go test JSON log"
    }
}
