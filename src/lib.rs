//! testreport - HTML reports from go test JSON logs
//!
//! testreport ingests the line-delimited event stream produced by
//! `go test -json` and renders a static, browsable HTML report of package,
//! test, and subtest outcomes, timings, and coverage figures.
//!
//! # Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`event`]: The decoded test event model
//! - [`event_stream`]: Reading and decoding event logs from files or stdin
//! - [`model`]: The aggregated result model (packages, tests, subtests)
//! - [`aggregate`]: The aggregation engine turning events into the result model
//! - [`report`]: Rendering the result model into collapsible card markup and
//!   composing it into the final page
//! - [`commands`]: The user-facing report generation command
//! - [`ui`]: User interface abstraction for output
//! - [`error`]: Error types and Result alias
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use testreport::aggregate::aggregate;
//! use testreport::event_stream::read_events_from_file;
//! use testreport::report::layout::{compose, EmbeddedLayout, ReportStats};
//! use testreport::report::render;
//!
//! # fn main() -> testreport::error::Result<()> {
//! let events = read_events_from_file(Path::new("test.log"))?;
//! let model = aggregate(&events)?;
//!
//! let fragment = render(&model);
//! let stats = ReportStats::from(&model);
//! let document = compose(&EmbeddedLayout, &fragment, &stats)?;
//!
//! std::fs::write("report.html", document)?;
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod commands;
pub mod error;
pub mod event;
pub mod event_stream;
pub mod model;
pub mod report;
pub mod ui;

pub use error::{Error, Result};
