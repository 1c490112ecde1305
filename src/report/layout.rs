//! Report composition
//!
//! Merges the rendered fragment and the run's summary statistics into a
//! page-level layout. The layout comes from a [`LayoutProvider`]: either
//! the embedded default page or a user-supplied template file. Layouts are
//! plain HTML carrying one placeholder per substituted value.

use crate::error::{Error, Result};
use crate::model::ResultModel;
use std::fs;
use std::path::PathBuf;

/// Placeholder for the rendered package cards.
pub const CONTENT: &str = "{{content}}";
/// Placeholder for the passed-test count.
pub const PASSED: &str = "{{passed}}";
/// Placeholder for the failed-test count.
pub const FAILED: &str = "{{failed}}";
/// Placeholder for the formatted total duration.
pub const DURATION: &str = "{{duration}}";
/// Placeholder for the formatted run date.
pub const DATE: &str = "{{date}}";

/// Source of the page layout template.
pub trait LayoutProvider {
    /// Obtain the layout text.
    fn layout(&self) -> Result<String>;
}

/// The layout compiled into the binary.
pub struct EmbeddedLayout;

impl LayoutProvider for EmbeddedLayout {
    fn layout(&self) -> Result<String> {
        Ok(include_str!("../../assets/report.html").to_string())
    }
}

/// A layout template read from disk.
pub struct FileLayout {
    path: PathBuf,
}

impl FileLayout {
    /// Creates a provider reading the layout from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileLayout { path: path.into() }
    }
}

impl LayoutProvider for FileLayout {
    fn layout(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| Error::LayoutUnavailable {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}

/// Summary statistics shown in the page header.
#[derive(Debug, Clone)]
pub struct ReportStats {
    /// Terminal pass events counted across tests and subtests.
    pub passed: usize,
    /// Terminal fail events counted across tests and subtests.
    pub failed: usize,
    /// Formatted wall-clock duration of the run.
    pub total_duration: String,
    /// Formatted date of the run.
    pub run_date: String,
}

impl From<&ResultModel> for ReportStats {
    fn from(model: &ResultModel) -> Self {
        ReportStats {
            passed: model.passed,
            failed: model.failed,
            total_duration: model.total_duration.clone(),
            run_date: model.run_date.clone(),
        }
    }
}

/// Merge the fragment and statistics into the layout, producing the final
/// document.
///
/// Fails with [`Error::LayoutUnavailable`] when the provider cannot supply
/// a layout and with [`Error::Template`] when the layout lacks one of the
/// required placeholders.
pub fn compose(
    provider: &dyn LayoutProvider,
    fragment: &str,
    stats: &ReportStats,
) -> Result<String> {
    let layout = provider.layout()?;
    let document = substitute(layout, CONTENT, fragment)?;
    let document = substitute(document, PASSED, &stats.passed.to_string())?;
    let document = substitute(document, FAILED, &stats.failed.to_string())?;
    let document = substitute(document, DURATION, &stats.total_duration)?;
    substitute(document, DATE, &stats.run_date)
}

fn substitute(layout: String, placeholder: &str, value: &str) -> Result<String> {
    if !layout.contains(placeholder) {
        return Err(Error::Template(format!(
            "layout is missing the {} placeholder",
            placeholder
        )));
    }
    Ok(layout.replace(placeholder, value))
}
