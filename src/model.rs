//! Result model data structures
//!
//! The fully aggregated, immutable hierarchy of package, test, and subtest
//! summaries plus global counters and run timing. Built once by the
//! aggregator and handed read-only to the renderer.

use std::collections::BTreeMap;
use std::fmt;

/// Sentinel coverage value for packages without a recognizable coverage line.
pub const COVERAGE_UNKNOWN: &str = "-";

/// Outcome of a package or test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// Finished successfully.
    Pass,
    /// Finished with a failure.
    Fail,
    /// Was skipped.
    Skip,
    /// No terminal action was observed.
    #[default]
    Unknown,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pass => write!(f, "pass"),
            Status::Fail => write!(f, "fail"),
            Status::Skip => write!(f, "skip"),
            Status::Unknown => write!(f, "unknown"),
        }
    }
}

/// Aggregated outcome of one package.
#[derive(Debug, Clone)]
pub struct PackageSummary {
    /// Package import path.
    pub package: String,
    /// Elapsed seconds reported by the package's terminal event.
    pub elapsed: f64,
    /// Outcome from the package's terminal event, Unknown until one arrives.
    pub status: Status,
    /// Coverage figure extracted from output, or the `-` sentinel.
    pub coverage: String,
}

impl PackageSummary {
    /// Creates an empty summary for the named package.
    pub fn new(package: impl Into<String>) -> Self {
        PackageSummary {
            package: package.into(),
            elapsed: 0.0,
            status: Status::Unknown,
            coverage: COVERAGE_UNKNOWN.to_string(),
        }
    }
}

/// Aggregated outcome of one top-level test or subtest.
#[derive(Debug, Clone)]
pub struct TestSummary {
    /// Package the test belongs to.
    pub package: String,
    /// Full test identifier, including any `/`-separated subtest path.
    pub test: String,
    /// Elapsed seconds reported by the terminal event.
    pub elapsed: f64,
    /// Outcome from the terminal event.
    pub status: Status,
}

/// One top-level test grouped with its subtests.
#[derive(Debug, Clone)]
pub struct TestOverview {
    /// The top-level test.
    pub suite: TestSummary,
    /// Subtests grouped under the top-level test, sorted by identifier.
    pub cases: Vec<TestSummary>,
}

/// The complete aggregation result for one event log.
#[derive(Debug, Clone)]
pub struct ResultModel {
    /// Formatted wall-clock duration of the whole run.
    pub total_duration: String,
    /// RFC850-style date of the first event.
    pub run_date: String,
    /// Terminal pass events observed for tests and subtests.
    pub passed: usize,
    /// Terminal fail events observed for tests and subtests.
    pub failed: usize,
    /// Top-level tests with their subtests, sorted by test identifier.
    pub overviews: Vec<TestOverview>,
    /// Package summaries keyed by package import path.
    pub packages: BTreeMap<String, PackageSummary>,
}

impl ResultModel {
    /// Iterate the overviews whose top-level test belongs to the named package.
    pub fn overviews_for<'a>(
        &'a self,
        package: &'a str,
    ) -> impl Iterator<Item = &'a TestOverview> + 'a {
        self.overviews
            .iter()
            .filter(move |o| o.suite.package == package)
    }
}
