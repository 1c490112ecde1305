//! Aggregation engine
//!
//! Turns the flat, ordered event sequence into the hierarchical
//! [`ResultModel`]: package summaries, top-level tests grouped with their
//! subtests, global pass/fail counters, and run timing. Aggregation is a
//! pure function of the event sequence and performs no I/O.
//!
//! Two passes are made over the events, mirroring their two namespaces:
//! package-level events (empty test identifier) and test-level events.
//! Later events for the same entity overwrite individual fields while
//! preserving fields they do not carry, so duplicate or partial events
//! resolve last-write-wins in sequence order.

use crate::error::{Error, Result};
use crate::event::{Action, Event};
use crate::model::{
    PackageSummary, ResultModel, Status, TestOverview, TestSummary, COVERAGE_UNKNOWN,
};
use std::collections::BTreeMap;

/// Aggregate a complete event sequence into a result model.
///
/// The sequence must be non-empty (run timing needs at least one event) and
/// is expected to be in chronological order; an unordered sequence yields a
/// nonsensical duration rather than an error.
pub fn aggregate(events: &[Event]) -> Result<ResultModel> {
    let (first, last) = match (events.first(), events.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(Error::EmptyInput),
    };

    let packages = collect_packages(events);
    let (suites, cases, passed, failed) = collect_tests(events);
    let overviews = group_overviews(&suites, &cases);

    let total_seconds = last
        .time
        .signed_duration_since(first.time)
        .num_milliseconds() as f64
        / 1000.0;

    Ok(ResultModel {
        total_duration: format_duration(total_seconds),
        run_date: format_run_date(first),
        passed,
        failed,
        overviews,
        packages,
    })
}

/// Package pass: fold package-level events into per-package summaries.
///
/// Terminal actions set status and elapsed time, preserving any recorded
/// coverage. Output actions set only the coverage field; output without a
/// recognizable coverage marker resets it to the unknown sentinel, so the
/// last coverage-bearing line per package wins.
fn collect_packages(events: &[Event]) -> BTreeMap<String, PackageSummary> {
    let mut packages: BTreeMap<String, PackageSummary> = BTreeMap::new();

    for event in events.iter().filter(|e| e.is_package_event()) {
        match event.action {
            Action::Pass | Action::Fail | Action::Skip => {
                let summary = packages
                    .entry(event.package.clone())
                    .or_insert_with(|| PackageSummary::new(&event.package));
                summary.status = terminal_status(event.action);
                summary.elapsed = event.elapsed;
            }
            Action::Output => {
                let summary = packages
                    .entry(event.package.clone())
                    .or_insert_with(|| PackageSummary::new(&event.package));
                summary.coverage = extract_coverage(&event.output)
                    .unwrap_or_else(|| COVERAGE_UNKNOWN.to_string());
            }
            Action::Other => {}
        }
    }

    packages
}

/// Test pass: fold test-level events into suite and case summaries plus
/// the global counters.
///
/// A test identifier that splits into more than one `/`-separated segment
/// is a subtest; a single segment is a top-level test. Only terminal
/// actions record a summary. Every terminal pass/fail event counts once,
/// for subtests and top-level tests alike; skip records a summary but
/// contributes to neither counter.
#[allow(clippy::type_complexity)]
fn collect_tests(
    events: &[Event],
) -> (
    BTreeMap<String, TestSummary>,
    BTreeMap<String, TestSummary>,
    usize,
    usize,
) {
    let mut suites: BTreeMap<String, TestSummary> = BTreeMap::new();
    let mut cases: BTreeMap<String, TestSummary> = BTreeMap::new();
    let mut passed = 0;
    let mut failed = 0;

    for event in events.iter().filter(|e| !e.is_package_event()) {
        match event.action {
            Action::Pass => passed += 1,
            Action::Fail => failed += 1,
            _ => {}
        }

        if !event.action.is_terminal() {
            continue;
        }

        let summary = TestSummary {
            package: event.package.clone(),
            test: event.test.clone(),
            elapsed: event.elapsed,
            status: terminal_status(event.action),
        };

        if event.test.split('/').count() > 1 {
            cases.insert(event.test.clone(), summary);
        } else {
            suites.insert(event.test.clone(), summary);
        }
    }

    (suites, cases, passed, failed)
}

/// Group every subtest under the top-level tests whose identifier it
/// contains. Subtests whose parent never reached a terminal state are
/// dropped.
fn group_overviews(
    suites: &BTreeMap<String, TestSummary>,
    cases: &BTreeMap<String, TestSummary>,
) -> Vec<TestOverview> {
    suites
        .values()
        .map(|suite| TestOverview {
            suite: suite.clone(),
            cases: cases
                .values()
                .filter(|case| case.test.contains(&suite.test))
                .cloned()
                .collect(),
        })
        .collect()
}

fn terminal_status(action: Action) -> Status {
    match action {
        Action::Pass => Status::Pass,
        Action::Fail => Status::Fail,
        Action::Skip => Status::Skip,
        Action::Output | Action::Other => Status::Unknown,
    }
}

/// Extract a coverage figure from a line of freeform package output.
///
/// Returns the substring after the first `:` through the first `%`
/// inclusive, trimmed of surrounding whitespace, for lines that carry both
/// the `coverage` marker and a `%`. Anything else, including a `%` before
/// the `:`, is treated as no coverage rather than an error.
pub fn extract_coverage(output: &str) -> Option<String> {
    if !output.contains("coverage") || !output.contains('%') {
        return None;
    }
    let colon = output.find(':')?;
    let percent = output.find('%')?;
    if percent < colon {
        return None;
    }
    Some(output[colon + 1..=percent].trim().to_string())
}

/// Format a run duration in seconds for display.
///
/// Durations under a minute render as fractional seconds. Longer runs
/// render as whole minutes and seconds, both derived by truncation:
/// `minutes = trunc(total_seconds / 60)` and
/// `seconds = trunc((total_minutes - minutes) * 60)` with `total_minutes`
/// kept as a float.
pub fn format_duration(total_seconds: f64) -> String {
    if total_seconds < 60.0 {
        return format!("{:.6} s", total_seconds);
    }
    let total_minutes = total_seconds / 60.0;
    let minutes = total_minutes.trunc();
    let seconds = ((total_minutes - minutes) * 60.0).trunc();
    format!("{}m:{}s", minutes as i64, seconds as i64)
}

/// Format the run date from the first event, RFC850 style
/// (`Monday, 02-Jan-06 15:04:05 MST`).
fn format_run_date(first: &Event) -> String {
    first.time.format("%A, %d-%b-%y %H:%M:%S %Z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    const BASE: i64 = 1_646_128_500; // 2022-03-01 10:35:00 UTC

    fn event(offset_ms: i64, action: Action, package: &str, test: &str) -> Event {
        Event {
            time: DateTime::from_timestamp_millis(BASE * 1000 + offset_ms).unwrap(),
            action,
            package: package.to_string(),
            test: test.to_string(),
            output: String::new(),
            elapsed: 0.0,
        }
    }

    fn output_event(offset_ms: i64, package: &str, output: &str) -> Event {
        Event {
            output: output.to_string(),
            ..event(offset_ms, Action::Output, package, "")
        }
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(aggregate(&[]), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_package_terminal_event_sets_status_and_elapsed() {
        let mut pass = event(0, Action::Pass, "pkg/a", "");
        pass.elapsed = 1.5;
        let model = aggregate(&[pass]).unwrap();

        let summary = &model.packages["pkg/a"];
        assert_eq!(summary.status, Status::Pass);
        assert_eq!(summary.elapsed, 1.5);
        assert_eq!(summary.coverage, COVERAGE_UNKNOWN);
    }

    #[test]
    fn test_package_coverage_preserved_across_terminal_event() {
        let events = vec![
            output_event(0, "pkg/a", "coverage: 87.5% of statements\n"),
            event(100, Action::Pass, "pkg/a", ""),
        ];
        let model = aggregate(&events).unwrap();

        let summary = &model.packages["pkg/a"];
        assert_eq!(summary.status, Status::Pass);
        assert_eq!(summary.coverage, "87.5%");
    }

    #[test]
    fn test_package_status_never_set_by_output() {
        let events = vec![output_event(0, "pkg/a", "coverage: 50.0% of statements\n")];
        let model = aggregate(&events).unwrap();
        assert_eq!(model.packages["pkg/a"].status, Status::Unknown);
    }

    #[test]
    fn test_non_coverage_output_resets_to_sentinel() {
        // Last write wins: a later output line without a coverage marker
        // overwrites an earlier extracted figure.
        let events = vec![
            output_event(0, "pkg/a", "coverage: 87.5% of statements\n"),
            output_event(100, "pkg/a", "ok  \tpkg/a\t0.5s\n"),
        ];
        let model = aggregate(&events).unwrap();
        assert_eq!(model.packages["pkg/a"].coverage, COVERAGE_UNKNOWN);
    }

    #[test]
    fn test_run_and_start_events_do_not_create_packages() {
        let events = vec![
            event(0, Action::Other, "pkg/a", ""),
            event(100, Action::Pass, "pkg/b", ""),
        ];
        let model = aggregate(&events).unwrap();
        assert!(!model.packages.contains_key("pkg/a"));
        assert!(model.packages.contains_key("pkg/b"));
    }

    #[test]
    fn test_extract_coverage_literal_rule() {
        assert_eq!(
            extract_coverage("coverage: 87.5% of statements"),
            Some("87.5%".to_string())
        );
    }

    #[test]
    fn test_extract_coverage_malformed() {
        // No colon before the figure
        assert_eq!(extract_coverage("coverage 87.5% of statements"), None);
        // Percent before the colon
        assert_eq!(extract_coverage("87.5% coverage of statements:"), None);
        // No coverage marker at all
        assert_eq!(extract_coverage("ok  \tpkg/a\t0.5s"), None);
        // No percent sign
        assert_eq!(extract_coverage("coverage: unknown"), None);
        assert_eq!(extract_coverage(""), None);
    }

    #[test]
    fn test_counters_count_tests_and_subtests() {
        let events = vec![
            event(0, Action::Pass, "pkg/a", "TestX"),
            event(10, Action::Pass, "pkg/a", "TestX/sub1"),
            event(20, Action::Fail, "pkg/a", "TestY"),
            event(30, Action::Fail, "pkg/a", "TestY/sub1"),
            // Package-level terminal events never count
            event(40, Action::Fail, "pkg/a", ""),
        ];
        let model = aggregate(&events).unwrap();
        assert_eq!(model.passed, 2);
        assert_eq!(model.failed, 2);
    }

    #[test]
    fn test_duplicate_terminal_events_count_each_time() {
        let events = vec![
            event(0, Action::Pass, "pkg/a", "TestX"),
            event(10, Action::Pass, "pkg/a", "TestX"),
        ];
        let model = aggregate(&events).unwrap();
        assert_eq!(model.passed, 2);
        // But only one summary survives, last write wins
        assert_eq!(model.overviews.len(), 1);
    }

    #[test]
    fn test_skip_records_status_without_counting() {
        let events = vec![
            event(0, Action::Skip, "pkg/a", "TestX"),
            event(10, Action::Skip, "pkg/a", "TestX/sub1"),
        ];
        let model = aggregate(&events).unwrap();
        assert_eq!(model.passed, 0);
        assert_eq!(model.failed, 0);
        assert_eq!(model.overviews.len(), 1);
        assert_eq!(model.overviews[0].suite.status, Status::Skip);
        assert_eq!(model.overviews[0].cases.len(), 1);
        assert_eq!(model.overviews[0].cases[0].status, Status::Skip);
    }

    #[test]
    fn test_output_events_never_touch_test_summaries() {
        let events = vec![
            event(0, Action::Pass, "pkg/a", "TestX"),
            Event {
                output: "some log line\n".to_string(),
                ..event(10, Action::Output, "pkg/a", "TestX")
            },
        ];
        let model = aggregate(&events).unwrap();
        assert_eq!(model.passed, 1);
        assert_eq!(model.overviews.len(), 1);
        assert_eq!(model.overviews[0].suite.status, Status::Pass);
    }

    #[test]
    fn test_subtest_grouping() {
        let events = vec![
            event(0, Action::Pass, "pkg/a", "TestFoo"),
            event(10, Action::Pass, "pkg/a", "TestFoo/case1"),
            event(20, Action::Pass, "pkg/a", "TestFoo/case2"),
        ];
        let model = aggregate(&events).unwrap();
        assert_eq!(model.overviews.len(), 1);
        let overview = &model.overviews[0];
        assert_eq!(overview.suite.test, "TestFoo");
        let case_names: Vec<&str> = overview.cases.iter().map(|c| c.test.as_str()).collect();
        assert_eq!(case_names, vec!["TestFoo/case1", "TestFoo/case2"]);
    }

    #[test]
    fn test_orphan_subtest_is_dropped() {
        let events = vec![
            event(0, Action::Pass, "pkg/a", "TestFoo"),
            event(10, Action::Pass, "pkg/a", "TestBar/case1"),
        ];
        let model = aggregate(&events).unwrap();
        assert_eq!(model.overviews.len(), 1);
        assert!(model.overviews[0].cases.is_empty());
    }

    #[test]
    fn test_overviews_sorted_by_identifier() {
        let events = vec![
            event(0, Action::Pass, "pkg/a", "TestZebra"),
            event(10, Action::Pass, "pkg/a", "TestAlpha"),
        ];
        let model = aggregate(&events).unwrap();
        let names: Vec<&str> = model.overviews.iter().map(|o| o.suite.test.as_str()).collect();
        assert_eq!(names, vec!["TestAlpha", "TestZebra"]);
    }

    #[test]
    fn test_duration_formatting_under_a_minute() {
        assert_eq!(format_duration(45.25), "45.250000 s");
        assert_eq!(format_duration(0.0), "0.000000 s");
    }

    #[test]
    fn test_duration_formatting_minutes_and_seconds() {
        assert_eq!(format_duration(125.0), "2m:5s");
        assert_eq!(format_duration(60.0), "1m:0s");
        assert_eq!(format_duration(119.9), "1m:59s");
    }

    #[test]
    fn test_total_duration_from_timestamp_delta() {
        let events = vec![
            event(0, Action::Pass, "pkg/a", "TestX"),
            event(45_250, Action::Pass, "pkg/a", ""),
        ];
        let model = aggregate(&events).unwrap();
        assert_eq!(model.total_duration, "45.250000 s");
    }

    #[test]
    fn test_run_date_rfc850() {
        // 2001-09-09 01:46:40 UTC, a Sunday
        let first = Event {
            time: DateTime::from_timestamp(1_000_000_000, 0).unwrap(),
            ..event(0, Action::Pass, "pkg/a", "TestX")
        };
        let model = aggregate(&[first]).unwrap();
        assert_eq!(model.run_date, "Sunday, 09-Sep-01 01:46:40 UTC");
    }

    #[test]
    fn test_idempotence() {
        let events = vec![
            output_event(0, "pkg/a", "coverage: 42.0% of statements\n"),
            event(10, Action::Pass, "pkg/a", ""),
            event(20, Action::Pass, "pkg/a", "TestX"),
            event(30, Action::Fail, "pkg/a", "TestX/sub1"),
        ];
        let once = aggregate(&events).unwrap();
        let twice = aggregate(&events).unwrap();

        assert_eq!(once.passed, twice.passed);
        assert_eq!(once.failed, twice.failed);
        assert_eq!(once.total_duration, twice.total_duration);
        assert_eq!(once.packages.len(), twice.packages.len());
        assert_eq!(once.overviews.len(), twice.overviews.len());
        assert_eq!(
            once.packages["pkg/a"].coverage,
            twice.packages["pkg/a"].coverage
        );
    }

    #[test]
    fn test_end_to_end_scenario() {
        // Package start, output with coverage, and pass for pkg/a, plus a
        // passing top-level test and a passing subtest.
        let events = vec![
            event(0, Action::Other, "pkg/a", ""),
            output_event(100, "pkg/a", "coverage: 87.5% of statements\n"),
            event(200, Action::Pass, "pkg/a", ""),
            event(300, Action::Pass, "pkg/a", "TestX"),
            event(400, Action::Pass, "pkg/a", "TestX/sub1"),
        ];
        let model = aggregate(&events).unwrap();

        assert_eq!(model.packages.len(), 1);
        let package = &model.packages["pkg/a"];
        assert_eq!(package.status, Status::Pass);
        assert_eq!(package.coverage, "87.5%");

        assert_eq!(model.overviews.len(), 1);
        let overview = &model.overviews[0];
        assert_eq!(overview.suite.test, "TestX");
        assert_eq!(overview.suite.status, Status::Pass);
        assert_eq!(overview.cases.len(), 1);
        assert_eq!(overview.cases[0].test, "TestX/sub1");
        assert_eq!(overview.cases[0].status, Status::Pass);

        assert_eq!(model.passed, 2);
        assert_eq!(model.failed, 0);
    }
}
