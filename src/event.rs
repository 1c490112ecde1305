//! Test event model
//!
//! Each line of a `go test -json` log decodes to one [`Event`]. The runner
//! emits capitalized keys and omits fields that do not apply to the action,
//! so everything except the timestamp falls back to its zero value.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// Action recorded by a single test event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// The test or package finished successfully.
    Pass,
    /// The test or package failed.
    Fail,
    /// The test or package was skipped.
    Skip,
    /// A line of output was captured.
    Output,
    /// Any other lifecycle action (run, start, pause, cont, bench).
    #[serde(other)]
    Other,
}

impl Action {
    /// Returns true if this action ends the observed lifecycle of a
    /// package or test (pass, fail, or skip).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Action::Pass | Action::Fail | Action::Skip)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Pass => write!(f, "pass"),
            Action::Fail => write!(f, "fail"),
            Action::Skip => write!(f, "skip"),
            Action::Output => write!(f, "output"),
            Action::Other => write!(f, "other"),
        }
    }
}

/// One decoded line of the test execution log.
///
/// Events are created by the decoder and consumed read-only by the
/// aggregator.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    /// When the event was emitted.
    #[serde(rename = "Time")]
    pub time: DateTime<Utc>,

    /// What happened.
    #[serde(rename = "Action")]
    pub action: Action,

    /// Import path of the package the event belongs to.
    #[serde(rename = "Package", default)]
    pub package: String,

    /// Test identifier, empty for package-level events. Subtests use a
    /// `/`-separated path under their parent test's name.
    #[serde(rename = "Test", default)]
    pub test: String,

    /// Free-form output text carried by `output` actions.
    #[serde(rename = "Output", default)]
    pub output: String,

    /// Elapsed seconds reported with terminal actions.
    #[serde(rename = "Elapsed", default)]
    pub elapsed: f64,
}

impl Event {
    /// Returns true for package-level events (no test identifier).
    pub fn is_package_event(&self) -> bool {
        self.test.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_event() {
        let line = r#"{"Time":"2022-03-01T10:15:00.5Z","Action":"pass","Package":"pkg/a","Test":"TestX","Elapsed":0.25}"#;
        let event: Event = serde_json::from_str(line).unwrap();
        assert_eq!(event.action, Action::Pass);
        assert_eq!(event.package, "pkg/a");
        assert_eq!(event.test, "TestX");
        assert_eq!(event.elapsed, 0.25);
        assert_eq!(event.output, "");
    }

    #[test]
    fn test_decode_package_output_event() {
        let line = r#"{"Time":"2022-03-01T10:15:00Z","Action":"output","Package":"pkg/a","Output":"coverage: 87.5% of statements\n"}"#;
        let event: Event = serde_json::from_str(line).unwrap();
        assert_eq!(event.action, Action::Output);
        assert!(event.is_package_event());
        assert!(event.output.contains("coverage"));
        assert_eq!(event.elapsed, 0.0);
    }

    #[test]
    fn test_decode_unknown_action() {
        // Lifecycle actions the aggregator does not care about decode to Other
        for action in ["run", "start", "pause", "cont", "bench"] {
            let line = format!(
                r#"{{"Time":"2022-03-01T10:15:00Z","Action":"{}","Package":"pkg/a"}}"#,
                action
            );
            let event: Event = serde_json::from_str(&line).unwrap();
            assert_eq!(event.action, Action::Other);
        }
    }

    #[test]
    fn test_decode_missing_time_is_error() {
        let line = r#"{"Action":"pass","Package":"pkg/a"}"#;
        assert!(serde_json::from_str::<Event>(line).is_err());
    }

    #[test]
    fn test_action_is_terminal() {
        assert!(Action::Pass.is_terminal());
        assert!(Action::Fail.is_terminal());
        assert!(Action::Skip.is_terminal());
        assert!(!Action::Output.is_terminal());
        assert!(!Action::Other.is_terminal());
    }

    #[test]
    fn test_action_display() {
        assert_eq!(Action::Pass.to_string(), "pass");
        assert_eq!(Action::Fail.to_string(), "fail");
        assert_eq!(Action::Skip.to_string(), "skip");
        assert_eq!(Action::Output.to_string(), "output");
        assert_eq!(Action::Other.to_string(), "other");
    }
}
