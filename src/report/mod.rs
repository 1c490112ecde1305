//! Report rendering
//!
//! Turns the aggregated result model into the nested card markup of the
//! report: collapsible package cards containing test cards containing
//! subtest cards. Rendering is a pure function of the result model, knows
//! nothing about the event stream, and performs no I/O.
//!
//! Packages and tests are emitted in sorted identifier order, so the same
//! model always serializes to the same fragment.

use crate::model::{PackageSummary, ResultModel, Status, TestOverview, TestSummary};
use crate::report::html::Element;

pub mod html;
pub mod layout;

/// Render the result model into a document fragment.
pub fn render(model: &ResultModel) -> String {
    let mut out = String::with_capacity(4096);
    for package in model.packages.values() {
        package_card(model, package).write(&mut out);
        out.push('\n');
    }
    out
}

/// Three-way status styling used by package cards and top-level test cards.
fn status_class(status: Status) -> &'static str {
    match status {
        Status::Pass => "successBackgroundColor",
        Status::Fail => "failBackgroundColor",
        Status::Skip | Status::Unknown => "skipBackgroundColor",
    }
}

/// Subtest cards only distinguish pass and fail; anything else renders
/// without a status class.
fn case_status_class(status: Status) -> Option<&'static str> {
    match status {
        Status::Pass => Some("successBackgroundColor"),
        Status::Fail => Some("failBackgroundColor"),
        Status::Skip | Status::Unknown => None,
    }
}

fn elapsed_text(elapsed: f64) -> String {
    format!("{:.6}s", elapsed)
}

/// Collapsible card for one package: header with identifier, coverage, and
/// elapsed time, body with one card per test overview of that package.
fn package_card(model: &ResultModel, package: &PackageSummary) -> Element {
    let heading = Element::new("div")
        .class(format!(
            "collapsibleHeading packageCardLayout {}",
            status_class(package.status)
        ))
        .child(Element::new("div").text(&package.package))
        .child(Element::new("div").text(&package.coverage))
        .child(Element::new("div").text(elapsed_text(package.elapsed)));

    let mut body = Element::new("div").class("collapsibleHeadingContent");
    for overview in model.overviews_for(&package.package) {
        body = body.child(test_card(overview));
    }

    Element::new("div")
        .attr("type", "button")
        .class("collapsible")
        .child(heading)
        .child(body)
}

/// Card for one test overview: a flat leaf card when the test has no
/// subtests, an expandable card with one leaf per subtest otherwise.
fn test_card(overview: &TestOverview) -> Element {
    if overview.cases.is_empty() {
        return Element::new("div")
            .class(format!(
                "testCardLayout {}",
                status_class(overview.suite.status)
            ))
            .child(Element::new("div").text(&overview.suite.test))
            .child(Element::new("div").text(elapsed_text(overview.suite.elapsed)));
    }

    let heading = Element::new("div")
        .class(format!(
            "collapsibleHeading testCardLayout {}",
            status_class(overview.suite.status)
        ))
        .child(Element::new("div").text(&overview.suite.test))
        .child(Element::new("div").text(elapsed_text(overview.suite.elapsed)));

    let mut body = Element::new("div").class("collapsibleHeadingContent");
    for case in &overview.cases {
        body = body.child(case_card(case));
    }

    Element::new("div")
        .attr("type", "button")
        .class("collapsible")
        .child(heading)
        .child(body)
}

fn case_card(case: &TestSummary) -> Element {
    let class = match case_status_class(case.status) {
        Some(status) => format!("testCardLayout {}", status),
        None => "testCardLayout".to_string(),
    };
    Element::new("div")
        .class(class)
        .child(Element::new("div").text(&case.test))
        .child(Element::new("div").text(elapsed_text(case.elapsed)))
}
