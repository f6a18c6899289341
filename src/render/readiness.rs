//! Markdown rendering of a release-readiness report

use crate::engine::readiness::ReadinessReport;

/// Render the readiness report as a two-section bulleted document
pub fn render_readiness(report: &ReadinessReport) -> String {
    let mut out = String::new();
    out.push_str("## Preview APIs due to become stable\n");
    if report.preview.is_empty() {
        out.push_str("n/a\n");
    }
    for api in &report.preview {
        out.push_str(&format!("* {}: {}\n", api.package, api.name));
    }
    out.push_str("\n\n");
    out.push_str("## Deprecated APIs due to be removed\n");
    if report.deprecated.is_empty() {
        out.push_str("n/a\n");
    }
    for api in &report.deprecated {
        out.push_str(&format!("* {}/{}\n", api.package, api.name));
    }
    out.push_str("\n\n");
    out
}
