use colored::Colorize;
use serde::Serialize;
use sigcheck_solver::FailureKind;

use crate::cli::config::Expectation;

/// Outcome of checking one substitute signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub declared: String,
    pub substitute: String,
    pub compatible: bool,
    pub failure: Option<FailureKind>,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expect: Option<Expectation>,
}

impl CheckReport {
    /// Whether the report matches its expectation. Reports without one are
    /// expected to pass.
    pub fn is_expected(&self) -> bool {
        self.expect
            .unwrap_or_default()
            .is_met_by(self.compatible)
    }
}

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, reports: &[CheckReport]) -> String {
        let mut out = String::new();
        for report in reports {
            out.push_str(&self.format_report(report));
            out.push('\n');
        }
        out
    }

    pub fn format_report(&self, report: &CheckReport) -> String {
        let mut output = self.format_status(report);
        output.push(' ');
        if let Some(name) = &report.name {
            output.push_str(name);
            output.push_str(": ");
        }
        output.push_str(&report.substitute);
        output.push_str(" for ");
        output.push_str(&report.declared);

        if let Some(expect) = report.expect.filter(|_| !report.is_expected()) {
            let note = match expect {
                Expectation::Pass => " (expected to pass)",
                Expectation::Fail => " (expected to fail)",
            };
            if self.color {
                output.push_str(&note.yellow().bold().to_string());
            } else {
                output.push_str(note);
            }
        }

        if let Some(message) = &report.message {
            output.push_str("\n    ");
            output.push_str(message);
        }
        output
    }

    /// `N cases, M unexpected` after a batch.
    pub fn format_summary(&self, reports: &[CheckReport]) -> String {
        let unexpected = reports.iter().filter(|r| !r.is_expected()).count();
        let summary = format!("{} cases, {} unexpected", reports.len(), unexpected);
        if !self.color {
            return summary;
        }
        if unexpected == 0 {
            summary.green().to_string()
        } else {
            summary.red().bold().to_string()
        }
    }

    fn format_status(&self, report: &CheckReport) -> String {
        let label = if report.compatible { "ok" } else { "rejected" };
        if !self.color {
            return label.to_string();
        }
        if report.compatible {
            label.green().bold().to_string()
        } else {
            label.red().bold().to_string()
        }
    }
}

pub fn render_json(reports: &[CheckReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}
