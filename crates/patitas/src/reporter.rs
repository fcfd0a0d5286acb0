//! Suite reporting: collect scenario outcomes, render HTML/JSON/JUnit.
//!
//! A [`SuiteReport`] accumulates one [`ScenarioResult`] per executed (or
//! skipped) scenario and renders to the three formats CI pipelines
//! consume: a human-readable HTML page, a JSON dump of the raw results,
//! and JUnit XML.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

/// Outcome of a scenario or step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioStatus {
    /// Every step passed
    Passed,
    /// A step failed; remaining steps were skipped
    Failed,
    /// Filtered out or skipped after an earlier failure
    Skipped,
}

impl ScenarioStatus {
    /// Check if the status is passing
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Check if the status is failing
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// Outcome of a single step within a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// The step text as written in the feature file
    pub text: String,
    /// Step outcome
    pub status: ScenarioStatus,
    /// Wall-clock duration
    pub duration: Duration,
    /// Error message when the step failed
    pub error: Option<String>,
}

impl StepResult {
    /// A passing step
    #[must_use]
    pub fn passed(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            status: ScenarioStatus::Passed,
            duration,
            error: None,
        }
    }

    /// A failing step
    #[must_use]
    pub fn failed(text: impl Into<String>, duration: Duration, error: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: ScenarioStatus::Failed,
            duration,
            error: Some(error.into()),
        }
    }

    /// A skipped step (an earlier step in the scenario failed)
    #[must_use]
    pub fn skipped(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: ScenarioStatus::Skipped,
            duration: Duration::ZERO,
            error: None,
        }
    }
}

/// Outcome of a whole scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Feature the scenario belongs to
    pub feature: String,
    /// Scenario name
    pub scenario: String,
    /// Scenario outcome
    pub status: ScenarioStatus,
    /// Per-step outcomes, in execution order
    pub steps: Vec<StepResult>,
    /// When the scenario finished
    pub finished_at: DateTime<Utc>,
}

impl ScenarioResult {
    /// Build a scenario result from its step outcomes. The scenario
    /// fails if any step failed, and is skipped if it ran no steps at
    /// all and none failed.
    #[must_use]
    pub fn from_steps(
        feature: impl Into<String>,
        scenario: impl Into<String>,
        steps: Vec<StepResult>,
    ) -> Self {
        let status = if steps.iter().any(|s| s.status.is_failed()) {
            ScenarioStatus::Failed
        } else if steps.iter().all(|s| s.status == ScenarioStatus::Skipped) && !steps.is_empty() {
            ScenarioStatus::Skipped
        } else {
            ScenarioStatus::Passed
        };
        Self {
            feature: feature.into(),
            scenario: scenario.into(),
            status,
            steps,
            finished_at: Utc::now(),
        }
    }

    /// A scenario excluded by the tag filter
    #[must_use]
    pub fn skipped(feature: impl Into<String>, scenario: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            scenario: scenario.into(),
            status: ScenarioStatus::Skipped,
            steps: Vec::new(),
            finished_at: Utc::now(),
        }
    }

    /// Total duration across steps
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Error message of the first failing step, if any
    #[must_use]
    pub fn first_error(&self) -> Option<&str> {
        self.steps
            .iter()
            .find_map(|s| s.error.as_deref())
    }
}

/// Collected results of one suite run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Unique id of this run
    pub run_id: Uuid,
    /// Suite name
    pub suite: String,
    /// Target platform label (`web`, `android`, `ios`)
    pub platform: String,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Scenario outcomes, in execution order
    pub results: Vec<ScenarioResult>,
}

impl SuiteReport {
    /// Start an empty report for a suite run
    #[must_use]
    pub fn new(suite: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            suite: suite.into(),
            platform: platform.into(),
            started_at: Utc::now(),
            results: Vec::new(),
        }
    }

    /// Record a scenario outcome
    pub fn record(&mut self, result: ScenarioResult) {
        self.results.push(result);
    }

    /// Number of passed scenarios
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status.is_passed())
            .count()
    }

    /// Number of failed scenarios
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status.is_failed())
            .count()
    }

    /// Number of skipped scenarios
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == ScenarioStatus::Skipped)
            .count()
    }

    /// Total number of scenarios in the report
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.results.len()
    }

    /// Number of scenarios that actually ran
    #[must_use]
    pub fn executed_count(&self) -> usize {
        self.passed_count() + self.failed_count()
    }

    /// Pass rate over executed scenarios (0.0 to 1.0); 1.0 when nothing ran
    #[must_use]
    pub fn pass_rate(&self) -> f64 {
        let executed = self.executed_count();
        if executed == 0 {
            return 1.0;
        }
        self.passed_count() as f64 / executed as f64
    }

    /// Whether no executed scenario failed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed_count() == 0
    }

    /// Total duration across scenarios
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.results.iter().map(ScenarioResult::duration).sum()
    }

    /// One-line summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} [{}]: {}/{} passed, {} skipped ({:.1}%)",
            self.suite,
            self.platform,
            self.passed_count(),
            self.executed_count(),
            self.skipped_count(),
            self.pass_rate() * 100.0
        )
    }

    /// Render the HTML report
    #[must_use]
    pub fn render_html(&self) -> String {
        let mut html = String::new();

        html.push_str(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Patitas Suite Report</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 20px; }
        .summary { background: #f5f5f5; padding: 20px; border-radius: 8px; margin-bottom: 20px; }
        .progress-bar { background: #ddd; height: 20px; border-radius: 10px; overflow: hidden; }
        .passed { background: #4caf50; height: 100%; }
        .scenario { padding: 10px; margin: 5px 0; border-radius: 4px; }
        .scenario.pass { background: #e8f5e9; border-left: 4px solid #4caf50; }
        .scenario.fail { background: #ffebee; border-left: 4px solid #f44336; }
        .scenario.skip { background: #fff3e0; border-left: 4px solid #ff9800; }
        .step { margin-left: 20px; font-size: 0.9em; }
        .error { color: #d32f2f; font-family: monospace; white-space: pre-wrap; }
    </style>
</head>
<body>
"#,
        );

        html.push_str(&format!(
            r#"<div class="summary">
    <h1>{} &mdash; {}</h1>
    <h2>Results: {}/{} passed, {} skipped ({:.1}%)</h2>
    <div class="progress-bar">
        <div class="passed" style="width: {:.1}%"></div>
    </div>
    <p>Run {} started {} &middot; duration {:.2}s</p>
</div>
"#,
            escape_html(&self.suite),
            self.platform,
            self.passed_count(),
            self.executed_count(),
            self.skipped_count(),
            self.pass_rate() * 100.0,
            self.pass_rate() * 100.0,
            self.run_id,
            self.started_at.to_rfc3339(),
            self.total_duration().as_secs_f64()
        ));

        html.push_str("<h2>Scenarios</h2>\n");
        for result in &self.results {
            let class = match result.status {
                ScenarioStatus::Passed => "pass",
                ScenarioStatus::Failed => "fail",
                ScenarioStatus::Skipped => "skip",
            };
            html.push_str(&format!(
                r#"<div class="scenario {}">
    <strong>{} / {}</strong> - {:?} ({:.2}ms)
"#,
                class,
                escape_html(&result.feature),
                escape_html(&result.scenario),
                result.status,
                result.duration().as_secs_f64() * 1000.0
            ));
            for step in &result.steps {
                html.push_str(&format!(
                    "    <div class=\"step\">{:?} {}</div>\n",
                    step.status,
                    escape_html(&step.text)
                ));
            }
            if let Some(error) = result.first_error() {
                html.push_str(&format!(
                    "    <div class=\"error\">{}</div>\n",
                    escape_html(error)
                ));
            }
            html.push_str("</div>\n");
        }

        html.push_str(
            r"
<footer>
    <p>Generated by Patitas</p>
</footer>
</body>
</html>
",
        );

        html
    }

    /// Render the JSON report
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_json(&self) -> crate::result::PatitasResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render the JUnit XML report
    #[must_use]
    pub fn render_junit(&self) -> String {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<testsuite name="{}" tests="{}" failures="{}" skipped="{}" time="{:.3}">"#,
            escape_xml(&self.suite),
            self.total_count(),
            self.failed_count(),
            self.skipped_count(),
            self.total_duration().as_secs_f64()
        ));
        xml.push('\n');

        for result in &self.results {
            xml.push_str(&format!(
                r#"  <testcase classname="{}" name="{}" time="{:.3}">"#,
                escape_xml(&result.feature),
                escape_xml(&result.scenario),
                result.duration().as_secs_f64()
            ));
            xml.push('\n');

            match result.status {
                ScenarioStatus::Failed => {
                    let message = result.first_error().unwrap_or("scenario failed");
                    xml.push_str(&format!(
                        r#"    <failure message="{}">{}</failure>"#,
                        escape_xml(message),
                        escape_xml(message)
                    ));
                    xml.push('\n');
                }
                ScenarioStatus::Skipped => {
                    xml.push_str("    <skipped/>\n");
                }
                ScenarioStatus::Passed => {}
            }

            xml.push_str("  </testcase>\n");
        }

        xml.push_str("</testsuite>\n");
        xml
    }

    /// Write rendered content to a path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or the write fails.
    pub fn write_to(path: &Path, content: &str) -> crate::result::PatitasResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Escape HTML text content
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
