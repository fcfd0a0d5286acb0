//! Suite runner: platform presets, tag filtering, scenario execution.
//!
//! A [`SuiteConfig`] names the target platform, the tag filter, the
//! active glue packages and the report outputs. The [`SuiteRunner`]
//! selects scenarios whose effective tag set satisfies the filter, binds
//! each step through the [`StepRegistry`](crate::glue::StepRegistry) and
//! executes it against the driver session. A failing step fails the
//! scenario and skips its remaining steps; the run always continues with
//! the next scenario.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::feature::{Feature, Scenario};
use crate::glue::StepRegistry;
use crate::reporter::{ScenarioResult, StepResult, SuiteReport};
use crate::result::{PatitasError, PatitasResult};
use crate::tags::TagExpression;
use crate::wait::DEFAULT_WAIT_TIMEOUT_MS;
use crate::UiDriver;

/// Hook run once before a suite, typically building and deploying the
/// application under test.
pub type AppBuildFn = Box<dyn Fn() -> PatitasResult<()> + Send + Sync>;

/// Target platform of a suite run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Desktop/mobile web through a browser session
    Web,
    /// Native Android
    Android,
    /// Native iOS
    Ios,
}

impl Platform {
    /// Platform label used in tags, report paths and logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }

    /// The preset tag filter for this platform: scenarios tagged for the
    /// platform, excluding pending and legacy work.
    #[must_use]
    pub const fn preset_filter(&self) -> &'static str {
        match self {
            Self::Web => "@web and not @pending and not @pending-web and not @legacy",
            Self::Android => "@android and not @pending and not @pending-android and not @legacy",
            Self::Ios => "@ios and not @pending and not @pending-ios and not @legacy",
        }
    }

    /// Whether the platform preset skips the app build hook. The web
    /// app is served externally, so its suites never build anything.
    #[must_use]
    pub const fn skips_app_build(&self) -> bool {
        matches!(self, Self::Web)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable HTML page
    Html,
    /// Raw results as JSON
    Json,
    /// JUnit XML for CI
    JUnit,
}

impl ReportFormat {
    /// Default file name for the format
    #[must_use]
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Html => "report.html",
            Self::Json => "report.json",
            Self::JUnit => "report.xml",
        }
    }
}

/// One report output of a suite run
#[derive(Debug, Clone)]
pub struct ReportPlugin {
    /// Output format
    pub format: ReportFormat,
    /// Output path
    pub path: PathBuf,
}

impl ReportPlugin {
    /// A report at an explicit path
    #[must_use]
    pub fn new(format: ReportFormat, path: impl Into<PathBuf>) -> Self {
        Self {
            format,
            path: path.into(),
        }
    }

    /// The default location: `reports/<platform>/report.<ext>`
    #[must_use]
    pub fn default_for(format: ReportFormat, platform: Platform) -> Self {
        Self {
            format,
            path: PathBuf::from("reports")
                .join(platform.as_str())
                .join(format.file_name()),
        }
    }
}

/// Configuration of a suite run
pub struct SuiteConfig {
    /// Suite name, used in reports
    pub name: String,
    /// Target platform
    pub platform: Platform,
    /// Tag filter deciding which scenarios run
    pub filter: TagExpression,
    /// Active glue packages
    pub glue: Vec<String>,
    /// Report outputs written after the run
    pub reports: Vec<ReportPlugin>,
    /// Base URL of the application under test
    pub base_url: String,
    /// Skip the app build hook for this run
    pub skip_app_build: bool,
    /// Default element wait budget
    pub default_timeout: Duration,
}

impl std::fmt::Debug for SuiteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiteConfig")
            .field("name", &self.name)
            .field("platform", &self.platform)
            .field("filter", &self.filter.to_string())
            .field("glue", &self.glue)
            .field("skip_app_build", &self.skip_app_build)
            .finish_non_exhaustive()
    }
}

impl SuiteConfig {
    /// The preset configuration for a platform: the platform's tag
    /// filter, the standard glue packages, all three report formats at
    /// their default paths, and the platform's app-build policy.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in presets; the error type is shared
    /// with [`SuiteConfig::with_filter`].
    pub fn for_platform(name: impl Into<String>, platform: Platform) -> PatitasResult<Self> {
        Ok(Self {
            name: name.into(),
            platform,
            filter: TagExpression::parse(platform.preset_filter())?,
            glue: vec!["pages::landing".to_string(), "pages::navigation".to_string()],
            reports: vec![
                ReportPlugin::default_for(ReportFormat::Html, platform),
                ReportPlugin::default_for(ReportFormat::Json, platform),
                ReportPlugin::default_for(ReportFormat::JUnit, platform),
            ],
            base_url: String::new(),
            skip_app_build: platform.skips_app_build(),
            default_timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
        })
    }

    /// Replace the tag filter with a custom expression.
    ///
    /// # Errors
    ///
    /// Returns [`PatitasError::InvalidTagExpression`] when the
    /// expression does not parse.
    pub fn with_filter(mut self, expression: &str) -> PatitasResult<Self> {
        self.filter = TagExpression::parse(expression)?;
        Ok(self)
    }

    /// Activate a glue package
    #[must_use]
    pub fn with_glue(mut self, package: impl Into<String>) -> Self {
        self.glue.push(package.into());
        self
    }

    /// Set the base URL of the application under test
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Replace the report outputs
    #[must_use]
    pub fn with_reports(mut self, reports: Vec<ReportPlugin>) -> Self {
        self.reports = reports;
        self
    }

    /// Override the app-build policy
    #[must_use]
    pub const fn with_skip_app_build(mut self, skip: bool) -> Self {
        self.skip_app_build = skip;
        self
    }
}

/// Executes suites: filter, bind, run, report.
pub struct SuiteRunner {
    config: SuiteConfig,
    registry: StepRegistry,
    app_build: Option<AppBuildFn>,
}

impl std::fmt::Debug for SuiteRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiteRunner")
            .field("config", &self.config)
            .field("steps", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl SuiteRunner {
    /// Create a runner over a configuration and glue registry
    #[must_use]
    pub fn new(config: SuiteConfig, registry: StepRegistry) -> Self {
        Self {
            config,
            registry,
            app_build: None,
        }
    }

    /// Install the app build hook. It runs once before the suite unless
    /// the configuration skips it.
    #[must_use]
    pub fn with_app_build(mut self, hook: AppBuildFn) -> Self {
        self.app_build = Some(hook);
        self
    }

    /// The runner's configuration
    #[must_use]
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Scenarios whose effective tag set satisfies the filter
    #[must_use]
    pub fn select<'f>(&self, features: &'f [Feature]) -> Vec<(&'f Feature, &'f Scenario)> {
        features
            .iter()
            .flat_map(|feature| {
                feature.scenarios.iter().filter_map(move |scenario| {
                    let tags = feature.effective_tags(scenario);
                    self.config
                        .filter
                        .evaluate(&tags)
                        .then_some((feature, scenario))
                })
            })
            .collect()
    }

    /// Check that every step of every selected scenario binds to exactly
    /// one step definition, without executing anything. Returns every
    /// binding problem found; an empty vec means the suite is runnable.
    #[must_use]
    pub fn dry_run(&self, features: &[Feature]) -> Vec<PatitasError> {
        let mut problems = Vec::new();
        for (_, scenario) in self.select(features) {
            for step in &scenario.steps {
                if let Err(e) = self.registry.resolve(step, &self.config.glue) {
                    problems.push(e);
                }
            }
        }
        problems
    }

    /// Run the suite against a driver session.
    ///
    /// Scenarios excluded by the filter are recorded as skipped. A step
    /// failure (including binding failures) fails the scenario and skips
    /// its remaining steps. Reports are written when the run completes.
    ///
    /// # Errors
    ///
    /// Returns [`PatitasError::SetupError`] when the app build hook
    /// fails, and an I/O error when a report cannot be written. Scenario
    /// failures do not error; they are recorded in the report.
    pub fn run(&self, features: &[Feature], driver: &dyn UiDriver) -> PatitasResult<SuiteReport> {
        if !self.config.skip_app_build {
            if let Some(hook) = &self.app_build {
                tracing::info!(suite = %self.config.name, "running app build hook");
                hook().map_err(|e| PatitasError::SetupError {
                    message: e.to_string(),
                })?;
            }
        }

        let mut report = SuiteReport::new(&self.config.name, self.config.platform.as_str());
        for feature in features {
            for scenario in &feature.scenarios {
                let tags = feature.effective_tags(scenario);
                if self.config.filter.evaluate(&tags) {
                    report.record(self.run_scenario(feature, scenario, driver));
                } else {
                    tracing::debug!(
                        feature = %feature.feature,
                        scenario = %scenario.name,
                        "filtered out"
                    );
                    report.record(ScenarioResult::skipped(&feature.feature, &scenario.name));
                }
            }
        }

        tracing::info!(summary = %report.summary(), "suite finished");
        self.write_reports(&report)?;
        Ok(report)
    }

    fn run_scenario(
        &self,
        feature: &Feature,
        scenario: &Scenario,
        driver: &dyn UiDriver,
    ) -> ScenarioResult {
        let span = tracing::info_span!(
            "scenario",
            feature = %feature.feature,
            name = %scenario.name
        );
        let _guard = span.enter();

        let mut steps = Vec::with_capacity(scenario.steps.len());
        let mut failed = false;
        for text in &scenario.steps {
            if failed {
                steps.push(StepResult::skipped(text));
                continue;
            }
            let started = Instant::now();
            let outcome = self
                .registry
                .resolve(text, &self.config.glue)
                .and_then(|bound| {
                    // Assertion steps panic; contain that to the scenario.
                    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                        bound.execute(driver)
                    }))
                    .unwrap_or_else(|payload| {
                        Err(PatitasError::AssertionFailed {
                            message: panic_message(payload.as_ref()),
                        })
                    })
                });
            let elapsed = started.elapsed();
            match outcome {
                Ok(()) => {
                    tracing::debug!(step = %text, ?elapsed, "step passed");
                    steps.push(StepResult::passed(text, elapsed));
                }
                Err(e) => {
                    tracing::warn!(step = %text, error = %e, "step failed");
                    steps.push(StepResult::failed(text, elapsed, e.to_string()));
                    failed = true;
                }
            }
        }
        ScenarioResult::from_steps(&feature.feature, &scenario.name, steps)
    }

    fn write_reports(&self, report: &SuiteReport) -> PatitasResult<()> {
        for plugin in &self.config.reports {
            let content = match plugin.format {
                ReportFormat::Html => report.render_html(),
                ReportFormat::Json => report.render_json()?,
                ReportFormat::JUnit => report.render_junit(),
            };
            SuiteReport::write_to(&plugin.path, &content)?;
            tracing::info!(path = %plugin.path.display(), "report written");
        }
        Ok(())
    }
}

/// Extract a readable message from a caught panic payload
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "step panicked".to_string()
    }
}
