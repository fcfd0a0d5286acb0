//! Patitas: end-to-end UI test toolkit for the Huellitas pet-finding app.
//!
//! Page objects over an abstract UI driver, tag-filtered BDD suites
//! bound through glue packages, and HTML/JSON/JUnit reporting. The
//! automation backend (browser or mobile session) is supplied by the
//! embedding project; everything here speaks to it through the
//! [`UiDriver`] trait.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     PATITAS Architecture                         │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────────────┐     │
//! │   │ Features   │    │ Glue       │    │ Page Objects       │     │
//! │   │ (YAML +    │───►│ (step      │───►│ (LandingPage,      │     │
//! │   │  tags)     │    │  registry) │    │  NavigationPage)   │     │
//! │   └────────────┘    └────────────┘    └─────────┬──────────┘     │
//! │         │                                       │                │
//! │   ┌─────▼──────┐                      ┌─────────▼──────────┐     │
//! │   │ SuiteRunner│─────────────────────►│ UiDriver           │     │
//! │   │ (filter,   │                      │ (browser / mobile  │     │
//! │   │  report)   │                      │  backend, Mock)    │     │
//! │   └────────────┘                      └────────────────────┘     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use patitas::{LandingPage, MockDriver, UiDriver};
//!
//! let driver = MockDriver::new();
//! driver.navigate("https://huellitas.app/").unwrap();
//! let landing = LandingPage::new(&driver);
//! assert!(!landing.is_hero_displayed()); // blank page: reads default
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod driver;
mod feature;
mod glue;
mod locator;
mod page;
mod reporter;
mod result;
mod runner;
mod tags;
mod wait;

pub use driver::{DriverConfig, ElementHandle, MockDriver, UiDriver};
pub use feature::{Feature, Scenario};
pub use glue::{BoundStep, StepDef, StepFn, StepRegistry};
pub use locator::{By, Locator, TestId};
pub use page::{LandingPage, NavItem, NavigationPage, Page};
pub use reporter::{ScenarioResult, ScenarioStatus, StepResult, SuiteReport};
pub use result::{PatitasError, PatitasResult};
pub use runner::{
    AppBuildFn, Platform, ReportFormat, ReportPlugin, SuiteConfig, SuiteRunner,
};
pub use tags::{tag_set, Tag, TagExpression};
pub use wait::{
    wait_until, WaitOptions, WaitOutcome, Waiter, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_WAIT_TIMEOUT_MS,
};
