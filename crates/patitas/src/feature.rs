//! Feature files: tagged scenarios of plain-text steps.
//!
//! Features are YAML documents:
//!
//! ```yaml
//! feature: Landing page
//! tags: [web, android]
//! scenarios:
//!   - name: Hero section greets the visitor
//!     tags: [smoke]
//!     steps:
//!       - the visitor opens the landing page
//!       - the hero section is displayed
//! ```
//!
//! A scenario's effective tag set is the union of the feature-level and
//! scenario-level tags; runners filter on that union.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::result::{PatitasError, PatitasResult};
use crate::tags::Tag;

/// A single scenario: a named, tagged, ordered list of steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name
    pub name: String,
    /// Scenario-level tags
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Plain-text steps, bound to glue at run time
    #[serde(default)]
    pub steps: Vec<String>,
}

/// A feature: a named group of scenarios sharing feature-level tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    /// Feature name
    pub feature: String,
    /// Feature-level tags, inherited by every scenario
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Scenarios in declaration order
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

impl Feature {
    /// Deserialize a feature from YAML text.
    pub fn from_yaml(source: &str) -> PatitasResult<Self> {
        serde_yaml_ng::from_str(source).map_err(|e| PatitasError::InvalidFeature {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load a feature from a YAML file.
    pub fn load(path: &Path) -> PatitasResult<Self> {
        let source = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&source).map_err(|e| PatitasError::InvalidFeature {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load every `.yaml`/`.yml` feature in a directory, sorted by file
    /// name for a stable execution order.
    pub fn load_dir(dir: &Path) -> PatitasResult<Vec<Self>> {
        let mut paths: Vec<_> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e == "yaml" || e == "yml")
            })
            .collect();
        paths.sort();
        paths.iter().map(|p| Self::load(p)).collect()
    }

    /// Effective tag set for a scenario of this feature
    #[must_use]
    pub fn effective_tags(&self, scenario: &Scenario) -> HashSet<Tag> {
        self.tags
            .iter()
            .chain(scenario.tags.iter())
            .cloned()
            .collect()
    }

    /// Total number of scenarios
    #[must_use]
    pub fn scenario_count(&self) -> usize {
        self.scenarios.len()
    }
}
