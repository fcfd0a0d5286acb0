//! Glue: binding step text to handler functions.
//!
//! Step definitions live in named glue packages (e.g. `pages::landing`).
//! A suite activates a subset of packages; step text is matched against
//! anchored regular expressions and capture groups become handler
//! arguments. Exactly one definition must match: zero is an undefined
//! step, more than one is ambiguous, and both fail the scenario.

use regex::Regex;
use std::fmt;
use std::sync::Arc;

use crate::driver::UiDriver;
use crate::result::{PatitasError, PatitasResult};

/// Handler invoked when a step binds: receives the driver and the
/// pattern's capture groups (excluding the whole match).
pub type StepFn = Arc<dyn Fn(&dyn UiDriver, &[String]) -> PatitasResult<()> + Send + Sync>;

/// A registered step definition
#[derive(Clone)]
pub struct StepDef {
    package: String,
    pattern: Regex,
    handler: StepFn,
}

impl StepDef {
    /// The glue package this definition belongs to
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The step pattern
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl fmt::Debug for StepDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDef")
            .field("package", &self.package)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// A bound step: the matched definition plus extracted arguments
#[derive(Debug)]
pub struct BoundStep<'r> {
    /// The matched definition
    pub def: &'r StepDef,
    /// Capture groups from the pattern
    pub args: Vec<String>,
}

impl BoundStep<'_> {
    /// Execute the bound handler
    pub fn execute(&self, driver: &dyn UiDriver) -> PatitasResult<()> {
        (self.def.handler)(driver, &self.args)
    }
}

/// Registry of step definitions across glue packages.
#[derive(Debug, Default, Clone)]
pub struct StepRegistry {
    steps: Vec<StepDef>,
}

impl StepRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a step definition.
    ///
    /// The pattern is anchored with `^`/`$` so it must match the whole
    /// step text.
    ///
    /// # Errors
    ///
    /// Returns [`PatitasError::InvalidStepPattern`] if the regex does not
    /// compile.
    pub fn register<F>(
        &mut self,
        package: impl Into<String>,
        pattern: &str,
        handler: F,
    ) -> PatitasResult<()>
    where
        F: Fn(&dyn UiDriver, &[String]) -> PatitasResult<()> + Send + Sync + 'static,
    {
        let anchored = format!("^{pattern}$");
        let regex = Regex::new(&anchored).map_err(|e| PatitasError::InvalidStepPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.steps.push(StepDef {
            package: package.into(),
            pattern: regex,
            handler: Arc::new(handler),
        });
        Ok(())
    }

    /// Number of registered definitions
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Glue packages with at least one definition
    #[must_use]
    pub fn packages(&self) -> Vec<&str> {
        let mut packages: Vec<&str> = self.steps.iter().map(|s| s.package.as_str()).collect();
        packages.sort_unstable();
        packages.dedup();
        packages
    }

    /// Resolve step text against the definitions of the active packages.
    ///
    /// # Errors
    ///
    /// [`PatitasError::UndefinedStep`] when nothing matches,
    /// [`PatitasError::AmbiguousStep`] when more than one definition does.
    pub fn resolve(&self, text: &str, active_packages: &[String]) -> PatitasResult<BoundStep<'_>> {
        let mut matches: Vec<BoundStep<'_>> = Vec::new();
        for def in &self.steps {
            if !active_packages.iter().any(|p| p == &def.package) {
                continue;
            }
            if let Some(captures) = def.pattern.captures(text) {
                let args = captures
                    .iter()
                    .skip(1)
                    .map(|c| c.map_or_else(String::new, |m| m.as_str().to_string()))
                    .collect();
                matches.push(BoundStep { def, args });
            }
        }
        match matches.len() {
            0 => Err(PatitasError::UndefinedStep {
                text: text.to_string(),
                glue: active_packages.join(", "),
            }),
            1 => Ok(matches.remove(0)),
            count => Err(PatitasError::AmbiguousStep {
                text: text.to_string(),
                count,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;

    fn glue(packages: &[&str]) -> Vec<String> {
        packages.iter().map(ToString::to_string).collect()
    }

    fn registry() -> StepRegistry {
        let mut registry = StepRegistry::new();
        registry
            .register("pages::landing", "the visitor opens the landing page", |d, _| {
                d.navigate("https://huellitas.app/")
            })
            .unwrap();
        registry
            .register(
                "pages::navigation",
                "the visitor follows the \"(.+)\" link",
                |_, args| {
                    assert_eq!(args.len(), 1);
                    Ok(())
                },
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_resolve_plain_step() {
        let registry = registry();
        let bound = registry
            .resolve(
                "the visitor opens the landing page",
                &glue(&["pages::landing"]),
            )
            .unwrap();
        assert_eq!(bound.def.package(), "pages::landing");
        assert!(bound.args.is_empty());
    }

    #[test]
    fn test_resolve_extracts_captures() {
        let registry = registry();
        let bound = registry
            .resolve(
                "the visitor follows the \"Lost pets\" link",
                &glue(&["pages::navigation"]),
            )
            .unwrap();
        assert_eq!(bound.args, vec!["Lost pets".to_string()]);
    }

    #[test]
    fn test_undefined_step() {
        let registry = registry();
        let result = registry.resolve("no such step", &glue(&["pages::landing"]));
        assert!(matches!(result, Err(PatitasError::UndefinedStep { .. })));
    }

    #[test]
    fn test_inactive_package_is_undefined() {
        let registry = registry();
        let result = registry.resolve(
            "the visitor opens the landing page",
            &glue(&["pages::navigation"]),
        );
        assert!(matches!(result, Err(PatitasError::UndefinedStep { .. })));
    }

    #[test]
    fn test_ambiguous_step() {
        let mut registry = registry();
        registry
            .register("pages::landing", "the visitor opens the landing .*", |_, _| Ok(()))
            .unwrap();
        let result = registry.resolve(
            "the visitor opens the landing page",
            &glue(&["pages::landing"]),
        );
        match result {
            Err(PatitasError::AmbiguousStep { count, .. }) => assert_eq!(count, 2),
            other => panic!("expected ambiguous step, got {other:?}"),
        }
    }

    #[test]
    fn test_anchored_matching() {
        let registry = registry();
        // Prefix of a registered step must not bind
        let result = registry.resolve(
            "the visitor opens the landing page and waits",
            &glue(&["pages::landing"]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_pattern() {
        let mut registry = StepRegistry::new();
        let result = registry.register("pages::landing", "broken (regex", |_, _| Ok(()));
        assert!(matches!(
            result,
            Err(PatitasError::InvalidStepPattern { .. })
        ));
    }

    #[test]
    fn test_execute_bound_step() {
        let registry = registry();
        let driver = MockDriver::new();
        let bound = registry
            .resolve(
                "the visitor opens the landing page",
                &glue(&["pages::landing"]),
            )
            .unwrap();
        bound.execute(&driver).unwrap();
        assert!(driver.was_called("navigate:https://huellitas.app/"));
    }

    #[test]
    fn test_packages_listing() {
        let registry = registry();
        assert_eq!(
            registry.packages(),
            vec!["pages::landing", "pages::navigation"]
        );
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }
}
