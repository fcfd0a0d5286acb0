//! Locators built from the Huellitas `data-testid` convention.
//!
//! Every interactive element in the application carries a stable
//! `data-testid` attribute following `pageName.elementName[.subElement].action`
//! (for example `navigation.lostPet.link` or `landing.featureCard.icon`).
//! Locators render to XPath over that attribute, either exact-match or
//! substring-match, with a tag-name fallback for structural queries.
//!
//! The naming convention is documented, not enforced: [`TestId::is_conventional`]
//! is advisory and never blocks a lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::wait::DEFAULT_WAIT_TIMEOUT_MS;

/// A `data-testid` value, optionally conforming to the
/// `pageName.elementName[.subElement].action` convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestId(String);

impl TestId {
    /// Minimum dot-separated segments for a conventional test id
    const MIN_SEGMENTS: usize = 3;

    /// Maximum dot-separated segments for a conventional test id
    const MAX_SEGMENTS: usize = 4;

    /// Create a test id from a raw attribute value
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the raw attribute value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dot-separated segments of the id
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Advisory check against the `pageName.elementName[.subElement].action`
    /// convention: 3 or 4 non-empty alphanumeric segments.
    #[must_use]
    pub fn is_conventional(&self) -> bool {
        let segments: Vec<&str> = self.segments().collect();
        if segments.len() < Self::MIN_SEGMENTS || segments.len() > Self::MAX_SEGMENTS {
            return false;
        }
        segments
            .iter()
            .all(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()))
    }

    /// The page name segment, when present
    #[must_use]
    pub fn page_name(&self) -> Option<&str> {
        self.segments().next().filter(|s| !s.is_empty())
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TestId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Selection strategy for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum By {
    /// Exact `data-testid` match
    TestId(TestId),
    /// Substring `data-testid` match
    TestIdContains(String),
    /// Tag-name match (e.g. `nav`, `section`)
    Tag(String),
}

impl By {
    /// Exact `data-testid` selector
    #[must_use]
    pub fn test_id(id: impl Into<TestId>) -> Self {
        Self::TestId(id.into())
    }

    /// Substring `data-testid` selector
    #[must_use]
    pub fn test_id_contains(fragment: impl Into<String>) -> Self {
        Self::TestIdContains(fragment.into())
    }

    /// Tag-name selector
    #[must_use]
    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag(name.into())
    }

    /// Render the selector as an XPath expression
    #[must_use]
    pub fn to_xpath(&self) -> String {
        match self {
            Self::TestId(id) => format!("//*[@data-testid='{}']", id.as_str()),
            Self::TestIdContains(fragment) => {
                format!("//*[contains(@data-testid, '{fragment}')]")
            }
            Self::Tag(name) => format!("//{name}"),
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TestId(id) => write!(f, "test-id={}", id.as_str()),
            Self::TestIdContains(fragment) => write!(f, "test-id~={fragment}"),
            Self::Tag(name) => write!(f, "tag={name}"),
        }
    }
}

/// A locator: a selection strategy plus per-call wait budget.
///
/// Locators are immutable values built fresh for every lookup; nothing is
/// cached across page loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    by: By,
    timeout: Duration,
}

impl Locator {
    /// Create a locator with the default wait budget
    #[must_use]
    pub fn new(by: By) -> Self {
        Self {
            by,
            timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
        }
    }

    /// Exact `data-testid` locator
    #[must_use]
    pub fn test_id(id: impl Into<TestId>) -> Self {
        Self::new(By::test_id(id))
    }

    /// Substring `data-testid` locator
    #[must_use]
    pub fn test_id_contains(fragment: impl Into<String>) -> Self {
        Self::new(By::test_id_contains(fragment))
    }

    /// Tag-name locator
    #[must_use]
    pub fn tag(name: impl Into<String>) -> Self {
        Self::new(By::tag(name))
    }

    /// Override the wait budget for this lookup
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The selection strategy
    #[must_use]
    pub const fn by(&self) -> &By {
        &self.by
    }

    /// The wait budget for this lookup
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Render as XPath
    #[must_use]
    pub fn to_xpath(&self) -> String {
        self.by.to_xpath()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod test_id_tests {
        use super::*;

        #[test]
        fn test_conventional_three_segments() {
            assert!(TestId::new("navigation.home.link").is_conventional());
        }

        #[test]
        fn test_conventional_four_segments() {
            assert!(TestId::new("landing.featureCard.icon.container").is_conventional());
        }

        #[test]
        fn test_unconventional_too_few_segments() {
            assert!(!TestId::new("navigation.home").is_conventional());
            assert!(!TestId::new("navigation").is_conventional());
        }

        #[test]
        fn test_unconventional_too_many_segments() {
            assert!(!TestId::new("a.b.c.d.e").is_conventional());
        }

        #[test]
        fn test_unconventional_empty_segment() {
            assert!(!TestId::new("navigation..link").is_conventional());
        }

        #[test]
        fn test_unconventional_bad_characters() {
            assert!(!TestId::new("navigation.home-item.link").is_conventional());
        }

        #[test]
        fn test_page_name() {
            assert_eq!(
                TestId::new("landing.hero.section").page_name(),
                Some("landing")
            );
        }
    }

    mod by_tests {
        use super::*;

        #[test]
        fn test_exact_xpath() {
            let by = By::test_id("navigation.home.link");
            assert_eq!(by.to_xpath(), "//*[@data-testid='navigation.home.link']");
        }

        #[test]
        fn test_contains_xpath() {
            let by = By::test_id_contains("landing.featureCard");
            assert_eq!(
                by.to_xpath(),
                "//*[contains(@data-testid, 'landing.featureCard')]"
            );
        }

        #[test]
        fn test_tag_xpath() {
            assert_eq!(By::tag("nav").to_xpath(), "//nav");
        }

        #[test]
        fn test_display() {
            assert_eq!(
                By::test_id("landing.hero.section").to_string(),
                "test-id=landing.hero.section"
            );
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_default_timeout_is_ten_seconds() {
            let locator = Locator::test_id("navigation.home.link");
            assert_eq!(locator.timeout(), Duration::from_secs(10));
        }

        #[test]
        fn test_timeout_override() {
            let locator =
                Locator::test_id("navigation.home.link").with_timeout(Duration::from_secs(2));
            assert_eq!(locator.timeout(), Duration::from_secs(2));
        }

        #[test]
        fn test_xpath_passthrough() {
            let locator = Locator::tag("section");
            assert_eq!(locator.to_xpath(), "//section");
        }
    }
}
