//! UiDriver - abstract UI automation trait.
//!
//! The real automation backend (browser session, Android or iOS driver) is
//! external to this repository. Page objects and the suite runner speak to
//! it only through [`UiDriver`], so any backend that can look elements up,
//! click, type and report text/attributes can be plugged in. A full
//! in-memory [`MockDriver`] ships here for unit and harness testing.
//!
//! Every method blocks until the backend answers or the wait budget
//! elapses; there is no async surface because scenarios run as a single
//! synchronous call chain.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::locator::{By, Locator};
use crate::result::{PatitasError, PatitasResult};
use crate::wait::{WaitOptions, Waiter};

/// Ephemeral snapshot of a UI node.
///
/// Handles are owned by the driver session and invalidated whenever the
/// underlying page re-renders; callers re-query instead of caching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Element tag name
    pub tag_name: String,
    /// `data-testid` attribute value, if present
    pub test_id: Option<String>,
    /// Text content
    pub text: String,
    /// Attribute map (includes `style`, `class`, ...)
    pub attributes: HashMap<String, String>,
    /// Whether the element is currently rendered and visible
    pub displayed: bool,
}

impl ElementHandle {
    /// Create a handle for a tag
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            test_id: None,
            text: String::new(),
            attributes: HashMap::new(),
            displayed: true,
        }
    }

    /// Set the `data-testid` value
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id = Some(id.into());
        self
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Mark the element as hidden
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    /// Look up an attribute value
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The raw inline `style` attribute, or `""` when absent
    #[must_use]
    pub fn inline_style(&self) -> &str {
        self.attribute("style").unwrap_or("")
    }

    /// Whether the `class` attribute contains the given token
    #[must_use]
    pub fn has_class(&self, token: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == token))
    }
}

/// Driver session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Timeout for navigation
    pub navigation_timeout: Duration,
    /// Default timeout for element waits
    pub element_timeout: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            navigation_timeout: Duration::from_secs(30),
            element_timeout: Duration::from_secs(10),
        }
    }
}

impl DriverConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set headless mode
    #[must_use]
    pub const fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the default element wait budget
    #[must_use]
    pub const fn element_timeout(mut self, timeout: Duration) -> Self {
        self.element_timeout = timeout;
        self
    }
}

/// Abstract UI automation driver.
///
/// Implementations: the external browser/mobile backends supplied by the
/// embedding test project, and [`MockDriver`] for unit testing.
pub trait UiDriver: Send + Sync {
    /// Navigate the session to a URL
    fn navigate(&self, url: &str) -> PatitasResult<()>;

    /// Current URL of the session
    fn current_url(&self) -> PatitasResult<String>;

    /// Find the first element matching the locator
    fn find(&self, locator: &Locator) -> PatitasResult<ElementHandle>;

    /// Find all elements matching the locator (empty vec when none match)
    fn find_all(&self, locator: &Locator) -> PatitasResult<Vec<ElementHandle>>;

    /// Click the first matching element
    fn click(&self, locator: &Locator) -> PatitasResult<()>;

    /// Type text into the first matching element
    fn type_text(&self, locator: &Locator, text: &str) -> PatitasResult<()>;

    /// Block until a matching element is displayed, up to the locator's
    /// wait budget.
    fn wait_for_displayed(&self, locator: &Locator) -> PatitasResult<ElementHandle>;

    /// Text content of the first matching element
    fn text(&self, locator: &Locator) -> PatitasResult<String> {
        Ok(self.find(locator)?.text)
    }

    /// Attribute value of the first matching element
    fn attribute(&self, locator: &Locator, name: &str) -> PatitasResult<Option<String>> {
        Ok(self
            .find(locator)?
            .attribute(name)
            .map(ToString::to_string))
    }

    /// Whether the first matching element is displayed
    fn is_displayed(&self, locator: &Locator) -> PatitasResult<bool> {
        Ok(self.find(locator)?.displayed)
    }

    /// Number of matching elements (0 when none match)
    fn count(&self, locator: &Locator) -> PatitasResult<usize> {
        Ok(self.find_all(locator)?.len())
    }
}

#[derive(Debug, Default)]
struct MockState {
    current_url: String,
    elements: Vec<ElementHandle>,
    stale_ids: Vec<String>,
    history: Vec<String>,
}

/// In-memory driver for unit and harness testing.
///
/// Holds a canned set of element handles and records every interaction in
/// a call history. Elements can be marked stale to exercise the
/// stale-reference path.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create an empty mock session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element to the session
    pub fn insert(&self, element: ElementHandle) {
        self.lock().elements.push(element);
    }

    /// Add an element, builder style
    #[must_use]
    pub fn with_element(self, element: ElementHandle) -> Self {
        self.insert(element);
        self
    }

    /// Mark an element stale by `data-testid`; subsequent lookups of it
    /// return [`PatitasError::StaleElement`].
    pub fn mark_stale(&self, test_id: impl Into<String>) {
        self.lock().stale_ids.push(test_id.into());
    }

    /// Remove all elements (simulates a blank page)
    pub fn clear(&self) {
        self.lock().elements.clear();
    }

    /// Snapshot of the call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    /// Whether a call matching the prefix was recorded
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.lock().history.iter().any(|c| c.starts_with(prefix))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A poisoned lock only happens when a test panicked mid-call.
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn matches(element: &ElementHandle, by: &By) -> bool {
        match by {
            By::TestId(id) => element.test_id.as_deref() == Some(id.as_str()),
            By::TestIdContains(fragment) => element
                .test_id
                .as_deref()
                .is_some_and(|id| id.contains(fragment.as_str())),
            By::Tag(name) => element.tag_name == *name,
        }
    }

    fn find_matches(&self, locator: &Locator) -> PatitasResult<Vec<ElementHandle>> {
        let state = self.lock();
        let matches: Vec<ElementHandle> = state
            .elements
            .iter()
            .filter(|e| Self::matches(e, locator.by()))
            .cloned()
            .collect();
        for element in &matches {
            if let Some(id) = &element.test_id {
                if state.stale_ids.contains(id) {
                    return Err(PatitasError::StaleElement {
                        locator: locator.to_string(),
                    });
                }
            }
        }
        Ok(matches)
    }

    fn record(&self, call: String) {
        self.lock().history.push(call);
    }
}

impl UiDriver for MockDriver {
    fn navigate(&self, url: &str) -> PatitasResult<()> {
        self.record(format!("navigate:{url}"));
        self.lock().current_url = url.to_string();
        Ok(())
    }

    fn current_url(&self) -> PatitasResult<String> {
        Ok(self.lock().current_url.clone())
    }

    fn find(&self, locator: &Locator) -> PatitasResult<ElementHandle> {
        self.find_matches(locator)?
            .into_iter()
            .next()
            .ok_or_else(|| PatitasError::ElementNotFound {
                locator: locator.to_string(),
            })
    }

    fn find_all(&self, locator: &Locator) -> PatitasResult<Vec<ElementHandle>> {
        self.find_matches(locator)
    }

    fn click(&self, locator: &Locator) -> PatitasResult<()> {
        let _ = self.find(locator)?;
        self.record(format!("click:{locator}"));
        Ok(())
    }

    fn type_text(&self, locator: &Locator, text: &str) -> PatitasResult<()> {
        let _ = self.find(locator)?;
        self.record(format!("type:{locator}:{text}"));
        Ok(())
    }

    fn wait_for_displayed(&self, locator: &Locator) -> PatitasResult<ElementHandle> {
        let options = WaitOptions::new()
            .with_timeout(u64::try_from(locator.timeout().as_millis()).unwrap_or(u64::MAX));
        Waiter::with_options(options).wait_for_value(locator.to_string(), || {
            let element = self.find(locator)?;
            if element.displayed {
                Ok(element)
            } else {
                Err(PatitasError::ElementNotFound {
                    locator: locator.to_string(),
                })
            }
        })
    }
}
