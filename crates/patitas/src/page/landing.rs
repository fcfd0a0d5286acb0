//! Landing page of the Huellitas app.
//!
//! Test ids on this screen: `landing.hero.section`, `landing.hero.title`,
//! `landing.searchBar.input`, `landing.searchBar.action`,
//! `landing.reportLost.action`, `landing.reportFound.action`, and one
//! `landing.featureCard.*` group per feature card (container, title,
//! icon).

use std::time::Duration;

use super::{read_or, Page};
use crate::driver::UiDriver;
use crate::locator::Locator;
use crate::result::PatitasResult;
use crate::wait::DEFAULT_WAIT_TIMEOUT_MS;

const HERO_SECTION: &str = "landing.hero.section";
const HERO_TITLE: &str = "landing.hero.title";
const SEARCH_INPUT: &str = "landing.searchBar.input";
const SEARCH_ACTION: &str = "landing.searchBar.action";
const REPORT_LOST: &str = "landing.reportLost.action";
const REPORT_FOUND: &str = "landing.reportFound.action";
const FEATURE_CARD: &str = "landing.featureCard.container";
const FEATURE_CARD_TITLE: &str = "landing.featureCard.title";
const FEATURE_CARD_ICON: &str = "landing.featureCard.icon";

/// Landing page façade
#[derive(Clone, Copy)]
pub struct LandingPage<'d> {
    driver: &'d dyn UiDriver,
    timeout: Duration,
}

impl std::fmt::Debug for LandingPage<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LandingPage")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl<'d> LandingPage<'d> {
    /// Create a landing page over a driver session
    #[must_use]
    pub fn new(driver: &'d dyn UiDriver) -> Self {
        Self {
            driver,
            timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
        }
    }

    /// Override the action wait budget
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn locator(&self, test_id: &str) -> Locator {
        Locator::test_id(test_id).with_timeout(self.timeout)
    }

    // ------------------------------------------------------------------
    // Actions: failures propagate
    // ------------------------------------------------------------------

    /// Navigate the session to the landing page
    pub fn open(&self, base_url: &str) -> PatitasResult<()> {
        self.driver.navigate(base_url)
    }

    /// Click the "report a lost pet" call to action
    pub fn click_report_lost(&self) -> PatitasResult<()> {
        let locator = self.locator(REPORT_LOST);
        let _ = self.driver.wait_for_displayed(&locator)?;
        self.driver.click(&locator)
    }

    /// Click the "report a found pet" call to action
    pub fn click_report_found(&self) -> PatitasResult<()> {
        let locator = self.locator(REPORT_FOUND);
        let _ = self.driver.wait_for_displayed(&locator)?;
        self.driver.click(&locator)
    }

    /// Type a query into the search bar and submit it
    pub fn search_for(&self, query: &str) -> PatitasResult<()> {
        let input = self.locator(SEARCH_INPUT);
        let _ = self.driver.wait_for_displayed(&input)?;
        self.driver.type_text(&input, query)?;
        self.driver.click(&self.locator(SEARCH_ACTION))
    }

    // ------------------------------------------------------------------
    // Verifications: failures default
    // ------------------------------------------------------------------

    /// Whether the hero section is displayed. Defaults to `false`.
    #[must_use]
    pub fn is_hero_displayed(&self) -> bool {
        read_or(
            "landing",
            "hero displayed",
            self.driver.is_displayed(&Locator::test_id(HERO_SECTION)),
            false,
        )
    }

    /// Hero title text. Defaults to `""`.
    #[must_use]
    pub fn hero_title(&self) -> String {
        read_or(
            "landing",
            "hero title",
            self.driver.text(&Locator::test_id(HERO_TITLE)),
            String::new(),
        )
    }

    /// Whether the search bar is displayed. Defaults to `false`.
    #[must_use]
    pub fn has_search_bar(&self) -> bool {
        read_or(
            "landing",
            "search bar displayed",
            self.driver.is_displayed(&Locator::test_id(SEARCH_INPUT)),
            false,
        )
    }

    /// Number of feature cards. Defaults to `0`.
    #[must_use]
    pub fn feature_card_count(&self) -> usize {
        read_or(
            "landing",
            "feature card count",
            self.driver.count(&Locator::test_id(FEATURE_CARD)),
            0,
        )
    }

    /// Titles of every feature card, in document order. A card whose
    /// title cannot be read contributes `""`; a failed lookup of the
    /// card list yields an empty vec.
    #[must_use]
    pub fn feature_card_titles(&self) -> Vec<String> {
        let handles = read_or(
            "landing",
            "feature card titles",
            self.driver.find_all(&Locator::test_id(FEATURE_CARD_TITLE)),
            Vec::new(),
        );
        handles
            .into_iter()
            .map(|h| if h.displayed { h.text } else { String::new() })
            .collect()
    }

    /// Raw inline style of the nth feature card icon, but only when it
    /// declares a background color.
    ///
    /// Returns `""` when the icon is missing, the card index is out of
    /// range, or the inline style carries no `background-color`
    /// declaration. No parsing or normalization is performed on the
    /// style string.
    #[must_use]
    pub fn feature_card_icon_color(&self, index: usize) -> String {
        let handles = read_or(
            "landing",
            "feature card icons",
            self.driver.find_all(&Locator::test_id(FEATURE_CARD_ICON)),
            Vec::new(),
        );
        handles
            .get(index)
            .map(|h| h.inline_style())
            .filter(|style| style.contains("background-color"))
            .map_or_else(String::new, ToString::to_string)
    }
}

impl Page for LandingPage<'_> {
    fn url_pattern(&self) -> &str {
        "/"
    }

    fn is_displayed(&self) -> bool {
        self.is_hero_displayed()
    }
}
