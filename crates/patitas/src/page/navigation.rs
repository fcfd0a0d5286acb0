//! Main navigation bar of the Huellitas app.
//!
//! Test ids: `navigation.bar.container` for the bar itself, plus
//! `navigation.<item>.link` and `navigation.<item>.icon` per item. The
//! currently active link carries the `active` class token.

use std::time::Duration;

use super::{read_or, Page};
use crate::driver::UiDriver;
use crate::locator::{Locator, TestId};
use crate::result::PatitasResult;
use crate::wait::DEFAULT_WAIT_TIMEOUT_MS;

const NAV_BAR: &str = "navigation.bar.container";

/// An entry of the main navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavItem {
    /// Landing page
    Home,
    /// Lost pet reports
    LostPet,
    /// Found pet reports
    FoundPet,
    /// Contact form
    Contact,
    /// User account
    Account,
}

impl NavItem {
    /// Every navigation item, in bar order
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::LostPet,
        Self::FoundPet,
        Self::Contact,
        Self::Account,
    ];

    /// Stable item id used in test ids
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::LostPet => "lostPet",
            Self::FoundPet => "foundPet",
            Self::Contact => "contact",
            Self::Account => "account",
        }
    }

    /// Test id of the item's link
    #[must_use]
    pub fn link_test_id(&self) -> TestId {
        TestId::new(format!("navigation.{}.link", self.id()))
    }

    /// Test id of the item's icon
    #[must_use]
    pub fn icon_test_id(&self) -> TestId {
        TestId::new(format!("navigation.{}.icon", self.id()))
    }
}

impl std::fmt::Display for NavItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Navigation bar façade
#[derive(Clone, Copy)]
pub struct NavigationPage<'d> {
    driver: &'d dyn UiDriver,
    timeout: Duration,
}

impl std::fmt::Debug for NavigationPage<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationPage")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl<'d> NavigationPage<'d> {
    /// Create a navigation façade over a driver session
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

    // ------------------------------------------------------------------
    // Actions: failures propagate
    // ------------------------------------------------------------------

    /// Click a navigation item's link
    pub fn click(&self, item: NavItem) -> PatitasResult<()> {
        let locator = Locator::test_id(item.link_test_id()).with_timeout(self.timeout);
        let _ = self.driver.wait_for_displayed(&locator)?;
        self.driver.click(&locator)
    }

    /// Click the home link
    pub fn click_home(&self) -> PatitasResult<()> {
        self.click(NavItem::Home)
    }

    /// Click the lost-pet link
    pub fn click_lost_pet(&self) -> PatitasResult<()> {
        self.click(NavItem::LostPet)
    }

    /// Click the found-pet link
    pub fn click_found_pet(&self) -> PatitasResult<()> {
        self.click(NavItem::FoundPet)
    }

    /// Click the contact link
    pub fn click_contact(&self) -> PatitasResult<()> {
        self.click(NavItem::Contact)
    }

    /// Click the account link
    pub fn click_account(&self) -> PatitasResult<()> {
        self.click(NavItem::Account)
    }

    // ------------------------------------------------------------------
    // Verifications: failures default
    // ------------------------------------------------------------------

    /// Whether the navigation bar is displayed. Defaults to `false`.
    #[must_use]
    pub fn is_bar_displayed(&self) -> bool {
        read_or(
            "navigation",
            "bar displayed",
            self.driver.is_displayed(&Locator::test_id(NAV_BAR)),
            false,
        )
    }

    /// Label text of an item's link. Defaults to `""`.
    #[must_use]
    pub fn item_label(&self, item: NavItem) -> String {
        read_or(
            "navigation",
            "item label",
            self.driver.text(&Locator::test_id(item.link_test_id())),
            String::new(),
        )
    }

    /// Number of navigation items whose link is currently displayed.
    /// An item whose lookup fails is not counted.
    #[must_use]
    pub fn displayed_item_count(&self) -> usize {
        NavItem::ALL
            .iter()
            .filter(|item| {
                read_or(
                    "navigation",
                    "item displayed",
                    self.driver
                        .is_displayed(&Locator::test_id(item.link_test_id())),
                    false,
                )
            })
            .count()
    }

    /// The item whose link carries the active-state marker.
    ///
    /// Returns `Some` iff exactly one link has the `active` class token;
    /// zero or multiple marked links yield `None`, as does any lookup
    /// failure on a link (that link counts as inactive).
    #[must_use]
    pub fn active_item(&self) -> Option<NavItem> {
        let mut active = NavItem::ALL.iter().copied().filter(|item| {
            let is_active = self
                .driver
                .find(&Locator::test_id(item.link_test_id()))
                .map(|handle| handle.has_class("active"));
            read_or("navigation", "active marker", is_active, false)
        });
        let first = active.next()?;
        if active.next().is_some() {
            tracing::debug!("multiple navigation links carry the active marker");
            return None;
        }
        Some(first)
    }

    /// Whether every navigation item has a displayed icon. A missing or
    /// hidden icon on any item yields `false`.
    #[must_use]
    pub fn all_items_have_icons(&self) -> bool {
        NavItem::ALL.iter().all(|item| {
            read_or(
                "navigation",
                "item icon",
                self.driver
                    .is_displayed(&Locator::test_id(item.icon_test_id())),
                false,
            )
        })
    }
}

impl Page for NavigationPage<'_> {
    fn url_pattern(&self) -> &str {
        "/*"
    }

    fn is_displayed(&self) -> bool {
        self.is_bar_displayed()
    }
}
