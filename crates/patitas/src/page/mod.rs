//! Page objects for the Huellitas application.
//!
//! One façade per screen, each holding a borrowed driver session and
//! exposing semantic user actions and verifications. Page objects are
//! stateless: they cache no element handles and are recreated per
//! navigation.
//!
//! # Read/write error contract
//!
//! This is the one deliberate error-handling policy of the toolkit:
//!
//! - **Actions** (`click_*`, `open`, typing) propagate every driver
//!   failure, because a failed interaction must fail the scenario.
//! - **Verifications** (`is_*`, `*_count`, `*_text`, compound reads) map
//!   every failure to a documented default (`false`, `0`, `""`, `None`),
//!   so assertion steps observe "absent" and "errored" identically. The
//!   swallowed error is logged so a broken locator stays diagnosable.

mod landing;
mod navigation;

pub use landing::LandingPage;
pub use navigation::{NavItem, NavigationPage};

use crate::result::PatitasResult;

/// A page object: a per-screen façade over the driver session.
pub trait Page {
    /// URL path pattern this page lives under (e.g. `/`, `/lost`)
    fn url_pattern(&self) -> &str;

    /// Whether the page's anchor element is currently displayed
    fn is_displayed(&self) -> bool;

    /// Page name for logging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Map a verification read to its default on failure.
///
/// Expected read failures (absent, stale, timed out) log at debug;
/// anything else is an infrastructure fault and logs at warn. Both
/// return the default: verification steps never raise.
pub(crate) fn read_or<T>(page: &str, what: &str, result: PatitasResult<T>, default: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) if e.is_read_failure() => {
            tracing::debug!(page, what, error = %e, "verification read defaulted");
            default
        }
        Err(e) => {
            tracing::warn!(page, what, error = %e, "verification swallowed driver fault");
            default
        }
    }
}
