//! Business logic use cases
//!
//! Navigation and the wizard share one fragment activation routine; the
//! widgets are independent of both.

pub mod draft;
pub mod navigation;
pub mod settings;
pub mod widgets;
pub mod wizard;

pub use draft::{DraftPersistence, DraftPersistenceError};
pub use navigation::{
    ActivateFragment, ActivationReport, FetchFragment, FetchOutcome, NavigationController,
    NavigationOutcome,
};
pub use settings::ToggleTheme;
pub use widgets::{ActionPopup, CustomerSearch, NotificationRefresher, RefreshOutcome, SearchOutcome};
pub use wizard::{WizardContext, WizardError, WizardOrchestrator};

use url::Url;

/// Resolve a configured endpoint path against the page URL.
pub(crate) fn endpoint_url(page: &Url, path: &str) -> Result<Url, url::ParseError> {
    page.join(path)
}
