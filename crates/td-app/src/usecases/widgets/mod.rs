//! Header and page widgets.

mod action_popup;
mod customer_search;
mod notifications;

pub use action_popup::ActionPopup;
pub use customer_search::{CustomerSearch, SearchOutcome};
pub use notifications::{NotificationRefresher, RefreshOutcome};
