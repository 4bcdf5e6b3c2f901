//! Navigation domain.
//!
//! Rules for intercepting sidebar links, the history payload, and resolving
//! which sidebar entry is active for a URL.

pub mod link;
pub mod sidebar;
pub mod state;

pub use link::{classify_link, resolve_href, same_origin, LinkDecision};
pub use sidebar::{resolve_active, ActiveMarker, SidebarAnchor};
pub use state::{HistoryEntry, NavigationState};

/// Marker header identifying a programmatic navigation request, so the
/// server can answer with a partial fragment instead of a full page.
pub const REQUESTED_WITH_HEADER: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");
