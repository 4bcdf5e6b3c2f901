use url::Url;

use super::link::resolve_href;

/// A sidebar anchor as read from the live document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarAnchor {
    /// Position of the anchor in document order; the handle the document
    /// port understands.
    pub index: usize,
    pub href: Option<String>,
    /// The anchor sits inside a collapsible `.sidebar-submenu`.
    pub in_submenu: bool,
}

/// Which anchor to mark active after a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveMarker {
    pub anchor: usize,
    /// Also mark the item owning the submenu so it renders expanded.
    pub expand_submenu: bool,
}

/// Find the anchor whose resolved pathname equals the target's pathname.
///
/// Hrefs resolve against the target's origin. Query and fragment are
/// ignored, and in-page toggles (`#…`) never match. When several anchors
/// match, the last one in document order wins.
pub fn resolve_active(anchors: &[SidebarAnchor], target: &Url) -> Option<ActiveMarker> {
    let mut origin = target.clone();
    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);

    anchors
        .iter()
        .rev()
        .find(|anchor| {
            anchor
                .href
                .as_deref()
                .map(str::trim)
                .filter(|href| !href.is_empty() && !href.starts_with('#'))
                .and_then(|href| resolve_href(href, &origin))
                .is_some_and(|resolved| resolved.path() == target.path())
        })
        .map(|anchor| ActiveMarker {
            anchor: anchor.index,
            expand_submenu: anchor.in_submenu,
        })
}
