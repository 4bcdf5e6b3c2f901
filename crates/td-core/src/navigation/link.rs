use url::Url;

/// What to do with a click on a sidebar anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDecision {
    /// Leave the click to the browser (external, in-page anchor, no href).
    PassThrough,
    /// Suppress the default action and do nothing: the link targets the
    /// page already shown.
    SamePage,
    /// Suppress the default action and swap the content in place.
    Intercept(Url),
}

/// Resolve `href` against `base` the way the browser resolves anchors.
pub fn resolve_href(href: &str, base: &Url) -> Option<Url> {
    base.join(href).ok()
}

pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}

/// Decide whether a sidebar click becomes an SPA navigation.
///
/// Intercepted only when the href is same-origin, does not start with `#`,
/// and resolves to a pathname different from the current one.
pub fn classify_link(href: Option<&str>, current: &Url) -> LinkDecision {
    let Some(href) = href.map(str::trim).filter(|h| !h.is_empty()) else {
        return LinkDecision::PassThrough;
    };
    if href.starts_with('#') {
        return LinkDecision::PassThrough;
    }
    let Some(target) = resolve_href(href, current) else {
        return LinkDecision::PassThrough;
    };
    if !same_origin(&target, current) {
        return LinkDecision::PassThrough;
    }
    if target.path() == current.path() {
        return LinkDecision::SamePage;
    }
    LinkDecision::Intercept(target)
}
