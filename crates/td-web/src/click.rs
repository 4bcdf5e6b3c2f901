//! Which clicks the engine may take over from the browser.

/// The parts of a click event that decide whether it is a plain
/// same-tab activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    pub button: i16,
    pub meta: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl ClickModifiers {
    /// Primary button without modifier keys. Anything else opens tabs,
    /// windows or downloads and stays with the browser.
    pub fn is_plain(&self) -> bool {
        self.button == 0 && !self.meta && !self.ctrl && !self.shift && !self.alt
    }
}

/// Anchor attributes that send a link elsewhere than the current tab.
pub fn leaves_current_tab(target: Option<&str>, download: bool) -> bool {
    let opens_elsewhere = target
        .map(str::trim)
        .is_some_and(|target| !target.is_empty() && target != "_self");
    download || opens_elsewhere
}
