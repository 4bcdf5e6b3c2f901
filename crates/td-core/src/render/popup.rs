#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    Success,
    Error,
}

impl PopupKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Success => "fa fa-check",
            Self::Error => "fa fa-times",
        }
    }
}

/// The centered transient action popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupView {
    pub kind: PopupKind,
    pub title: String,
    pub message: String,
}

impl PopupView {
    /// `flash(level, message)`: success when the level mentions it.
    pub fn flash(level: &str, message: &str) -> Self {
        let kind = if level.contains("success") {
            PopupKind::Success
        } else {
            PopupKind::Error
        };
        let title = match kind {
            PopupKind::Success => "Success",
            PopupKind::Error => "Failed",
        };
        Self {
            kind,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    /// Upgrade a server-rendered `.alert` into a popup. Alerts that are
    /// neither success nor danger/error are shown as a neutral notice.
    pub fn from_alert(class_name: &str, text: &str) -> Self {
        let classes: Vec<&str> = class_name.split_whitespace().collect();
        let is_success = classes.contains(&"alert-success");
        let is_danger = classes.contains(&"alert-danger") || classes.contains(&"alert-error");
        let kind = if is_danger && !is_success {
            PopupKind::Error
        } else {
            PopupKind::Success
        };
        Self {
            kind,
            title: if is_success { "Success" } else { "Notice" }.to_string(),
            message: text.trim().to_string(),
        }
    }
}
