use super::node::{Element, Node};

/// Severity of an inline notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NoticeKind {
    /// Map a server `message_type`; anything unknown is informational.
    pub fn from_level(level: &str) -> Self {
        match level.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "error" | "danger" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Success => "fa-check-circle",
            Self::Error => "fa-times-circle",
            Self::Warning => "fa-exclamation-triangle",
            Self::Info => "fa-info-circle",
        }
    }
}

/// Dismissible alert prepended to the wizard container.
pub fn render_notice(kind: NoticeKind, message: &str) -> Node {
    Element::new("div")
        .class(format!(
            "alert alert-{} alert-dismissible fade show d-flex align-items-center",
            kind.as_str()
        ))
        .attr("role", "alert")
        .child(Element::new("i").class(format!("fa {} me-2", kind.icon())))
        .child(Element::new("div").text(message))
        .child(
            Element::new("button")
                .attr("type", "button")
                .class("btn-close ms-auto")
                .attr("data-bs-dismiss", "alert")
                .attr("aria-label", "Close"),
        )
        .into()
}
