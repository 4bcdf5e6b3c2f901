//! Typed views for the widgets.
//!
//! Markup is built as a [`Node`] tree; text and attribute values are
//! escaped on serialization so server data never becomes markup.

pub mod modal;
pub mod node;
pub mod notice;
pub mod notifications;
pub mod popup;
pub mod search;

pub use modal::DuplicateModalView;
pub use node::{Element, Node};
pub use notice::{render_notice, NoticeKind};
pub use notifications::{BadgeView, NotificationView};
pub use popup::{PopupKind, PopupView};
pub use search::render_search_results;
