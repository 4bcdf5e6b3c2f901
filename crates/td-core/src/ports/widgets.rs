use crate::render::{BadgeView, Node, NotificationView};

/// Header widgets refreshed in the background.
pub trait WidgetPort {
    fn render_notifications(&self, view: &NotificationView);

    /// Replace only the header badge, leaving the dropdown untouched.
    fn show_notification_badge(&self, badge: &BadgeView);

    /// Show the search results box with `results`, or hide it on `None`.
    fn render_search(&self, results: Option<&Node>);
}
