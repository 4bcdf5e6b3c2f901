use crate::navigation::{ActiveMarker, SidebarAnchor};

pub trait SidebarPort {
    /// Every anchor inside the sidebar, in document order.
    fn anchors(&self) -> Vec<SidebarAnchor>;

    /// Remove every active marker from anchors and list items.
    fn clear_active(&self);

    fn mark_active(&self, marker: &ActiveMarker);
}
