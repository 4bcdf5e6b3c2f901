use td_core::navigation::{ActiveMarker, SidebarAnchor};
use td_core::ports::SidebarPort;
use web_sys::Element;

use super::WebPage;

fn add_active(element: Option<Element>) {
    if let Some(element) = element {
        let _ = element.class_list().add_1("active");
    }
}

impl WebPage {
    fn sidebar_anchors(&self) -> Vec<Element> {
        self.query_all(&format!("{} a", self.sidebar_selector()))
    }
}

impl SidebarPort for WebPage {
    fn anchors(&self) -> Vec<SidebarAnchor> {
        self.sidebar_anchors()
            .into_iter()
            .enumerate()
            .map(|(index, anchor)| SidebarAnchor {
                index,
                href: anchor.get_attribute("href"),
                in_submenu: anchor.closest(".sidebar-submenu").ok().flatten().is_some(),
            })
            .collect()
    }

    fn clear_active(&self) {
        for item in self.query_all(".sidebar-links li.active") {
            let _ = item.class_list().remove_1("active");
        }
    }

    fn mark_active(&self, marker: &ActiveMarker) {
        let Some(anchor) = self.sidebar_anchors().into_iter().nth(marker.anchor) else {
            return;
        };
        add_active(anchor.closest("li").ok().flatten());
        if marker.expand_submenu {
            let owner = anchor
                .closest(".sidebar-submenu")
                .ok()
                .flatten()
                .and_then(|submenu| submenu.closest("li").ok().flatten());
            add_active(owner);
        }
    }
}
