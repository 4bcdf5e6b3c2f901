use td_core::ports::WidgetPort;
use td_core::render::{BadgeView, Node, NotificationView};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use super::{set_display, WebPage};

const HEADER_BADGE: &str = ".notification-box .badge";
const DROPDOWN_BAR: &str = ".notification-dropdown .notitications-bar";
const SEARCH_BOX_ID: &str = "global-search-results";
const FAILURE_COLOR: &str = "#dc3545";

fn apply_badge(element: &Element, badge: &BadgeView) {
    element.set_text_content(Some(&badge.text));
    set_display(element, if badge.visible { "inline-block" } else { "none" });
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let style = element.style();
        let _ = if badge.error {
            style.set_property("background-color", FAILURE_COLOR)
        } else {
            style.remove_property("background-color").map(drop)
        };
    }
}

impl WebPage {
    fn header_badge(&self) -> Option<Element> {
        if let Some(badge) = self.query(HEADER_BADGE) {
            return Some(badge);
        }
        let container = self.query(".notification-box")?;
        let badge = self.document().create_element("span").ok()?;
        badge.set_class_name("badge rounded-pill badge-secondary");
        container.append_child(&badge).ok()?;
        Some(badge)
    }

    fn search_box(&self) -> Option<Element> {
        if let Some(found) = self.document().get_element_by_id(SEARCH_BOX_ID) {
            return Some(found);
        }
        let created = self.document().create_element("div").ok()?;
        created.set_id(SEARCH_BOX_ID);
        created.set_class_name("card shadow");
        let _ = created.set_attribute(
            "style",
            "position:absolute;top:56px;right:16px;z-index:1050;min-width:280px;",
        );
        self.document().body()?.append_child(&created).ok()?;
        Some(created)
    }
}

impl WidgetPort for WebPage {
    fn render_notifications(&self, view: &NotificationView) {
        self.show_notification_badge(&view.total);
        let rows = [&view.today_visitors, &view.low_stock, &view.overdue_orders];
        for (position, badge) in rows.into_iter().enumerate() {
            let selector = format!(
                ".notification-dropdown .list-group-item:nth-child({}) .badge",
                position + 1
            );
            if let Some(element) = self.query(&selector) {
                apply_badge(&element, badge);
            }
        }
        if let Some(bar) = self.query(DROPDOWN_BAR) {
            bar.set_inner_html(&view.dropdown_html());
        }
    }

    fn show_notification_badge(&self, badge: &BadgeView) {
        if let Some(element) = self.header_badge() {
            apply_badge(&element, badge);
        }
    }

    fn render_search(&self, results: Option<&Node>) {
        match results {
            Some(results) => {
                if let Some(search_box) = self.search_box() {
                    search_box.set_inner_html(&results.to_html());
                    set_display(&search_box, "block");
                }
            }
            None => {
                if let Some(search_box) = self.document().get_element_by_id(SEARCH_BOX_ID) {
                    set_display(&search_box, "none");
                }
            }
        }
    }
}
