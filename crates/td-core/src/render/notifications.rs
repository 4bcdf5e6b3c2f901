use crate::notifications::{
    clock_time, minutes_to_pretty, LowStockItem, NotificationSummary, OverdueOrder, VisitorItem,
};

use super::node::{Element, Node};

/// A count badge in the header or the dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeView {
    pub text: String,
    pub visible: bool,
    pub error: bool,
}

impl BadgeView {
    pub fn count(count: u64) -> Self {
        Self {
            text: count.to_string(),
            visible: count > 0,
            error: false,
        }
    }

    /// Shown when the summary could not be fetched.
    pub fn failed() -> Self {
        Self {
            text: "!".to_string(),
            visible: true,
            error: true,
        }
    }
}

/// Everything the notification widget displays after a successful poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub total: BadgeView,
    pub today_visitors: BadgeView,
    pub low_stock: BadgeView,
    pub overdue_orders: BadgeView,
    pub dropdown: Vec<Node>,
}

impl NotificationView {
    pub fn from_summary(summary: &NotificationSummary) -> Self {
        let counts = &summary.counts;
        let items = &summary.items;
        let dropdown = vec![
            section_header("Today's Visitors", "badge bg-primary", counts.today_visitors),
            list(
                "list-unstyled mb-3",
                items.today_visitors.iter().map(visitor_row),
                "No recent visitors",
            ),
            section_header("Low Stock", "badge bg-warning text-dark", counts.low_stock),
            list(
                "list-unstyled mb-3",
                items.low_stock.iter().map(low_stock_row),
                "No low stock items",
            ),
            section_header("Overdue Orders", "badge bg-danger", counts.overdue_orders),
            list(
                "list-unstyled mb-0",
                items.overdue_orders.iter().map(overdue_row),
                "No overdue orders",
            ),
        ];

        Self {
            total: BadgeView::count(counts.badge_total()),
            today_visitors: BadgeView::count(counts.today_visitors),
            low_stock: BadgeView::count(counts.low_stock),
            overdue_orders: BadgeView::count(counts.overdue_orders),
            dropdown,
        }
    }

    pub fn dropdown_html(&self) -> String {
        self.dropdown.iter().map(Node::to_html).collect()
    }
}

fn section_header(title: &str, badge_class: &str, count: u64) -> Node {
    Element::new("div")
        .class("mb-2 d-flex justify-content-between")
        .child(Element::new("span").class("f-w-600").text(title))
        .child(Element::new("span").class(badge_class).text(count.to_string()))
        .into()
}

fn list(class: &str, rows: impl Iterator<Item = Node>, placeholder: &str) -> Node {
    let mut rows = rows.peekable();
    let ul = Element::new("ul").class(class);
    let ul = if rows.peek().is_some() {
        ul.children(rows)
    } else {
        ul.child(Element::new("li").class("text-muted f-12").text(placeholder))
    };
    ul.into()
}

fn visitor_row(visitor: &VisitorItem) -> Node {
    Element::new("li")
        .class("mb-1")
        .child(
            Element::new("a")
                .class("f-light f-w-500")
                .attr("href", format!("/customers/{}/", visitor.id))
                .text(visitor.name.as_str()),
        )
        .text(" ")
        .child(
            Element::new("span")
                .class("f-12 text-muted")
                .text(clock_time(visitor.time.as_deref())),
        )
        .into()
}

fn low_stock_row(item: &LowStockItem) -> Node {
    Element::new("li")
        .class("mb-1")
        .child(
            Element::new("span")
                .class("f-light f-w-500")
                .text(format!("{} ({})", item.name, item.brand_label())),
        )
        .text(" ")
        .child(
            Element::new("span")
                .class("badge bg-light text-dark")
                .text(item.quantity.to_string()),
        )
        .into()
}

fn overdue_row(order: &OverdueOrder) -> Node {
    Element::new("li")
        .class("mb-1")
        .child(
            Element::new("a")
                .class("f-light f-w-500")
                .attr("href", format!("/orders/{}/", order.id))
                .text(order.order_number.as_str()),
        )
        .text(" ")
        .child(Element::new("span").class("f-12 text-muted").text(format!(
            "{} \u{2022} {} \u{2022} {}",
            order.customer,
            order.status_label(),
            minutes_to_pretty(order.age_minutes)
        )))
        .into()
}
