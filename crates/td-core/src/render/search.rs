use crate::customer::CustomerHit;

use super::node::{Element, Node};

/// Result list of the header customer search.
pub fn render_search_results(hits: &[CustomerHit]) -> Node {
    let group = Element::new("div").class("list-group list-group-flush");
    let group = if hits.is_empty() {
        group.child(
            Element::new("div")
                .class("list-group-item text-muted")
                .text("No results"),
        )
    } else {
        group.children(hits.iter().map(hit_row))
    };
    Element::new("div").class("card-body p-0").child(group).into()
}

fn hit_row(hit: &CustomerHit) -> Node {
    Element::new("a")
        .class("list-group-item list-group-item-action d-flex justify-content-between align-items-center")
        .attr("href", hit.href())
        .child(
            Element::new("span")
                .text(hit.name.clone().unwrap_or_default())
                .text(" ")
                .child(
                    Element::new("small")
                        .class("text-muted")
                        .text(hit.code.clone().unwrap_or_default()),
                ),
        )
        .child(
            Element::new("small")
                .class("badge bg-light text-dark text-capitalize")
                .text(hit.kind_label()),
        )
        .into()
}
