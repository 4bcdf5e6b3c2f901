//! Header notification summary: wire model and display helpers.

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NotificationCounts {
    #[serde(default)]
    pub today_visitors: u64,
    #[serde(default)]
    pub low_stock: u64,
    #[serde(default)]
    pub overdue_orders: u64,
    #[serde(default)]
    pub total: Option<u64>,
}

impl NotificationCounts {
    /// Badge total: the sum of the three categories.
    pub fn badge_total(&self) -> u64 {
        self.today_visitors + self.low_stock + self.overdue_orders
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VisitorItem {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LowStockItem {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub quantity: i64,
}

impl LowStockItem {
    pub fn brand_label(&self) -> &str {
        self.brand
            .as_deref()
            .filter(|brand| !brand.is_empty())
            .unwrap_or("Unbranded")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OverdueOrder {
    pub id: i64,
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub age_minutes: Option<i64>,
}

impl OverdueOrder {
    pub fn status_label(&self) -> String {
        self.status.replace('_', " ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NotificationItems {
    #[serde(default)]
    pub today_visitors: Vec<VisitorItem>,
    #[serde(default)]
    pub low_stock: Vec<LowStockItem>,
    #[serde(default)]
    pub overdue_orders: Vec<OverdueOrder>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NotificationSummary {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub counts: NotificationCounts,
    #[serde(default)]
    pub items: NotificationItems,
}

/// `45m`, `2h`, `2h 5m`; empty when unknown.
pub fn minutes_to_pretty(minutes: Option<i64>) -> String {
    match minutes {
        None => String::new(),
        Some(m) if m < 60 => format!("{m}m"),
        Some(m) => {
            let (hours, rest) = (m / 60, m % 60);
            if rest == 0 {
                format!("{hours}h")
            } else {
                format!("{hours}h {rest}m")
            }
        }
    }
}

/// `HH:MM` of an ISO timestamp, in the offset it was sent with.
pub fn clock_time(iso: Option<&str>) -> String {
    let Some(iso) = iso.map(str::trim).filter(|iso| !iso.is_empty()) else {
        return String::new();
    };
    if let Ok(time) = DateTime::parse_from_rfc3339(iso) {
        return time.format("%H:%M").to_string();
    }
    NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|time| time.format("%H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_minutes() {
        assert_eq!(minutes_to_pretty(None), "");
        assert_eq!(minutes_to_pretty(Some(45)), "45m");
        assert_eq!(minutes_to_pretty(Some(120)), "2h");
        assert_eq!(minutes_to_pretty(Some(125)), "2h 5m");
    }

    #[test]
    fn clock_time_keeps_sender_offset() {
        assert_eq!(clock_time(Some("2024-05-01T09:07:00+03:00")), "09:07");
        assert_eq!(clock_time(Some("2024-05-01T18:30:12.123456")), "18:30");
        assert_eq!(clock_time(Some("yesterday")), "");
        assert_eq!(clock_time(None), "");
    }

    #[test]
    fn summary_parses_server_payload() {
        let summary: NotificationSummary = serde_json::from_str(
            r#"{"success":true,
                "counts":{"today_visitors":2,"low_stock":1,"overdue_orders":0,"total":3},
                "items":{"today_visitors":[{"id":1,"name":"Ada","code":"C1","time":null}],
                         "low_stock":[{"id":4,"name":"Filter","brand":"","quantity":2}],
                         "overdue_orders":[]}}"#,
        )
        .unwrap();
        assert!(summary.success);
        assert_eq!(summary.counts.badge_total(), 3);
        assert_eq!(summary.items.low_stock[0].brand_label(), "Unbranded");
        assert_eq!(summary.items.today_visitors[0].time, None);
    }

    #[test]
    fn status_underscores_become_spaces() {
        let order = OverdueOrder {
            id: 1,
            order_number: "O-1".into(),
            customer: "Ada".into(),
            status: "in_progress".into(),
            age_minutes: Some(90),
        };
        assert_eq!(order.status_label(), "in progress");
    }
}
