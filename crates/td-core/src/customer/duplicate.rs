use serde::{Deserialize, Serialize};

use crate::draft::FormField;

/// Identity fields sent to the duplicate-customer endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateQuery {
    pub full_name: String,
    pub phone: String,
    pub customer_type: String,
    pub organization_name: String,
    pub tax_number: String,
}

impl DuplicateQuery {
    /// Build from the current step's fields. `None` when the name or the
    /// phone is blank: the check is skipped.
    pub fn from_fields(fields: &[FormField]) -> Option<Self> {
        let value = |name: &str| FormField::value_of(fields, name).unwrap_or("").to_string();
        let query = Self {
            full_name: value("full_name"),
            phone: value("phone"),
            customer_type: value("customer_type"),
            organization_name: value("organization_name"),
            tax_number: value("tax_number"),
        };
        (!query.full_name.is_empty() && !query.phone.is_empty()).then_some(query)
    }

    pub fn query_pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("full_name", &self.full_name),
            ("phone", &self.phone),
            ("customer_type", &self.customer_type),
            ("organization_name", &self.organization_name),
            ("tax_number", &self.tax_number),
        ]
    }
}

/// An existing customer matching the submitted identity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DuplicateCustomer {
    pub id: i64,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub customer_type: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub tax_number: Option<String>,
    #[serde(default)]
    pub total_visits: Option<i64>,
    #[serde(default)]
    pub last_visit: Option<String>,
    #[serde(default)]
    pub detail_url: Option<String>,
    #[serde(default)]
    pub create_order_url: Option<String>,
}

impl DuplicateCustomer {
    pub fn detail_href(&self) -> String {
        self.detail_url
            .clone()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| format!("/customers/{}/", self.id))
    }

    pub fn create_order_href(&self) -> String {
        self.create_order_url
            .clone()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| format!("/customers/{}/order/new/", self.id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct DuplicateCheckResponse {
    #[serde(default)]
    pub exists: bool,
    #[serde(default)]
    pub customer: Option<DuplicateCustomer>,
}

impl DuplicateCheckResponse {
    pub fn into_match(self) -> Option<DuplicateCustomer> {
        if self.exists {
            self.customer
        } else {
            None
        }
    }
}
