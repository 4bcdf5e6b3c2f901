use crate::customer::DuplicateCustomer;

fn or_dash(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or("-")
        .to_string()
}

fn or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Contents of the existing-customer modal, keyed by the element ids of
/// the server-rendered modal. Values are assigned as text, never markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateModalView {
    pub fields: Vec<(&'static str, String)>,
    pub view_href: String,
    pub create_order_href: String,
}

impl DuplicateModalView {
    pub const MODAL_ID: &'static str = "existingCustomerModal";
    pub const VIEW_BUTTON_ID: &'static str = "existingCustomerViewBtn";
    pub const CREATE_ORDER_BUTTON_ID: &'static str = "existingCustomerCreateOrderBtn";

    pub fn from_customer(customer: &DuplicateCustomer) -> Self {
        let customer_type = customer
            .customer_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("personal")
            .to_string();
        let visits = customer
            .total_visits
            .map(|visits| visits.to_string())
            .unwrap_or_else(|| "-".to_string());

        Self {
            fields: vec![
                ("existingCustomerName", or_empty(&customer.full_name)),
                ("existingCustomerCode", or_empty(&customer.code)),
                ("existingCustomerPhone", or_empty(&customer.phone)),
                ("existingCustomerType", customer_type),
                ("existingCustomerOrg", or_dash(&customer.organization_name)),
                ("existingCustomerTax", or_dash(&customer.tax_number)),
                ("existingCustomerEmail", or_dash(&customer.email)),
                ("existingCustomerVisits", visits),
                ("existingCustomerAddress", or_dash(&customer.address)),
            ],
            view_href: customer.detail_href(),
            create_order_href: customer.create_order_href(),
        }
    }

    pub fn field(&self, id: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field_id, _)| *field_id == id)
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_get_placeholders() {
        let view = DuplicateModalView::from_customer(&DuplicateCustomer {
            id: 5,
            full_name: Some("Ada".into()),
            total_visits: Some(0),
            ..Default::default()
        });
        assert_eq!(view.field("existingCustomerName"), Some("Ada"));
        assert_eq!(view.field("existingCustomerType"), Some("personal"));
        assert_eq!(view.field("existingCustomerOrg"), Some("-"));
        assert_eq!(view.field("existingCustomerVisits"), Some("0"));
        assert_eq!(view.field("existingCustomerCode"), Some(""));
        assert_eq!(view.view_href, "/customers/5/");
        assert_eq!(view.create_order_href, "/customers/5/order/new/");
    }
}
