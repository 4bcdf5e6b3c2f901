//! Registration form behaviors that run in the page: the phone input mask,
//! customer-type dependent sections and the item/brand mapping.

use std::collections::HashMap;

/// Longest phone number the mask lets through.
pub const PHONE_MAX_DIGITS: usize = 13;

/// Keep digits only, at most [`PHONE_MAX_DIGITS`] of them.
pub fn mask_phone(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_MAX_DIGITS)
        .collect()
}

/// Optional sections of the identity step, by element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSection {
    Organization,
    Tax,
    PersonalSubtype,
}

impl TypeSection {
    pub const ALL: [TypeSection; 3] = [Self::Organization, Self::Tax, Self::PersonalSubtype];

    pub fn element_id(self) -> &'static str {
        match self {
            Self::Organization => "organization-field",
            Self::Tax => "tax-field",
            Self::PersonalSubtype => "personal-subtype-field",
        }
    }

    /// Tag of the control that becomes required when the section shows.
    pub fn required_control(self) -> &'static str {
        match self {
            Self::PersonalSubtype => "select",
            Self::Organization | Self::Tax => "input",
        }
    }
}

/// Sections shown (and made required) for a `customer_type` value. Every
/// other section is hidden and loses `required`.
pub fn visible_sections(customer_type: &str) -> &'static [TypeSection] {
    match customer_type {
        "personal" => &[TypeSection::PersonalSubtype],
        "government" | "ngo" | "company" => &[TypeSection::Organization, TypeSection::Tax],
        _ => &[],
    }
}

/// Item name → brand, read from the item select's `data-brands` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandMapping(HashMap<String, String>);

impl BrandMapping {
    /// Invalid or missing JSON yields an empty mapping.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|raw| serde_json::from_str(raw).ok())
            .map(Self)
            .unwrap_or_default()
    }

    /// Index of the brand option matching the item, by text or value.
    pub fn option_for<'a>(
        &self,
        item: &str,
        options: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Option<usize> {
        let brand = self.0.get(item)?;
        options
            .into_iter()
            .position(|(text, value)| text == brand || value == brand)
    }
}
