// Exact-match attribute filter
use serde_json::Value;
use std::collections::BTreeMap;
use crate::CatalogItem;

pub trait Filter {
    fn matches(&self, item: &CatalogItem) -> bool;
}

/// Attribute name to expected value, all of which must hold.
///
/// An empty filter matches every item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeFilter {
    conditions: BTreeMap<String, Value>,
}

impl AttributeFilter {
    pub fn new(conditions: BTreeMap<String, Value>) -> Self {
        Self { conditions }
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: Value) -> Self {
        self.conditions.insert(field.into(), value);
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &BTreeMap<String, Value> {
        &self.conditions
    }
}

impl From<BTreeMap<String, Value>> for AttributeFilter {
    fn from(conditions: BTreeMap<String, Value>) -> Self {
        Self::new(conditions)
    }
}

impl Filter for AttributeFilter {
    fn matches(&self, item: &CatalogItem) -> bool {
        self.conditions.iter().all(|(field, expected)| {
            item.attribute(field)
                .map(|actual| &actual == expected)
                .unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sofa() -> CatalogItem {
        CatalogItem::new("s1", "Velvet Sofa", "Sofa", "Modern")
            .with_room_type("Living Room")
            .with_attribute("Is_Accessory", json!(false))
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(AttributeFilter::default().matches(&sofa()));
    }

    #[test]
    fn test_all_conditions_must_hold() {
        let filter = AttributeFilter::default()
            .with("Style", json!("Modern"))
            .with("Room_Type", json!("Living Room"));
        assert!(filter.matches(&sofa()));

        let filter = filter.with("Is_Accessory", json!(true));
        assert!(!filter.matches(&sofa()));
    }

    #[test]
    fn test_values_compare_exactly() {
        let filter = AttributeFilter::default().with("style", json!("modern"));
        assert!(!filter.matches(&sofa()));
    }

    #[test]
    fn test_missing_attribute_does_not_match() {
        let filter = AttributeFilter::default().with("material", json!("Oak"));
        assert!(!filter.matches(&sofa()));
    }
}
