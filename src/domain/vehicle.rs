//! Vehicle detail record extracted from a single detail page.
//!
//! Every field is optional: a key is only present when the page carried the
//! corresponding markup. Serialization skips absent fields entirely so the
//! exported JSON never contains `null` values.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Ordered label/value pairs from the vehicle-info definition list.
///
/// Insertion order is document order. A repeated label keeps the position of
/// its first occurrence and takes the value of its last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleSpecs {
    entries: Vec<(String, String)>,
}

impl VehicleSpecs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();

        if let Some(slot) = self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            slot.1 = value;
        } else {
            self.entries.push((label, value));
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(label, value)| (label.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for VehicleSpecs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut specs = Self::new();
        for (label, value) in iter {
            specs.insert(label, value);
        }
        specs
    }
}

impl Serialize for VehicleSpecs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

struct VehicleSpecsVisitor;

impl<'de> Visitor<'de> for VehicleSpecsVisitor {
    type Value = VehicleSpecs;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of spec labels to spec values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut specs = VehicleSpecs::new();
        while let Some((label, value)) = access.next_entry::<String, String>()? {
            specs.insert(label, value);
        }
        Ok(specs)
    }
}

impl<'de> Deserialize<'de> for VehicleSpecs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(VehicleSpecsVisitor)
    }
}

/// Fields scraped from one vehicle detail page.
///
/// The record carries no identity of its own; callers that need the source
/// URL keep it alongside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,

    /// Never `Some` with an empty map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<VehicleSpecs>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VehicleDetails {
    /// True when no recognized field was found.
    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }

    /// Number of top-level keys this record serializes to.
    pub fn field_count(&self) -> usize {
        [
            self.title.is_some(),
            self.price.is_some(),
            self.mileage.is_some(),
            self.vin.is_some(),
            self.specs.is_some(),
            self.description.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// `key: value` lines in serialization order, for console output.
    pub fn display_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.field_count());
        let scalar_fields = [
            ("title", &self.title),
            ("price", &self.price),
            ("mileage", &self.mileage),
            ("vin", &self.vin),
        ];

        for (key, value) in scalar_fields {
            if let Some(value) = value {
                lines.push(format!("{key}: {value}"));
            }
        }

        if let Some(specs) = &self.specs {
            let rendered = specs
                .iter()
                .map(|(label, value)| format!("{label}={value}"))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("specs: {rendered}"));
        }

        if let Some(description) = &self.description {
            lines.push(format!("description: {description}"));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let details = VehicleDetails {
            title: Some("2008 Ferrari F430".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&details).unwrap();
        assert_eq!(json, r#"{"title":"2008 Ferrari F430"}"#);
    }

    #[test]
    fn test_empty_record_serializes_to_empty_object() {
        let json = serde_json::to_string(&VehicleDetails::default()).unwrap();
        assert_eq!(json, "{}");
        assert!(VehicleDetails::default().is_empty());
    }

    #[test]
    fn test_specs_keep_document_order() {
        let specs: VehicleSpecs = [("Interior", "Tan"), ("Exterior", "Red"), ("Body", "Coupe")]
            .into_iter()
            .collect();

        let json = serde_json::to_string(&specs).unwrap();
        assert_eq!(json, r#"{"Interior":"Tan","Exterior":"Red","Body":"Coupe"}"#);
    }

    #[test]
    fn test_repeated_spec_label_overwrites_in_place() {
        let mut specs = VehicleSpecs::new();
        specs.insert("Exterior", "Red");
        specs.insert("Interior", "Tan");
        specs.insert("Exterior", "Rosso Corsa");

        assert_eq!(specs.len(), 2);
        assert_eq!(specs.iter().next(), Some(("Exterior", "Rosso Corsa")));
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let details = VehicleDetails {
            vin: Some("ZFFEW58A580160000".to_string()),
            specs: Some([("Exterior", "Red")].into_iter().collect()),
            ..Default::default()
        };

        let json = serde_json::to_string(&details).unwrap();
        let decoded: VehicleDetails = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, details);
        assert_eq!(decoded.field_count(), 2);
    }

    #[test]
    fn test_display_lines() {
        let details = VehicleDetails {
            title: Some("2008 Ferrari F430".to_string()),
            specs: Some([("Exterior", "Red"), ("Interior", "Tan")].into_iter().collect()),
            ..Default::default()
        };

        assert_eq!(
            details.display_lines(),
            vec![
                "title: 2008 Ferrari F430".to_string(),
                "specs: Exterior=Red, Interior=Tan".to_string(),
            ]
        );
    }
}
