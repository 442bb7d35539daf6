//! Detail-page URLs derived from feed records.

use std::fmt;

use super::inventory_feed::RawVehicle;

/// Canonical detail-page URL of one vehicle.
///
/// Built as `{origin}/inventory/{make-slug}/{model-slug}/{stock}/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleLink {
    url: String,
}

impl VehicleLink {
    pub fn new(origin: &str, make: &str, model: &str, stock_number: &str) -> Self {
        let url = format!(
            "{}/inventory/{}/{}/{}/",
            origin.trim_end_matches('/'),
            slugify(make),
            slugify(model),
            stock_number
        );
        Self { url }
    }

    pub fn from_vehicle(origin: &str, vehicle: &RawVehicle) -> Self {
        Self::new(origin, &vehicle.make, &vehicle.model, &vehicle.stock_number)
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl From<VehicleLink> for String {
    fn from(link: VehicleLink) -> Self {
        link.url
    }
}

impl AsRef<str> for VehicleLink {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for VehicleLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Lowercase `value`, collapse every run of characters outside `[a-z0-9]`
/// into one hyphen, and drop leading and trailing hyphens.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;

    for ch in value.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
