//! Static reference data for one jurisdiction.
//!
//! Read-only. Used to pre-populate the bulk-add picker and to label city values
//! that are not yet in the stored catalog.

mod ontario;

use std::sync::OnceLock;

use crate::value_objects::{City, CitySlug};

static REFERENCE_CITIES: OnceLock<Vec<City>> = OnceLock::new();

/// Every reference city, in the order of the source list.
pub fn reference_cities() -> &'static [City] {
    REFERENCE_CITIES.get_or_init(|| {
        ontario::ONTARIO_CITY_LABELS
            .iter()
            .filter_map(|label| City::from_label(*label).ok())
            .collect()
    })
}

/// Look up a reference city by slug.
pub fn reference_city(value: &str) -> Option<&'static City> {
    reference_cities()
        .iter()
        .find(|city| city.value().as_str() == value)
}

/// Best available label for a slug: the reference entry, else the slug itself.
pub fn resolve_city(value: &CitySlug) -> City {
    reference_city(value.as_str())
        .cloned()
        .unwrap_or_else(|| City::from_slug(value.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::RESERVED_CITY_SLUG;

    #[test]
    fn every_reference_label_slugifies() {
        assert_eq!(reference_cities().len(), ontario::ONTARIO_CITY_LABELS.len());
    }

    #[test]
    fn reference_values_are_unique_and_not_reserved() {
        let mut values: Vec<_> = reference_cities().iter().map(|c| c.value().as_str()).collect();
        values.sort_unstable();
        let before = values.len();
        values.dedup();
        assert_eq!(values.len(), before);
        assert!(!values.contains(&RESERVED_CITY_SLUG));
    }

    #[test]
    fn resolve_city_prefers_reference_label() {
        let slug = CitySlug::new("sault-ste-marie").unwrap();
        assert_eq!(resolve_city(&slug).label(), "Sault Ste. Marie");

        let slug = CitySlug::new("kanata").unwrap();
        assert_eq!(resolve_city(&slug).label(), "kanata");
    }
}
