//! Catalog of known city labels, keyed by slug

use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::aggregates::CityMapping;
use crate::error::DomainError;
use crate::value_objects::{City, CitySlug};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CityCatalog {
    cities: BTreeMap<CitySlug, City>,
}

impl CityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a city. A second city with the same value is rejected.
    pub fn insert(&mut self, city: City) -> Result<(), DomainError> {
        if self.cities.contains_key(city.value()) {
            return Err(DomainError::constraint(format!(
                "City '{}' already exists",
                city.label()
            )));
        }
        self.cities.insert(city.value().clone(), city);
        Ok(())
    }

    /// Add a city unless its value is already present. Returns whether it was added.
    pub fn insert_if_absent(&mut self, city: City) -> bool {
        if self.cities.contains_key(city.value()) {
            return false;
        }
        self.cities.insert(city.value().clone(), city);
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.cities.contains_key(value)
    }

    pub fn get(&self, value: &str) -> Option<&City> {
        self.cities.get(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Union with a reference list; labels already in the catalog win.
    pub fn merge_reference<'a>(&mut self, reference: impl IntoIterator<Item = &'a City>) {
        for city in reference {
            self.insert_if_absent(city.clone());
        }
    }

    /// The catalog to persist: every tracked city plus any city referenced only by
    /// the mapping. `label_for` supplies a label for the latter.
    pub fn with_mapped_cities(
        &self,
        mapping: &CityMapping,
        label_for: impl Fn(&CitySlug) -> City,
    ) -> CityCatalog {
        let mut catalog = self.clone();
        for (slug, _) in mapping.iter() {
            if !catalog.contains(slug.as_str()) {
                catalog.insert_if_absent(label_for(slug));
            }
        }
        catalog
    }

    /// Cities ordered by label (case-insensitive), ties broken by value.
    pub fn sorted_by_label(&self) -> Vec<&City> {
        let mut cities: Vec<&City> = self.cities.values().collect();
        sort_cities_by_label(&mut cities);
        cities
    }
}

impl FromIterator<City> for CityCatalog {
    /// Later duplicates are ignored.
    fn from_iter<T: IntoIterator<Item = City>>(iter: T) -> Self {
        let mut catalog = CityCatalog::new();
        for city in iter {
            catalog.insert_if_absent(city);
        }
        catalog
    }
}

/// Sort cities the way admin screens list them.
pub fn sort_cities_by_label<C: Borrow<City>>(cities: &mut [C]) {
    cities.sort_by(|a, b| {
        let (a, b) = (a.borrow(), b.borrow());
        a.label()
            .to_lowercase()
            .cmp(&b.label().to_lowercase())
            .then_with(|| a.value().cmp(b.value()))
    });
}
