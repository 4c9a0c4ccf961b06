//! RegionConfiguration aggregate - regions, city mappings and the city catalog
//!
//! The three parts are edited together: renaming or deleting a region has to
//! rewrite the mapping in the same step, and a custom city is catalogued and
//! mapped at once.
//!
//! # Invariants
//!
//! - Every region-list invariant from [`RegionList`] holds
//! - Mutations never introduce a mapping to a region missing from the list
//! - Deleting a region unmaps its cities; they are never reassigned

use serde::Serialize;

use crate::aggregates::{CityCatalog, CityMapping, RegionList};
use crate::error::DomainError;
use crate::events::{CityAssignment, RegionRemoved, RegionRenameOutcome};
use crate::reference;
use crate::value_objects::{City, CitySlug, MapTarget, RegionName};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionConfiguration {
    regions: RegionList,
    mappings: CityMapping,
    cities: CityCatalog,
}

impl RegionConfiguration {
    /// Assemble a configuration from loaded parts.
    ///
    /// Mappings that point at regions missing from `regions` are kept as-is; the
    /// store rejects them on the next save.
    pub fn new(regions: RegionList, mappings: CityMapping, cities: CityCatalog) -> Self {
        Self {
            regions,
            mappings,
            cities,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn regions(&self) -> &RegionList {
        &self.regions
    }

    pub fn mappings(&self) -> &CityMapping {
        &self.mappings
    }

    pub fn cities(&self) -> &CityCatalog {
        &self.cities
    }

    pub fn city_count_in(&self, region: &str) -> usize {
        self.mappings.count_in(region)
    }

    /// Catalog to persist: tracked cities plus any city known only via the mapping.
    pub fn catalog_for_save(&self) -> CityCatalog {
        self.cities
            .with_mapped_cities(&self.mappings, reference::resolve_city)
    }

    // =========================================================================
    // Region edits
    // =========================================================================

    pub fn add_region(&mut self, name: RegionName) -> Result<(), DomainError> {
        self.regions.add(name)
    }

    /// Rename a region and rewrite every mapping that pointed at it.
    pub fn rename_region(
        &mut self,
        old: &str,
        new: RegionName,
    ) -> Result<RegionRenameOutcome, DomainError> {
        match self.regions.rename(old, new)? {
            RegionRenameOutcome::Unchanged => Ok(RegionRenameOutcome::Unchanged),
            RegionRenameOutcome::Renamed { from, to, .. } => {
                let remapped = self.mappings.rename_region(&from, &to);
                Ok(RegionRenameOutcome::Renamed { from, to, remapped })
            }
        }
    }

    /// Remove a region. Its cities become unmapped.
    ///
    /// Released cities that were known only through the mapping are added to the
    /// catalog so they stay listed (and persisted) as unmapped.
    pub fn remove_region(&mut self, name: &str) -> Result<RegionRemoved, DomainError> {
        let name = self.regions.remove(name)?;
        let unmapped = self.mappings.unmap_region(name.as_str());
        for slug in &unmapped {
            self.cities.insert_if_absent(reference::resolve_city(slug));
        }
        Ok(RegionRemoved { name, unmapped })
    }

    // =========================================================================
    // City edits
    // =========================================================================

    /// Point a city at a region or unmap it.
    pub fn assign_city(
        &mut self,
        city: CitySlug,
        target: MapTarget,
    ) -> Result<CityAssignment, DomainError> {
        self.ensure_target_exists(&target)?;
        Ok(self.mappings.assign(city, target))
    }

    /// Catalogue an admin-entered city and map it to `target`.
    pub fn add_custom_city(&mut self, label: &str, target: MapTarget) -> Result<City, DomainError> {
        let city = City::custom(label)?;
        self.ensure_target_exists(&target)?;
        self.cities.insert(city.clone())?;
        self.mappings.assign(city.value().clone(), target);
        Ok(city)
    }

    /// Catalogue any missing cities and map every one of them to `target`.
    ///
    /// Returns the number of mappings that changed.
    pub fn add_cities(
        &mut self,
        cities: impl IntoIterator<Item = City>,
        target: MapTarget,
    ) -> Result<usize, DomainError> {
        self.ensure_target_exists(&target)?;
        let mut changed = 0;
        for city in cities {
            let slug = city.value().clone();
            self.cities.insert_if_absent(city);
            if self.mappings.assign(slug, target.clone()).is_change() {
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Move cities currently in `source` to `target`.
    ///
    /// Cities that are not mapped to `source` are skipped. Returns the moved cities.
    pub fn move_cities(
        &mut self,
        source: &str,
        cities: impl IntoIterator<Item = CitySlug>,
        target: &RegionName,
    ) -> Result<Vec<CitySlug>, DomainError> {
        if *target == *source {
            return Err(DomainError::constraint(
                "Target region must differ from the source region",
            ));
        }
        let target = MapTarget::Region(target.clone());
        self.ensure_target_exists(&target)?;

        let mut moved = Vec::new();
        for city in cities {
            if self.mappings.get(city.as_str()).is_some_and(|r| *r == *source) {
                self.mappings.assign(city.clone(), target.clone());
                moved.push(city);
            }
        }
        Ok(moved)
    }

    fn ensure_target_exists(&self, target: &MapTarget) -> Result<(), DomainError> {
        match target.region() {
            Some(region) if !self.regions.contains(region.as_str()) => {
                Err(DomainError::not_found("Region", region.as_str()))
            }
            _ => Ok(()),
        }
    }
}
