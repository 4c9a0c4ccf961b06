//! City-to-region mapping
//!
//! Absence of a key means the city is unmapped and resolves to `Unknown`.
//! The sentinel itself is never stored as a value.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::aggregates::RegionList;
use crate::events::CityAssignment;
use crate::value_objects::{CitySlug, MapTarget, RegionName};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CityMapping {
    entries: BTreeMap<CitySlug, RegionName>,
}

impl CityMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, city: &str) -> Option<&RegionName> {
        self.entries.get(city)
    }

    pub fn contains(&self, city: &str) -> bool {
        self.entries.contains_key(city)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CitySlug, &RegionName)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Point a city at a region, or remove its entry.
    ///
    /// Assigning to `Unknown` is the same as unmapping.
    pub fn assign(&mut self, city: CitySlug, target: MapTarget) -> CityAssignment {
        let target = match target {
            MapTarget::Region(region) if !region.is_unknown() => Some(region),
            _ => None,
        };

        match target {
            Some(to) => {
                if self.entries.get(&city) == Some(&to) {
                    return CityAssignment::Unchanged { city };
                }
                let from = self.entries.insert(city.clone(), to.clone());
                CityAssignment::Assigned { city, from, to }
            }
            None => match self.entries.remove(&city) {
                Some(from) => CityAssignment::Unmapped { city, from },
                None => CityAssignment::Unchanged { city },
            },
        }
    }

    /// Rewrite every entry pointing at `from` to point at `to`. Returns the count.
    pub fn rename_region(&mut self, from: &RegionName, to: &RegionName) -> usize {
        let mut count = 0;
        for region in self.entries.values_mut() {
            if *region == *from {
                *region = to.clone();
                count += 1;
            }
        }
        count
    }

    /// Drop every entry pointing at `region`, returning the released cities.
    pub fn unmap_region(&mut self, region: &str) -> Vec<CitySlug> {
        let released: Vec<CitySlug> = self.cities_in(region).cloned().collect();
        for city in &released {
            self.entries.remove(city);
        }
        released
    }

    pub fn cities_in<'a>(&'a self, region: &'a str) -> impl Iterator<Item = &'a CitySlug> + 'a {
        self.entries
            .iter()
            .filter(move |(_, r)| *r == region)
            .map(|(city, _)| city)
    }

    pub fn count_in(&self, region: &str) -> usize {
        self.cities_in(region).count()
    }

    /// Region names referenced by this mapping that are missing from `regions`.
    pub fn undefined_regions(&self, regions: &RegionList) -> BTreeSet<RegionName> {
        self.entries
            .values()
            .filter(|region| !regions.contains(region.as_str()))
            .cloned()
            .collect()
    }

    /// Region a city routes to; `Unknown` when unmapped or mapped to a stale region.
    pub fn resolve(&self, city: &str, regions: &RegionList) -> RegionName {
        self.entries
            .get(city)
            .filter(|region| regions.contains(region.as_str()))
            .cloned()
            .unwrap_or_else(RegionName::unknown)
    }

    pub fn to_string_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(city, region)| (city.as_str().to_string(), region.as_str().to_string()))
            .collect()
    }
}

impl FromIterator<(CitySlug, RegionName)> for CityMapping {
    fn from_iter<T: IntoIterator<Item = (CitySlug, RegionName)>>(iter: T) -> Self {
        let entries = iter
            .into_iter()
            .filter(|(_, region)| !region.is_unknown())
            .collect();
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(s: &str) -> CitySlug {
        CitySlug::new(s).unwrap()
    }

    fn region(s: &str) -> RegionName {
        RegionName::new(s).unwrap()
    }

    fn mapping(pairs: &[(&str, &str)]) -> CityMapping {
        pairs.iter().map(|(c, r)| (slug(c), region(r))).collect()
    }

    #[test]
    fn assign_upserts() {
        let mut m = CityMapping::new();
        let outcome = m.assign(slug("toronto"), MapTarget::Region(region("GTA")));
        assert!(matches!(outcome, CityAssignment::Assigned { from: None, .. }));

        let outcome = m.assign(slug("toronto"), MapTarget::Region(region("Central")));
        assert!(matches!(outcome, CityAssignment::Assigned { from: Some(_), .. }));
        assert_eq!(m.get("toronto"), Some(&region("Central")));
    }

    #[test]
    fn assign_same_region_is_unchanged() {
        let mut m = mapping(&[("toronto", "GTA")]);
        let outcome = m.assign(slug("toronto"), MapTarget::Region(region("GTA")));
        assert!(!outcome.is_change());
    }

    #[test]
    fn assign_unmapped_removes_entry() {
        let mut m = mapping(&[("toronto", "GTA")]);
        let outcome = m.assign(slug("toronto"), MapTarget::Unmapped);
        assert!(matches!(outcome, CityAssignment::Unmapped { .. }));
        assert!(m.is_empty());
    }

    #[test]
    fn assign_to_unknown_unmaps() {
        let mut m = mapping(&[("toronto", "GTA")]);
        m.assign(slug("toronto"), MapTarget::Region(RegionName::unknown()));
        assert!(!m.contains("toronto"));
    }

    #[test]
    fn from_iter_drops_unknown_values() {
        let m: CityMapping = vec![(slug("toronto"), RegionName::unknown())]
            .into_iter()
            .collect();
        assert!(m.is_empty());
    }

    #[test]
    fn rename_region_rewrites_matching_entries() {
        let mut m = mapping(&[("toronto", "GTA"), ("mississauga", "GTA"), ("ottawa", "Ottawa")]);
        let count = m.rename_region(&region("GTA"), &region("Toronto Area"));
        assert_eq!(count, 2);
        assert_eq!(m.count_in("Toronto Area"), 2);
        assert_eq!(m.count_in("GTA"), 0);
        assert_eq!(m.get("ottawa"), Some(&region("Ottawa")));
    }

    #[test]
    fn unmap_region_releases_cities() {
        let mut m = mapping(&[("toronto", "GTA"), ("ottawa", "Ottawa")]);
        let released = m.unmap_region("GTA");
        assert_eq!(released, vec![slug("toronto")]);
        assert!(!m.contains("toronto"));
        assert!(m.contains("ottawa"));
    }

    #[test]
    fn undefined_regions_reports_stale_values() {
        let m = mapping(&[("toronto", "GTA"), ("ottawa", "Ottawa")]);
        let regions = RegionList::from_stored(["Ottawa"]);
        let missing = m.undefined_regions(&regions);
        assert_eq!(missing.into_iter().collect::<Vec<_>>(), vec![region("GTA")]);
    }

    #[test]
    fn resolve_falls_back_to_unknown() {
        let m = mapping(&[("toronto", "GTA"), ("ottawa", "Ottawa")]);
        let regions = RegionList::from_stored(["Ottawa"]);
        assert_eq!(m.resolve("ottawa", &regions), region("Ottawa"));
        assert!(m.resolve("toronto", &regions).is_unknown());
        assert!(m.resolve("barrie", &regions).is_unknown());
    }
}
