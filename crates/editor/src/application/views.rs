//! Read-only views derived from a region configuration

use regionmap_domain::{
    resolve_city, sort_cities_by_label, City, CitySlug, RegionConfiguration, RegionName,
};

/// One editable region with its assigned cities, sorted by label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionGroup {
    pub region: RegionName,
    pub cities: Vec<City>,
}

/// A city offered by the bulk-add picker, with its current region if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkAddCandidate {
    pub city: City,
    pub region: Option<RegionName>,
}

/// Editable regions in display order, each with the cities mapped to it.
///
/// `Unknown` is not listed: its cities are the ones in [`unmapped_cities`].
pub fn grouped_by_region(config: &RegionConfiguration) -> Vec<RegionGroup> {
    config
        .regions()
        .editable()
        .map(|region| {
            let mut cities: Vec<City> = config
                .mappings()
                .cities_in(region.as_str())
                .map(|slug| label_for(config, slug))
                .collect();
            sort_cities_by_label(&mut cities);
            RegionGroup {
                region: region.clone(),
                cities,
            }
        })
        .collect()
}

/// Catalogued cities with no mapping entry, sorted by label.
pub fn unmapped_cities(config: &RegionConfiguration) -> Vec<City> {
    config
        .cities()
        .sorted_by_label()
        .into_iter()
        .filter(|city| !config.mappings().contains(city.value().as_str()))
        .cloned()
        .collect()
}

/// Catalog entries matching `search` (case-insensitive, label or value).
/// A blank search matches everything.
pub fn filter_for_bulk_add(config: &RegionConfiguration, search: &str) -> Vec<BulkAddCandidate> {
    let needle = search.trim().to_lowercase();
    config
        .cities()
        .sorted_by_label()
        .into_iter()
        .filter(|city| {
            needle.is_empty()
                || city.label().to_lowercase().contains(&needle)
                || city.value().as_str().contains(&needle)
        })
        .map(|city| BulkAddCandidate {
            city: city.clone(),
            region: config.mappings().get(city.value().as_str()).cloned(),
        })
        .collect()
}

fn label_for(config: &RegionConfiguration, slug: &CitySlug) -> City {
    config
        .cities()
        .get(slug.as_str())
        .cloned()
        .unwrap_or_else(|| resolve_city(slug))
}
