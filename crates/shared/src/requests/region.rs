use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use regionmap_domain::{City, DomainError};

/// Replace the ordered region list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRegionsRequest {
    pub regions: Vec<String>,
}

/// Replace the city mapping and the city catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRegionMappingsRequest {
    /// City slug -> region name
    #[serde(default)]
    pub mappings: BTreeMap<String, String>,
    #[serde(default)]
    pub cities: Vec<CityData>,
}

/// A city as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CityData {
    pub label: String,
    pub value: String,
}

impl CityData {
    /// Validate into a domain city; the value must be the slug of the label.
    pub fn into_city(self) -> Result<City, DomainError> {
        City::new(self.label, self.value)
    }
}

impl From<&City> for CityData {
    fn from(city: &City) -> Self {
        Self {
            label: city.label().to_string(),
            value: city.value().as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mappings_request_defaults_missing_fields() {
        let request: SetRegionMappingsRequest = serde_json::from_str("{}").unwrap();
        assert!(request.mappings.is_empty());
        assert!(request.cities.is_empty());
    }

    #[test]
    fn city_data_rejects_mismatched_slug() {
        let data = CityData {
            label: "North Bay".into(),
            value: "north_bay".into(),
        };
        assert!(data.into_city().is_err());
    }

    #[test]
    fn city_data_from_city() {
        let city = City::from_label("Thunder Bay").unwrap();
        let data = CityData::from(&city);
        assert_eq!(data.value, "thunder-bay");
        assert_eq!(data.into_city().unwrap(), city);
    }
}
