//! Ordered list of region names
//!
//! # Invariants
//!
//! - Names are unique (exact, case-sensitive match)
//! - The `Unknown` sentinel is always present
//! - Order is display order; new regions are inserted immediately before `Unknown`

use serde::Serialize;

use crate::error::DomainError;
use crate::events::RegionRenameOutcome;
use crate::value_objects::{RegionName, UNKNOWN_REGION};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RegionList {
    names: Vec<RegionName>,
}

impl RegionList {
    /// Build a list from names that must already satisfy every invariant.
    ///
    /// Used on the write path, where a malformed list is a caller error.
    pub fn new(names: Vec<RegionName>) -> Result<Self, DomainError> {
        for (index, name) in names.iter().enumerate() {
            if names[..index].contains(name) {
                return Err(DomainError::constraint(format!(
                    "Region '{}' appears more than once",
                    name
                )));
            }
        }
        if !names.iter().any(RegionName::is_unknown) {
            return Err(DomainError::constraint(format!(
                "Region list must include '{}'",
                UNKNOWN_REGION
            )));
        }
        Ok(Self { names })
    }

    /// Build a list from stored strings, repairing what can be repaired.
    ///
    /// Blank names and duplicates are dropped; `Unknown` is appended if missing.
    pub fn from_stored<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<RegionName> = Vec::new();
        for raw in names {
            let Ok(name) = RegionName::new(raw.as_ref()) else {
                continue;
            };
            if !list.contains(&name) {
                list.push(name);
            }
        }
        if !list.iter().any(RegionName::is_unknown) {
            list.push(RegionName::unknown());
        }
        Self { names: list }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&RegionName> {
        self.names.iter().find(|n| *n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionName> {
        self.names.iter()
    }

    /// Regions an admin may rename, delete or assign cities to.
    pub fn editable(&self) -> impl Iterator<Item = &RegionName> {
        self.names.iter().filter(|n| !n.is_unknown())
    }

    pub fn first_editable(&self) -> Option<&RegionName> {
        self.editable().next()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Insert a new region immediately before `Unknown`.
    pub fn add(&mut self, name: RegionName) -> Result<(), DomainError> {
        if self.names.contains(&name) {
            return Err(DomainError::constraint(format!(
                "Region '{}' already exists",
                name
            )));
        }
        match self.names.iter().position(RegionName::is_unknown) {
            Some(index) => self.names.insert(index, name),
            None => self.names.push(name),
        }
        Ok(())
    }

    /// Rename a region in place, keeping its position.
    ///
    /// Mappings are not touched here; see `RegionConfiguration::rename_region`.
    pub fn rename(
        &mut self,
        old: &str,
        new: RegionName,
    ) -> Result<RegionRenameOutcome, DomainError> {
        if old == UNKNOWN_REGION {
            return Err(DomainError::constraint(format!(
                "'{}' cannot be renamed",
                UNKNOWN_REGION
            )));
        }
        let index = self
            .names
            .iter()
            .position(|n| n == old)
            .ok_or_else(|| DomainError::not_found("Region", old))?;
        if new == old {
            return Ok(RegionRenameOutcome::Unchanged);
        }
        if self.names.contains(&new) {
            return Err(DomainError::constraint(format!(
                "Region '{}' already exists",
                new
            )));
        }

        let from = std::mem::replace(&mut self.names[index], new.clone());
        Ok(RegionRenameOutcome::Renamed {
            from,
            to: new,
            remapped: 0,
        })
    }

    /// Remove a region. `Unknown` can never be removed.
    pub fn remove(&mut self, name: &str) -> Result<RegionName, DomainError> {
        if name == UNKNOWN_REGION {
            return Err(DomainError::constraint(format!(
                "'{}' cannot be deleted",
                UNKNOWN_REGION
            )));
        }
        let index = self
            .names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| DomainError::not_found("Region", name))?;
        Ok(self.names.remove(index))
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.names.iter().map(|n| n.as_str().to_string()).collect()
    }
}

impl Default for RegionList {
    fn default() -> Self {
        Self {
            names: vec![RegionName::unknown()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> RegionName {
        RegionName::new(s).unwrap()
    }

    fn list(names: &[&str]) -> RegionList {
        RegionList::new(names.iter().map(|n| name(n)).collect()).unwrap()
    }

    #[test]
    fn new_requires_unknown() {
        let err = RegionList::new(vec![name("GTA")]).unwrap_err();
        assert!(matches!(err, DomainError::Constraint(_)));
    }

    #[test]
    fn new_rejects_duplicates() {
        let err = RegionList::new(vec![name("GTA"), name("GTA"), RegionName::unknown()]);
        assert!(err.is_err());
    }

    #[test]
    fn from_stored_repairs_list() {
        let regions = RegionList::from_stored(["GTA", "", "GTA", "Ottawa"]);
        assert_eq!(regions.to_strings(), vec!["GTA", "Ottawa", "Unknown"]);
    }

    #[test]
    fn from_stored_keeps_unknown_position() {
        let regions = RegionList::from_stored(["Unknown", "GTA"]);
        assert_eq!(regions.to_strings(), vec!["Unknown", "GTA"]);
    }

    #[test]
    fn add_inserts_before_unknown() {
        let mut regions = list(&["GTA", "Unknown"]);
        regions.add(name("Ottawa")).unwrap();
        assert_eq!(regions.to_strings(), vec!["GTA", "Ottawa", "Unknown"]);
    }

    #[test]
    fn add_rejects_existing_and_unknown() {
        let mut regions = list(&["GTA", "Unknown"]);
        assert!(regions.add(name("GTA")).is_err());
        assert!(regions.add(RegionName::unknown()).is_err());
        assert_eq!(regions.len(), 2);
    }

    #[test]
    fn add_then_remove_restores_order() {
        let original = list(&["GTA", "Ottawa", "Unknown"]);
        let mut regions = original.clone();
        regions.add(name("North")).unwrap();
        regions.remove("North").unwrap();
        assert_eq!(regions, original);
    }

    #[test]
    fn rename_keeps_position() {
        let mut regions = list(&["GTA", "Ottawa", "Unknown"]);
        let outcome = regions.rename("GTA", name("Toronto Area")).unwrap();
        assert!(matches!(outcome, RegionRenameOutcome::Renamed { .. }));
        assert_eq!(regions.to_strings(), vec!["Toronto Area", "Ottawa", "Unknown"]);
    }

    #[test]
    fn rename_to_same_name_is_unchanged() {
        let mut regions = list(&["GTA", "Unknown"]);
        assert_eq!(
            regions.rename("GTA", name("GTA")).unwrap(),
            RegionRenameOutcome::Unchanged
        );
    }

    #[test]
    fn rename_rejects_unknown_and_collisions() {
        let mut regions = list(&["GTA", "Ottawa", "Unknown"]);
        assert!(regions.rename("Unknown", name("Elsewhere")).is_err());
        assert!(regions.rename("GTA", name("Ottawa")).is_err());
        assert!(regions.rename("GTA", RegionName::unknown()).is_err());
        assert!(regions.rename("Missing", name("X")).is_err());
    }

    #[test]
    fn remove_rejects_unknown() {
        let mut regions = RegionList::default();
        assert!(regions.remove("Unknown").is_err());
        assert_eq!(regions.len(), 1);
    }

    #[test]
    fn editable_skips_unknown() {
        let regions = list(&["Unknown", "GTA", "Ottawa"]);
        let editable: Vec<_> = regions.editable().map(RegionName::as_str).collect();
        assert_eq!(editable, vec!["GTA", "Ottawa"]);
        assert_eq!(regions.first_editable().map(RegionName::as_str), Some("GTA"));
    }
}
