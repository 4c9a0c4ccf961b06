//! Region edit session
//!
//! A loaded working copy of the region configuration plus its dirty flag.
//! [`RegionEditSession::apply`] is pure: it returns the next session or a
//! rejection and never touches the session it was called on. A rejected edit or
//! a no-op leaves the dirty flag as it was.

use std::collections::BTreeSet;

use regionmap_domain::{
    reference_city, City, CitySlug, DomainError, MapTarget, PolicyMode, RegionConfiguration,
    RegionName, RegionRenameOutcome, RESERVED_CITY_SLUG, UNKNOWN_REGION,
};

/// Every local edit an admin can make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionEdit {
    AddRegion {
        name: String,
    },
    RenameRegion {
        old: String,
        new: String,
    },
    /// Needs `confirmed` when cities are still assigned to the region
    DeleteRegion {
        name: String,
        confirmed: bool,
    },
    AssignCity {
        city: String,
        target: MapTarget,
    },
    AddCustomCity {
        label: String,
        target: MapTarget,
    },
    BulkAddCities {
        selected: BTreeSet<String>,
        target: MapTarget,
    },
    MoveCities {
        source: String,
        selected: BTreeSet<String>,
        target: Option<RegionName>,
    },
}

/// Why an edit was refused. Nothing was changed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditRejection {
    #[error("Region name cannot be empty")]
    BlankRegionName,
    #[error("Region '{0}' already exists")]
    DuplicateRegion(String),
    #[error("'{}' cannot be {action}", UNKNOWN_REGION)]
    ReservedRegion { action: &'static str },
    #[error("Region '{0}' does not exist")]
    RegionNotFound(String),
    #[error("Deleting '{region}' will unmap {count} assigned cities")]
    ConfirmationRequired { region: String, count: usize },
    #[error("City name cannot be empty")]
    BlankCityName,
    #[error("'{}' is reserved and cannot be added as a city", RESERVED_CITY_SLUG)]
    ReservedCity,
    #[error("City '{0}' already exists")]
    DuplicateCity(String),
    #[error("Invalid city: {0}")]
    InvalidCity(String),
    #[error("Target region must differ from the source region")]
    SameSourceAndTarget,
    #[error("{}", .0.message())]
    Invalid(#[from] DomainError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionEditSession {
    config: RegionConfiguration,
    mode: PolicyMode,
    dirty: bool,
}

/// Apply one edit to a session. See [`RegionEditSession::apply`].
pub fn apply(
    session: &RegionEditSession,
    edit: RegionEdit,
) -> Result<RegionEditSession, EditRejection> {
    session.apply(edit)
}

impl RegionEditSession {
    /// A freshly loaded, clean session.
    pub fn new(config: RegionConfiguration, mode: PolicyMode) -> Self {
        Self {
            config,
            mode,
            dirty: false,
        }
    }

    pub fn configuration(&self) -> &RegionConfiguration {
        &self.config
    }

    pub fn mode(&self) -> PolicyMode {
        self.mode
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn apply(&self, edit: RegionEdit) -> Result<RegionEditSession, EditRejection> {
        let mut next = self.clone();
        if next.apply_in_place(edit)? {
            next.dirty = true;
        }
        Ok(next)
    }

    /// Returns whether anything changed.
    fn apply_in_place(&mut self, edit: RegionEdit) -> Result<bool, EditRejection> {
        match edit {
            RegionEdit::AddRegion { name } => self.add_region(&name),
            RegionEdit::RenameRegion { old, new } => self.rename_region(&old, &new),
            RegionEdit::DeleteRegion { name, confirmed } => self.delete_region(&name, confirmed),
            RegionEdit::AssignCity { city, target } => {
                let city = parse_slug(city)?;
                self.ensure_target(&target)?;
                Ok(self.config.assign_city(city, target)?.is_change())
            }
            RegionEdit::AddCustomCity { label, target } => self.add_custom_city(&label, target),
            RegionEdit::BulkAddCities { selected, target } => self.bulk_add(selected, target),
            RegionEdit::MoveCities {
                source,
                selected,
                target,
            } => self.move_cities(&source, selected, target),
        }
    }

    fn add_region(&mut self, name: &str) -> Result<bool, EditRejection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditRejection::BlankRegionName);
        }
        if self.config.regions().contains(name) {
            return Err(EditRejection::DuplicateRegion(name.to_string()));
        }
        self.config.add_region(RegionName::new(name)?)?;
        Ok(true)
    }

    fn rename_region(&mut self, old: &str, new: &str) -> Result<bool, EditRejection> {
        if old == UNKNOWN_REGION {
            return Err(EditRejection::ReservedRegion { action: "renamed" });
        }
        let new = new.trim();
        if new.is_empty() || new == old {
            return Ok(false);
        }
        if !self.config.regions().contains(old) {
            return Err(EditRejection::RegionNotFound(old.to_string()));
        }
        if self.config.regions().contains(new) {
            return Err(EditRejection::DuplicateRegion(new.to_string()));
        }

        let outcome = self.config.rename_region(old, RegionName::new(new)?)?;
        if let RegionRenameOutcome::Renamed { from, to, remapped } = &outcome {
            tracing::debug!(%from, %to, remapped, "Renamed region");
        }
        Ok(outcome != RegionRenameOutcome::Unchanged)
    }

    fn delete_region(&mut self, name: &str, confirmed: bool) -> Result<bool, EditRejection> {
        if name == UNKNOWN_REGION {
            return Err(EditRejection::ReservedRegion { action: "deleted" });
        }
        if !self.config.regions().contains(name) {
            return Err(EditRejection::RegionNotFound(name.to_string()));
        }
        let count = self.config.city_count_in(name);
        if count > 0 && !confirmed {
            return Err(EditRejection::ConfirmationRequired {
                region: name.to_string(),
                count,
            });
        }

        let removed = self.config.remove_region(name)?;
        tracing::debug!(region = %removed.name, unmapped = removed.unmapped.len(), "Deleted region");
        Ok(true)
    }

    fn add_custom_city(&mut self, label: &str, target: MapTarget) -> Result<bool, EditRejection> {
        let label = label.trim();
        if label.is_empty() {
            return Err(EditRejection::BlankCityName);
        }
        let city = City::from_label(label).map_err(|e| EditRejection::InvalidCity(e.message()))?;
        if city.value().is_reserved() {
            return Err(EditRejection::ReservedCity);
        }
        if let Some(existing) = self.config.cities().get(city.value().as_str()) {
            return Err(EditRejection::DuplicateCity(existing.label().to_string()));
        }
        self.ensure_target(&target)?;

        self.config.add_custom_city(label, target)?;
        Ok(true)
    }

    fn bulk_add(
        &mut self,
        selected: BTreeSet<String>,
        target: MapTarget,
    ) -> Result<bool, EditRejection> {
        if selected.is_empty() {
            return Ok(false);
        }
        self.ensure_target(&target)?;

        let cities = selected
            .into_iter()
            .map(|value| self.resolve_city(value))
            .collect::<Result<Vec<_>, _>>()?;

        let catalog_before = self.config.cities().len();
        let remapped = self.config.add_cities(cities, target)?;
        Ok(remapped > 0 || self.config.cities().len() != catalog_before)
    }

    fn move_cities(
        &mut self,
        source: &str,
        selected: BTreeSet<String>,
        target: Option<RegionName>,
    ) -> Result<bool, EditRejection> {
        let Some(target) = target else {
            return Ok(false);
        };
        if selected.is_empty() {
            return Ok(false);
        }
        if target == source {
            return Err(EditRejection::SameSourceAndTarget);
        }
        self.ensure_target(&MapTarget::Region(target.clone()))?;

        let cities = selected
            .into_iter()
            .map(parse_slug)
            .collect::<Result<Vec<_>, _>>()?;
        let moved = self.config.move_cities(source, cities, &target)?;
        Ok(!moved.is_empty())
    }

    /// Catalog entry, else reference entry, else a slug-labelled city.
    fn resolve_city(&self, value: String) -> Result<City, EditRejection> {
        if let Some(city) = self.config.cities().get(&value) {
            return Ok(city.clone());
        }
        if let Some(city) = reference_city(&value) {
            return Ok(city.clone());
        }
        parse_slug(value).map(City::from_slug)
    }

    fn ensure_target(&self, target: &MapTarget) -> Result<(), EditRejection> {
        match target.region() {
            Some(region) if !self.config.regions().contains(region.as_str()) => {
                Err(EditRejection::RegionNotFound(region.to_string()))
            }
            _ => Ok(()),
        }
    }
}

fn parse_slug(value: String) -> Result<CitySlug, EditRejection> {
    CitySlug::new(value).map_err(|e| EditRejection::InvalidCity(e.message()))
}
