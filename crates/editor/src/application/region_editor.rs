//! Region configuration editor
//!
//! Owns the edit session and the transient UI state around it: search text,
//! picker selections, a pending delete confirmation and the current notice.
//! Every edit goes through [`RegionEditSession::apply`]; rejections become
//! notices and leave the session untouched.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use regionmap_domain::{City, MapTarget, PolicyMode, RegionList, RegionName};

use crate::application::load_save::{self, SaveError};
use crate::application::notice::{Notice, NoticeKind};
use crate::application::session::{EditRejection, RegionEdit, RegionEditSession};
use crate::application::views::{self, BulkAddCandidate, RegionGroup};
use crate::ports::RegionStorePort;

const NOT_LOADED: &str = "Region configuration is not loaded";

/// Cities ticked in one region's "move to" picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveSelection {
    pub selected: BTreeSet<String>,
    pub target: Option<RegionName>,
}

/// A delete waiting for the admin to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub region: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub loading: bool,
    pub saving: bool,
    pub search: String,
    pub bulk_picker_open: bool,
    pub bulk_selection: BTreeSet<String>,
    pub bulk_target: Option<MapTarget>,
    pub custom_city_label: String,
    pub custom_city_target: Option<MapTarget>,
    /// Keyed by source region name
    pub move_selections: BTreeMap<String, MoveSelection>,
    pub pending_delete: Option<PendingDelete>,
    pub notice: Option<Notice>,
}

pub struct RegionConfigEditor {
    store: Arc<dyn RegionStorePort>,
    session: Option<RegionEditSession>,
    state: EditorState,
}

impl RegionConfigEditor {
    pub fn new(store: Arc<dyn RegionStorePort>) -> Self {
        Self {
            store,
            session: None,
            state: EditorState::default(),
        }
    }

    pub fn session(&self) -> Option<&RegionEditSession> {
        self.session.as_ref()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.state.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.state.notice = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(RegionEditSession::has_unsaved_changes)
    }

    pub fn mode(&self) -> Option<PolicyMode> {
        self.session.as_ref().map(RegionEditSession::mode)
    }

    // =========================================================================
    // Views
    // =========================================================================

    pub fn region_groups(&self) -> Vec<RegionGroup> {
        self.session
            .as_ref()
            .map(|s| views::grouped_by_region(s.configuration()))
            .unwrap_or_default()
    }

    pub fn unmapped_cities(&self) -> Vec<City> {
        self.session
            .as_ref()
            .map(|s| views::unmapped_cities(s.configuration()))
            .unwrap_or_default()
    }

    /// Bulk-add picker contents for the current search text.
    pub fn bulk_add_candidates(&self) -> Vec<BulkAddCandidate> {
        self.session
            .as_ref()
            .map(|s| views::filter_for_bulk_add(s.configuration(), &self.state.search))
            .unwrap_or_default()
    }

    // =========================================================================
    // Load / save
    // =========================================================================

    /// Load from the store, replacing the session and resetting UI state.
    ///
    /// On failure an error notice is raised and any existing session is kept.
    pub async fn load(&mut self) -> bool {
        self.state.loading = true;
        let result = load_save::load(self.store.as_ref()).await;
        self.state.loading = false;

        match result {
            Ok(session) => {
                self.session = Some(session);
                self.state = EditorState::default();
                self.sync_pickers();
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load region configuration");
                self.state.notice = Some(Notice::error(format!(
                    "Failed to load region configuration: {}",
                    e
                )));
                false
            }
        }
    }

    pub async fn save(&mut self) -> bool {
        let Some(session) = self.begin_save() else {
            return false;
        };
        let result = load_save::save(self.store.as_ref(), &session).await;
        self.finish_save(&session, result)
    }

    /// Mark a save as in flight and hand back the session to persist.
    ///
    /// Returns `None` while another save is in flight or nothing is loaded.
    pub fn begin_save(&mut self) -> Option<RegionEditSession> {
        if self.state.saving {
            self.state.notice = Some(Notice::warning("A save is already in progress"));
            return None;
        }
        let Some(session) = self.session.clone() else {
            self.state.notice = Some(Notice::warning(NOT_LOADED));
            return None;
        };
        self.state.saving = true;
        Some(session)
    }

    /// Record the outcome of a save started with [`Self::begin_save`].
    ///
    /// `saved` is the snapshot `begin_save` handed out. The session is marked
    /// clean only if it still matches that snapshot; edits made while the save
    /// was in flight stay dirty.
    pub fn finish_save(
        &mut self,
        saved: &RegionEditSession,
        result: Result<(), SaveError>,
    ) -> bool {
        self.state.saving = false;
        match result {
            Ok(()) => {
                if let Some(session) = self
                    .session
                    .as_mut()
                    .filter(|s| s.configuration() == saved.configuration())
                {
                    session.mark_saved();
                }
                self.state.notice = Some(Notice::success("Region configuration saved"));
                true
            }
            Err(e) => {
                let kind = match e {
                    SaveError::Regions(_) => NoticeKind::Error,
                    SaveError::PartialSave(_) => NoticeKind::PartialSave,
                };
                tracing::error!(error = %e, "Failed to save region configuration");
                self.state.notice = Some(Notice::new(kind, e.to_string()));
                false
            }
        }
    }

    // =========================================================================
    // Region edits
    // =========================================================================

    pub fn add_region(&mut self, name: &str) -> bool {
        self.apply(RegionEdit::AddRegion {
            name: name.to_string(),
        })
    }

    /// Rename a region. Pickers that pointed at it follow the new name.
    pub fn rename_region(&mut self, old: &str, new: &str) -> bool {
        let applied = self.apply(RegionEdit::RenameRegion {
            old: old.to_string(),
            new: new.to_string(),
        });
        let renamed = self.session.as_ref().is_some_and(|s| {
            let regions = s.configuration().regions();
            !regions.contains(old) && regions.contains(new.trim())
        });
        if applied && renamed {
            self.retarget_pickers(old, new.trim());
        }
        applied
    }

    /// Delete a region, or ask for confirmation if cities are assigned to it.
    pub fn request_delete_region(&mut self, name: &str) -> bool {
        self.state.pending_delete = None;
        self.apply(RegionEdit::DeleteRegion {
            name: name.to_string(),
            confirmed: false,
        })
    }

    pub fn confirm_delete(&mut self) -> bool {
        let Some(pending) = self.state.pending_delete.take() else {
            return false;
        };
        self.apply(RegionEdit::DeleteRegion {
            name: pending.region,
            confirmed: true,
        })
    }

    pub fn cancel_delete(&mut self) {
        self.state.pending_delete = None;
        self.clear_notice_of(&[NoticeKind::ConfirmationRequired]);
    }

    // =========================================================================
    // City edits
    // =========================================================================

    /// Assign a city; `target` is a region name or `"unmapped"`.
    pub fn assign_city(&mut self, city: &str, target: &str) -> bool {
        let Some(target) = self.parse_target(target) else {
            return false;
        };
        self.apply(RegionEdit::AssignCity {
            city: city.to_string(),
            target,
        })
    }

    pub fn set_custom_city_label(&mut self, label: &str) {
        self.state.custom_city_label = label.to_string();
    }

    pub fn set_custom_city_target(&mut self, target: &str) {
        if let Some(target) = self.parse_target(target) {
            self.state.custom_city_target = Some(target);
        }
    }

    /// Add the typed custom city to the selected target; unmapped if none.
    pub fn add_custom_city(&mut self) -> bool {
        let target = self
            .state
            .custom_city_target
            .clone()
            .unwrap_or(MapTarget::Unmapped);
        let applied = self.apply(RegionEdit::AddCustomCity {
            label: self.state.custom_city_label.clone(),
            target,
        });
        if applied {
            self.state.custom_city_label.clear();
        }
        applied
    }

    // =========================================================================
    // Bulk add
    // =========================================================================

    pub fn set_search(&mut self, search: &str) {
        self.state.search = search.to_string();
    }

    pub fn open_bulk_picker(&mut self) {
        self.state.bulk_picker_open = true;
    }

    pub fn close_bulk_picker(&mut self) {
        self.state.bulk_picker_open = false;
        self.state.bulk_selection.clear();
        self.state.search.clear();
    }

    pub fn toggle_bulk_city(&mut self, value: &str) {
        if !self.state.bulk_selection.remove(value) {
            self.state.bulk_selection.insert(value.to_string());
        }
    }

    pub fn set_bulk_target(&mut self, target: &str) {
        if let Some(target) = self.parse_target(target) {
            self.state.bulk_target = Some(target);
        }
    }

    /// Map every ticked city to the bulk target, then close the picker.
    pub fn bulk_add(&mut self) -> bool {
        if self.state.bulk_selection.is_empty() {
            self.state.notice = Some(Notice::warning("Select at least one city"));
            return false;
        }
        let Some(target) = self.state.bulk_target.clone() else {
            self.state.notice = Some(Notice::warning("Choose a target region"));
            return false;
        };
        let applied = self.apply(RegionEdit::BulkAddCities {
            selected: self.state.bulk_selection.clone(),
            target,
        });
        if applied {
            self.close_bulk_picker();
        }
        applied
    }

    // =========================================================================
    // Move between regions
    // =========================================================================

    pub fn toggle_move_city(&mut self, region: &str, city: &str) {
        if let Some(selection) = self.state.move_selections.get_mut(region) {
            if !selection.selected.remove(city) {
                selection.selected.insert(city.to_string());
            }
        }
    }

    pub fn set_move_target(&mut self, region: &str, target: &str) {
        match RegionName::new(target) {
            Ok(target) => {
                if let Some(selection) = self.state.move_selections.get_mut(region) {
                    selection.target = Some(target);
                }
            }
            Err(e) => self.state.notice = Some(Notice::warning(e.message())),
        }
    }

    pub fn clear_move_selection(&mut self, region: &str) {
        if let Some(selection) = self.state.move_selections.get_mut(region) {
            selection.selected.clear();
        }
    }

    /// Move the cities ticked under `region` to that region's chosen target.
    pub fn move_selected(&mut self, region: &str) -> bool {
        let Some(selection) = self.state.move_selections.get(region).cloned() else {
            return false;
        };
        if selection.selected.is_empty() {
            self.state.notice = Some(Notice::warning("Select at least one city to move"));
            return false;
        }
        if selection.target.is_none() {
            self.state.notice = Some(Notice::warning("Choose a target region"));
            return false;
        }
        let applied = self.apply(RegionEdit::MoveCities {
            source: region.to_string(),
            selected: selection.selected,
            target: selection.target,
        });
        if applied {
            self.clear_move_selection(region);
        }
        applied
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn apply(&mut self, edit: RegionEdit) -> bool {
        let Some(session) = &self.session else {
            self.state.notice = Some(Notice::warning(NOT_LOADED));
            return false;
        };

        match session.apply(edit) {
            Ok(next) => {
                self.session = Some(next);
                self.clear_notice_of(&[NoticeKind::Warning, NoticeKind::ConfirmationRequired]);
                self.sync_pickers();
                true
            }
            Err(rejection) => {
                tracing::debug!(%rejection, "Edit rejected");
                let kind = match &rejection {
                    EditRejection::ConfirmationRequired { region, count } => {
                        self.state.pending_delete = Some(PendingDelete {
                            region: region.clone(),
                            count: *count,
                        });
                        NoticeKind::ConfirmationRequired
                    }
                    _ => NoticeKind::Warning,
                };
                self.state.notice = Some(Notice::new(kind, rejection.to_string()));
                false
            }
        }
    }

    fn parse_target(&mut self, target: &str) -> Option<MapTarget> {
        match target.parse::<MapTarget>() {
            Ok(target) => Some(target),
            Err(e) => {
                self.state.notice = Some(Notice::warning(e.message()));
                None
            }
        }
    }

    fn clear_notice_of(&mut self, kinds: &[NoticeKind]) {
        if self
            .state
            .notice
            .as_ref()
            .is_some_and(|n| kinds.contains(&n.kind))
        {
            self.state.notice = None;
        }
    }

    /// Keep one move picker per editable region and point stale targets at the
    /// first editable region.
    fn sync_pickers(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let regions = session.configuration().regions();
        let default = regions.first_editable().cloned();

        let selections = &mut self.state.move_selections;
        selections.retain(|name, _| regions.editable().any(|r| r == name.as_str()));
        for region in regions.editable() {
            selections
                .entry(region.to_string())
                .or_insert_with(|| MoveSelection {
                    selected: BTreeSet::new(),
                    target: default.clone(),
                });
        }
        for selection in selections.values_mut() {
            if selection
                .target
                .as_ref()
                .is_some_and(|t| !regions.contains(t.as_str()))
            {
                selection.target = default.clone();
            }
        }

        for picker in [
            &mut self.state.bulk_target,
            &mut self.state.custom_city_target,
        ] {
            if !target_exists(picker.as_ref(), regions) {
                *picker = default.clone().map(MapTarget::Region);
            }
        }
    }

    fn retarget_pickers(&mut self, old: &str, new: &str) {
        let Ok(renamed) = RegionName::new(new) else {
            return;
        };
        if let Some(selection) = self.state.move_selections.remove(old) {
            self.state
                .move_selections
                .insert(renamed.to_string(), selection);
        }
        for selection in self.state.move_selections.values_mut() {
            if selection.target.as_ref().is_some_and(|t| t == old) {
                selection.target = Some(renamed.clone());
            }
        }
        for picker in [
            &mut self.state.bulk_target,
            &mut self.state.custom_city_target,
        ] {
            if picker.as_ref().and_then(MapTarget::region).is_some_and(|t| t == old) {
                *picker = Some(MapTarget::Region(renamed.clone()));
            }
        }
    }
}

fn target_exists(target: Option<&MapTarget>, regions: &RegionList) -> bool {
    match target {
        Some(MapTarget::Region(region)) => regions.contains(region.as_str()),
        Some(MapTarget::Unmapped) => true,
        None => false,
    }
}
