//! Editor flows against the real region store (in-memory documents).

mod common;

use std::sync::Arc;

use common::{EngineBackedStore, InterleavedRegionsStore};
use regionmap_editor::{NoticeKind, RegionConfigEditor};

async fn editor_on(store: &EngineBackedStore) -> RegionConfigEditor {
    let mut editor = RegionConfigEditor::new(Arc::new(store.sibling()));
    assert!(editor.load().await);
    editor
}

fn group_values(editor: &RegionConfigEditor, region: &str) -> Vec<String> {
    editor
        .region_groups()
        .into_iter()
        .find(|g| g.region.as_str() == region)
        .map(|g| {
            g.cities
                .iter()
                .map(|c| c.value().as_str().to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// regions = [GTA, Ottawa, Unknown], toronto -> GTA, ottawa -> Ottawa
async fn seeded_store() -> EngineBackedStore {
    let store = EngineBackedStore::new();
    let mut editor = editor_on(&store).await;
    assert!(editor.add_region("GTA"));
    assert!(editor.add_region("Ottawa"));
    assert!(editor.assign_city("toronto", "GTA"));
    assert!(editor.assign_city("ottawa", "Ottawa"));
    assert!(editor.save().await);
    store
}

#[tokio::test]
async fn fresh_store_loads_only_unknown() {
    let store = EngineBackedStore::new();
    let editor = editor_on(&store).await;

    let session = editor.session().unwrap();
    assert_eq!(session.configuration().regions().to_strings(), vec!["Unknown"]);
    assert!(editor.region_groups().is_empty());
    assert_eq!(editor.state().bulk_target, None);
    assert!(!editor.unmapped_cities().is_empty());
}

#[tokio::test]
async fn saved_configuration_round_trips_through_the_store() {
    let store = seeded_store().await;
    let editor = editor_on(&store).await;

    assert_eq!(group_values(&editor, "GTA"), vec!["toronto"]);
    assert_eq!(group_values(&editor, "Ottawa"), vec!["ottawa"]);
    assert_eq!(editor.region_groups()[0].cities[0].label(), "Toronto");

    let resolved = store.store.resolve_city_region("Toronto").await;
    assert!(resolved.success);
    assert_eq!(resolved.region, "GTA");
}

#[tokio::test]
async fn deleting_region_unmaps_its_cities() {
    let store = seeded_store().await;
    let mut editor = editor_on(&store).await;

    assert!(!editor.request_delete_region("GTA"));
    assert_eq!(
        editor.notice().map(|n| n.kind),
        Some(NoticeKind::ConfirmationRequired)
    );
    assert!(editor.confirm_delete());
    assert!(editor.save().await);

    let reloaded = editor_on(&store).await;
    let session = reloaded.session().unwrap();
    assert_eq!(
        session.configuration().regions().to_strings(),
        vec!["Ottawa", "Unknown"]
    );
    assert!(!session.configuration().mappings().contains("toronto"));

    let resolved = store.store.resolve_city_region("toronto").await;
    assert_eq!(resolved.region, "Unknown");
}

#[tokio::test]
async fn rename_keeps_cities_after_save() {
    let store = seeded_store().await;
    let mut editor = editor_on(&store).await;

    assert!(editor.rename_region("GTA", "Toronto Area"));
    assert!(editor.save().await);

    let reloaded = editor_on(&store).await;
    assert_eq!(group_values(&reloaded, "Toronto Area"), vec!["toronto"]);
    assert!(group_values(&reloaded, "GTA").is_empty());
}

#[tokio::test]
async fn custom_city_is_persisted_and_other_is_refused() {
    let store = seeded_store().await;
    let mut editor = editor_on(&store).await;

    editor.set_custom_city_label("Other ");
    assert!(!editor.add_custom_city());
    assert_eq!(editor.notice().map(|n| n.kind), Some(NoticeKind::Warning));

    editor.set_custom_city_label("Kanata");
    editor.set_custom_city_target("Ottawa");
    assert!(editor.add_custom_city());
    assert!(editor.save().await);

    let reloaded = editor_on(&store).await;
    let cities = reloaded.session().unwrap().configuration().cities();
    assert_eq!(cities.get("kanata").map(|c| c.label()), Some("Kanata"));
    assert!(!cities.contains("other"));
    assert_eq!(store.store.resolve_city_region("Kanata").await.region, "Ottawa");
}

#[tokio::test]
async fn empty_bulk_add_leaves_session_clean() {
    let store = seeded_store().await;
    let mut editor = editor_on(&store).await;
    let before = editor.session().cloned();

    editor.open_bulk_picker();
    assert!(!editor.bulk_add());
    assert_eq!(editor.session().cloned(), before);
    assert!(!editor.has_unsaved_changes());
}

#[tokio::test]
async fn add_then_delete_restores_region_order() {
    let store = seeded_store().await;
    let mut editor = editor_on(&store).await;
    let before = editor.session().unwrap().configuration().clone();

    assert!(editor.add_region("North"));
    assert!(editor.request_delete_region("North"));
    assert_eq!(editor.session().unwrap().configuration(), &before);
}

#[tokio::test]
async fn concurrent_region_change_turns_into_partial_save() {
    let store = seeded_store().await;
    let interleaved = InterleavedRegionsStore {
        inner: store.sibling(),
        regions_written_meanwhile: vec!["Ottawa".into(), "Unknown".into()],
    };
    let mut editor = RegionConfigEditor::new(Arc::new(interleaved));
    assert!(editor.load().await);
    assert!(editor.assign_city("mississauga", "GTA"));

    assert!(!editor.save().await);
    let notice = editor.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::PartialSave);
    assert!(notice.message.contains("GTA"));
    assert!(editor.has_unsaved_changes());

    // the other admin's region list won and the old mappings are untouched
    let reloaded = editor_on(&store).await;
    let config = reloaded.session().unwrap().configuration();
    assert_eq!(config.regions().to_strings(), vec!["Ottawa", "Unknown"]);
    assert!(!config.mappings().contains("mississauga"));
    assert!(config.mappings().contains("toronto"));
}
