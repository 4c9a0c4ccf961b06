//! HTTP adapter against the engine's routes served on a local port.

use std::sync::Arc;
use std::time::Duration;

use regionmap_editor::{HttpRegionStore, NoticeKind, RegionConfigEditor, RegionStorePort};
use regionmap_engine::{api, App, InMemoryRegionDocuments};
use regionmap_shared::{SetRegionMappingsRequest, SetRegionsRequest};

async fn serve_engine() -> String {
    let app = Arc::new(App::new(Arc::new(InMemoryRegionDocuments::new())));
    let router = api::http::routes().with_state(app);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn http_store() -> HttpRegionStore {
    let base_url = serve_engine().await;
    HttpRegionStore::new(&base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn unconfigured_store_answers_defaults() {
    let store = http_store().await;

    let regions = store.get_regions().await.unwrap();
    assert!(regions.success);
    assert_eq!(regions.regions, vec!["Unknown"]);

    let mappings = store.get_region_mappings().await.unwrap();
    assert!(mappings.success);
    assert!(mappings.mappings.is_empty());

    let policy = store.get_region_access_policy().await.unwrap();
    assert!(policy.success);
}

#[tokio::test]
async fn rejected_write_arrives_as_failed_envelope() {
    let store = http_store().await;

    let response = store
        .set_regions(SetRegionsRequest {
            regions: vec!["GTA".into(), "GTA".into(), "Unknown".into()],
        })
        .await
        .unwrap();
    assert!(!response.success);
    assert!(response.error.is_some());

    let response = store
        .set_region_mappings(SetRegionMappingsRequest {
            mappings: [("toronto".to_string(), "GTA".to_string())].into(),
            cities: Vec::new(),
        })
        .await
        .unwrap();
    assert!(!response.success);
    assert!(response.error.unwrap().contains("GTA"));
}

#[tokio::test]
async fn editor_saves_and_reloads_over_http() {
    let base_url = serve_engine().await;
    let connect = || {
        let store = HttpRegionStore::new(&base_url, Duration::from_secs(5)).unwrap();
        RegionConfigEditor::new(Arc::new(store))
    };

    let mut editor = connect();
    assert!(editor.load().await);
    assert!(editor.add_region("North"));
    assert!(editor.assign_city("sudbury", "North"));
    assert!(editor.save().await);
    assert_eq!(editor.notice().map(|n| n.kind), Some(NoticeKind::Success));

    let mut reloaded = connect();
    assert!(reloaded.load().await);
    let groups = reloaded.region_groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].region.as_str(), "North");
    assert_eq!(groups[0].cities[0].value().as_str(), "sudbury");
}
