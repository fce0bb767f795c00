//! Construction service tests against an in-memory SQLite database.

use std::collections::HashMap;

use sea_orm::*;
use uuid::Uuid;

use mediamart_api::model::{ConstructionPayload, ConstructionQuery};
use mediamart_common::MediamartError;
use mediamart_core::service::construction;
use mediamart_persistence::entity::{constructions, photos, status_history};
use mediamart_persistence::{ConstructionFormat, ConstructionStatus, schema};

async fn test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    schema::create_tables(&db).await.unwrap();
    db
}

fn payload(external_id: Option<&str>, address: &str) -> ConstructionPayload {
    ConstructionPayload {
        external_id: external_id.map(str::to_string),
        address: Some(address.to_string()),
        ..Default::default()
    }
}

fn query() -> ConstructionQuery {
    ConstructionQuery {
        format: None,
        status: None,
        city: None,
        q: None,
        page: 1,
        limit: 20,
    }
}

fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (ToString::to_string(k), ToString::to_string(v)))
        .collect()
}

#[tokio::test]
async fn test_create_defaults_to_active_status() {
    let db = test_db().await;
    let model = construction::create(&db, &payload(None, "Main St"))
        .await
        .unwrap();
    assert_eq!(model.status, ConstructionStatus::Active);
    assert_eq!(model.address, "Main St");
}

#[tokio::test]
async fn test_create_requires_address() {
    let db = test_db().await;
    let err = construction::create(&db, &ConstructionPayload::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MediamartError>(),
        Some(MediamartError::IllegalArgument(_))
    ));
}

#[tokio::test]
async fn test_find_one_not_found() {
    let db = test_db().await;
    let err = construction::find_one(&db, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MediamartError>(),
        Some(MediamartError::ConstructionNotFound(_))
    ));
}

#[tokio::test]
async fn test_update_is_partial_merge() {
    let db = test_db().await;
    let mut create_payload = payload(Some("X1"), "Main St");
    create_payload.city = Some("Алматы".to_string());
    let model = construction::create(&db, &create_payload).await.unwrap();

    let update_payload = ConstructionPayload {
        warehouse: Some("W-2".to_string()),
        ..Default::default()
    };
    let updated = construction::update(&db, model.id, &update_payload)
        .await
        .unwrap();

    assert_eq!(updated.warehouse.as_deref(), Some("W-2"));
    // Fields absent from the payload are left untouched.
    assert_eq!(updated.city.as_deref(), Some("Алматы"));
    assert_eq!(updated.address, "Main St");
}

#[tokio::test]
async fn test_status_transition_appends_history_unconditionally() {
    let db = test_db().await;
    let model = construction::create(&db, &payload(None, "Main St"))
        .await
        .unwrap();
    let actor = Uuid::new_v4();

    let updated = construction::update_status(
        &db,
        model.id,
        ConstructionStatus::InProgress,
        Some(actor),
        Some("repairs".to_string()),
    )
    .await
    .unwrap();
    assert_eq!(updated.status, ConstructionStatus::InProgress);

    // Same-status transition still produces a history row.
    construction::update_status(&db, model.id, ConstructionStatus::InProgress, None, None)
        .await
        .unwrap();

    let history = status_history::Entity::find()
        .filter(status_history::Column::ConstructionId.eq(model.id))
        .order_by_asc(status_history::Column::ChangedAt)
        .all(&db)
        .await
        .unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].old_status, Some(ConstructionStatus::Active));
    assert_eq!(history[0].new_status, ConstructionStatus::InProgress);
    assert_eq!(history[0].user_id, Some(actor));
    assert_eq!(history[0].comment.as_deref(), Some("repairs"));
    assert_eq!(history[1].old_status, Some(ConstructionStatus::InProgress));
    assert_eq!(history[1].new_status, ConstructionStatus::InProgress);
    assert_eq!(history[1].user_id, None);
}

#[tokio::test]
async fn test_status_transition_not_found() {
    let db = test_db().await;
    let err =
        construction::update_status(&db, Uuid::new_v4(), ConstructionStatus::Active, None, None)
            .await
            .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MediamartError>(),
        Some(MediamartError::ConstructionNotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_removes_photos_and_history() {
    let db = test_db().await;
    let model = construction::create(&db, &payload(None, "Main St"))
        .await
        .unwrap();

    for i in 0..3 {
        photos::ActiveModel {
            id: Set(Uuid::new_v4()),
            construction_id: Set(model.id),
            url: Set(format!("https://cdn.mediamart.kz/photos/{}.jpg", i)),
            sort_index: Set(i),
        }
        .insert(&db)
        .await
        .unwrap();
    }
    construction::update_status(&db, model.id, ConstructionStatus::InProgress, None, None)
        .await
        .unwrap();
    construction::update_status(&db, model.id, ConstructionStatus::Active, None, None)
        .await
        .unwrap();

    construction::delete(&db, model.id).await.unwrap();

    assert_eq!(constructions::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(photos::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(status_history::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_search_page_format_filter_and_pagination() {
    let db = test_db().await;
    for i in 0..5 {
        let mut p = payload(Some(&format!("C{}", i)), "Cityboard spot");
        p.format = Some(ConstructionFormat::Cityboard);
        construction::create(&db, &p).await.unwrap();
    }
    for i in 0..3 {
        let mut p = payload(Some(&format!("M{}", i)), "Mediaboard spot");
        p.format = Some(ConstructionFormat::Mediaboard);
        construction::create(&db, &p).await.unwrap();
    }

    let mut q = query();
    q.format = Some(ConstructionFormat::Cityboard);
    q.limit = 2;

    let page = construction::search_page(&db, &q).await.unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);

    q.page = 3;
    let last = construction::search_page(&db, &q).await.unwrap();
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.total, 5);
}

#[tokio::test]
async fn test_search_page_survives_absurd_page_number() {
    let db = test_db().await;
    construction::create(&db, &payload(Some("1"), "Main St"))
        .await
        .unwrap();

    // The offset computation must not overflow, whatever the caller sends.
    let mut q = query();
    q.page = u64::MAX;
    q.limit = 50;

    let page = construction::search_page(&db, &q).await.unwrap();
    assert_eq!(page.total, 1);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_search_page_orders_by_external_id_lexically() {
    let db = test_db().await;
    for id in ["2", "10", "1"] {
        construction::create(&db, &payload(Some(id), "spot"))
            .await
            .unwrap();
    }

    let page = construction::search_page(&db, &query()).await.unwrap();
    let ids: Vec<_> = page
        .items
        .iter()
        .map(|i| i.construction.external_id.clone().unwrap())
        .collect();
    // String sort: "10" before "2".
    assert_eq!(ids, vec!["1", "10", "2"]);
}

#[tokio::test]
async fn test_search_page_city_and_free_text_filters() {
    let db = test_db().await;
    let mut p = payload(Some("A1"), "Abay Ave 10");
    p.city = Some("Алматы".to_string());
    construction::create(&db, &p).await.unwrap();

    let mut p = payload(Some("B7"), "Respublika Sq 1");
    p.city = Some("Астана".to_string());
    construction::create(&db, &p).await.unwrap();

    let mut q = query();
    q.city = Some("алмат".to_string());
    let page = construction::search_page(&db, &q).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(
        page.items[0].construction.external_id.as_deref(),
        Some("A1")
    );

    // Free text matches address OR external id, case-insensitively.
    let mut q = query();
    q.q = Some("abay".to_string());
    assert_eq!(construction::search_page(&db, &q).await.unwrap().total, 1);

    let mut q = query();
    q.q = Some("b7".to_string());
    assert_eq!(construction::search_page(&db, &q).await.unwrap().total, 1);

    let mut q = query();
    q.q = Some("nowhere".to_string());
    assert_eq!(construction::search_page(&db, &q).await.unwrap().total, 0);
}

#[tokio::test]
async fn test_search_page_loads_photos_in_sort_order() {
    let db = test_db().await;
    let model = construction::create(&db, &payload(Some("P1"), "spot"))
        .await
        .unwrap();
    for (i, sort_index) in [(0, 2), (1, 0), (2, 1)] {
        photos::ActiveModel {
            id: Set(Uuid::new_v4()),
            construction_id: Set(model.id),
            url: Set(format!("https://cdn.mediamart.kz/photos/{}.jpg", i)),
            sort_index: Set(sort_index),
        }
        .insert(&db)
        .await
        .unwrap();
    }

    let page = construction::search_page(&db, &query()).await.unwrap();
    let sort_indexes: Vec<_> = page.items[0].photos.iter().map(|p| p.sort_index).collect();
    assert_eq!(sort_indexes, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_stats_counts() {
    let db = test_db().await;
    for i in 0..2 {
        let mut p = payload(Some(&format!("M{}", i)), "spot");
        p.format = Some(ConstructionFormat::Mediaboard);
        construction::create(&db, &p).await.unwrap();
    }
    let mut p = payload(Some("C0"), "spot");
    p.format = Some(ConstructionFormat::Cityboard);
    let cityboard = construction::create(&db, &p).await.unwrap();
    construction::update_status(
        &db,
        cityboard.id,
        ConstructionStatus::Decommissioned,
        None,
        None,
    )
    .await
    .unwrap();

    let stats = construction::stats(&db).await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.mediaboards, 2);
    assert_eq!(stats.cityboards, 1);
    assert_eq!(stats.active, 2);
}

#[tokio::test]
async fn test_bulk_import_creates_then_merges_by_external_id() {
    let db = test_db().await;
    let rows = vec![row(&[
        ("ID", "A1"),
        ("address", "Main St"),
        ("Формат", "Медиаборд"),
        ("Координаты", "43.2,76.9"),
    ])];

    let first = construction::bulk_import(&db, &rows).await;
    assert_eq!(first.created, 1);
    assert_eq!(first.updated, 0);
    assert!(first.errors.is_empty());

    // Second import of the same external id must merge, not duplicate.
    let second = construction::bulk_import(&db, &rows).await;
    assert_eq!(second.created, 0);
    assert_eq!(second.updated, 1);

    let all = constructions::Entity::find().all(&db).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].external_id.as_deref(), Some("A1"));
    assert_eq!(all[0].lat, Some(43.2));
    assert_eq!(all[0].lng, Some(76.9));
    assert_eq!(all[0].format, Some(ConstructionFormat::Mediaboard));
}

#[tokio::test]
async fn test_bulk_import_merge_leaves_absent_fields_untouched() {
    let db = test_db().await;
    construction::bulk_import(
        &db,
        &[row(&[
            ("ID", "A1"),
            ("address", "Main St"),
            ("Склад", "W-1"),
        ])],
    )
    .await;

    // Re-import without the warehouse column.
    construction::bulk_import(
        &db,
        &[row(&[("ID", "A1"), ("address", "Main St, corrected")])],
    )
    .await;

    let all = constructions::Entity::find().all(&db).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].address, "Main St, corrected");
    assert_eq!(all[0].warehouse.as_deref(), Some("W-1"));
}

#[tokio::test]
async fn test_bulk_import_without_external_id_always_creates() {
    let db = test_db().await;
    let rows = vec![row(&[("address", "Main St")])];
    construction::bulk_import(&db, &rows).await;
    construction::bulk_import(&db, &rows).await;

    assert_eq!(constructions::Entity::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn test_bulk_import_collects_row_errors_without_aborting() {
    let db = test_db().await;
    let rows = vec![
        row(&[("ID", "BAD1")]),                     // no address
        row(&[("ID", "OK1"), ("address", "Main")]), // fine
        row(&[("address", "X"), ("Формат", "Billboard")]), // unknown format
    ];

    let outcome = construction::bulk_import(&db, &rows).await;
    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.updated, 0);
    assert_eq!(outcome.errors.len(), 2);
    assert!(outcome.errors[0].starts_with("row 2:"));
    assert!(outcome.errors[1].starts_with("row 4:"));
    assert_eq!(constructions::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_bulk_import_bad_coordinates_never_store_one_side() {
    let db = test_db().await;
    construction::bulk_import(
        &db,
        &[
            row(&[("ID", "N1"), ("address", "A"), ("Координаты", "nan")]),
            row(&[("ID", "N2"), ("address", "B"), ("Координаты", "43.2,")]),
        ],
    )
    .await;

    for model in constructions::Entity::find().all(&db).await.unwrap() {
        assert_eq!(model.lat, None);
        assert_eq!(model.lng, None);
    }
}
