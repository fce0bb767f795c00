//! Construction service layer
//!
//! Database operations for the advertising inventory:
//! - filtered, paginated search and aggregate statistics
//! - CRUD with partial-merge updates
//! - status transitions with an unconditional history append
//! - best-effort bulk import keyed on the external identifier

use std::collections::HashMap;

use sea_orm::sea_query::{Asterisk, Func};
use sea_orm::{prelude::Expr, *};
use uuid::Uuid;

use mediamart_api::model::{
    ConstructionDetail, ConstructionListItem, ConstructionPayload, ConstructionQuery,
    ConstructionStats, ImportOutcome, Page,
};
use mediamart_common::MediamartError;
use mediamart_persistence::entity::{constructions, photos, status_history};
use mediamart_persistence::{ConstructionFormat, ConstructionStatus};

use super::import;

/// Create a construction. The address is required; the status defaults to
/// active when the payload does not carry one.
pub async fn create(
    db: &DatabaseConnection,
    payload: &ConstructionPayload,
) -> anyhow::Result<constructions::Model> {
    let address = payload
        .address
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| MediamartError::IllegalArgument("address is required".to_string()))?;

    let now = chrono::Utc::now().naive_utc();
    let mut active = constructions::ActiveModel {
        id: Set(Uuid::new_v4()),
        address: Set(address.to_string()),
        status: Set(payload.status.unwrap_or(ConstructionStatus::Active)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    apply_payload(&mut active, payload);

    let model = active.insert(db).await?;

    Ok(model)
}

/// Search constructions with conjunctive filters and pagination.
///
/// Results are ordered by external identifier ascending. The column is a
/// string, so the order is lexical ("10" sorts before "2"); clients depend
/// on the stable order, not on numeric ranking.
pub async fn search_page(
    db: &DatabaseConnection,
    query: &ConstructionQuery,
) -> anyhow::Result<Page<ConstructionListItem>> {
    let condition = build_condition(query);

    let total = constructions::Entity::find()
        .filter(condition.clone())
        .select_only()
        .column_as(Expr::col(Asterisk).count(), "count")
        .into_tuple::<i64>()
        .one(db)
        .await?
        .unwrap_or_default() as u64;

    if total == 0 {
        return Ok(Page::empty(query.page, query.limit));
    }

    // Offsets are bound as signed 64-bit values on the wire.
    let offset = query
        .page
        .saturating_sub(1)
        .saturating_mul(query.limit)
        .min(i64::MAX as u64);
    let models = constructions::Entity::find()
        .filter(condition)
        .order_by_asc(constructions::Column::ExternalId)
        .offset(offset)
        .limit(query.limit)
        .all(db)
        .await?;

    let photo_groups = models.load_many(photos::Entity, db).await?;

    let items = models
        .into_iter()
        .zip(photo_groups)
        .map(|(construction, mut photos)| {
            photos.sort_by_key(|p| p.sort_index);
            ConstructionListItem {
                construction,
                photos,
            }
        })
        .collect();

    Ok(Page::new(total, query.page, query.limit, items))
}

fn build_condition(query: &ConstructionQuery) -> Condition {
    let mut condition = Condition::all();

    if let Some(format) = query.format {
        condition = condition.add(constructions::Column::Format.eq(format));
    }

    if let Some(status) = query.status {
        condition = condition.add(constructions::Column::Status.eq(status));
    }

    if let Some(city) = &query.city {
        condition = condition.add(
            Expr::expr(Func::lower(Expr::col(constructions::Column::City)))
                .like(format!("%{}%", city.to_lowercase())),
        );
    }

    if let Some(q) = &query.q {
        let pattern = format!("%{}%", q.to_lowercase());
        condition = condition.add(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col(constructions::Column::Address)))
                        .like(pattern.clone()),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col(constructions::Column::ExternalId)))
                        .like(pattern),
                ),
        );
    }

    condition
}

/// Fetch one construction with photos and full status history.
pub async fn find_one(db: &DatabaseConnection, id: Uuid) -> anyhow::Result<ConstructionDetail> {
    let construction = constructions::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| MediamartError::ConstructionNotFound(id.to_string()))?;

    let photos = construction
        .find_related(photos::Entity)
        .order_by_asc(photos::Column::SortIndex)
        .all(db)
        .await?;

    let status_history = construction
        .find_related(status_history::Entity)
        .order_by_asc(status_history::Column::ChangedAt)
        .all(db)
        .await?;

    Ok(ConstructionDetail {
        construction,
        photos,
        status_history,
    })
}

/// Partial update: only fields present in the payload are overwritten.
pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    payload: &ConstructionPayload,
) -> anyhow::Result<constructions::Model> {
    let entity = constructions::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| MediamartError::ConstructionNotFound(id.to_string()))?;

    let mut active: constructions::ActiveModel = entity.into();
    apply_payload(&mut active, payload);
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    let model = active.update(db).await?;

    Ok(model)
}

/// Transition a construction's status and append a history row.
///
/// The history row is written unconditionally, even when the new status
/// equals the old one. Both writes share one transaction so the audit trail
/// cannot drift from the stored status.
pub async fn update_status(
    db: &DatabaseConnection,
    id: Uuid,
    new_status: ConstructionStatus,
    user_id: Option<Uuid>,
    comment: Option<String>,
) -> anyhow::Result<constructions::Model> {
    let entity = constructions::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| MediamartError::ConstructionNotFound(id.to_string()))?;

    let old_status = entity.status;
    let now = chrono::Utc::now().naive_utc();

    let tx = db.begin().await?;

    let mut active: constructions::ActiveModel = entity.into();
    active.status = Set(new_status);
    active.updated_at = Set(now);
    let updated = active.update(&tx).await?;

    let history = status_history::ActiveModel {
        id: Set(Uuid::new_v4()),
        construction_id: Set(id),
        user_id: Set(user_id),
        old_status: Set(Some(old_status)),
        new_status: Set(new_status),
        comment: Set(comment),
        changed_at: Set(now),
    };
    status_history::Entity::insert(history).exec(&tx).await?;

    tx.commit().await?;

    Ok(updated)
}

/// Hard delete. Photos and history rows go with the construction in the
/// same transaction.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> anyhow::Result<()> {
    let entity = constructions::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| MediamartError::ConstructionNotFound(id.to_string()))?;

    let tx = db.begin().await?;

    photos::Entity::delete_many()
        .filter(photos::Column::ConstructionId.eq(entity.id))
        .exec(&tx)
        .await?;

    status_history::Entity::delete_many()
        .filter(status_history::Column::ConstructionId.eq(entity.id))
        .exec(&tx)
        .await?;

    constructions::Entity::delete_by_id(entity.id)
        .exec(&tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

/// Aggregate inventory statistics.
pub async fn stats(db: &DatabaseConnection) -> anyhow::Result<ConstructionStats> {
    let total = constructions::Entity::find().count(db).await?;
    let mediaboards = constructions::Entity::find()
        .filter(constructions::Column::Format.eq(ConstructionFormat::Mediaboard))
        .count(db)
        .await?;
    let cityboards = constructions::Entity::find()
        .filter(constructions::Column::Format.eq(ConstructionFormat::Cityboard))
        .count(db)
        .await?;
    let active = constructions::Entity::find()
        .filter(constructions::Column::Status.eq(ConstructionStatus::Active))
        .count(db)
        .await?;

    Ok(ConstructionStats {
        total,
        mediaboards,
        cityboards,
        active,
    })
}

/// Best-effort bulk import of spreadsheet rows.
///
/// Each row is mapped and persisted independently; failures are collected
/// and never abort the batch. Rows with a non-empty external identifier are
/// merged onto an existing construction when one matches; everything else
/// creates a new record. There is no cross-row transaction.
pub async fn bulk_import(
    db: &DatabaseConnection,
    rows: &[HashMap<String, String>],
) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();

    for (i, row) in rows.iter().enumerate() {
        // Data rows start at spreadsheet row 2 (row 1 is the header).
        let row_no = i + 2;

        let payload = match import::map_row(row) {
            Ok(payload) => payload,
            Err(e) => {
                outcome.errors.push(format!("row {}: {}", row_no, e));
                continue;
            }
        };

        match import_row(db, &payload).await {
            Ok(true) => outcome.created += 1,
            Ok(false) => outcome.updated += 1,
            Err(e) => outcome.errors.push(format!("row {}: {}", row_no, e)),
        }
    }

    if !outcome.errors.is_empty() {
        tracing::warn!(
            errors = outcome.errors.len(),
            created = outcome.created,
            updated = outcome.updated,
            "bulk import finished with row errors"
        );
    }

    outcome
}

/// Returns true when a new construction was created, false on merge.
async fn import_row(db: &DatabaseConnection, payload: &ConstructionPayload) -> anyhow::Result<bool> {
    let external_id = payload
        .external_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    if let Some(external_id) = external_id {
        let existing = constructions::Entity::find()
            .filter(constructions::Column::ExternalId.eq(external_id))
            .one(db)
            .await?;

        if let Some(entity) = existing {
            let mut active: constructions::ActiveModel = entity.into();
            apply_payload(&mut active, payload);
            active.updated_at = Set(chrono::Utc::now().naive_utc());
            active.update(db).await?;
            return Ok(false);
        }
    }

    create(db, payload).await?;
    Ok(true)
}

/// Overwrite the fields present in the payload; absent fields stay
/// untouched. Coordinates are written as a pair or not at all.
fn apply_payload(active: &mut constructions::ActiveModel, payload: &ConstructionPayload) {
    if let Some(v) = &payload.external_id {
        active.external_id = Set(Some(v.clone()));
    }
    if let Some(v) = &payload.address {
        active.address = Set(v.clone());
    }
    if let Some(v) = &payload.city {
        active.city = Set(Some(v.clone()));
    }
    if let Some(v) = payload.format {
        active.format = Set(Some(v));
    }
    if let Some(v) = payload.price {
        active.price = Set(Some(v));
    }
    if let Some(v) = payload.status {
        active.status = Set(v);
    }
    if let (Some(lat), Some(lng)) = (payload.lat, payload.lng) {
        active.lat = Set(Some(lat));
        active.lng = Set(Some(lng));
    }
    if let Some(v) = &payload.size {
        active.size = Set(Some(v.clone()));
    }
    if let Some(v) = &payload.classification {
        active.classification = Set(Some(v.clone()));
    }
    if let Some(v) = &payload.lighting {
        active.lighting = Set(Some(v.clone()));
    }
    if let Some(v) = &payload.category {
        active.category = Set(Some(v.clone()));
    }
    if let Some(v) = &payload.mrp {
        active.mrp = Set(Some(v.clone()));
    }
    if let Some(v) = &payload.print_requirement {
        active.print_requirement = Set(Some(v.clone()));
    }
    if let Some(v) = &payload.warehouse {
        active.warehouse = Set(Some(v.clone()));
    }
    if let Some(v) = &payload.side {
        active.side = Set(Some(v.clone()));
    }
    if let Some(v) = &payload.orientation {
        active.orientation = Set(Some(v.clone()));
    }
    if let Some(v) = &payload.dynamic {
        active.dynamic = Set(Some(v.clone()));
    }
    if let Some(v) = &payload.provider {
        active.provider = Set(Some(v.clone()));
    }
    if let Some(v) = &payload.number {
        active.number = Set(Some(v.clone()));
    }
}
