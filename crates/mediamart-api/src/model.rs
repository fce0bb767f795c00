//! Shared request/response model types for the MediaMart API.

use serde::{Deserialize, Serialize};

use mediamart_persistence::entity::{constructions, photos, status_history};
use mediamart_persistence::{ConstructionFormat, ConstructionStatus};

/// One page of results.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: vec![],
            total: 0,
            page: 1,
            limit: 20,
            total_pages: 0,
        }
    }
}

impl<T> Page<T> {
    pub fn new(total: u64, page: u64, limit: u64, items: Vec<T>) -> Self {
        Self {
            items,
            total,
            page,
            limit,
            total_pages: if limit > 0 { total.div_ceil(limit) } else { 0 },
        }
    }

    pub fn empty(page: u64, limit: u64) -> Self {
        Self::new(0, page, limit, vec![])
    }
}

/// Creation/merge payload for a construction. Used by the create endpoint,
/// the partial update endpoint and the spreadsheet import: fields left as
/// `None` are not written during a merge.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConstructionPayload {
    pub external_id: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub format: Option<ConstructionFormat>,
    pub price: Option<f64>,
    pub status: Option<ConstructionStatus>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub size: Option<String>,
    pub classification: Option<String>,
    pub lighting: Option<String>,
    pub category: Option<String>,
    pub mrp: Option<String>,
    pub print_requirement: Option<String>,
    pub warehouse: Option<String>,
    pub side: Option<String>,
    pub orientation: Option<String>,
    pub dynamic: Option<String>,
    pub provider: Option<String>,
    pub number: Option<String>,
}

/// Raw, untyped list query parameters as they arrive on the wire.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConstructionQueryParams {
    pub format: Option<String>,
    pub status: Option<String>,
    pub city: Option<String>,
    pub q: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Validated list query. All filters are combined conjunctively.
#[derive(Clone, Debug)]
pub struct ConstructionQuery {
    pub format: Option<ConstructionFormat>,
    pub status: Option<ConstructionStatus>,
    pub city: Option<String>,
    pub q: Option<String>,
    pub page: u64,
    pub limit: u64,
}

/// Status transition request body.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusPayload {
    pub new_status: ConstructionStatus,
    pub comment: Option<String>,
}

/// Outcome of a best-effort bulk import. Row failures are collected here
/// instead of aborting the batch.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub created: u64,
    pub updated: u64,
    pub errors: Vec<String>,
}

/// Aggregate inventory statistics.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConstructionStats {
    pub total: u64,
    pub mediaboards: u64,
    pub cityboards: u64,
    pub active: u64,
}

/// List item: a construction with its photos eagerly loaded.
#[derive(Clone, Debug, Serialize)]
pub struct ConstructionListItem {
    #[serde(flatten)]
    pub construction: constructions::Model,
    pub photos: Vec<photos::Model>,
}

/// Detail view: photos plus the full status history.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructionDetail {
    #[serde(flatten)]
    pub construction: constructions::Model,
    pub photos: Vec<photos::Model>,
    pub status_history: Vec<status_history::Model>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_total_pages_rounds_up() {
        let page = Page::<u32>::new(5, 1, 2, vec![1, 2]);
        assert_eq!(page.total_pages, 3);

        let page = Page::<u32>::new(4, 1, 2, vec![1, 2]);
        assert_eq!(page.total_pages, 2);

        let page = Page::<u32>::new(0, 1, 20, vec![]);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = Page::<u32>::new(1, 1, 20, vec![7]);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["items"][0], 7);
    }

    #[test]
    fn test_payload_accepts_partial_camel_case_body() {
        let payload: ConstructionPayload = serde_json::from_str(
            r#"{"externalId":"A1","address":"Main St","format":"Медиаборд"}"#,
        )
        .unwrap();
        assert_eq!(payload.external_id.as_deref(), Some("A1"));
        assert_eq!(
            payload.format,
            Some(mediamart_persistence::ConstructionFormat::Mediaboard)
        );
        assert!(payload.city.is_none());
    }
}
