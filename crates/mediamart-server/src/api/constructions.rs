//! Construction endpoints: search, stats, CRUD, status transitions and
//! spreadsheet import. Reads are public; writes require a role.

use actix_multipart::Multipart;
use actix_web::{delete, get, patch, post, web, HttpRequest, HttpResponse, Scope};
use futures::StreamExt;
use uuid::Uuid;

use mediamart_api::model::{ConstructionPayload, ConstructionQueryParams, UpdateStatusPayload};
use mediamart_api::validation;
use mediamart_core::service::{construction, import};
use mediamart_persistence::UserRole;

use crate::model::{AppState, ErrorResult};
use crate::secured;

pub fn routes() -> Scope {
    // "/stats" must be registered before "/{id}"
    web::scope("/constructions")
        .service(list)
        .service(stats)
        .service(upload_excel)
        .service(create)
        .service(update_status)
        .service(update)
        .service(detail)
        .service(remove)
}

#[get("")]
async fn list(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Query<ConstructionQueryParams>,
) -> HttpResponse {
    let query = match validation::parse_query(&params) {
        Ok(query) => query,
        Err(e) => return ErrorResult::http_response_bad_request(e.code.as_ref(), req.path()),
    };

    match construction::search_page(data.db(), &query).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => ErrorResult::from_service_error(&e, req.path()),
    }
}

#[get("/stats")]
async fn stats(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    match construction::stats(data.db()).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => ErrorResult::from_service_error(&e, req.path()),
    }
}

#[get("/{id}")]
async fn detail(
    req: HttpRequest,
    data: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> HttpResponse {
    match construction::find_one(data.db(), id.into_inner()).await {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => ErrorResult::from_service_error(&e, req.path()),
    }
}

#[post("")]
async fn create(
    req: HttpRequest,
    data: web::Data<AppState>,
    payload: web::Json<ConstructionPayload>,
) -> HttpResponse {
    secured!(&req, UserRole::Admin, UserRole::Manager);

    if let Err(e) = validation::validate_create(&payload) {
        return ErrorResult::http_response_bad_request(e.code.as_ref(), req.path());
    }

    match construction::create(data.db(), &payload).await {
        Ok(model) => HttpResponse::Created().json(model),
        Err(e) => ErrorResult::from_service_error(&e, req.path()),
    }
}

#[patch("/{id}")]
async fn update(
    req: HttpRequest,
    data: web::Data<AppState>,
    id: web::Path<Uuid>,
    payload: web::Json<ConstructionPayload>,
) -> HttpResponse {
    secured!(&req, UserRole::Admin, UserRole::Manager);

    match construction::update(data.db(), id.into_inner(), &payload).await {
        Ok(model) => HttpResponse::Ok().json(model),
        Err(e) => ErrorResult::from_service_error(&e, req.path()),
    }
}

#[patch("/{id}/status")]
async fn update_status(
    req: HttpRequest,
    data: web::Data<AppState>,
    id: web::Path<Uuid>,
    payload: web::Json<UpdateStatusPayload>,
) -> HttpResponse {
    let user = secured!(&req, UserRole::Admin, UserRole::Manager);

    let payload = payload.into_inner();
    let result = construction::update_status(
        data.db(),
        id.into_inner(),
        payload.new_status,
        Some(user.id),
        payload.comment,
    )
    .await;

    match result {
        Ok(model) => HttpResponse::Ok().json(model),
        Err(e) => ErrorResult::from_service_error(&e, req.path()),
    }
}

#[delete("/{id}")]
async fn remove(
    req: HttpRequest,
    data: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> HttpResponse {
    secured!(&req, UserRole::Admin);

    match construction::delete(data.db(), id.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => ErrorResult::from_service_error(&e, req.path()),
    }
}

#[post("/upload-excel")]
async fn upload_excel(
    req: HttpRequest,
    data: web::Data<AppState>,
    mut payload: Multipart,
) -> HttpResponse {
    secured!(&req, UserRole::Admin, UserRole::Manager);

    // Read the "file" field from the multipart body
    let mut file_data: Vec<u8> = Vec::new();
    while let Some(Ok(mut field)) = payload.next().await {
        let is_file = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .map(|n| n == "file")
            .unwrap_or(false);

        if is_file {
            while let Some(Ok(chunk)) = field.next().await {
                file_data.extend_from_slice(&chunk);
            }
            break;
        }
    }

    if file_data.is_empty() {
        return ErrorResult::http_response_bad_request("no file uploaded", req.path());
    }

    let rows = match import::parse_xlsx(&file_data) {
        Ok(rows) => rows,
        Err(e) => {
            return ErrorResult::http_response_bad_request(
                &format!("invalid workbook: {}", e),
                req.path(),
            );
        }
    };

    let total_processed = rows.len();
    let outcome = construction::bulk_import(data.db(), &rows).await;

    tracing::info!(
        created = outcome.created,
        updated = outcome.updated,
        errors = outcome.errors.len(),
        "spreadsheet import finished"
    );

    HttpResponse::Ok().json(serde_json::json!({
        "message": "import finished",
        "createdCount": outcome.created,
        "updatedCount": outcome.updated,
        "errorMessages": outcome.errors,
        "totalProcessed": total_processed,
    }))
}
