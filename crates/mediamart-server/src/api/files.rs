//! File endpoints.
//!
//! Object storage is not wired up yet; upload returns the URL the file
//! would get and download streams a plain-text placeholder document.

use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Scope};
use futures::StreamExt;
use serde::Deserialize;

use mediamart_persistence::UserRole;

use crate::model::{AppState, ErrorResult};
use crate::secured;

const DOWNLOAD_FORMATS: &[&str] = &["pdf", "ppt", "xls"];

pub fn routes() -> Scope {
    web::scope("/files").service(upload).service(download)
}

#[post("/upload")]
async fn upload(req: HttpRequest, data: web::Data<AppState>, mut payload: Multipart) -> HttpResponse {
    secured!(&req, UserRole::Admin, UserRole::Manager, UserRole::Viewer);

    let mut filename = String::new();
    let mut file_size: usize = 0;

    while let Some(Ok(mut field)) = payload.next().await {
        let field_filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        if let Some(name) = field_filename {
            filename = name;
            while let Some(Ok(chunk)) = field.next().await {
                file_size += chunk.len();
            }
            break;
        }
    }

    if filename.is_empty() || file_size == 0 {
        return ErrorResult::http_response_bad_request("no file uploaded", req.path());
    }

    let timestamp = chrono::Utc::now().timestamp_millis();
    let url = format!(
        "{}/{}-{}",
        data.configuration.files_base_url(),
        timestamp,
        filename
    );

    tracing::info!(filename = %filename, size = file_size, "file upload accepted");

    HttpResponse::Ok().json(serde_json::json!({ "url": url }))
}

#[derive(Debug, Deserialize)]
struct DownloadParams {
    ids: Option<String>,
}

#[get("/download/{format}/{timestamp}")]
async fn download(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    params: web::Query<DownloadParams>,
) -> HttpResponse {
    let (format, timestamp) = path.into_inner();

    if !DOWNLOAD_FORMATS.contains(&format.as_str()) {
        return ErrorResult::http_response_bad_request("unsupported document format", req.path());
    }

    let ids = params.ids.clone().unwrap_or_default();
    let body = format!(
        "Commercial proposal ({}) generated at {}\nConstructions: {}\n",
        format, timestamp, ids
    );

    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"proposal-{}.{}.txt\"", timestamp, format),
        ))
        .body(body)
}
