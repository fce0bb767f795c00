//! Authentication endpoints: login and admin-only user registration.

use actix_web::{post, web, HttpRequest, HttpResponse, Scope};
use serde::{Deserialize, Serialize};

use mediamart_api::validation;
use mediamart_auth::service::auth::encode_jwt_token;
use mediamart_auth::service::user;
use mediamart_persistence::UserRole;

use crate::model::{AppState, ErrorResult};
use crate::secured;

pub fn routes() -> Scope {
    web::scope("/auth").service(login).service(register)
}

#[derive(Debug, Deserialize)]
struct LoginData {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResult {
    access_token: String,
    token_ttl: i64,
    role: UserRole,
    username: String,
}

#[post("/login")]
async fn login(
    req: HttpRequest,
    data: web::Data<AppState>,
    body: web::Json<LoginData>,
) -> HttpResponse {
    let authenticated = match user::authenticate(data.db(), &body.email, &body.password).await {
        Ok(user) => user,
        Err(e) => return ErrorResult::from_service_error(&e, req.path()),
    };

    let secret_key = data.configuration.token_secret_key();
    let token_ttl = data.configuration.token_ttl_seconds();

    let access_token =
        match encode_jwt_token(authenticated.id, authenticated.role, &secret_key, token_ttl) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(error = %e, "failed to encode JWT");
                return ErrorResult::http_response(
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to generate token",
                    req.path(),
                );
            }
        };

    HttpResponse::Ok().json(LoginResult {
        access_token,
        token_ttl,
        role: authenticated.role,
        username: authenticated.name,
    })
}

#[derive(Debug, Deserialize)]
struct RegisterData {
    name: String,
    email: String,
    password: String,
    role: UserRole,
}

#[post("/register")]
async fn register(
    req: HttpRequest,
    data: web::Data<AppState>,
    body: web::Json<RegisterData>,
) -> HttpResponse {
    secured!(&req, UserRole::Admin);

    if let Err(e) = validation::validate_email(&body.email) {
        return ErrorResult::http_response_bad_request(e.code.as_ref(), req.path());
    }
    if let Err(e) = validation::validate_password(&body.password) {
        return ErrorResult::http_response_bad_request(e.code.as_ref(), req.path());
    }

    match user::create(data.db(), &body.name, &body.email, &body.password, body.role).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(e) => ErrorResult::from_service_error(&e, req.path()),
    }
}
