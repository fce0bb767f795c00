//! HTTP server setup.

use std::sync::Arc;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{api, middleware::auth::Authentication, model::AppState};

/// Creates and binds the HTTP server.
///
/// All routes live under the configured context path (`/api` by default).
pub fn http_server(
    app_state: Arc<AppState>,
    context_path: String,
    address: String,
    port: u16,
) -> Result<Server, std::io::Error> {
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Authentication)
            .app_data(web::Data::from(app_state.clone()))
            .service(
                web::scope(&context_path)
                    .service(api::constructions::routes())
                    .service(api::files::routes())
                    .service(api::auth::routes()),
            )
    })
    .bind((address, port))?
    .run())
}
