//! Main entry point for the MediaMart server.
//!
//! Loads configuration, initializes logging and the database, seeds the
//! default admin account and starts the HTTP server.

use std::sync::Arc;

use mediamart_server::{
    model::{AppState, Configuration},
    startup,
};
use tracing::info;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let configuration = Configuration::new();

    let logging_config = configuration.logging_config();
    let _logging_guard = startup::init_logging(&logging_config)?;

    let database_connection = configuration.database_connection().await?;
    mediamart_persistence::schema::create_tables(&database_connection).await?;

    let admin_password = configuration.admin_seed_password();
    if admin_password.is_empty() {
        info!("no admin password configured, skipping admin seeding");
    } else {
        mediamart_auth::service::user::ensure_default_admin(
            &database_connection,
            &configuration.admin_seed_name(),
            &configuration.admin_seed_email(),
            &admin_password,
        )
        .await?;
    }

    let address = configuration.server_address();
    let port = configuration.server_port();
    let context_path = configuration.server_context_path();

    let app_state = Arc::new(AppState::new(configuration, database_connection));

    let server = startup::http_server(app_state, context_path.clone(), address.clone(), port)?;

    info!(
        address = %address,
        port = port,
        context_path = %context_path,
        "MediaMart server listening"
    );

    server.await?;

    Ok(())
}
