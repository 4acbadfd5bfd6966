pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

use std::net::SocketAddr;
use tokio::net::TcpListener;

use shared::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config)?;

    let conn = shared::data::db::initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    system::initialization::seed_empty_collections(&conn, &config).await?;

    let app = routes::configure_routes(AppState::new(conn));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Server listening on http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
