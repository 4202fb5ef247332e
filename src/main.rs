use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

mod config;
mod error;
mod frontend;
mod handlers;
mod store;
mod uploads;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up PORT, RECIPE_DATA_FILE, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = crate::config::config();
    config
        .bootstrap_storage()
        .context("failed to prepare data file and uploads directory")?;

    let app = app();

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    println!("🚀 Recipe API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}

fn app() -> Router {
    let config = config::config();

    Router::new()
        .merge(recipe_routes())
        // Uploaded images by their public /uploads/<name> path
        .nest_service("/uploads", ServeDir::new(&config.storage.upload_dir))
        // Frontend assets, then the SPA entry document, for everything else
        .fallback_service(
            ServeDir::new(&config.storage.frontend_dir)
                .not_found_service(axum::routing::any(frontend::index)),
        )
        // Global middleware
        .layer(DefaultBodyLimit::max(config.api.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn recipe_routes() -> Router {
    use handlers::recipes;

    Router::new()
        .route("/api/recipes", get(recipes::list).post(recipes::create))
        .route(
            "/api/recipes/:id",
            axum::routing::put(recipes::update).delete(recipes::delete),
        )
}
