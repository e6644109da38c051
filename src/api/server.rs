//! HTTP server implementation

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::rag::RetrievalService;
use crate::Result;

/// Build the full application router around `state`
pub fn build_app(state: AppState, enable_cors: bool) -> Router {
    let mut app = Router::new()
        .nest("/api", routes::api_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if enable_cors {
        info!("✅ CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Index the catalog and serve the API until the process is stopped
pub async fn serve_api(config: AppConfig) -> Result<()> {
    info!("🚀 Starting ShopRAG API server...");

    let service = RetrievalService::new(&config);
    let enable_cors = config.server.cors;
    let addr = config.bind_address();
    let app = build_app(AppState::new(service, config), enable_cors);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /api/health         - Health check");
    info!("  GET  /api/products       - Raw product catalog");
    info!("  GET  /api/search?q=&limit= - Hybrid product search");
    info!("  POST /api/chat           - Route a message and build its prompt");
    info!("  POST /api/reload         - Re-index the catalog");

    axum::serve(listener, app).await?;

    Ok(())
}
