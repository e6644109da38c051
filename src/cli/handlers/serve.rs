//! API server handlers

use crate::api::serve_api;
use crate::cli::output::*;
use crate::AppConfig;
use crate::Result;

pub async fn handle_serve_api(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
    no_cors: bool,
) -> Result<()> {
    let mut config = config.clone();
    // CLI arguments take priority over config
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if no_cors {
        config.server.cors = false;
    }
    config.validate()?;

    println!("🚀 Starting ShopRAG API Server");
    println!("===============================\n");
    println!("📍 Host: {}", config.server.host);
    println!("🔌 Port: {}", config.server.port);
    println!(
        "🌐 CORS: {}",
        if config.server.cors {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    println!("🛒 Catalog: {}", config.catalog_path().display());
    println!();

    serve_api(config).await?;

    print_success("API server stopped");
    Ok(())
}
