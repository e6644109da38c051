use clap::Parser;
use shoprag::cli::*;
use shoprag::config::AppConfig;
use shoprag::config::ConfigSource;
use shoprag::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let source = cli
        .config
        .clone()
        .map_or_else(ConfigSource::locate, ConfigSource::File);
    let config = AppConfig::load_from(&source)?;

    // Initialize logging
    if cli.verbose {
        shoprag::logging::init_logging_with_level("debug")?;
    } else {
        shoprag::logging::init_logging_with_config(&config.logging)?;
    }
    source.log();

    // Execute the requested command
    let outcome = match cli.command {
        Commands::Search {
            query,
            top_k,
            explain,
            json,
        } => handle_search(&config, query, top_k, explain, json).await,
        Commands::Products { limit } => handle_list_products(&config, limit).await,
        Commands::Route { message } => handle_route(message).await,
        Commands::Context {
            message,
            top_k,
            cart_items,
            prompt,
        } => handle_context(&config, message, top_k, cart_items, prompt).await,
        Commands::Serve {
            host,
            port,
            no_cors,
        } => handle_serve_api(&config, host, port, no_cors).await,
        Commands::Config => handle_config_command(&config).await,
    };

    if let Err(e) = outcome {
        print_error(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}
