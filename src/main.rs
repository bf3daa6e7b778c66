use actix_web::{middleware::from_fn, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use solcopilot::api::middleware::require_api_key;
use solcopilot::cli::{
    build_orchestrator,
    commands::{Cli, Commands},
    run_cli,
};
use solcopilot::config::AppConfig;
use solcopilot::session::SessionStore;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"status": "healthy"}))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if !matches!(cli.command, Commands::Serve) {
        if let Err(e) = run_cli(cli.command, cli.config).await {
            error!("{}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    info!("Starting Solidity Copilot...");

    let config = match AppConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        base_url = %config.llm.base_url,
        model = %config.llm.model,
        mode = ?config.pipeline.mode,
        "LLM configuration loaded"
    );

    let orchestrator = match build_orchestrator(&config) {
        Ok(o) => web::Data::new(o),
        Err(e) => {
            error!("Failed to initialize LLM provider: {}", e);
            std::process::exit(1);
        }
    };

    let sessions = web::Data::new(SessionStore::new().into_pool());

    let host = config.server.host.clone();
    let port = config.server.port;

    info!("Server listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(sessions.clone())
            .app_data(orchestrator.clone())
            .route("/health", web::get().to(health))
            .wrap(from_fn(require_api_key))
            .configure(solcopilot::api::routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
