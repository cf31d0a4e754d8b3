use anyhow::Result;
use clap::Parser;
use tracing::info;
use voxmeter::{create_router, AppState, Config};

#[derive(Debug, Parser)]
#[command(name = "voxmeter", about = "Voice-agent response-latency monitor")]
struct Args {
    /// Configuration file (without extension)
    #[arg(long, default_value = "config/voxmeter")]
    config: String,

    /// Override the configured bind address
    #[arg(long)]
    bind: Option<String>,

    /// Override the configured port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    let bind = args.bind.unwrap_or(cfg.service.http.bind);
    let port = args.port.unwrap_or(cfg.service.http.port);

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Voice provider: {:?}", cfg.agent.provider);
    if cfg.vapi.public_key.is_empty() || cfg.vapi.assistant_id.is_empty() {
        info!("Vapi credentials not configured; session start will report what is missing");
    }

    let state = AppState::new(cfg.vapi, cfg.agent);
    let router = create_router(state);

    let addr = format!("{}:{}", bind, port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
