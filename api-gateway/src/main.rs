//! API Gateway for the shop order service

use std::sync::Arc;

use api_gateway::config::AppConfig;
use api_gateway::{app, AppState};
use clap::Parser;
use dotenv::dotenv;
use order_service::{demo, OrderService, RepositoryType};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

/// Shop order API server
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Listening address; defaults to 127.0.0.1 on $PORT
    #[clap(short, long)]
    addr: Option<String>,

    /// Use the in-memory store even when DATABASE_URL is set
    #[clap(long)]
    in_memory: bool,

    /// Seed a demo user, product and voucher
    #[clap(short, long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();
    let config = AppConfig::from_env();

    // Initialize logging with debug level when DEBUG=1 env var is set
    let log_level = if config.debug { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .parse("tower_http=debug,api_gateway=debug,order_service=debug")?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Debug logging enabled");

    // Initialize services
    let order_service = match config.order_service_config() {
        Some(service_config) if !args.in_memory => {
            info!("Using PostgreSQL order store");
            OrderService::with_repository(RepositoryType::Postgres(service_config)).await?
        }
        _ => {
            info!("Using in-memory order store");
            OrderService::with_repository(RepositoryType::InMemory).await?
        }
    };
    let order_service = Arc::new(order_service);

    if args.demo {
        info!("Creating demo data...");
        demo::seed(&order_service).await?;
    }

    // Create app state
    let state = Arc::new(AppState::new(order_service));
    let app = app(state, log_level);

    // Start the server
    let addr: std::net::SocketAddr = match args.addr {
        Some(addr) => addr.parse()?,
        None => ([127, 0, 0, 1], config.port).into(),
    };
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    // Run until interrupt signal
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
