use order_service::config::DEFAULT_POOL_SIZE;
use order_service::{demo, OrderService, OrderServiceConfig, RepositoryType};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Order Service CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Set the log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Commands
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate {
        /// Database URL
        #[arg(short, long)]
        database_url: Option<String>,
    },
    /// Insert a demo user, products and vouchers
    Seed {
        /// Database URL
        #[arg(short, long)]
        database_url: Option<String>,

        /// Database pool size
        #[arg(short, long)]
        pool_size: Option<u32>,
    },
}

fn config_for(database_url: Option<String>, pool_size: Option<u32>) -> common::Result<OrderServiceConfig> {
    let mut config = match database_url {
        Some(url) => OrderServiceConfig::new(url, DEFAULT_POOL_SIZE, true),
        None => OrderServiceConfig::from_env()?,
    };
    if let Some(pool_size) = pool_size {
        config.db_pool_size = pool_size;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("order_service={}", cli.log_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Migrate { database_url } => {
            let config = config_for(database_url, None)?;
            let pool = common::db::init_db_pool(&config.database_url, 1).await?;
            common::db::run_migrations(&pool).await?;
            info!("Migrations complete");
        }
        Commands::Seed { database_url, pool_size } => {
            let config = config_for(database_url, pool_size)?;
            info!("Seeding demo data with database pool size: {}", config.db_pool_size);

            let service = OrderService::with_repository(RepositoryType::Postgres(config)).await?;
            let data = demo::seed(&service).await?;
            info!("Seeded demo user {}", data.user.id);
        }
    }

    Ok(())
}
