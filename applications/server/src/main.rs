/// Wallet Server - account and transfer API
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wallet_server::{build_state, create_router, services::SignupRequest, ServerConfig};

#[derive(Parser)]
#[command(name = "wallet-server")]
#[command(about = "Wallet account and transfer server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "WALLET_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user with a seeded balance
    AddUser {
        /// Email-shaped username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// List users, optionally filtered by name
    ListUsers {
        /// Substring of first or last name
        #[arg(short, long, default_value = "")]
        filter: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wallet_server=info,wallet_storage=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => ServerConfig::load_from(Some(path))?,
        None => ServerConfig::load()?,
    };
    config.validate()?;

    match cli.command {
        Commands::Serve => {
            serve(&config).await?;
        }
        Commands::AddUser {
            username,
            password,
            first_name,
            last_name,
        } => {
            add_user(
                &config,
                SignupRequest {
                    username,
                    password,
                    first_name,
                    last_name,
                },
            )
            .await?;
        }
        Commands::ListUsers { filter } => {
            list_users(&config, &filter).await?;
        }
    }

    Ok(())
}

async fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Wallet Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let app_state = build_state(config).await?;
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(config: &ServerConfig, req: SignupRequest) -> anyhow::Result<()> {
    let app_state = build_state(config).await?;
    let outcome = app_state.accounts.signup(req).await?;
    let balance = app_state.accounts.balance(&outcome.user.id).await?;

    println!(
        "Created user {} ({}) with balance {}",
        outcome.user.id, outcome.user.username, balance
    );

    Ok(())
}

async fn list_users(config: &ServerConfig, filter: &str) -> anyhow::Result<()> {
    let app_state = build_state(config).await?;
    let users = app_state.accounts.search_users(filter).await?;

    println!("Users:");
    for user in users {
        println!(
            "  {} - {} ({} {})",
            user.id, user.username, user.first_name, user.last_name
        );
    }

    Ok(())
}
