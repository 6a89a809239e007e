use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use secrecy::ExposeSecret;
use tracing::info;

use orgraph::config::Settings;
use orgraph::store::postgres::PgStore;
use orgraph::{auth, create_app, db, graphql, AppState};

#[derive(Parser)]
#[command(name = "orgraph", version, about = "GraphQL API for organizations")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the API server (default)
    Serve,
    /// Print the GraphQL schema definition
    Schema {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Issue a bearer token for an existing user id
    Token {
        #[arg(long)]
        user_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "orgraph=info,tower_http=debug".into()),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Schema { output } => {
            let sdl = graphql::sdl();
            match output {
                Some(path) => std::fs::write(&path, sdl)
                    .with_context(|| format!("Failed to write schema to {}", path.display()))?,
                None => print!("{}", sdl),
            }
            Ok(())
        }
        Command::Token { user_id } => {
            let settings = load_settings()?;
            let token = auth::issue_token(
                &user_id,
                settings.auth.jwt_secret.expose_secret().as_bytes(),
                settings.auth.jwt_expiration_seconds,
            )
            .context("Failed to issue token")?;
            println!("{}", token);
            Ok(())
        }
    }
}

fn load_settings() -> anyhow::Result<Settings> {
    let settings = Settings::load().context("Failed to load application settings")?;
    settings
        .validate_all()
        .context("Invalid application settings")?;
    Ok(settings)
}

async fn serve() -> anyhow::Result<()> {
    let settings = load_settings()?;

    info!(
        "Connecting to database {}:{}/{}",
        settings.database.host, settings.database.port, settings.database.database_name
    );
    let pool = db::create_pool(&settings).await?;
    info!(
        "Database pool established with {} max connections",
        settings.database.max_connections
    );

    let address = settings.server.address();
    let state = AppState::new(settings.clone(), Arc::new(PgStore::new(pool)));
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .context("Failed to bind to server address")?;

    info!(
        "Listening on {} (GraphQL at {})",
        address, settings.server.graphql_path
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown completed");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
