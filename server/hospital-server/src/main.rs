use clap::Parser;
use colored::*;
use database_layer::ReferentialPolicy;
use std::{env, io::IsTerminal, net::SocketAddr};
use tracing::{info, warn};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use error_common::{log_error, HospitalError, Result};
use hospital_server::{create_app, server::DEFAULT_DATABASE_URL, HospitalServer, ServerConfig};
use logger_redacted::{redactor_for, LoggerConfig};

/// Hospital Records Engine HTTP Server
#[derive(Parser, Debug)]
#[command(name = "hospital-server")]
#[command(about = "Patient, doctor, appointment and billing records over HTTP forms")]
struct Args {
    /// Server bind address
    #[arg(long, env = "HOSPITAL_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(short, long, env = "HOSPITAL_PORT", default_value = "8000")]
    port: u16,

    /// PostgreSQL connection string, or `memory` for the in-process store
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL, hide_env_values = true)]
    database_url: String,

    /// Maximum pooled database connections
    #[arg(long, env = "HOSPITAL_DB_MAX_CONNECTIONS", default_value = "10")]
    max_connections: u32,

    /// Whether appointment and bill references are checked: orphan or enforce
    #[arg(long, env = "HOSPITAL_REFERENTIAL_POLICY", default_value = "orphan")]
    referential_policy: ReferentialPolicy,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log phone numbers and e-mail addresses unredacted
    #[arg(long)]
    no_redaction: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let logger_config = LoggerConfig {
        redaction_enabled: !args.no_redaction,
        log_level: if args.verbose { "debug" } else { "info" }.to_string(),
        json: env::var("HOSPITAL_ENV").is_ok_and(|value| value == "production"),
    };
    init_tracing(&logger_config)?;

    info!("🏥 {}", "Starting Hospital Records Engine".bright_cyan());
    info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());
    info!(
        "🌐 Bind address: {}",
        format!("{}:{}", args.host, args.port).bright_yellow()
    );
    info!("🔗 Referential policy: {}", args.referential_policy.to_string().bright_white());

    let config = ServerConfig {
        database_url: args.database_url.clone(),
        max_connections: args.max_connections,
        referential_policy: args.referential_policy,
        ..ServerConfig::default()
    };

    let server = HospitalServer::new(config, redactor_for(&logger_config))
        .await
        .map_err(|e| {
            let err = HospitalError::DatabaseError(format!("Failed to open entity store: {e}"));
            log_error("startup", &err);
            err
        })?;
    info!("🗄️  Store backend: {}", server.store.backend().bright_white());

    let store = server.store.clone();
    let app = create_app(server);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| HospitalError::ConfigError(format!("Invalid bind address: {e}")))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| HospitalError::NetworkError(format!("Failed to bind to {addr}: {e}")))?;

    info!(
        "🚀 {}",
        format!("Hospital Records Engine running on http://{addr}").bright_green()
    );
    info!(
        "📋 {}",
        format!("Health check available at: http://{addr}/health").bright_blue()
    );

    let http_result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HospitalError::ServerError(format!("HTTP server error: {e}")));

    store.close().await;
    info!("👋 {}", "Server stopped".bright_cyan());

    http_result
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn init_tracing(config: &LoggerConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));

    if config.json {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .try_init()
            .map_err(|e| HospitalError::ConfigError(format!("Failed to initialize logging: {e}")))?;
    } else {
        let use_colors = env::var("NO_COLOR").is_err() && std::io::stdout().is_terminal();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_colors)
                    .with_level(true),
            )
            .try_init()
            .map_err(|e| HospitalError::ConfigError(format!("Failed to initialize logging: {e}")))?;

        if use_colors {
            print_startup_banner();
        }
    }

    Ok(())
}

fn print_startup_banner() {
    println!("{}", "╔══════════════════════════════════════════════════════════════╗".bright_cyan());
    println!("{}", "║                  🏥 HOSPITAL RECORDS ENGINE                  ║".bright_cyan());
    println!("{}", "║         Patients · Doctors · Appointments · Billing          ║".bright_cyan());
    println!("{}", "╚══════════════════════════════════════════════════════════════╝".bright_cyan());
    println!();
}
