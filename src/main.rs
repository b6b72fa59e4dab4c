use std::env;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_dir = env_or("PAYROLL_CONFIG_DIR", DEFAULT_CONFIG_DIR);
    let bind_addr = env_or("PAYROLL_BIND_ADDR", DEFAULT_BIND_ADDR);

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        company = %config.company().name,
        deduction_policy = ?config.policy().deduction_policy,
        transit_policy = ?config.policy().transit_policy,
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Payroll server listening");

    axum::serve(listener, router).await?;
    Ok(())
}
