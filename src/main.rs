// src/main.rs

use std::sync::Arc;

use anyhow::Context;
use gasservice::application::commands::{
    build_maintenance_reminders, check_maintenance_consistency, list_upcoming_maintenance,
};
use gasservice::application::state::AppState;
use gasservice::config::AppConfig;
use gasservice::db::{
    create_connection_pool, get_database_stats, initialize_database, verify_database_integrity,
};
use gasservice::ErrorResponse;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. CONFIGURATION & INFRASTRUCTURE
    let config = AppConfig::from_env().context("invalid configuration")?;
    let pool = Arc::new(create_connection_pool(&config).context("failed to open database")?);

    // Initialize schema (idempotent)
    {
        let conn = pool.get()?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;
        let stats = get_database_stats(&conn)?;
        log::info!(
            "Database ready: {} clients, {} maintenance records, {} history entries",
            stats.client_count,
            stats.maintenance_count,
            stats.history_count
        );
    }

    // 2. APPLICATION STATE
    let state = AppState::new(config, pool);

    // 3. COMMAND
    let command = std::env::args().nth(1).unwrap_or_else(|| "reminders".to_string());
    let output = match command.as_str() {
        "reminders" => serde_json::to_string_pretty(
            &build_maintenance_reminders(&state, None).map_err(command_error)?,
        )?,
        "upcoming" => serde_json::to_string_pretty(
            &list_upcoming_maintenance(&state, None).map_err(command_error)?,
        )?,
        "audit" => serde_json::to_string_pretty(
            &check_maintenance_consistency(&state).map_err(command_error)?,
        )?,
        other => anyhow::bail!("unknown command '{}' (expected reminders, upcoming or audit)", other),
    };

    println!("{}", output);
    Ok(())
}

fn command_error(error: ErrorResponse) -> anyhow::Error {
    anyhow::anyhow!(
        "{}{}",
        error.message,
        error.details.map(|d| format!(": {}", d)).unwrap_or_default()
    )
}
