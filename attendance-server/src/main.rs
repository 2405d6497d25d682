use attendance_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. dotenv, work dir, logging
    setup_environment()?;

    print_banner();

    tracing::info!("Attendance server starting...");

    // 2. Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "Configuration loaded"
    );
    if config.is_production() && config.login_delay_ms == 0 {
        tracing::warn!("LOGIN_DELAY_MS is 0 in production");
    }

    // 3. Open the database and build shared state
    let state = ServerState::initialize(&config).await?;

    // 4. Serve until Ctrl-C
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
