use reelvault_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    reelvault_api::telemetry::init_tracing(&config);

    // Initialize the application (database, services, routes)
    let (_state, router) = reelvault_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    reelvault_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
