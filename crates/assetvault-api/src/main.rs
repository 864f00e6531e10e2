use assetvault_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (store, pipeline, routes)
    let (_state, router) = assetvault_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    assetvault_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
