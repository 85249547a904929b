use netgrid::app;
use netgrid::config::AppConfig;

/// Main entry point for the web application
///
/// Initializes logging, reads the configuration from the environment, and
/// runs the upload-and-render server.
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Success or error object
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    app::run(AppConfig::from_env()).await
}
