use anyhow::{Context, Result};
use log::{info, warn};
use reqwest::Client;
use simplelog::{ColorChoice, Config as LogConfig, TermLogger, TerminalMode};

use course_picker::app::App;
use course_picker::catalog::Catalog;
use course_picker::config::Config;
use course_picker::utils::console::Terminal;

// Entry point for the async main function, powered by tokio runtime.
#[tokio::main]
async fn main() -> Result<()> {
    // Reads flags, falling back to the environment and a `.env` file.
    let config = Config::load()?;

    // Initializes logging with simplelog to the terminal with mixed output (both stdout and stderr) and automatic color support.
    TermLogger::init(
        config.log_level,
        LogConfig::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Failed to initialise the logger")?;

    // Builds the HTTP client used for the single course list request.
    let client = Client::builder()
        .build()
        .context("Failed to build the client")?;

    // Fetches the course list. A failed fetch leaves the catalog empty; the session still starts.
    let mut catalog = Catalog::new();
    catalog.refresh(&client, &config.endpoint).await;
    // Reports how many courses are on offer.
    if catalog.is_empty() {
        warn!("No courses available from {}", config.endpoint);
    } else {
        info!("Loaded {} courses", catalog.len());
    }

    // Starts the interactive session on stdin/stdout until the user quits or input ends.
    let mut app = App::new(catalog, config.credit_limit, Terminal::stdio());
    app.run()
}
