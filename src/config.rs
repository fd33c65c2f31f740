use anyhow::{anyhow, Context, Result};
use clap::Parser;
use dotenv::dotenv;
use simplelog::LevelFilter;
use url::Url;

use crate::selection::DEFAULT_CREDIT_LIMIT;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:4232/courseList";

/// Pick this semester's courses within the credit limit
#[derive(Parser, Debug)]
#[command(name = "course-picker", version, long_about = None)]
pub struct Cli {
    /// URL serving the course list as JSON
    #[arg(long, env = "COURSE_PICKER_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Most credits that may be picked at once
    #[arg(long, env = "COURSE_PICKER_CREDIT_LIMIT", default_value_t = DEFAULT_CREDIT_LIMIT)]
    pub credit_limit: f64,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, env = "COURSE_PICKER_LOG", default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: Url,
    pub credit_limit: f64,
    pub log_level: LevelFilter,
}

impl Config {
    /// Resolves the configuration from flags, then the environment (a `.env`
    /// file included), then defaults.
    pub fn load() -> Result<Self> {
        dotenv().ok();
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Result<Self> {
        let endpoint = Url::parse(cli.endpoint.trim())
            .with_context(|| format!("Invalid course list endpoint `{}`", cli.endpoint))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(anyhow!(
                "Course list endpoint must use http or https, got `{}`",
                endpoint.scheme()
            ));
        }

        if !cli.credit_limit.is_finite() || cli.credit_limit <= 0.0 {
            return Err(anyhow!(
                "Credit limit must be a positive number, got {}",
                cli.credit_limit
            ));
        }

        let log_level = cli
            .log_level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow!("Unknown log level `{}`", cli.log_level))?;

        Ok(Config {
            endpoint,
            credit_limit: cli.credit_limit,
            log_level,
        })
    }
}
