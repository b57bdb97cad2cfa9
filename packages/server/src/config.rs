use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use job_scraper::{DispatchConfig, PollConfig, Source, DEFAULT_PROJECT};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::kernel::keepalive::KeepAliveConfig;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// `sqlite:` or `postgres:` URL; in-memory storage when unset.
    pub database_url: Option<String>,
    pub scrapyd_url: String,
    pub scrapyd_project: String,
    pub sources: Vec<Source>,
    pub dispatch_timeout: Duration,
    pub poll_interval: Duration,
    pub poll_budget: Duration,
    pub keepalive_enabled: bool,
    pub keepalive_min: Duration,
    pub keepalive_max: Duration,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let sources = match var("SCRAPER_SOURCES") {
            Some(list) => Source::parse_list(&list).context("SCRAPER_SOURCES is invalid")?,
            None => Source::ALL.to_vec(),
        };
        if sources.is_empty() {
            bail!("SCRAPER_SOURCES must name at least one source");
        }

        let keepalive_min = Duration::from_secs(parse_or(&var, "KEEPALIVE_MIN_SECS", 600u64)?);
        let keepalive_max = Duration::from_secs(parse_or(&var, "KEEPALIVE_MAX_SECS", 840u64)?);
        if keepalive_min > keepalive_max {
            bail!("KEEPALIVE_MIN_SECS must not exceed KEEPALIVE_MAX_SECS");
        }

        let poll_interval = Duration::from_millis(parse_or(&var, "POLL_INTERVAL_MS", 1000u64)?);
        if poll_interval.is_zero() {
            bail!("POLL_INTERVAL_MS must be greater than zero");
        }

        Ok(Self {
            port: parse_or(&var, "PORT", 8080u16)?,
            database_url: var("DATABASE_URL"),
            scrapyd_url: var("SCRAPYD_URL").unwrap_or_else(|| "http://localhost:6800".to_string()),
            scrapyd_project: var("SCRAPYD_PROJECT").unwrap_or_else(|| DEFAULT_PROJECT.to_string()),
            sources,
            dispatch_timeout: Duration::from_secs(parse_or(&var, "DISPATCH_TIMEOUT_SECS", 15u64)?),
            poll_interval,
            poll_budget: Duration::from_secs(parse_or(&var, "POLL_BUDGET_SECS", 10u64)?),
            keepalive_enabled: parse_or(&var, "KEEPALIVE_ENABLED", true)?,
            keepalive_min,
            keepalive_max,
            allowed_origins: var("ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    pub fn dispatch_config(&self) -> DispatchConfig {
        DispatchConfig::new()
            .with_project(&self.scrapyd_project)
            .with_timeout(self.dispatch_timeout)
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig::new()
            .with_project(&self.scrapyd_project)
            .with_interval(self.poll_interval)
            .with_budget(self.poll_budget)
    }

    pub fn keepalive_config(&self) -> KeepAliveConfig {
        KeepAliveConfig {
            min_interval: self.keepalive_min,
            max_interval: self.keepalive_max,
        }
    }
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a valid value, got {raw:?}")),
        None => Ok(default),
    }
}
