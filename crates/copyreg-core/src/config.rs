//! Configuration module
//!
//! Settings for the backend client, the wallet provider endpoint and the publish
//! flow, loaded from the environment (and an optional `.env` file).

use std::env;
use std::time::Duration;

// Common constants
const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_API_PREFIX: &str = "/api";
const DEFAULT_CONTRACT_SETTING_KEY: &str = "blockchain_contract_address";
const DEFAULT_GAS_LIMIT: u64 = 500_000;
const DEFAULT_RECEIPT_POLL_MS: u64 = 2_000;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Configuration for the copyreg publish tooling
#[derive(Clone, Debug)]
pub struct PublishConfig {
    pub environment: String,
    // Backend REST API
    pub api_url: String,
    pub api_prefix: String,
    pub api_token: String,
    pub http_timeout_secs: u64,
    // Wallet provider (JSON-RPC). None means no provider is injected.
    pub rpc_url: Option<String>,
    // Publish flow
    pub contract_setting_key: String,
    pub gas_limit: u64,
    pub receipt_poll_interval_ms: u64,
    /// Upper bound on the confirmation wait. None waits for as long as the provider does.
    pub confirmation_timeout_secs: Option<u64>,
}

impl PublishConfig {
    /// Load configuration from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let api_url = var("COPYREG_API_URL")
            .or_else(|| var("API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let api_token = var("COPYREG_API_TOKEN")
            .or_else(|| var("JWT_TOKEN"))
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("COPYREG_API_TOKEN or JWT_TOKEN must be set"))?;

        let api_prefix = normalize_prefix(
            &var("COPYREG_API_PREFIX").unwrap_or_else(|| DEFAULT_API_PREFIX.to_string()),
        );

        let config = PublishConfig {
            environment,
            api_url,
            api_prefix,
            api_token,
            http_timeout_secs: parse_or(
                &var,
                "COPYREG_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?,
            rpc_url: var("COPYREG_RPC_URL").filter(|u| !u.trim().is_empty()),
            contract_setting_key: var("COPYREG_CONTRACT_SETTING_KEY")
                .filter(|k| !k.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CONTRACT_SETTING_KEY.to_string()),
            gas_limit: parse_or(&var, "COPYREG_GAS_LIMIT", DEFAULT_GAS_LIMIT)?,
            receipt_poll_interval_ms: parse_or(
                &var,
                "COPYREG_RECEIPT_POLL_MS",
                DEFAULT_RECEIPT_POLL_MS,
            )?,
            confirmation_timeout_secs: match var("COPYREG_CONFIRMATION_TIMEOUT_SECS") {
                Some(raw) => Some(raw.trim().parse().map_err(|_| {
                    anyhow::anyhow!("COPYREG_CONFIRMATION_TIMEOUT_SECS must be a valid number")
                })?),
                None => None,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.gas_limit == 0 {
            return Err(anyhow::anyhow!("COPYREG_GAS_LIMIT must be greater than zero"));
        }
        if self.receipt_poll_interval_ms == 0 {
            return Err(anyhow::anyhow!(
                "COPYREG_RECEIPT_POLL_MS must be greater than zero"
            ));
        }
        if self.is_production()
            && self.api_url.starts_with("http://")
            && !is_local_url(&self.api_url)
        {
            return Err(anyhow::anyhow!(
                "COPYREG_API_URL must use https in production (bearer tokens are sent on every request)"
            ));
        }
        Ok(())
    }

    /// Check if the tooling is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }

    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.confirmation_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_or<F>(var: &F, key: &str, default: u64) -> Result<u64, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number", key)),
        None => Ok(default),
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Whether the URL's host is exactly a loopback name or address.
fn is_local_url(url: &str) -> bool {
    let rest = url.strip_prefix("http://").unwrap_or(url);
    let host = if rest.starts_with('[') {
        match rest.find(']') {
            Some(end) => &rest[..=end],
            None => return false,
        }
    } else {
        let end = rest.find(|c: char| matches!(c, ':' | '/' | '?' | '#')).unwrap_or(rest.len());
        &rest[..end]
    };
    let host = host.to_ascii_lowercase();
    host == "localhost" || host == "127.0.0.1" || host == "[::1]"
}
