use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use url::Url;
use ventureos_core::AppError;
use ventureos_infrastructure::PlatformClientConfig;

#[derive(Debug, Clone)]
pub enum RoleStoreConfig {
    /// In-process store, optionally seeded with demo roles and dev tokens.
    Memory { seed: bool },
    /// Hosted entity platform.
    Platform(PlatformClientConfig),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub frontend_url: String,
    pub role_store: RoleStoreConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let role_store = match env::var("ROLE_STORE")
            .unwrap_or_else(|_| "memory".to_owned())
            .as_str()
        {
            "memory" => RoleStoreConfig::Memory {
                seed: env::var("DEV_SEED")
                    .unwrap_or_else(|_| "true".to_owned())
                    .eq_ignore_ascii_case("true"),
            },
            "platform" => {
                let base_url = Url::parse(required_non_empty_env("PLATFORM_BASE_URL")?.as_str())
                    .map_err(|error| {
                        AppError::Validation(format!("invalid PLATFORM_BASE_URL: {error}"))
                    })?;
                let timeout_seconds = env::var("PLATFORM_TIMEOUT_SECONDS")
                    .ok()
                    .map(|value| {
                        value.parse::<u64>().map_err(|error| {
                            AppError::Validation(format!(
                                "invalid PLATFORM_TIMEOUT_SECONDS: {error}"
                            ))
                        })
                    })
                    .transpose()?
                    .unwrap_or(15);

                RoleStoreConfig::Platform(PlatformClientConfig {
                    base_url,
                    api_key: required_non_empty_env("PLATFORM_API_KEY")?,
                    timeout: Duration::from_secs(timeout_seconds.max(1)),
                })
            }
            other => {
                return Err(AppError::Validation(format!(
                    "ROLE_STORE must be either 'memory' or 'platform', got '{other}'"
                )));
            }
        };

        Ok(Self {
            api_host,
            api_port,
            frontend_url,
            role_store,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
