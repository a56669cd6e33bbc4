use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub admin: AdminConfig,
    pub ai: Option<AiConfig>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let admin = AdminConfig::from_env(environment)?;
        let ai = AiConfig::from_env();

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            admin,
            ai,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Teacher-console credentials and the bearer token guarding admin routes.
///
/// The original site shipped its secrets inside client-delivered code; here
/// they are sourced from the server environment and never leave the backend.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
    pub token: String,
}

impl AdminConfig {
    fn from_env(environment: AppEnvironment) -> Result<Self, ConfigError> {
        let email = env::var("ADMIN_EMAIL").unwrap_or_else(|_| "pe-head@school.test".to_string());
        let password = env::var("ADMIN_PASSWORD").ok();
        let token = env::var("ADMIN_TOKEN").ok();

        match environment {
            AppEnvironment::Production => {
                let password = password.ok_or(ConfigError::MissingAdminSecret {
                    variable: "ADMIN_PASSWORD",
                })?;
                let token = token.ok_or(ConfigError::MissingAdminSecret {
                    variable: "ADMIN_TOKEN",
                })?;
                Ok(Self {
                    email,
                    password,
                    token,
                })
            }
            _ => Ok(Self {
                email,
                password: password.unwrap_or_else(|| "pe-dev-password".to_string()),
                token: token.unwrap_or_else(|| "pe-dev-token".to_string()),
            }),
        }
    }
}

/// OpenRouter chat-completions settings for the AI coach comment.
///
/// Absent entirely when `OPENROUTER_API_KEY` is unset; callers then fall back
/// to an offline comment gateway.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
}

impl AiConfig {
    fn from_env() -> Option<Self> {
        let api_key = env::var("OPENROUTER_API_KEY").ok()?;
        let model = env::var("OPENROUTER_MODEL")
            .unwrap_or_else(|_| "google/gemini-2.0-flash-001".to_string());
        let endpoint = env::var("OPENROUTER_URL")
            .unwrap_or_else(|_| "https://openrouter.ai/api/v1/chat/completions".to_string());

        Some(Self {
            api_key,
            model,
            endpoint,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingAdminSecret { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingAdminSecret { variable } => {
                write!(f, "{variable} must be set when APP_ENV is production")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::MissingAdminSecret { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
