use std::env;
use std::fmt;
use std::path::PathBuf;

const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
const DEFAULT_SERVER_PORT: u16 = 8000;
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
const DEFAULT_BCRYPT_COST: u32 = 10;
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SESSION_FILE: &str = "ticklist-session.json";
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Raised when the environment does not describe a usable configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    Missing(&'static str),
    /// A variable is set but cannot be parsed or is out of range.
    Invalid { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{} must be set", name),
            ConfigError::Invalid { name, value } => {
                write!(f, "{} has an invalid value: {:?}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Server settings, read from the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub bcrypt_cost: u32,
}

impl Config {
    /// Builds the configuration from environment variables.
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are required. There is no fallback
    /// signing secret: an unset or empty `JWT_SECRET` is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token_ttl_minutes = parsed("TOKEN_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES)?;
        if token_ttl_minutes <= 0 {
            return Err(ConfigError::Invalid {
                name: "TOKEN_TTL_MINUTES",
                value: token_ttl_minutes.to_string(),
            });
        }

        let bcrypt_cost = parsed("BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections: parsed(
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            )?,
            server_port: parsed("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            jwt_secret: required("JWT_SECRET")?,
            token_ttl_minutes,
            bcrypt_cost,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

/// Client settings: where the backend lives and where the session is kept.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub session_file: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let session_file = env::var("SESSION_FILE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join(DEFAULT_SESSION_FILE));

        Ok(Self {
            server_url: required("SERVER_URL")?,
            session_file,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
