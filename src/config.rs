/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, JWT_SECRET, PORT, LOG_LEVEL など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Log verbosity accepted in `LOG_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Disable,
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    /// `EnvFilter` directive for this level.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Disable => "off",
            // tracing has no level above error
            LogLevel::Fatal | LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info,tower_http=info",
            LogLevel::Debug => "debug",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disable" | "off" => Ok(Self::Disable),
            "fatal" => Ok(Self::Fatal),
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(ConfigError::Invalid("LOG_LEVEL")),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,
    pub log_level: LogLevel,

    // HMAC secret used to verify bearer tokens
    pub jwt_secret: String,
    pub access_token_leeway_seconds: u64,

    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,

    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the secret or credentials embedded in the URL
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("log_level", &self.log_level)
            .field(
                "access_token_leeway_seconds",
                &self.access_token_leeway_seconds,
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_acquire_timeout", &self.db_acquire_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("request_body_limit_bytes", &self.request_body_limit_bytes)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parsed(&get, "PORT")?.unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url = required(&get, "DATABASE_URL")?;
        let jwt_secret = required(&get, "JWT_SECRET")?;

        let app_env = AppEnv::parse(get("APP_ENV"));

        let log_level = match get("LOG_LEVEL") {
            Some(s) if !s.trim().is_empty() => s.parse()?,
            _ => LogLevel::Info,
        };

        let access_token_leeway_seconds: u64 =
            parsed(&get, "ACCESS_TOKEN_LEEWAY_SECONDS")?.unwrap_or(0);

        let db_max_connections: u32 = positive(&get, "DB_MAX_CONNECTIONS")?.unwrap_or(10);

        let db_acquire_timeout = positive(&get, "DB_ACQUIRE_TIMEOUT_SECONDS")?
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(5));

        let request_timeout = positive(&get, "REQUEST_TIMEOUT_SECONDS")?
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let request_body_limit_bytes: usize =
            positive(&get, "REQUEST_BODY_LIMIT_BYTES")?.unwrap_or(1024 * 1024);

        Ok(Self {
            addr,
            database_url,
            app_env,
            log_level,
            jwt_secret,
            access_token_leeway_seconds,
            db_max_connections,
            db_acquire_timeout,
            request_timeout,
            request_body_limit_bytes,
        })
    }
}

fn required<F>(get: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    get(key)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(key))
}

/// Unset or blank is `None`. A value that does not parse stops startup.
fn parsed<T, F>(get: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(key)),
        _ => Ok(None),
    }
}

// Like `parsed`, but zero is also invalid.
fn positive<T, F>(get: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr + Default + PartialEq,
    F: Fn(&str) -> Option<String>,
{
    match parsed::<T, F>(get, key)? {
        Some(n) if n == T::default() => Err(ConfigError::Invalid(key)),
        other => Ok(other),
    }
}
