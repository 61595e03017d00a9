use std::env;

#[derive(Debug, Clone)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Sessions
    pub session_ttl_seconds: u64,
    pub session_max_entries: u64,

    // Seeding
    pub seed_on_empty: bool,

    // Rate limiting (login attempts)
    pub disable_rate_limiting: bool,
    pub rate_limit_login_per_second: u64,
    pub rate_limit_login_burst: u32,

    // Change feed
    pub change_channel_capacity: usize,

    // Application metadata
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if required environment variables are not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            // Database
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,

            // API settings
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),

            // Sessions
            session_ttl_seconds: env::var("SESSION_TTL_SECONDS")
                .unwrap_or_else(|_| "43200".to_string())
                .parse()
                .unwrap_or(43_200), // 12 hours: one shift plus handover
            session_max_entries: env::var("SESSION_MAX_ENTRIES")
                .unwrap_or_else(|_| "1024".to_string())
                .parse()
                .unwrap_or(1024),

            // Seeding
            seed_on_empty: env::var("SEED_ON_EMPTY")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),

            // Rate limiting
            disable_rate_limiting: env::var("DISABLE_RATE_LIMITING")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            rate_limit_login_per_second: env::var("RATE_LIMIT_LOGIN_PER_SECOND")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .unwrap_or(1),
            rate_limit_login_burst: env::var("RATE_LIMIT_LOGIN_BURST")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),

            // Change feed
            change_channel_capacity: env::var("CHANGE_CHANNEL_CAPACITY")
                .unwrap_or_else(|_| "256".to_string())
                .parse()
                .unwrap_or(256),

            // Application metadata
            deployment: Deployment::from_str(
                &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            ),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
