use quotecache_core::errors::ConfigError;

pub struct Config {
    /// Path to the SQLite database file.
    pub database_url: String,
}

impl Config {
    /// Reads configuration from the environment. A missing `DATABASE_URL`
    /// is fatal; there is nothing sensible to fall back to.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingKey("DATABASE_URL".to_string()))?;
        Ok(Self { database_url })
    }
}
