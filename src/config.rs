use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub password_min_len: usize,
    pub db_acquire_timeout_secs: u64,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Loads configuration from the environment. `DATABASE_URL` and
    /// `JWT_SECRET` are required and have no built-in defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL is not set"))?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "dannyshoes".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "dannyshoes-clients".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 7),
        };
        let password_min_len = std::env::var("PASSWORD_MIN_LEN")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(6);
        let db_acquire_timeout_secs = std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5);
        Ok(Self {
            database_url,
            password_min_len,
            db_acquire_timeout_secs,
            jwt,
        })
    }
}
