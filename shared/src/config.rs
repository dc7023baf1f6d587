use anyhow::{Context, Result};

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://library.db".to_string()),
            max_connections: read_or("DATABASE_MAX_CONNECTIONS", 5)?,
        };
        let server = ServerConfig {
            port: read_or("APP_PORT", 8080)?,
        };
        Ok(Self { database, server })
    }
}

pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

pub struct ServerConfig {
    pub port: u16,
}

fn read_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) => v
            .parse()
            .with_context(|| format!("{key} の値が不正です: {v}")),
        Err(_) => Ok(default),
    }
}
