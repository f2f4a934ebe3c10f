use std::str::FromStr;

use anyhow::{bail, Context};

use crate::infrastructure::blob_store::S3Settings;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub upload: UploadConfig,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub s3: S3Settings,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Memory,
}

impl StorageBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::S3 => "s3",
            Self::Memory => "memory",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s3" => Ok(Self::S3),
            "memory" | "in_memory" => Ok(Self::Memory),
            other => bail!("unknown storage backend {other:?}, expected \"s3\" or \"memory\""),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => bail!("unknown log format {other:?}, expected \"pretty\" or \"json\""),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            cors: CorsConfig::default(),
            storage: StorageConfig {
                backend: StorageBackend::S3,
                s3: S3Settings::default(),
            },
            upload: UploadConfig {
                max_upload_bytes: 50 * 1024 * 1024,
            },
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Reads the process environment. Call after `dotenvy::dotenv()`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(host) = var("SERVER_HOST") {
            config.server.host = host;
        }
        if let Some(port) = var("SERVER_PORT") {
            config.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("SERVER_PORT must be a port number, got {port:?}"))?;
        }
        if let Some(origins) = var("CORS_ALLOWED_ORIGINS") {
            config.cors.allowed_origins = parse_list(&origins);
        }
        if let Some(backend) = var("STORAGE_BACKEND") {
            config.storage.backend = backend.parse()?;
        }
        config.storage.s3.region = var("AWS_REGION");
        config.storage.s3.endpoint = var("AWS_ENDPOINT_URL");
        if let Some(limit) = var("MAX_UPLOAD_BYTES") {
            config.upload.max_upload_bytes = limit
                .trim()
                .parse()
                .with_context(|| format!("MAX_UPLOAD_BYTES must be a byte count, got {limit:?}"))?;
        }
        if let Some(format) = var("LOG_FORMAT") {
            config.log_format = format.parse()?;
        }

        Ok(config)
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
