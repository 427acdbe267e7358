//! Configuration module
//!
//! Settings are read from the environment (a `.env` file is honoured) once at
//! process start and validated before anything touches the filesystem.

use std::env;
use std::path::{Path, PathBuf};

// Common constants
const SERVER_PORT: u16 = 5000;
const MAX_FILE_SIZE_MB: usize = 5;
const REQUEST_BODY_MULTIPLIER: usize = 4;
const ECO_SCORE_TIMEOUT_SECS: u64 = 30;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

pub const DEFAULT_ALLOWED_EXTENSIONS: &str = "jpeg,jpg,png,webp";
pub const DEFAULT_ALLOWED_CONTENT_TYPES: &str = "image/jpeg,image/jpg,image/png,image/webp";

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_host: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// "compact" or "json"
    pub log_format: String,
}

/// Upload service configuration
#[derive(Clone, Debug)]
pub struct UploadServiceConfig {
    pub base: BaseConfig,
    /// Prefix for every URL handed back to clients, e.g. "http://localhost:5000"
    pub public_base_url: String,
    /// Parent directory of the uploads/product1/product2 folders
    pub upload_root: PathBuf,
    pub max_file_size_bytes: usize,
    pub max_request_body_bytes: usize,
    /// Server-wide cap on in-flight requests
    pub http_concurrency_limit: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
    // External ML scoring service
    pub eco_score_api_url: String,
    pub eco_score_timeout_secs: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<UploadServiceConfig>);

impl Config {
    fn as_upload(&self) -> &UploadServiceConfig {
        &self.0
    }

    pub fn new(config: UploadServiceConfig) -> Self {
        Config(Box::new(config))
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_environment(&self.as_upload().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = UploadServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_upload().validate()
    }

    pub fn server_host(&self) -> &str {
        &self.as_upload().base.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.as_upload().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_upload().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_upload().base.environment
    }

    pub fn log_format(&self) -> &str {
        &self.as_upload().base.log_format
    }

    pub fn public_base_url(&self) -> &str {
        &self.as_upload().public_base_url
    }

    pub fn upload_root(&self) -> &Path {
        &self.as_upload().upload_root
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.as_upload().max_file_size_bytes
    }

    pub fn max_request_body_bytes(&self) -> usize {
        self.as_upload().max_request_body_bytes
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_upload().http_concurrency_limit
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.as_upload().allowed_extensions
    }

    pub fn allowed_content_types(&self) -> &[String] {
        &self.as_upload().allowed_content_types
    }

    pub fn eco_score_api_url(&self) -> &str {
        &self.as_upload().eco_score_api_url
    }

    pub fn eco_score_timeout_secs(&self) -> u64 {
        self.as_upload().eco_score_timeout_secs
    }
}

fn is_production_environment(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl UploadServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let server_port = env::var("SERVER_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| SERVER_PORT.to_string())
            .parse::<u16>()
            .unwrap_or(SERVER_PORT);

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let max_request_body_mb = env::var("MAX_REQUEST_BODY_MB")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(max_file_size_mb * REQUEST_BODY_MULTIPLIER);

        let base = BaseConfig {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port,
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            environment,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "compact".to_string())
                .to_lowercase(),
        };

        let config = UploadServiceConfig {
            public_base_url: env::var("PUBLIC_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| format!("http://localhost:{}", server_port)),
            base,
            upload_root: env::var("UPLOAD_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            max_request_body_bytes: max_request_body_mb * 1024 * 1024,
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .unwrap_or_else(|_| HTTP_CONCURRENCY_LIMIT.to_string())
                .parse()
                .unwrap_or(HTTP_CONCURRENCY_LIMIT),
            allowed_extensions: parse_list(
                &env::var("ALLOWED_EXTENSIONS")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_EXTENSIONS.to_string()),
            ),
            allowed_content_types: parse_list(
                &env::var("ALLOWED_CONTENT_TYPES")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_CONTENT_TYPES.to_string()),
            ),
            eco_score_api_url: env::var("ECO_SCORE_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            eco_score_timeout_secs: env::var("ECO_SCORE_TIMEOUT_SECS")
                .unwrap_or_else(|_| ECO_SCORE_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(ECO_SCORE_TIMEOUT_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if is_production_environment(&self.base.environment)
            && self.base.cors_origins.iter().any(|o| o.trim() == "*")
        {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }

        if self.max_request_body_bytes < self.max_file_size_bytes {
            return Err(anyhow::anyhow!(
                "MAX_REQUEST_BODY_MB must be at least MAX_FILE_SIZE_MB"
            ));
        }

        if self.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT must be greater than 0"));
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_EXTENSIONS must not be empty"));
        }

        if self.allowed_content_types.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_CONTENT_TYPES must not be empty"));
        }

        for (name, url) in [
            ("PUBLIC_BASE_URL", &self.public_base_url),
            ("ECO_SCORE_API_URL", &self.eco_score_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow::anyhow!(
                    "{} must start with http:// or https:// (got '{}')",
                    name,
                    url
                ));
            }
        }

        if !matches!(self.base.log_format.as_str(), "compact" | "json") {
            return Err(anyhow::anyhow!(
                "LOG_FORMAT must be 'compact' or 'json' (got '{}')",
                self.base.log_format
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> UploadServiceConfig {
        UploadServiceConfig {
            base: BaseConfig {
                server_host: "127.0.0.1".to_string(),
                server_port: 5000,
                cors_origins: vec!["*".to_string()],
                environment: "development".to_string(),
                log_format: "compact".to_string(),
            },
            public_base_url: "http://localhost:5000".to_string(),
            upload_root: PathBuf::from("/tmp/ecoscan"),
            max_file_size_bytes: 5 * 1024 * 1024,
            max_request_body_bytes: 20 * 1024 * 1024,
            http_concurrency_limit: 10_000,
            allowed_extensions: parse_list(DEFAULT_ALLOWED_EXTENSIONS),
            allowed_content_types: parse_list(DEFAULT_ALLOWED_CONTENT_TYPES),
            eco_score_api_url: "http://localhost:8000".to_string(),
            eco_score_timeout_secs: 30,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let mut config = valid_config();
        config.base.environment = "Production".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("CORS_ORIGINS"));
    }

    #[test]
    fn test_body_limit_below_file_limit_rejected() {
        let mut config = valid_config();
        config.max_request_body_bytes = 1024;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_concurrency_limit_rejected() {
        let mut config = valid_config();
        config.http_concurrency_limit = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("HTTP_CONCURRENCY_LIMIT"));
    }

    #[test]
    fn test_url_scheme_required() {
        let mut config = valid_config();
        config.eco_score_api_url = "localhost:8000".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ECO_SCORE_API_URL"));
    }

    #[test]
    fn test_parse_list_normalizes_entries() {
        assert_eq!(
            parse_list(" JPG, png ,,webp "),
            vec!["jpg".to_string(), "png".to_string(), "webp".to_string()]
        );
    }

    #[test]
    fn test_config_getters() {
        let config = Config::new(valid_config());
        assert!(!config.is_production());
        assert_eq!(config.max_file_size_bytes(), 5 * 1024 * 1024);
        assert_eq!(config.http_concurrency_limit(), 10_000);
        assert_eq!(config.allowed_extensions().len(), 4);
        assert_eq!(config.upload_root(), Path::new("/tmp/ecoscan"));
    }
}
