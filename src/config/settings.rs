use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use url::Url;

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid server configuration: {0}")]
    Server(String),
    #[error("Invalid database configuration: {0}")]
    Database(String),
    #[error("Invalid auth configuration: {0}")]
    Auth(String),
    #[error("Invalid logging configuration: {0}")]
    Logging(String),
    #[error("Invalid Sentry configuration: {0}")]
    Sentry(String),
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub sentry: SentryConfig,
    #[serde(default)]
    pub environment: String,
}

impl AppConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Check if running in development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development" || self.environment == "dev"
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.environment == "production" || self.environment == "prod"
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub timeout_seconds: u64,
    #[serde(default = "default_graceful_shutdown_timeout")]
    pub graceful_shutdown_timeout_seconds: u64,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.host.is_empty() {
            return Err(ConfigValidationError::Server("Host cannot be empty".to_string()));
        }

        if self.host != "localhost" && IpAddr::from_str(&self.host).is_err() {
            if self.host.contains(' ') || self.host.contains('\t') {
                return Err(ConfigValidationError::Server("Invalid host format".to_string()));
            }
        }

        if self.port == 0 {
            return Err(ConfigValidationError::Server("Port cannot be 0".to_string()));
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError::Server("Timeout must be greater than 0".to_string()));
        }

        Ok(())
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigValidationError> {
        let ip = if self.host == "localhost" {
            IpAddr::from_str("127.0.0.1").unwrap()
        } else {
            IpAddr::from_str(&self.host)
                .map_err(|_| ConfigValidationError::Server(format!("Invalid IP address: {}", self.host)))?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

fn default_graceful_shutdown_timeout() -> u64 {
    30
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.url.is_empty() {
            return Err(ConfigValidationError::Database("Database URL cannot be empty".to_string()));
        }

        Url::parse(&self.url)
            .map_err(|e| ConfigValidationError::Database(format!("Invalid database URL: {}", e)))?;

        if self.max_connections == 0 {
            return Err(ConfigValidationError::Database("Max connections must be greater than 0".to_string()));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigValidationError::Database("Min connections cannot be greater than max connections".to_string()));
        }

        if self.acquire_timeout_seconds == 0 {
            return Err(ConfigValidationError::Database("Acquire timeout must be greater than 0".to_string()));
        }

        Ok(())
    }
}

/// Authentication and account-rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_expiry_hours: u64,
    /// Registration is restricted to emails under this domain
    pub allowed_email_domain: String,
    pub min_password_length: usize,
}

impl AuthConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigValidationError::Auth("JWT secret cannot be empty".to_string()));
        }

        if self.token_expiry_hours == 0 {
            return Err(ConfigValidationError::Auth("Token expiry must be greater than 0".to_string()));
        }

        if self.allowed_email_domain.is_empty() || self.allowed_email_domain.contains('@') {
            return Err(ConfigValidationError::Auth(
                "Allowed email domain must be a bare domain name".to_string(),
            ));
        }

        if self.min_password_length == 0 {
            return Err(ConfigValidationError::Auth("Minimum password length must be greater than 0".to_string()));
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    #[serde(default = "default_log_target")]
    pub target: String,
    #[serde(default)]
    pub file_path: Option<String>,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        match self.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigValidationError::Logging(format!(
                    "Invalid log level: {}",
                    self.level
                )))
            }
        }

        match self.format.to_lowercase().as_str() {
            "json" | "pretty" | "compact" => {}
            _ => {
                return Err(ConfigValidationError::Logging(format!(
                    "Invalid log format: {}",
                    self.format
                )))
            }
        }

        if self.target == "file" && self.file_path.is_none() {
            return Err(ConfigValidationError::Logging(
                "File path required when log target is 'file'".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_log_target() -> String {
    "stdout".to_string()
}

/// Sentry error monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentryConfig {
    #[serde(default)]
    pub dsn: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub traces_sample_rate: f32,
    #[serde(default)]
    pub debug: bool,
}

impl SentryConfig {
    pub fn is_enabled(&self) -> bool {
        !self.dsn.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_server() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            timeout_seconds: 30,
            graceful_shutdown_timeout_seconds: 30,
        }
    }

    #[test]
    fn server_config_accepts_localhost() {
        let mut config = valid_server();
        config.host = "localhost".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.socket_addr().unwrap().port(), 3000);
    }

    #[test]
    fn server_config_rejects_port_zero() {
        let mut config = valid_server();
        config.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn auth_config_rejects_domain_with_at_sign() {
        let config = AuthConfig {
            jwt_secret: "secret".to_string(),
            token_expiry_hours: 24,
            allowed_email_domain: "@student.ju.se".to_string(),
            min_password_length: 8,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn database_config_rejects_malformed_url() {
        let config = DatabaseConfig {
            url: "not a url".to_string(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_seconds: 5,
            idle_timeout_seconds: 600,
        };
        assert!(config.validate().is_err());
    }
}
