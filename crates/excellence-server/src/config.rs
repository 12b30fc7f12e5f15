use std::env;

use excellence_core::Environment;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Origins allowed to call the API ("*" allows any)
    pub cors_origins: Vec<String>,
    /// Verbose logging
    pub debug: bool,
    /// Deployment this backend serves
    pub environment: Environment,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: vec!["http://localhost:3000".to_string()],
            debug: false,
            environment: Environment::Development,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = match env::var("PORT") {
            Ok(p) => p.parse()?,
            Err(_) => defaults.port,
        };
        let cors_origins = env::var("CORS_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or(defaults.cors_origins);
        let debug = env::var("DEBUG")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let environment = match env::var("EXCELLENCE_ENV") {
            Ok(v) => parse_environment(&v)?,
            Err(_) => defaults.environment,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            debug,
            environment,
        })
    }

    /// Address to bind, e.g. "0.0.0.0:5000"
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_environment(value: &str) -> anyhow::Result<Environment> {
    match value.trim().to_ascii_lowercase().as_str() {
        "development" | "dev" => Ok(Environment::Development),
        "staging" => Ok(Environment::Staging),
        "production" | "prod" => Ok(Environment::Production),
        other => anyhow::bail!("Unknown environment: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://localhost:3000, https://server-vs84.intranet.local:9443,"),
            vec![
                "http://localhost:3000".to_string(),
                "https://server-vs84.intranet.local:9443".to_string()
            ]
        );
    }

    #[test]
    fn test_parse_environment() {
        assert_eq!(parse_environment("Production").unwrap(), Environment::Production);
        assert_eq!(parse_environment("staging").unwrap(), Environment::Staging);
        assert!(parse_environment("qa").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.cors_origins, vec!["http://localhost:3000".to_string()]);
    }
}
