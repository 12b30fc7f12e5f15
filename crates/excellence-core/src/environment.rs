use serde::{Deserialize, Serialize};
use std::fmt;

/// Host serving the production deployment
pub const PRODUCTION_HOST: &str = "server-vs84.intranet.local";
/// Host serving the staging deployment
pub const STAGING_HOST: &str = "server-vs81t.intranet.local";

/// Deployment the add-in is running in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Outcome of looking at the page's hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub environment: Environment,
    /// The hostname matched none of the known deployments
    pub unknown_host: bool,
}

impl Environment {
    /// Pick the environment from the page hostname.
    ///
    /// No hostname (not running in a browser) and unknown hosts both fall
    /// back to development; the latter is flagged so callers can warn.
    pub fn detect(hostname: Option<&str>) -> Detection {
        let environment = match hostname {
            None | Some("localhost") | Some("127.0.0.1") => Environment::Development,
            Some(PRODUCTION_HOST) => Environment::Production,
            Some(STAGING_HOST) => Environment::Staging,
            Some(_) => {
                return Detection {
                    environment: Environment::Development,
                    unknown_host: true,
                }
            }
        };
        Detection {
            environment,
            unknown_host: false,
        }
    }

    /// URLs used by this deployment
    pub fn config(&self) -> EnvironmentConfig {
        match self {
            Environment::Development => EnvironmentConfig {
                api_base_url: "http://localhost:5000/api".to_string(),
                environment: *self,
                manifest_url: "https://localhost:3000/manifest.xml".to_string(),
                asset_base_url: "https://localhost:3000/assets".to_string(),
            },
            Environment::Staging => EnvironmentConfig::deployed(STAGING_HOST, *self),
            Environment::Production => EnvironmentConfig::deployed(PRODUCTION_HOST, *self),
        }
    }
}

/// Where the add-in finds its backend and static assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    pub api_base_url: String,
    pub environment: Environment,
    pub manifest_url: String,
    pub asset_base_url: String,
}

impl EnvironmentConfig {
    fn deployed(host: &str, environment: Environment) -> Self {
        let base = format!("https://{}:9443/excellence", host);
        EnvironmentConfig {
            api_base_url: format!("{}/api", base),
            environment,
            manifest_url: format!("{}/manifest.xml", base),
            asset_base_url: format!("{}/assets", base),
        }
    }

    /// Configuration for the page served from `hostname`
    pub fn for_host(hostname: Option<&str>) -> Self {
        Environment::detect(hostname).environment.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_known_hosts() {
        assert_eq!(
            Environment::detect(Some("localhost")).environment,
            Environment::Development
        );
        assert_eq!(
            Environment::detect(Some("127.0.0.1")).environment,
            Environment::Development
        );
        assert_eq!(
            Environment::detect(Some(PRODUCTION_HOST)).environment,
            Environment::Production
        );
        assert_eq!(
            Environment::detect(Some(STAGING_HOST)).environment,
            Environment::Staging
        );
        assert!(!Environment::detect(None).unknown_host);
    }

    #[test]
    fn test_unknown_host_falls_back_to_development() {
        let detection = Environment::detect(Some("example.com"));
        assert_eq!(detection.environment, Environment::Development);
        assert!(detection.unknown_host);
    }

    #[test]
    fn test_config_urls() {
        let prod = EnvironmentConfig::for_host(Some(PRODUCTION_HOST));
        assert_eq!(
            prod.api_base_url,
            "https://server-vs84.intranet.local:9443/excellence/api"
        );
        assert_eq!(
            prod.manifest_url,
            "https://server-vs84.intranet.local:9443/excellence/manifest.xml"
        );

        let dev = EnvironmentConfig::for_host(None);
        assert_eq!(dev.api_base_url, "http://localhost:5000/api");
        assert_eq!(dev.asset_base_url, "https://localhost:3000/assets");

        let json = serde_json::to_value(&dev).unwrap();
        assert_eq!(json["environment"], "development");
        assert_eq!(json["apiBaseUrl"], "http://localhost:5000/api");
    }
}
