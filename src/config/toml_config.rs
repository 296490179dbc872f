use crate::domain::model::SellerCredentials;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_BASE_URL: &str = "https://market-training.yagom-academy.kr";
pub const IDENTIFIER_ENV: &str = "MARKET_IDENTIFIER";
pub const SECRET_ENV: &str = "MARKET_SECRET";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub seller: SellerCredentials,
    #[serde(default)]
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_items_per_page")]
    pub items_per_page: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("open-market/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_items_per_page() -> u32 {
    20
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
        }
    }
}

impl MarketConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Defaults for everything, credentials from `MARKET_IDENTIFIER` and
    /// `MARKET_SECRET`.
    pub fn from_env() -> Result<Self> {
        let identifier = std::env::var(IDENTIFIER_ENV).map_err(|_| AppError::MissingConfigError {
            field: IDENTIFIER_ENV.to_string(),
        })?;
        let secret = std::env::var(SECRET_ENV).map_err(|_| AppError::MissingConfigError {
            field: SECRET_ENV.to_string(),
        })?;

        Ok(Self {
            server: ServerConfig::default(),
            seller: SellerCredentials { identifier, secret },
            listing: ListingConfig::default(),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay
    /// as written.
    fn substitute_env_vars(content: &str) -> String {
        static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
        let re = PLACEHOLDER.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.server.base_url = base_url.into();
        self
    }
}

impl ConfigProvider for MarketConfig {
    fn base_url(&self) -> &str {
        &self.server.base_url
    }

    fn credentials(&self) -> &SellerCredentials {
        &self.seller
    }

    fn items_per_page(&self) -> u32 {
        self.listing.items_per_page
    }

    fn timeout_seconds(&self) -> u64 {
        self.server.timeout_seconds
    }
}

impl Validate for MarketConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("server.base_url", &self.server.base_url)?;
        validation::validate_positive_number(
            "server.timeout_seconds",
            self.server.timeout_seconds,
            1,
        )?;
        validation::validate_non_empty_string("seller.identifier", &self.seller.identifier)?;
        validation::validate_non_empty_string("seller.secret", &self.seller.secret)?;
        validation::validate_range("listing.items_per_page", self.listing.items_per_page, 1, 100)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[server]
base_url = "https://market.example.com"
timeout_seconds = 5

[seller]
identifier = "seller-id"
secret = "seller-secret"

[listing]
items_per_page = 10
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = MarketConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.base_url(), "https://market.example.com");
        assert_eq!(config.timeout_seconds(), 5);
        assert_eq!(config.credentials().identifier, "seller-id");
        assert_eq!(config.items_per_page(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = MarketConfig::from_toml_str(
            r#"
[seller]
identifier = "id"
secret = "pw"
"#,
        )
        .unwrap();

        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.items_per_page(), 20);
        assert_eq!(config.timeout_seconds(), 10);
        assert!(config.server.user_agent.starts_with("open-market/"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("OPEN_MARKET_TEST_SECRET", "from-env");

        let config = MarketConfig::from_toml_str(
            r#"
[seller]
identifier = "id"
secret = "${OPEN_MARKET_TEST_SECRET}"
"#,
        )
        .unwrap();
        assert_eq!(config.seller.secret, "from-env");

        std::env::remove_var("OPEN_MARKET_TEST_SECRET");
    }

    #[test]
    fn test_unknown_env_var_is_left_verbatim() {
        let config = MarketConfig::from_toml_str(
            r#"
[seller]
identifier = "${OPEN_MARKET_SURELY_UNSET_VAR}"
secret = "pw"
"#,
        )
        .unwrap();
        assert_eq!(config.seller.identifier, "${OPEN_MARKET_SURELY_UNSET_VAR}");
    }

    #[test]
    fn test_config_validation() {
        let config = MarketConfig::from_toml_str(BASIC)
            .unwrap()
            .with_base_url("invalid-url");
        assert!(config.validate().is_err());

        let mut config = MarketConfig::from_toml_str(BASIC).unwrap();
        config.listing.items_per_page = 0;
        assert!(config.validate().is_err());

        let mut config = MarketConfig::from_toml_str(BASIC).unwrap();
        config.seller.secret = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_seller_is_parse_error() {
        let err =
            MarketConfig::from_toml_str("[server]\nbase_url = \"https://a.b\"\n").unwrap_err();
        assert!(matches!(err, AppError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = MarketConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.seller.identifier, "seller-id");
    }
}
