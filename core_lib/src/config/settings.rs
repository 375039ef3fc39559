use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Variable the email provider's own tooling reads the credential from.
pub const PROVIDER_KEY_VAR: &str = "RESEND_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub mail: MailConfig,
    pub submission: SubmissionConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub from: String,
    pub to: Vec<String>,
    pub subject_prefix: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    pub path: String,
    pub enforce_validation: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            mail: MailConfig::default(),
            submission: SubmissionConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: "https://api.resend.com".to_string(),
            from: "Seek Auto <onboarding@resend.dev>".to_string(),
            to: vec!["hello@seekautocars.com.au".to_string()],
            subject_prefix: "New Seek Auto Lead".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("subject_prefix", &self.subject_prefix)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl MailConfig {
    /// The credential, if one is configured and non-blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            path: "/api/contact".to_string(),
            enforce_validation: false,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("mail.to")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .set_override_option("mail.api_key", std::env::var(PROVIDER_KEY_VAR).ok())?;

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.mail.from.trim().is_empty() {
            return Err(ConfigError::Message(
                "Mail sender cannot be empty".to_string(),
            ));
        }

        if self.mail.to.iter().all(|recipient| recipient.trim().is_empty()) {
            return Err(ConfigError::Message(
                "At least one mail recipient is required".to_string(),
            ));
        }

        if self.mail.timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "Mail timeout must be greater than 0".to_string(),
            ));
        }

        if !self.submission.path.starts_with('/') {
            return Err(ConfigError::Message(
                "Submission path must start with '/'".to_string(),
            ));
        }

        if self.mail.from.contains("@resend.dev") {
            tracing::warn!("Using the provider sandbox sender - set APP_MAIL__FROM once the domain is verified");
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
