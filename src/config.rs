// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{MonitorError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub source: SourceConfig,
    pub search: SearchConfig,
    pub mail: MailConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    pub base_url: String,
    pub file_prefix: String,
    /// Subtracted from the current year to obtain the edition's year code.
    pub year_offset: i32,
    pub start_number: u32,
    pub max_attempts: u32,
    pub probe_timeout_secs: u64,
    pub download_timeout_secs: u64,
    pub download_dir: PathBuf,
    #[serde(default)]
    pub keep_download: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(deserialize_with = "comma_list")]
    pub terms: Vec<String>,
    #[serde(default)]
    pub pattern_set: PatternSetName,
    /// A single string from the environment is one pattern; regexes may contain commas.
    #[serde(default, deserialize_with = "single_or_list")]
    pub extra_patterns: Vec<String>,
    #[serde(default)]
    pub fallback_whole_document: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSetName {
    #[default]
    TceCe,
    ActTypes,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub sender: String,
    pub password: Option<String>,
    pub display_name: String,
    #[serde(default, deserialize_with = "comma_list")]
    pub recipients: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,
    #[serde(default = "default_include_footer")]
    pub include_footer: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Plain,
    Html,
}

/// Lists arrive as arrays from TOML and as plain strings from the environment.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListValue {
    List(Vec<String>),
    Single(String),
}

fn comma_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<String>, D::Error> {
    Ok(match ListValue::deserialize(deserializer)? {
        ListValue::List(items) => items,
        ListValue::Single(joined) => joined
            .split(',')
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
    })
}

fn single_or_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<String>, D::Error> {
    Ok(match ListValue::deserialize(deserializer)? {
        ListValue::List(items) => items,
        ListValue::Single(item) => vec![item],
    })
}

fn default_include_footer() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Plain,
            include_footer: true,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("GAZETTE_MONITOR").separator("__"),
        );

        let settings = builder
            .build()
            .map_err(|e| MonitorError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| MonitorError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            source: SourceConfig {
                base_url: "https://contexto-api.tce.ce.gov.br/arquivos/doe".to_string(),
                file_prefix: "DOTCECE".to_string(),
                year_offset: 2013,
                start_number: 112,
                max_attempts: 500,
                probe_timeout_secs: 15,
                download_timeout_secs: 60,
                download_dir: PathBuf::from("."),
                keep_download: false,
            },
            search: SearchConfig {
                terms: vec![
                    "Secretaria de Educação".to_string(),
                    "Secretaria de Juventude".to_string(),
                    "Instituto Dr. José Frota".to_string(),
                ],
                pattern_set: PatternSetName::TceCe,
                extra_patterns: vec![],
                fallback_whole_document: false,
            },
            mail: MailConfig {
                smtp_server: "smtp.gmail.com".to_string(),
                smtp_port: 587,
                sender: String::new(),
                password: None,
                display_name: "Robô DOTCE-CE".to_string(),
                recipients: vec![],
            },
            report: ReportConfig::default(),
        }
    }

    fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.source.base_url)
            .map_err(|e| MonitorError::Config(e.to_string()))?;

        if self.source.max_attempts == 0 {
            return Err(MonitorError::Config(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if self.source.probe_timeout_secs == 0 || self.source.download_timeout_secs == 0 {
            return Err(MonitorError::Config(
                "timeouts must be greater than 0".to_string(),
            ));
        }

        if self.mail.smtp_port == 0 {
            return Err(MonitorError::Config("smtp_port cannot be 0".to_string()));
        }

        Ok(())
    }

    /// Checks the settings a real delivery needs, which a dry run or a local scan does not.
    pub fn require_mail_credentials(&self) -> Result<()> {
        if self.mail.sender.trim().is_empty() {
            return Err(MonitorError::Config("mail.sender is not set".to_string()));
        }
        Validator::validate_email(&self.mail.sender)
            .map_err(|e| MonitorError::Config(e.to_string()))?;

        if self.mail.password.as_deref().is_none_or(|p| p.is_empty()) {
            return Err(MonitorError::Config("mail.password is not set".to_string()));
        }

        if self.mail.recipients.iter().all(|r| r.trim().is_empty()) {
            return Err(MonitorError::Config(
                "mail.recipients must list at least one address".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[source]
base_url = "https://example.org/doe"
file_prefix = "DOTCECE"
year_offset = 2013
start_number = 10
max_attempts = 20
probe_timeout_secs = 5
download_timeout_secs = 30
download_dir = "/tmp"

[search]
terms = ["Secretaria de Educação"]
pattern_set = "act_types"

[mail]
smtp_server = "smtp.example.org"
smtp_port = 587
sender = "bot@example.org"
display_name = "Bot"
recipients = ["a@example.org"]
"#;

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("monitor.toml");
        fs::write(&path, SAMPLE).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.source.start_number, 10);
        assert_eq!(config.search.pattern_set, PatternSetName::ActTypes);
        assert_eq!(config.report.format, ReportFormat::Plain);
        assert!(config.report.include_footer);
        assert!(!config.source.keep_download);
    }

    #[test]
    fn test_env_overrides_keep_strings_verbatim() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("monitor.toml");
        fs::write(&path, SAMPLE).unwrap();

        // SAFETY: these variables are only read by this test.
        unsafe {
            std::env::set_var("GAZETTE_MONITOR__MAIL__PASSWORD", "007123");
            std::env::set_var(
                "GAZETTE_MONITOR__MAIL__RECIPIENTS",
                "a@example.org, b@example.org",
            );
            std::env::set_var("GAZETTE_MONITOR__MAIL__SMTP_PORT", "0465");
        }
        let loaded = Config::load(Some(&path));
        unsafe {
            std::env::remove_var("GAZETTE_MONITOR__MAIL__PASSWORD");
            std::env::remove_var("GAZETTE_MONITOR__MAIL__RECIPIENTS");
            std::env::remove_var("GAZETTE_MONITOR__MAIL__SMTP_PORT");
        }

        let config = loaded.unwrap();
        assert_eq!(config.mail.password.as_deref(), Some("007123"));
        assert_eq!(
            config.mail.recipients,
            vec!["a@example.org".to_string(), "b@example.org".to_string()]
        );
        assert_eq!(config.mail.smtp_port, 465);
        assert_eq!(config.search.terms, vec!["Secretaria de Educação".to_string()]);
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let mut config = Config::default_config();
        config.source.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_relative_base_url() {
        let mut config = Config::default_config();
        config.source.base_url = "contexto-api.tce.ce.gov.br/arquivos/doe".to_string();
        assert!(matches!(config.validate(), Err(MonitorError::Config(_))));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default_config().validate().is_ok());
    }

    #[test]
    fn test_mail_credentials_required() {
        let mut config = Config::default_config();
        assert!(config.require_mail_credentials().is_err());

        config.mail.sender = "bot@example.org".to_string();
        config.mail.password = Some("secret".to_string());
        config.mail.recipients = vec!["a@example.org".to_string()];
        assert!(config.require_mail_credentials().is_ok());
    }
}
