use crate::error::{LockerError, Result};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

const ENV_FILE: &str = ".env";
pub const API_KEY_VAR: &str = "LL_API_KEY";
pub const API_SECRET_VAR: &str = "LL_API_SECRET";

/// Statement store connection settings. Key names match the upstream
/// tooling's config files so existing files keep working.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(rename = "llIP")]
    pub server_address: String,
    /// printf-style template: server address, then username.
    #[serde(rename = "userReqString")]
    pub user_request_template: String,
    /// printf-style template: server address only.
    #[serde(rename = "llPostString")]
    pub catalog_request_template: String,
    #[serde(rename = "llAPIVersion")]
    pub api_version: String,
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default = "default_request_timeout", rename = "requestTimeoutMs")]
    pub request_timeout_ms: u64,
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_request_timeout() -> u64 {
    30_000
}

impl FromStr for Config {
    type Err = LockerError;

    fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| LockerError::Config(format!("failed to parse config TOML: {}", e)))
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LockerError::Config(format!("failed to read config file {}: {}", path.display(), e))
        })?;
        content.parse()
    }

    /// Load .env file into process environment. Real env vars take precedence.
    pub fn load_env_file() {
        let path = Path::new(ENV_FILE);
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return,
        };
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        for line in content.lines() {
            let line = line.trim().trim_matches('\r');
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim().trim_matches('"').trim_matches('\'');
                if std::env::var(key).is_err() {
                    std::env::set_var(key, value);
                }
            }
        }
    }

    /// URL for one learner's statements.
    pub fn progress_url(&self, username: &str) -> String {
        expand_template(&self.user_request_template, &[&self.server_address, username])
    }

    /// URL for every learner's statements.
    pub fn mentor_url(&self) -> String {
        expand_template(&self.catalog_request_template, &[&self.server_address])
    }

    /// Absolute URL for a relative `more` cursor returned by the store.
    pub fn continuation_url(&self, cursor: &str) -> String {
        format!("{}://{}{}", self.scheme, self.server_address, cursor)
    }
}

/// Statement store API credentials.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve both credentials through `lookup`; empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetch = |key: &str| {
            lookup(key)
                .map(|v| sanitize_key(&v))
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    LockerError::Config(format!("missing environment variable: {}", key))
                })
        };
        Ok(Self {
            api_key: fetch(API_KEY_VAR)?,
            api_secret: fetch(API_SECRET_VAR)?,
        })
    }
}

/// Strip carriage returns, BOM, and other invisible chars from a key value.
fn sanitize_key(raw: &str) -> String {
    raw.replace(['\r', '\u{feff}', '\u{200b}'], "")
        .trim()
        .to_string()
}

/// Substitute `%s` placeholders in order and collapse `%%` to `%`.
/// Placeholders without a matching argument expand to nothing.
pub fn expand_template(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('s') => {
                chars.next();
                if let Some(arg) = args.next() {
                    out.push_str(arg);
                }
            }
            _ => out.push('%'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const BASIC: &str = r#"
llIP = "dns:port"
userReqString = "foo"
llPostString = "bar"
llAPIVersion = "1.0.3"
"#;

    #[test]
    fn test_config_parses() {
        let config = Config::load(Path::new("llcfg.toml")).unwrap();
        assert_eq!(config.server_address, "learninglocker:8081");
        assert_eq!(config.api_version, "1.0.3");
        assert_eq!(config.scheme, "http");
    }

    #[test]
    fn test_basic_config_defaults() {
        let config: Config = BASIC.parse().unwrap();
        assert_eq!(config.server_address, "dns:port");
        assert_eq!(config.user_request_template, "foo");
        assert_eq!(config.catalog_request_template, "bar");
        assert_eq!(config.scheme, "http");
        assert_eq!(config.request_timeout_ms, 30_000);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let content = format!("{}llThisHasNoStructMapping = \"foo\"\n", BASIC);
        let err = content.parse::<Config>().unwrap_err();
        assert!(matches!(err, LockerError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::load(Path::new("does-not-exist.toml")).unwrap_err();
        assert!(matches!(err, LockerError::Config(_)));
    }

    #[test]
    fn test_progress_url_expands_escaped_template() {
        let mut config: Config = BASIC.parse().unwrap();
        config.server_address = "ll:8081".to_string();
        config.user_request_template =
            "http://%s/data/xAPI/statements?agent=%%7B%%22mbox%%22%%3A%%20%%22mailto%%3A%s%%40grace.co%%22%%7D"
                .to_string();
        assert_eq!(
            config.progress_url("mark"),
            "http://ll:8081/data/xAPI/statements?agent=%7B%22mbox%22%3A%20%22mailto%3Amark%40grace.co%22%7D"
        );
    }

    #[test]
    fn test_mentor_and_continuation_urls() {
        let mut config: Config = BASIC.parse().unwrap();
        config.catalog_request_template = "http://%s/data/xAPI/statements".to_string();
        assert_eq!(config.mentor_url(), "http://dns:port/data/xAPI/statements");
        assert_eq!(
            config.continuation_url("/data/xAPI/statements?cursor=abc"),
            "http://dns:port/data/xAPI/statements?cursor=abc"
        );
    }

    #[test]
    fn test_template_without_enough_args() {
        assert_eq!(expand_template("%s-%s", &["a"]), "a-");
        assert_eq!(expand_template("100%", &[]), "100%");
    }

    #[test]
    fn test_credentials_from_lookup() {
        let env: HashMap<&str, &str> = [(API_KEY_VAR, "star"), (API_SECRET_VAR, "wars\r\n")].into();
        let creds = Credentials::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(creds.api_key, "star");
        assert_eq!(creds.api_secret, "wars");
    }

    #[test]
    fn test_missing_or_empty_credential_is_config_error() {
        let only_secret =
            Credentials::from_lookup(|k| (k == API_SECRET_VAR).then(|| "wars".to_string()));
        assert!(matches!(only_secret, Err(LockerError::Config(_))));

        let empty = Credentials::from_lookup(|_| Some(String::new()));
        assert!(matches!(empty, Err(LockerError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials {
            api_key: "star".to_string(),
            api_secret: "wars".to_string(),
        };
        assert!(!format!("{:?}", creds).contains("wars"));
    }
}
