use crate::config::Credentials;
use base64::Engine as _;

pub const VERSION_HEADER: &str = "X-Experience-API-Version";

/// Static request headers for the statement store: Basic auth plus the
/// xAPI version the store expects.
pub struct LockerAuth {
    authorization: String,
    api_version: String,
}

impl LockerAuth {
    pub fn new(credentials: &Credentials, api_version: &str) -> Self {
        Self {
            authorization: format!(
                "Basic {}",
                basic_auth(&credentials.api_key, &credentials.api_secret)
            ),
            api_version: api_version.to_string(),
        }
    }

    /// Build auth headers for a request.
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("Authorization".to_string(), self.authorization.clone()),
            (VERSION_HEADER.to_string(), self.api_version.clone()),
        ]
    }
}

/// base64 of `key:secret`.
pub fn basic_auth(key: &str, secret: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", key, secret))
}
