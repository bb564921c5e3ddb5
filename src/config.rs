use std::fmt;

use serde::Deserialize;

use crate::time::TimeFormatter;

pub const NIUKE_BASE_URL: &str = "https://ac.nowcoder.com";
pub const ATCODER_BASE_URL: &str = "https://atcoder.jp";
pub const CODEFORCES_API_URL: &str = "https://codeforces.com/api";

/// Codeforces API key pair, issued at <https://codeforces.com/settings/api>.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Settings shared by all adapters of an [`AcmClient`](crate::AcmClient).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub niuke_base_url: String,
    pub atcoder_base_url: String,
    pub codeforces_api_url: String,
    /// Offset east of UTC, in seconds, used to display contest start times.
    pub utc_offset_seconds: i32,
    pub codeforces: Option<Credentials>,
}

impl ClientConfig {
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.codeforces = Some(credentials);
        self
    }

    pub fn time_formatter(&self) -> TimeFormatter {
        TimeFormatter::from_offset_seconds(self.utc_offset_seconds)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            niuke_base_url: NIUKE_BASE_URL.to_string(),
            atcoder_base_url: ATCODER_BASE_URL.to_string(),
            codeforces_api_url: CODEFORCES_API_URL.to_string(),
            utc_offset_seconds: 8 * 3600,
            codeforces: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"utc_offset_seconds": 32400, "codeforces": {"api_key": "k", "api_secret": "s"}}"#,
        )
        .unwrap();
        assert_eq!(config.niuke_base_url, NIUKE_BASE_URL);
        assert_eq!(config.time_formatter().zone().local_minus_utc(), 32400);
        assert!(config.codeforces.unwrap().is_complete());
    }

    #[test]
    fn test_credentials_debug_hides_secret() {
        let credentials = Credentials::new("key", "hunter2");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("key"));
        assert!(!debug.contains("hunter2"));
    }
}
