//! Editor configuration from the environment.

/// Default region store URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default request timeout in milliseconds (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

const MIN_REQUEST_TIMEOUT_MS: u64 = 1_000;
const MAX_REQUEST_TIMEOUT_MS: u64 = 300_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub api_url: String,
    pub request_timeout_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl EditorConfig {
    /// Read `REGIONMAP_API_URL` and `REGIONMAP_REQUEST_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("REGIONMAP_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let request_timeout_ms = match lookup("REGIONMAP_REQUEST_TIMEOUT_MS") {
            Some(val) => match val.trim().parse::<u64>() {
                Ok(ms) if (MIN_REQUEST_TIMEOUT_MS..=MAX_REQUEST_TIMEOUT_MS).contains(&ms) => ms,
                Ok(ms) => {
                    tracing::warn!(
                        ms,
                        "REGIONMAP_REQUEST_TIMEOUT_MS out of range [1000, 300000], ignoring"
                    );
                    DEFAULT_REQUEST_TIMEOUT_MS
                }
                Err(_) => {
                    tracing::warn!(
                        val = %val,
                        "REGIONMAP_REQUEST_TIMEOUT_MS is not a valid u64, ignoring"
                    );
                    DEFAULT_REQUEST_TIMEOUT_MS
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        Self {
            api_url,
            request_timeout_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(key: &'static str, value: &'static str) -> EditorConfig {
        EditorConfig::from_lookup(move |k| (k == key).then(|| value.to_string()))
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(EditorConfig::from_lookup(|_| None), EditorConfig::default());
    }

    #[test]
    fn reads_api_url() {
        let config = config_with("REGIONMAP_API_URL", " https://admin.example.org ");
        assert_eq!(config.api_url, "https://admin.example.org");
    }

    #[test]
    fn timeout_outside_range_is_ignored() {
        assert_eq!(
            config_with("REGIONMAP_REQUEST_TIMEOUT_MS", "500").request_timeout_ms,
            DEFAULT_REQUEST_TIMEOUT_MS
        );
        assert_eq!(
            config_with("REGIONMAP_REQUEST_TIMEOUT_MS", "soon").request_timeout_ms,
            DEFAULT_REQUEST_TIMEOUT_MS
        );
        assert_eq!(
            config_with("REGIONMAP_REQUEST_TIMEOUT_MS", "5000").request_timeout_ms,
            5_000
        );
    }
}
