//! Engine Configuration
//!
//! Configuration is loaded from environment variables with logged fallbacks
//! to development defaults. Missing or malformed values never prevent the
//! engine from starting; they degrade to the default and emit a warning.

/// Runtime configuration for the workflow engine.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the web client, embedded in invitation emails so the
    /// recipient can jump straight to their messages view.
    pub client_url: String,
    /// Buffer capacity of each per-room broadcast channel. Slow subscribers
    /// that fall more than this many events behind start lagging; the data
    /// record remains the source of truth.
    pub channel_capacity: usize,
}

impl Config {
    pub const DEFAULT_CLIENT_URL: &'static str = "http://localhost:5173";
    pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

    /// Load configuration from the environment.
    ///
    /// Reads `CLIENT_URL` and `REALTIME_CHANNEL_CAPACITY`, falling back to
    /// the development defaults when unset or unparsable.
    pub fn from_env() -> Self {
        let client_url = match std::env::var("CLIENT_URL") {
            Ok(url) => url,
            Err(_) => {
                tracing::debug!(
                    "CLIENT_URL not set, using {}",
                    Self::DEFAULT_CLIENT_URL
                );
                Self::DEFAULT_CLIENT_URL.to_string()
            }
        };

        let channel_capacity = match std::env::var("REALTIME_CHANNEL_CAPACITY") {
            Ok(raw) => match raw.parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    tracing::warn!(
                        "REALTIME_CHANNEL_CAPACITY={:?} is not a positive integer, \
                         using {}",
                        raw,
                        Self::DEFAULT_CHANNEL_CAPACITY
                    );
                    Self::DEFAULT_CHANNEL_CAPACITY
                }
            },
            Err(_) => Self::DEFAULT_CHANNEL_CAPACITY,
        };

        Self {
            client_url,
            channel_capacity,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_url: Self::DEFAULT_CLIENT_URL.to_string(),
            channel_capacity: Self::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.client_url, "http://localhost:5173");
        assert_eq!(config.channel_capacity, 100);
    }
}
