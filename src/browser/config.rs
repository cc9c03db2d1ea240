use std::time::Duration;

/// Configuration for the browser session
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,

    /// Browser window size
    pub window_size: (u32, u32),

    /// Navigation timeout in seconds
    pub timeout_seconds: u64,

    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            // The registry layout reflows below this width; keep it fixed
            window_size: (1920, 1200),
            timeout_seconds: 30,
            user_agent: None,
        }
    }
}

impl BrowserConfig {
    /// Create a configuration for debugging (non-headless, visible browser)
    pub fn debug_mode() -> Self {
        let mut config = Self::default();
        config.headless = false;
        config
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert_eq!(config.window_size, (1920, 1200));
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_debug_mode() {
        let config = BrowserConfig::debug_mode();
        assert!(!config.headless);
    }
}
