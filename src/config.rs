use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Run configuration, loaded from an optional `config.toml`
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// URL of the project listing page
    #[serde(default = "default_listing_url")]
    pub listing_url: String,

    /// Number of listing entries to attempt
    #[serde(default = "default_num_items")]
    pub num_items: usize,

    /// Path of the CSV output file
    #[serde(default = "default_output_path")]
    pub output_path: String,

    /// Directory for diagnostic screenshots, created if absent
    #[serde(default = "default_screenshots_dir")]
    pub screenshots_dir: String,

    #[serde(default)]
    pub browser: BrowserSettings,

    #[serde(default)]
    pub waits: WaitSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowserSettings {
    #[serde(default = "default_true")]
    pub headless: bool,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Navigation timeout in seconds
    #[serde(default = "default_browser_timeout")]
    pub timeout_secs: u64,
}

/// Per-transition wait budgets.
///
/// Explicit readiness conditions carry most of the waiting; the settle
/// delays only cover re-paints with no observable completion signal.
#[derive(Debug, Deserialize, Clone)]
pub struct WaitSettings {
    /// Project cards present on the listing page
    #[serde(default = "default_cards_wait")]
    pub cards_secs: u64,

    /// The card's view-details control visible
    #[serde(default = "default_control_wait")]
    pub control_secs: u64,

    /// Detail-page header visible after the click
    #[serde(default = "default_header_wait")]
    pub header_secs: u64,

    /// Promoter tab control visible
    #[serde(default = "default_tab_wait")]
    pub tab_secs: u64,

    /// Promoter section body populated after the tab switch
    #[serde(default = "default_content_wait")]
    pub content_secs: u64,

    /// Cards present again after navigating back
    #[serde(default = "default_return_wait")]
    pub return_secs: u64,

    /// Pause after navigation and scrolling
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Pause for client-side rendering after a view change
    #[serde(default = "default_render_settle_ms")]
    pub render_settle_ms: u64,
}

fn default_listing_url() -> String {
    "https://rera.odisha.gov.in/projects/project-list".to_string()
}
fn default_num_items() -> usize {
    6
}
fn default_output_path() -> String {
    "rera_odisha_scraped_data.csv".to_string()
}
fn default_screenshots_dir() -> String {
    "screenshots_errors".to_string()
}
fn default_true() -> bool {
    true
}
fn default_window_width() -> u32 {
    1920
}
fn default_window_height() -> u32 {
    1200
}
fn default_browser_timeout() -> u64 {
    30
}
fn default_cards_wait() -> u64 {
    30
}
fn default_control_wait() -> u64 {
    20
}
fn default_header_wait() -> u64 {
    40
}
fn default_tab_wait() -> u64 {
    30
}
fn default_content_wait() -> u64 {
    20
}
fn default_return_wait() -> u64 {
    40
}
fn default_settle_ms() -> u64 {
    1000
}
fn default_render_settle_ms() -> u64 {
    2000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            num_items: default_num_items(),
            output_path: default_output_path(),
            screenshots_dir: default_screenshots_dir(),
            browser: BrowserSettings::default(),
            waits: WaitSettings::default(),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: default_window_width(),
            window_height: default_window_height(),
            timeout_secs: default_browser_timeout(),
        }
    }
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            cards_secs: default_cards_wait(),
            control_secs: default_control_wait(),
            header_secs: default_header_wait(),
            tab_secs: default_tab_wait(),
            content_secs: default_content_wait(),
            return_secs: default_return_wait(),
            settle_ms: default_settle_ms(),
            render_settle_ms: default_render_settle_ms(),
        }
    }
}

impl Config {
    /// Load from `config.toml` in the working directory, falling back to
    /// defaults when the file is absent
    pub fn load() -> Self {
        Self::load_from(Path::new("config.toml"))
    }

    /// Load from the given path, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<Config>(&content) {
                    Ok(cfg) => return cfg,
                    Err(e) => warn!("Ignoring invalid config {}: {}", path.display(), e),
                },
                Err(e) => warn!("Could not read config {}: {}", path.display(), e),
            }
        }
        Self::default()
    }
}

impl WaitSettings {
    pub fn cards(&self) -> Duration {
        Duration::from_secs(self.cards_secs)
    }
    pub fn control(&self) -> Duration {
        Duration::from_secs(self.control_secs)
    }
    pub fn header(&self) -> Duration {
        Duration::from_secs(self.header_secs)
    }
    pub fn tab(&self) -> Duration {
        Duration::from_secs(self.tab_secs)
    }
    pub fn content(&self) -> Duration {
        Duration::from_secs(self.content_secs)
    }
    pub fn back(&self) -> Duration {
        Duration::from_secs(self.return_secs)
    }
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
    pub fn render_settle(&self) -> Duration {
        Duration::from_millis(self.render_settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.num_items, 6);
        assert!(cfg.listing_url.contains("rera.odisha.gov.in"));
        assert_eq!(cfg.output_path, "rera_odisha_scraped_data.csv");
        assert_eq!(cfg.screenshots_dir, "screenshots_errors");
        assert!(cfg.browser.headless);
        assert_eq!(cfg.waits.header(), Duration::from_secs(40));
    }

    #[test]
    fn test_partial_toml_overrides() {
        let cfg: Config = toml::from_str(
            r#"
            num_items = 3

            [browser]
            headless = false

            [waits]
            header_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(cfg.num_items, 3);
        assert!(!cfg.browser.headless);
        assert_eq!(cfg.waits.header_secs, 10);
        // Unset fields keep their defaults
        assert_eq!(cfg.output_path, "rera_odisha_scraped_data.csv");
        assert_eq!(cfg.waits.cards_secs, 30);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let cfg = Config::load_from(Path::new("does_not_exist.toml"));
        assert_eq!(cfg.num_items, 6);
    }
}
