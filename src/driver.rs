//! Sequential extraction driver.
//!
//! One browser session walks the listing page and collects a
//! [`ProjectRecord`] for every attempted entry, opening each project's
//! detail view and its promoter tab in turn. Control flow is strictly
//! sequential. Every transition is a bounded wait, and failures are
//! caught at the stage or item boundary so a partial record is still
//! emitted.

use log::{debug, error, info, warn};
use scraper::Html;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crate::browser::{BrowserConfig, BrowserError, BrowserManager, PageDriver};
use crate::config::Config;
use crate::extract::{find_section, labeled_value};
use crate::helpers::sanitize_identifier;
use crate::models::{ProjectRecord, UNAVAILABLE};

const CARD_SELECTOR: &str = "div.project-card";

/// Fixed overlays that can intercept clicks, most specific first
const OVERLAY_SELECTORS: &[&str] = &[
    "nav.navbar.fixed-top",
    "nav.fixed-top",
    ".navbar-main.fixed-top",
];

const DETAILS_HEADER_XPATH: &str = "//h5[normalize-space()='Details of the Project']";

const PROMOTER_CONTAINER_XPATH: &str =
    "//div[contains(@class,'promoter') and .//h5[normalize-space()='Promoter Details']]";

/// Locator candidates for the promoter tab control, tried in order
const PROMOTER_TAB_XPATHS: &[&str] = &[
    "//a[@role='tab' and normalize-space()='Promoter Details']",
    "//button[@role='tab' and normalize-space()='Promoter Details']",
];

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// XPath of the i-th (0-based) project card on the listing page
fn card_xpath(index: usize) -> String {
    format!("(//div[contains(@class,'project-card')])[{}]", index + 1)
}

enum ItemOutcome {
    Processed,
    /// Fewer cards on the page than the requested index
    ListingExhausted,
}

/// Owns the browser session and runs the per-item state machine.
///
/// The manager is held for the whole run and released on drop, which
/// closes the browser no matter how far the run progressed.
pub struct ScrapeDriver {
    _manager: BrowserManager,
    page: PageDriver,
    config: Config,
}

impl ScrapeDriver {
    /// Launch the browser and prepare the screenshots directory
    pub fn new(config: Config) -> Result<Self, BrowserError> {
        fs::create_dir_all(&config.screenshots_dir)?;

        let browser_config = BrowserConfig {
            headless: config.browser.headless,
            window_size: (config.browser.window_width, config.browser.window_height),
            timeout_seconds: config.browser.timeout_secs,
            ..BrowserConfig::default()
        };
        let manager = BrowserManager::new(browser_config)?;
        let tab = manager.new_tab()?;

        Ok(Self {
            _manager: manager,
            page: PageDriver::new(tab),
            config,
        })
    }

    /// Attempt up to `num_items` listing entries and return one record
    /// per attempted entry.
    ///
    /// Never fails: a listing that won't load yields an empty set, a
    /// failed entry yields a partial record, and a failed recovery
    /// navigation stops the loop with everything collected so far.
    pub fn run(&self, num_items: usize) -> Vec<ProjectRecord> {
        let mut records = Vec::new();

        info!("Loading project listing: {}", self.config.listing_url);
        if let Err(e) = self.load_listing() {
            error!("Could not load the project listing: {}", e);
            self.save_screenshot("critical_error_listing_load");
            return records;
        }

        self.suppress_overlay();

        for index in 0..num_items {
            let mut label = format!("Project_Loop_{}", index + 1);
            let mut record = ProjectRecord::default();

            info!("Processing listing entry {} of {}", index + 1, num_items);
            match self.process_item(index, &mut record, &mut label) {
                Ok(ItemOutcome::Processed) => records.push(record),
                Ok(ItemOutcome::ListingExhausted) => break,
                Err(e) => {
                    error!("Entry {} ('{}') failed: {}", index + 1, label, e);
                    self.save_screenshot(&format!("{}_MAIN_LOOP_ERROR", label));
                    records.push(record);

                    info!("Attempting to return to the listing to continue");
                    if let Err(nav) = self.load_listing() {
                        error!(
                            "Could not return to the listing after the failure: {}; \
                             aborting the remaining entries",
                            nav
                        );
                        break;
                    }
                }
            }
        }

        info!("Collected {} record(s)", records.len());
        records
    }

    fn load_listing(&self) -> Result<(), BrowserError> {
        self.page.navigate(&self.config.listing_url)?;
        self.page
            .wait_for_selector(CARD_SELECTOR, self.config.waits.cards())?;
        self.settle(self.config.waits.settle());
        Ok(())
    }

    /// Best-effort removal of a fixed overlay that can swallow clicks.
    /// Finding none is normal and only logged.
    fn suppress_overlay(&self) {
        match self.page.hide_first_visible(OVERLAY_SELECTORS) {
            Ok(Some(selector)) => info!("Hid overlay matching '{}'", selector),
            Ok(None) => debug!("No overlay visible with the known selectors"),
            Err(e) => warn!("Could not probe for an overlay: {}", e),
        }
    }

    fn process_item(
        &self,
        index: usize,
        record: &mut ProjectRecord,
        label: &mut String,
    ) -> Result<ItemOutcome, BrowserError> {
        let waits = &self.config.waits;

        // Re-sync to the listing if the previous entry left us elsewhere
        if self.page.current_url() != self.config.listing_url {
            debug!("Not on the listing page; re-navigating");
            self.page.navigate(&self.config.listing_url)?;
        }
        self.page.wait_for_selector(CARD_SELECTOR, waits.cards())?;
        self.settle(waits.settle());

        let available = self.page.element_count(CARD_SELECTOR)?;
        if index >= available {
            warn!(
                "Only {} project card(s) on the listing; cannot process entry {}",
                available,
                index + 1
            );
            return Ok(ItemOutcome::ListingExhausted);
        }

        let card = card_xpath(index);

        // Identify the entry; a failure here falls back to the
        // positional identifier and the run continues
        match self
            .page
            .text_by_xpath(&format!("{card}//h5[contains(@class,'card-title')]"))
        {
            Ok(text) => {
                let name = text.trim();
                if !name.is_empty() {
                    record.raw_name = name.to_string();
                    *label = sanitize_identifier(name);
                }
            }
            Err(e) => warn!(
                "Could not read the card title for entry {}; keeping '{}': {}",
                index + 1,
                label,
                e
            ),
        }
        record.identifier = label.clone();
        info!("Identified project '{}' (identifier '{}')", record.raw_name, label);

        // Open the detail view
        self.page.scroll_into_view_by_xpath(&card)?;
        self.settle(waits.settle());

        let view_details =
            format!("{card}//a[contains(@class,'btn-primary') and normalize-space()='View Details']");
        self.page
            .wait_for_xpath_visible(&view_details, waits.control())?;
        self.page.click_by_xpath(&view_details)?;

        self.page
            .wait_for_xpath_visible(DETAILS_HEADER_XPATH, waits.header())?;
        self.settle(waits.render_settle());

        // Details stage: failures stay local to the stage
        if let Err(e) = self.scrape_details(record) {
            error!("Failed scraping project details for '{}': {}", label, e);
            self.save_screenshot(&format!("{}_error_scraping_project_details", label));
        }

        // Promoter tab, then the two-stage content wait: the container
        // renders before its data does
        self.open_promoter_tab()?;
        self.page
            .wait_for_xpath_visible(PROMOTER_CONTAINER_XPATH, waits.header())?;
        let populated = format!(
            "{PROMOTER_CONTAINER_XPATH}//div[contains(@class,'card-body')]\
             //div[contains(@class,'row') and count(.//div) > 1]"
        );
        self.page.wait_for_xpath_visible(&populated, waits.content())?;
        self.settle(waits.render_settle());

        if let Err(e) = self.scrape_promoter(record) {
            error!("Failed scraping promoter details for '{}': {}", label, e);
            self.save_screenshot(&format!("{}_error_scraping_promoter_details", label));
        }

        // Back to the listing for the next entry
        self.page.go_back()?;
        self.page.wait_for_selector(CARD_SELECTOR, waits.back())?;
        self.settle(waits.settle());

        Ok(ItemOutcome::Processed)
    }

    fn scrape_details(&self, record: &mut ProjectRecord) -> Result<(), BrowserError> {
        let html = self.page.html()?;
        let document = Html::parse_document(&html);
        let section = find_section(&document, "project-details", "Details of the Project")
            .ok_or_else(|| {
                BrowserError::ElementNotFound("'Details of the Project' section".to_string())
            })?;

        record.project_name = labeled_value(section, "Project Name", UNAVAILABLE);
        record.project_type = labeled_value(section, "Project Type", UNAVAILABLE);
        record.rera_regd_no = labeled_value(section, "RERA Regd. No.", UNAVAILABLE);

        info!(
            "Scraped details: name='{}', type='{}', regd no='{}'",
            record.project_name, record.project_type, record.rera_regd_no
        );
        Ok(())
    }

    fn scrape_promoter(&self, record: &mut ProjectRecord) -> Result<(), BrowserError> {
        let html = self.page.html()?;
        let document = Html::parse_document(&html);
        let section = find_section(&document, "promoter", "Promoter Details").ok_or_else(|| {
            BrowserError::ElementNotFound("'Promoter Details' section".to_string())
        })?;

        record.promoter_company = labeled_value(section, "Company Name", UNAVAILABLE);
        record.promoter_regd_no = labeled_value(section, "Registration No.", UNAVAILABLE);

        info!(
            "Scraped promoter: company='{}', regd no='{}'",
            record.promoter_company, record.promoter_regd_no
        );
        Ok(())
    }

    /// Find the promoter tab by trying each locator candidate in order
    /// until one is visible, then scroll to it and click it. The whole
    /// search shares one wait budget.
    fn open_promoter_tab(&self) -> Result<(), BrowserError> {
        let deadline = Instant::now() + self.config.waits.tab();

        loop {
            for xpath in PROMOTER_TAB_XPATHS {
                if self.page.is_xpath_visible(xpath)? {
                    self.page.scroll_into_view_by_xpath(xpath)?;
                    self.settle(self.config.waits.settle());
                    self.page.click_by_xpath(xpath)?;
                    return Ok(());
                }
            }

            if Instant::now() >= deadline {
                return Err(BrowserError::Timeout("'Promoter Details' tab".to_string()));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Save a diagnostic screenshot; failures are logged and swallowed
    fn save_screenshot(&self, stem: &str) {
        let path = Path::new(&self.config.screenshots_dir).join(format!("{stem}.png"));
        match self.page.screenshot(&path) {
            Ok(()) => info!("Saved diagnostic screenshot to {}", path.display()),
            Err(e) => warn!("Could not save screenshot {}: {}", path.display(), e),
        }
    }

    fn settle(&self, pause: Duration) {
        if !pause.is_zero() {
            thread::sleep(pause);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_xpath_is_one_based() {
        assert_eq!(card_xpath(0), "(//div[contains(@class,'project-card')])[1]");
        assert_eq!(card_xpath(5), "(//div[contains(@class,'project-card')])[6]");
    }
}
