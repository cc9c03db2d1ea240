/// Browser session tests
/// These tests require Chrome/Chromium to be installed
/// Run with: cargo test --test browser_tests -- --ignored
use rera_scraper::browser::{BrowserConfig, BrowserManager, PageDriver};
use std::time::Duration;

fn session() -> (BrowserManager, PageDriver) {
    let manager =
        BrowserManager::new(BrowserConfig::default()).expect("Chrome/Chromium not installed");
    let tab = manager.new_tab().expect("tab creation failed");
    let page = PageDriver::new(tab);
    (manager, page)
}

#[test]
#[ignore] // Requires Chrome/Chromium
fn test_browser_creation() {
    let result = BrowserManager::new(BrowserConfig::default());
    assert!(
        result.is_ok(),
        "Failed to launch browser. Is Chrome/Chromium installed?"
    );
}

#[test]
#[ignore] // Requires Chrome/Chromium and internet
fn test_navigation_and_url() {
    let (_manager, page) = session();
    page.navigate("https://example.com").unwrap();
    assert!(page.current_url().contains("example.com"));
}

#[test]
#[ignore] // Requires Chrome/Chromium and internet
fn test_wait_and_text_extraction() {
    let (_manager, page) = session();
    page.navigate("https://example.com").unwrap();

    page.wait_for_selector("h1", Duration::from_secs(10)).unwrap();
    page.wait_for_xpath_visible("//h1", Duration::from_secs(10))
        .unwrap();

    let heading = page.text_by_xpath("//h1").unwrap();
    assert!(heading.contains("Example Domain"));

    assert_eq!(page.element_count("h1").unwrap(), 1);
    assert_eq!(page.element_count("div.project-card").unwrap(), 0);
}

#[test]
#[ignore] // Requires Chrome/Chromium and internet
fn test_wait_timeout_on_absent_element() {
    let (_manager, page) = session();
    page.navigate("https://example.com").unwrap();

    let result = page.wait_for_selector("div.no-such-thing", Duration::from_secs(2));
    assert!(result.is_err());
}

#[test]
#[ignore] // Requires Chrome/Chromium and internet
fn test_hide_first_visible_without_match() {
    let (_manager, page) = session();
    page.navigate("https://example.com").unwrap();

    let hidden = page
        .hide_first_visible(&["nav.navbar.fixed-top", "nav.fixed-top"])
        .unwrap();
    assert!(hidden.is_none());
}

#[test]
#[ignore] // Requires Chrome/Chromium and internet
fn test_screenshot_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.png");

    let (_manager, page) = session();
    page.navigate("https://example.com").unwrap();
    page.screenshot(&path).unwrap();

    assert!(path.exists());
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}
