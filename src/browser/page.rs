use super::manager::BrowserError;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::Tab;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Page-level primitives over a single tab.
///
/// All waits are bounded polls: a condition script is evaluated every
/// 100 ms until it holds or the per-call timeout elapses. Element handles
/// are never retained between calls; every lookup re-resolves in the live
/// document, so a re-rendered page cannot leave a stale reference behind.
pub struct PageDriver {
    tab: Arc<Tab>,
}

/// Encode a Rust string as a JavaScript string literal
fn js_string(s: &str) -> String {
    Value::String(s.to_owned()).to_string()
}

/// Expression resolving an XPath to its first matching node (or null)
fn xpath_lookup(xpath: &str) -> String {
    format!(
        "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
        js_string(xpath)
    )
}

impl PageDriver {
    pub fn new(tab: Arc<Tab>) -> Self {
        Self { tab }
    }

    /// Navigate to a URL and block until the navigation settles
    pub fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.tab.navigate_to(url).map_err(|e| {
            BrowserError::NavigationError(format!("Failed to navigate to {}: {}", url, e))
        })?;

        self.tab.wait_until_navigated().map_err(|e| {
            BrowserError::NavigationError(format!("Navigation timeout for {}: {}", url, e))
        })?;

        Ok(())
    }

    /// URL of the document currently loaded in the tab
    pub fn current_url(&self) -> String {
        self.tab.get_url()
    }

    /// Navigate one step back in the tab's history
    pub fn go_back(&self) -> Result<(), BrowserError> {
        self.eval("window.history.back();")
            .map_err(|e| BrowserError::NavigationError(format!("History back failed: {}", e)))?;
        Ok(())
    }

    /// Wait until at least one element matches the CSS selector
    pub fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let script = format!("document.querySelector({}) !== null", js_string(selector));
        self.wait_until(&script, timeout, &format!("selector '{}'", selector))
    }

    /// Wait until the XPath resolves to an element with a non-empty box
    pub fn wait_for_xpath_visible(
        &self,
        xpath: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let script = format!(
            "(() => {{ const el = {}; if (!el) return false; \
             const r = el.getBoundingClientRect(); \
             return r.width > 0 && r.height > 0; }})()",
            xpath_lookup(xpath)
        );
        self.wait_until(&script, timeout, &format!("visible element at {}", xpath))
    }

    /// Single visibility probe for an XPath, without waiting
    pub fn is_xpath_visible(&self, xpath: &str) -> Result<bool, BrowserError> {
        let script = format!(
            "(() => {{ const el = {}; if (!el) return false; \
             const r = el.getBoundingClientRect(); \
             return r.width > 0 && r.height > 0; }})()",
            xpath_lookup(xpath)
        );
        Ok(self.eval(&script)?.as_ref().and_then(Value::as_bool) == Some(true))
    }

    /// Number of elements currently matching the CSS selector
    pub fn element_count(&self, selector: &str) -> Result<usize, BrowserError> {
        let script = format!("document.querySelectorAll({}).length", js_string(selector));
        let count = self
            .eval(&script)?
            .as_ref()
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                BrowserError::JavaScriptError(format!("Count query returned no number for '{}'", selector))
            })?;
        Ok(count as usize)
    }

    /// Text content of the first element matching the XPath
    pub fn text_by_xpath(&self, xpath: &str) -> Result<String, BrowserError> {
        let script = format!(
            "(() => {{ const el = {}; return el ? el.textContent : null; }})()",
            xpath_lookup(xpath)
        );
        match self.eval(&script)? {
            Some(Value::String(text)) => Ok(text),
            _ => Err(BrowserError::ElementNotFound(xpath.to_string())),
        }
    }

    /// Click the first element matching the XPath
    pub fn click_by_xpath(&self, xpath: &str) -> Result<(), BrowserError> {
        let script = format!(
            "(() => {{ const el = {}; if (!el) return false; el.click(); return true; }})()",
            xpath_lookup(xpath)
        );
        if self.eval(&script)?.as_ref().and_then(Value::as_bool) == Some(true) {
            Ok(())
        } else {
            Err(BrowserError::ElementNotFound(xpath.to_string()))
        }
    }

    /// Scroll the first element matching the XPath to the viewport center
    pub fn scroll_into_view_by_xpath(&self, xpath: &str) -> Result<(), BrowserError> {
        let script = format!(
            "(() => {{ const el = {}; if (!el) return false; \
             el.scrollIntoView({{block: 'center', inline: 'nearest'}}); return true; }})()",
            xpath_lookup(xpath)
        );
        if self.eval(&script)?.as_ref().and_then(Value::as_bool) == Some(true) {
            Ok(())
        } else {
            Err(BrowserError::ElementNotFound(xpath.to_string()))
        }
    }

    /// Hide the first visible element among the candidate selectors.
    ///
    /// Returns the selector that matched, or None when no candidate is
    /// present and visible.
    pub fn hide_first_visible(
        &self,
        selectors: &[&str],
    ) -> Result<Option<String>, BrowserError> {
        for selector in selectors {
            let script = format!(
                "(() => {{ const el = document.querySelector({}); if (!el) return false; \
                 const r = el.getBoundingClientRect(); \
                 if (r.width === 0 || r.height === 0) return false; \
                 el.style.display = 'none'; return true; }})()",
                js_string(selector)
            );
            if self.eval(&script)?.as_ref().and_then(Value::as_bool) == Some(true) {
                return Ok(Some(selector.to_string()));
            }
        }
        Ok(None)
    }

    /// Get the rendered HTML of the page
    pub fn html(&self) -> Result<String, BrowserError> {
        self.tab
            .get_content()
            .map_err(|e| BrowserError::HtmlExtractionError(e.to_string()))
    }

    /// Capture a full-page PNG screenshot to the given path
    pub fn screenshot(&self, path: &Path) -> Result<(), BrowserError> {
        let data = self
            .tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| BrowserError::JavaScriptError(format!("Screenshot failed: {}", e)))?;

        std::fs::write(path, data)?;
        Ok(())
    }

    fn eval(&self, script: &str) -> Result<Option<Value>, BrowserError> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| BrowserError::JavaScriptError(e.to_string()))?;
        Ok(result.value)
    }

    /// Poll a boolean condition script until it holds or the timeout elapses
    fn wait_until(
        &self,
        condition: &str,
        timeout: Duration,
        what: &str,
    ) -> Result<(), BrowserError> {
        let start = Instant::now();

        loop {
            if start.elapsed() > timeout {
                return Err(BrowserError::Timeout(what.to_string()));
            }

            match self.eval(condition) {
                Ok(Some(value)) if value.as_bool() == Some(true) => return Ok(()),
                // Not satisfied yet, or the document is mid-navigation;
                // keep polling until the deadline
                Ok(_) | Err(_) => {}
            }

            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes_quotes() {
        assert_eq!(js_string("plain"), "\"plain\"");
        assert_eq!(js_string("a'b\"c"), "\"a'b\\\"c\"");
    }

    #[test]
    fn test_xpath_lookup_embeds_quoted_path() {
        let expr = xpath_lookup("//a[normalize-space()='View Details']");
        assert!(expr.contains("document.evaluate"));
        assert!(expr.contains("\"//a[normalize-space()='View Details']\""));
    }
}
