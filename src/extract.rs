//! Labeled-field extraction from rendered page snapshots.
//!
//! Detail sections lay fields out as `<label>` / `<strong>` sibling
//! pairs inside a section container. These helpers parse a full page
//! snapshot and pull values out by label text; every lookup miss
//! degrades to the caller's default instead of failing.

use crate::helpers::collapse_whitespace;
use scraper::{ElementRef, Html, Selector};

/// Locate a section container: a `div` whose class contains
/// `class_fragment` and which holds an `h5` header with exactly the
/// given (whitespace-collapsed) text.
pub fn find_section<'a>(
    document: &'a Html,
    class_fragment: &str,
    header_text: &str,
) -> Option<ElementRef<'a>> {
    let container = Selector::parse(&format!("div[class*=\"{}\"]", class_fragment)).ok()?;
    let header = Selector::parse("h5").unwrap();

    document.select(&container).find(|section| {
        section
            .select(&header)
            .any(|h| collapse_whitespace(&h.text().collect::<String>()) == header_text)
    })
}

/// Value of the labeled field inside `section`: the first `<strong>`
/// sibling following a `<label>` whose collapsed text equals
/// `label_text`. Returns `default` when the label is missing, the value
/// element is missing, or its text trims to empty. Never fails.
pub fn labeled_value(section: ElementRef<'_>, label_text: &str, default: &str) -> String {
    let labels = Selector::parse("label").unwrap();

    for label in section.select(&labels) {
        if collapse_whitespace(&label.text().collect::<String>()) != label_text {
            continue;
        }

        let value = label
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "strong");

        if let Some(el) = value {
            let text = el.text().collect::<String>();
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }

    default.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAILS_HTML: &str = r#"
        <html><body>
        <div class="card other-section">
            <h5>Something Else</h5>
            <label>Project Name</label><strong>Wrong Section</strong>
        </div>
        <div class="card project-details">
            <div class="card-body">
                <h5> Details of the Project </h5>
                <div class="row">
                    <div class="col">
                        <label> Project Name </label>
                        <strong> Sunshine Residency </strong>
                    </div>
                    <div class="col">
                        <label>Project Type</label>
                        <strong>Residential</strong>
                    </div>
                    <div class="col">
                        <label>RERA Regd. No.</label>
                        <strong>  </strong>
                    </div>
                </div>
            </div>
        </div>
        </body></html>
    "#;

    fn details_section(document: &Html) -> ElementRef<'_> {
        find_section(document, "project-details", "Details of the Project")
            .expect("details section present")
    }

    #[test]
    fn test_find_section_matches_class_and_header() {
        let document = Html::parse_document(DETAILS_HTML);
        let section = details_section(&document);
        assert!(section.value().attr("class").unwrap().contains("project-details"));
    }

    #[test]
    fn test_find_section_absent() {
        let document = Html::parse_document("<div class='card'><h5>Nope</h5></div>");
        assert!(find_section(&document, "project-details", "Details of the Project").is_none());
    }

    #[test]
    fn test_labeled_value_trims_text() {
        let document = Html::parse_document(DETAILS_HTML);
        let section = details_section(&document);
        assert_eq!(
            labeled_value(section, "Project Name", "N/A"),
            "Sunshine Residency"
        );
        assert_eq!(labeled_value(section, "Project Type", "N/A"), "Residential");
    }

    #[test]
    fn test_labeled_value_defaults_on_missing_label() {
        let document = Html::parse_document(DETAILS_HTML);
        let section = details_section(&document);
        assert_eq!(labeled_value(section, "No Such Field", "N/A"), "N/A");
    }

    #[test]
    fn test_labeled_value_defaults_on_blank_value() {
        let document = Html::parse_document(DETAILS_HTML);
        let section = details_section(&document);
        assert_eq!(labeled_value(section, "RERA Regd. No.", "N/A"), "N/A");
    }

    #[test]
    fn test_labeled_value_collapses_label_whitespace() {
        let html = r#"
            <div class="promoter"><h5>Promoter Details</h5>
            <label>  Company
                Name </label>
            <strong>Acme Estates Pvt. Ltd.</strong>
            </div>
        "#;
        let document = Html::parse_document(html);
        let section = find_section(&document, "promoter", "Promoter Details").unwrap();
        assert_eq!(
            labeled_value(section, "Company Name", "N/A"),
            "Acme Estates Pvt. Ltd."
        );
    }

    #[test]
    fn test_labeled_value_skips_intervening_text_nodes() {
        let html = r#"
            <div class="promoter"><h5>Promoter Details</h5>
            <label>Registration No.</label>
            some stray text
            <strong>RP/01/2024/00123</strong>
            </div>
        "#;
        let document = Html::parse_document(html);
        let section = find_section(&document, "promoter", "Promoter Details").unwrap();
        assert_eq!(
            labeled_value(section, "Registration No.", "N/A"),
            "RP/01/2024/00123"
        );
    }
}
