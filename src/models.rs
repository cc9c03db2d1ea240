use serde::Serialize;

/// Sentinel written for any field that could not be extracted
pub const UNAVAILABLE: &str = "N/A";

/// One output row per attempted listing entry.
///
/// Field order matches the CSV header order; every field starts at the
/// sentinel so a partially processed entry still serializes cleanly.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRecord {
    #[serde(rename = "Sanitized_Project_Identifier_From_Card")]
    pub identifier: String,

    #[serde(rename = "Raw_Project_Name_From_Card")]
    pub raw_name: String,

    #[serde(rename = "Project_Name_Scraped_From_Details_Page")]
    pub project_name: String,

    #[serde(rename = "Project_Type_Scraped_From_Details_Page")]
    pub project_type: String,

    #[serde(rename = "RERA_Reg_No_Scraped_From_Details_Page")]
    pub rera_regd_no: String,

    #[serde(rename = "Promoter_Company_Name_Scraped")]
    pub promoter_company: String,

    #[serde(rename = "Promoter_Registration_No_Scraped")]
    pub promoter_regd_no: String,
}

impl Default for ProjectRecord {
    fn default() -> Self {
        Self {
            identifier: UNAVAILABLE.to_string(),
            raw_name: UNAVAILABLE.to_string(),
            project_name: UNAVAILABLE.to_string(),
            project_type: UNAVAILABLE.to_string(),
            rera_regd_no: UNAVAILABLE.to_string(),
            promoter_company: UNAVAILABLE.to_string(),
            promoter_regd_no: UNAVAILABLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_all_sentinel() {
        let record = ProjectRecord::default();
        assert_eq!(record.identifier, UNAVAILABLE);
        assert_eq!(record.raw_name, UNAVAILABLE);
        assert_eq!(record.project_name, UNAVAILABLE);
        assert_eq!(record.project_type, UNAVAILABLE);
        assert_eq!(record.rera_regd_no, UNAVAILABLE);
        assert_eq!(record.promoter_company, UNAVAILABLE);
        assert_eq!(record.promoter_regd_no, UNAVAILABLE);
    }
}
