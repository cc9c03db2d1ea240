use crate::models::ProjectRecord;
use csv::Writer;
use std::path::Path;

/// CSV header row, in the fixed output order
pub const HEADERS: [&str; 7] = [
    "Sanitized_Project_Identifier_From_Card",
    "Raw_Project_Name_From_Card",
    "Project_Name_Scraped_From_Details_Page",
    "Project_Type_Scraped_From_Details_Page",
    "RERA_Reg_No_Scraped_From_Details_Page",
    "Promoter_Company_Name_Scraped",
    "Promoter_Registration_No_Scraped",
];

/// Write all collected records as UTF-8 CSV with the fixed header row.
///
/// The header is written even when no records were collected, so an
/// aborted run still produces a well-formed file.
pub fn write_records(path: &Path, records: &[ProjectRecord]) -> Result<(), csv::Error> {
    let mut writer = Writer::from_path(path)?;

    if records.is_empty() {
        writer.write_record(HEADERS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}
