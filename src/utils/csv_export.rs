use crate::models::report::TabularResult;
use crate::utils::error::{AppError, AppResult};
use crate::utils::tabular::cell_to_string;
use chrono::NaiveDateTime;
use rocket::http::Header;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const REPORT_DELIMITER: u8 = b';';
pub const CONSOLE_DELIMITER: u8 = b',';

/// Serialize a table as UTF-8 CSV with a leading BOM and a header row.
pub fn to_csv(table: &TabularResult, delimiter: u8) -> AppResult<Vec<u8>> {
    if table.columns.is_empty() {
        return Ok(UTF8_BOM.to_vec());
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(UTF8_BOM.to_vec());

    writer
        .write_record(&table.columns)
        .map_err(|e| AppError::Unprocessable(e.to_string()))?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(cell_to_string))
            .map_err(|e| AppError::Unprocessable(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Unprocessable(e.to_string()))
}

/// `<prefix>_YYYYmmdd_HHMMSS.csv`
pub fn export_file_name(prefix: &str, at: NaiveDateTime) -> String {
    format!("{}_{}.csv", prefix, at.format("%Y%m%d_%H%M%S"))
}

/// CSV body served as a file download.
#[derive(rocket::Responder)]
#[response(content_type = "text/csv; charset=utf-8")]
pub struct CsvFile {
    inner: Vec<u8>,
    disposition: Header<'static>,
}

impl CsvFile {
    pub fn new(bytes: Vec<u8>, file_name: &str) -> Self {
        CsvFile {
            inner: bytes,
            disposition: Header::new(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", file_name),
            ),
        }
    }
}
