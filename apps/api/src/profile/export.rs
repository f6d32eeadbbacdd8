use std::str::FromStr;

use rust_xlsxwriter::Workbook;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::models::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(AppError::Validation(format!("Unsupported format '{other}'"))),
        }
    }
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "exported_data.csv",
            ExportFormat::Json => "exported_data.json",
            ExportFormat::Xlsx => "exported_data.xlsx",
        }
    }
}

/// The single exported record: account identity plus descriptive profile fields.
#[derive(Debug, Serialize)]
pub struct ExportRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub full_name: &'a str,
    pub skills: &'a str,
    pub experience: &'a str,
    pub education: &'a str,
    pub summary: &'a str,
}

impl<'a> ExportRow<'a> {
    pub fn new(user: &'a User, profile: &'a ProfileRow) -> Self {
        Self {
            username: &user.username,
            email: &user.email,
            full_name: &profile.full_name,
            skills: &profile.skills,
            experience: &profile.experience,
            education: &profile.education,
            summary: profile.summary.as_deref().unwrap_or_default(),
        }
    }

    /// Column name and value pairs, in export column order.
    fn columns(&self) -> [(&'static str, &'a str); 7] {
        [
            ("username", self.username),
            ("email", self.email),
            ("full_name", self.full_name),
            ("skills", self.skills),
            ("experience", self.experience),
            ("education", self.education),
            ("summary", self.summary),
        ]
    }
}

/// Renders the row as a CSV document or a single-sheet workbook (header + one line each),
/// or as a one-element JSON array.
pub fn render_export(format: ExportFormat, row: &ExportRow<'_>) -> Result<Vec<u8>, AppError> {
    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer
                .serialize(row)
                .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV export failed: {e}")))?;
            writer
                .into_inner()
                .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV export failed: {e}")))
        }
        ExportFormat::Json => serde_json::to_vec(&[row])
            .map_err(|e| AppError::Internal(anyhow::anyhow!("JSON export failed: {e}"))),
        ExportFormat::Xlsx => render_workbook(row)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("XLSX export failed: {e}"))),
    }
}

fn render_workbook(row: &ExportRow<'_>) -> Result<Vec<u8>, rust_xlsxwriter::XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, (name, value)) in (0u16..).zip(row.columns()) {
        worksheet.write_string(0, col, name)?;
        worksheet.write_string(1, col, value)?;
    }
    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn fixtures() -> (User, ProfileRow) {
        let user = User {
            id: Uuid::new_v4(),
            username: "asha".to_string(),
            email: "asha@example.com".to_string(),
            hashed_password: String::new(),
            is_active: true,
            created_at: Utc::now(),
        };
        let mut profile = ProfileRow::blank(user.id, "Asha Rao");
        profile.skills = "Python, ROS2".to_string();
        profile.experience = "1y".to_string();
        profile.education = "BS".to_string();
        (user, profile)
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("xlsx".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert!(matches!(
            "pdf".parse::<ExportFormat>(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_csv_export_has_header_and_quoted_row() {
        let (user, profile) = fixtures();
        let bytes = render_export(ExportFormat::Csv, &ExportRow::new(&user, &profile)).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("username,email,full_name,skills,experience,education,summary")
        );
        assert_eq!(
            lines.next(),
            Some("asha,asha@example.com,Asha Rao,\"Python, ROS2\",1y,BS,")
        );
    }

    #[test]
    fn test_json_export_is_single_element_array() {
        let (user, profile) = fixtures();
        let bytes = render_export(ExportFormat::Json, &ExportRow::new(&user, &profile)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["skills"], "Python, ROS2");
        assert_eq!(value[0]["summary"], "");
    }

    #[test]
    fn test_xlsx_export_is_a_workbook() {
        let (user, profile) = fixtures();
        let bytes = render_export(ExportFormat::Xlsx, &ExportRow::new(&user, &profile)).unwrap();
        // XLSX is a zip container.
        assert!(bytes.starts_with(b"PK\x03\x04"));
        assert_eq!(
            ExportFormat::Xlsx.content_type(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(ExportFormat::Xlsx.file_name(), "exported_data.xlsx");
    }

    #[test]
    fn test_columns_follow_csv_header_order() {
        let (user, profile) = fixtures();
        let row = ExportRow::new(&user, &profile);
        let names: Vec<&str> = row.columns().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names.join(","),
            "username,email,full_name,skills,experience,education,summary"
        );
    }
}
