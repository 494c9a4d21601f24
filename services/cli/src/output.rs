use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Reports land next to the export unless configured otherwise.
pub(crate) fn default_output_dir(csv_path: &Path) -> PathBuf {
    match csv_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

pub(crate) fn report_file_name(report_date: NaiveDate, extension: &str) -> String {
    format!("Momentum_Report_{}.{extension}", report_date.format("%Y%m%d"))
}

pub(crate) fn write_report(dir: &Path, file_name: &str, contents: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, contents)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates_only() {
        assert_eq!(
            parse_date(" 2025-10-01 "),
            Ok(NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date"))
        );
        let error = parse_date("10/01/2025").expect_err("us format rejected");
        assert!(error.contains("YYYY-MM-DD"));
    }

    #[test]
    fn output_dir_defaults_to_csv_parent() {
        assert_eq!(
            default_output_dir(Path::new("/data/exports/listings.csv")),
            PathBuf::from("/data/exports")
        );
        assert_eq!(default_output_dir(Path::new("listings.csv")), PathBuf::from("."));
    }

    #[test]
    fn file_name_carries_report_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid date");
        assert_eq!(report_file_name(date, "md"), "Momentum_Report_20250307.md");
    }

    #[test]
    fn write_report_creates_missing_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("reports").join("q3");
        let path = write_report(&nested, "out.md", "# hi\n").expect("write succeeds");
        assert_eq!(path, nested.join("out.md"));
        assert_eq!(fs::read_to_string(path).expect("readable"), "# hi\n");
    }
}
