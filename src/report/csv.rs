use crate::error::{Result, SweepError};
use crate::model::SeverityTally;
use std::fs;
use std::path::{Path, PathBuf};

pub const CSV_HEADER: &str = "\"VERSION\",\"LOW\",\"MEDIUM\",\"HIGH\",\"CRITICAL\"";

const CRLF: &str = "\r\n";

/// `<output_dir>/<prefix>result.csv`
pub fn csv_path(output_dir: &Path, prefix: &str) -> PathBuf {
    output_dir.join(format!("{}result.csv", prefix))
}

/// Renders the summary table with every field quoted and CRLF line endings.
pub fn render_csv(tallies: &[SeverityTally]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push_str(CRLF);

    for tally in tallies {
        let fields = [
            tally.version.clone(),
            tally.low.to_string(),
            tally.medium.to_string(),
            tally.high.to_string(),
            tally.critical.to_string(),
        ];
        let row: Vec<String> = fields.iter().map(|f| quote(f)).collect();
        out.push_str(&row.join(","));
        out.push_str(CRLF);
    }

    out
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Writes the CSV summary and returns its path.
pub fn write_csv(output_dir: &Path, prefix: &str, tallies: &[SeverityTally]) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|e| SweepError::io(output_dir, e))?;

    let path = csv_path(output_dir, prefix);
    fs::write(&path, render_csv(tallies)).map_err(|e| SweepError::io(&path, e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_is_header_only() {
        assert_eq!(
            render_csv(&[]),
            "\"VERSION\",\"LOW\",\"MEDIUM\",\"HIGH\",\"CRITICAL\"\r\n"
        );
    }

    #[test]
    fn test_render_rows() {
        let tallies = vec![
            SeverityTally {
                version: "1.0".to_string(),
                low: 0,
                medium: 0,
                high: 2,
                critical: 1,
            },
            SeverityTally {
                version: "2.0".to_string(),
                low: 4,
                medium: 3,
                high: 0,
                critical: 0,
            },
        ];
        let csv = render_csv(&tallies);
        let lines: Vec<&str> = csv.split("\r\n").collect();

        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "\"1.0\",\"0\",\"0\",\"2\",\"1\"");
        assert_eq!(lines[2], "\"2.0\",\"4\",\"3\",\"0\",\"0\"");
        assert_eq!(lines[3], "");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_write_csv_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");

        let path = write_csv(&out, "dependency-analyze-", &[SeverityTally::new("1.0")]).unwrap();

        assert_eq!(path, out.join("dependency-analyze-result.csv"));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with(CSV_HEADER));
        assert!(content.ends_with("\"1.0\",\"0\",\"0\",\"0\",\"0\"\r\n"));
    }
}
