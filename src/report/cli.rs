use crate::model::{Severity, SeverityTally, SweepSummary};
use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct TallyRow {
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Low")]
    low: usize,
    #[tabled(rename = "Medium")]
    medium: usize,
    #[tabled(rename = "High")]
    high: usize,
    #[tabled(rename = "Critical")]
    critical: usize,
    #[tabled(rename = "Worst")]
    worst: String,
}

impl From<&SeverityTally> for TallyRow {
    fn from(t: &SeverityTally) -> Self {
        Self {
            version: truncate(&t.version, 30),
            low: t.low,
            medium: t.medium,
            high: t.high,
            critical: t.critical,
            worst: t.worst().map(|s| format_severity(&s)).unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub fn print_table(summary: &SweepSummary) -> Result<()> {
    println!();
    println!(
        "Sweep of {} finished at: {}",
        summary.artifact,
        summary.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    if summary.tallies.is_empty() {
        println!("No reports could be read.");
    } else {
        let rows: Vec<TallyRow> = summary.tallies.iter().map(TallyRow::from).collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{}", table);
    }

    let failed: Vec<_> = summary.failed_scans().collect();
    if !failed.is_empty() {
        println!();
        println!("{} versions failed to scan:", failed.len());
        for scan in failed {
            if let crate::model::ScanOutcome::Failed { message } = &scan.outcome {
                println!("  {}: {}", scan.version, truncate(message, 100));
            }
        }
    }

    let missing = summary.missing_reports();
    if !missing.is_empty() {
        println!();
        println!("No report for: {}", missing.join(", "));
    }

    println!();
    print_totals(summary);
    println!("CSV written to: {}", summary.csv_path.display());

    Ok(())
}

fn print_totals(summary: &SweepSummary) {
    let sum = |severity: Severity| -> usize {
        summary.tallies.iter().map(|t| t.count(severity)).sum()
    };

    let affected = summary.tallies.iter().filter(|t| t.total() > 0).count();

    println!("Summary:");
    println!(
        "  Versions: {} discovered, {} reported",
        summary.versions.len(),
        summary.tallies.len()
    );
    println!("  Versions with findings: {}", affected);
    println!(
        "  Findings: {} critical, {} high, {} medium, {} low",
        sum(Severity::Critical),
        sum(Severity::High),
        sum(Severity::Medium),
        sum(Severity::Low)
    );
}

fn format_severity(severity: &Severity) -> String {
    match severity {
        Severity::Critical => "\x1b[31mCRITICAL\x1b[0m".to_string(),
        Severity::High => "\x1b[91mHIGH\x1b[0m".to_string(),
        Severity::Medium => "\x1b[33mMEDIUM\x1b[0m".to_string(),
        Severity::Low => "\x1b[32mLOW\x1b[0m".to_string(),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("1.0", 30), "1.0");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
    }

    #[test]
    fn test_row_worst_severity() {
        let mut tally = SeverityTally::new("1.0");
        assert_eq!(TallyRow::from(&tally).worst, "-");

        tally.low = 2;
        tally.critical = 1;
        assert!(TallyRow::from(&tally).worst.contains("CRITICAL"));
    }
}
