use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }

    /// The fragment the HTML report renders for a CVSSv3 base score of this level.
    pub fn report_marker(&self) -> &'static str {
        match self {
            Severity::Low => "CVSSv3:<ul><li>Base Score: LOW",
            Severity::Medium => "CVSSv3:<ul><li>Base Score: MEDIUM",
            Severity::High => "CVSSv3:<ul><li>Base Score: HIGH",
            Severity::Critical => "CVSSv3:<ul><li>Base Score: CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity counts for one scanned version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityTally {
    pub version: String,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl SeverityTally {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
            Severity::Critical => self.critical,
        }
    }

    pub fn set(&mut self, severity: Severity, count: usize) {
        match severity {
            Severity::Low => self.low = count,
            Severity::Medium => self.medium = count,
            Severity::High => self.high = count,
            Severity::Critical => self.critical = count,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }

    /// Highest severity with a non-zero count.
    pub fn worst(&self) -> Option<Severity> {
        Severity::ALL
            .iter()
            .rev()
            .copied()
            .find(|s| self.count(*s) > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_total_and_worst() {
        let mut tally = SeverityTally::new("1.0");
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.worst(), None);

        tally.set(Severity::Medium, 3);
        tally.set(Severity::High, 1);
        assert_eq!(tally.total(), 4);
        assert_eq!(tally.worst(), Some(Severity::High));
        assert_eq!(tally.count(Severity::Medium), 3);
    }

    #[test]
    fn test_report_markers() {
        assert_eq!(
            Severity::Critical.report_marker(),
            "CVSSv3:<ul><li>Base Score: CRITICAL"
        );
        for severity in Severity::ALL {
            assert!(severity.report_marker().ends_with(severity.as_str()));
        }
    }
}
