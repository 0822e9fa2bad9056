use crate::driver::report_path;
use crate::model::{Severity, SeverityTally};
use std::path::Path;
use tracing::{debug, error};

/// Counts the CVSSv3 severity markers in one rendered report.
pub fn count_severities(version: &str, content: &str) -> SeverityTally {
    let mut tally = SeverityTally::new(version);
    for severity in Severity::ALL {
        tally.set(severity, content.matches(severity.report_marker()).count());
    }
    tally
}

/// Reads every version's report and tallies it.
///
/// A report that cannot be read is logged and its version is left out of the
/// result rather than reported as all zeros.
pub fn collect_tallies(versions: &[String], output_dir: &Path, prefix: &str) -> Vec<SeverityTally> {
    let mut tallies = Vec::new();

    for version in versions {
        let path = report_path(output_dir, prefix, version);
        match std::fs::read(&path) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes);
                let tally = count_severities(version, &content);
                debug!(version = %version, total = tally.total(), "tallied report");
                tallies.push(tally);
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Problem reading file");
            }
        }
    }

    tallies
}
