//! Collect reports during one run.

use std::cmp::Ordering;

use crate::report::LogReport;

/// The reports produced by one run. Each run owns its own `Reports`; nothing is global.
#[derive(Debug, Default, Clone)]
pub struct Reports {
    storage: Vec<LogReport>,
}

impl Reports {
    pub fn push(&mut self, report: LogReport) {
        // Duplicates are possible when the same file is handed in twice.
        if !self.storage.contains(&report) {
            self.storage.push(report);
        }
    }

    pub fn append(&mut self, other: Reports) {
        for report in other.storage {
            self.push(report);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogReport> {
        self.storage.iter()
    }

    /// Return the reports sorted by severity (worst first) and then by location.
    pub fn into_sorted(self) -> Vec<LogReport> {
        let mut reports = self.storage;
        reports.sort_by(|a, b| {
            // Severity in descending order
            let mut cmp = b.severity.cmp(&a.severity);
            if cmp != Ordering::Equal {
                return cmp;
            }
            // If severity is the same, order by loc. Check all locs in order.
            for (a, b) in a.pointers.iter().zip(b.pointers.iter()) {
                cmp = a.loc.cmp(&b.loc);
                if cmp != Ordering::Equal {
                    return cmp;
                }
            }
            // Fallback: order by message text.
            a.msg.cmp(&b.msg)
        });
        reports
    }
}

impl<'a> IntoIterator for &'a Reports {
    type Item = &'a LogReport;
    type IntoIter = std::slice::Iter<'a, LogReport>;

    fn into_iter(self) -> Self::IntoIter {
        self.storage.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::report::{err, warn, ErrorKey};
    use crate::token::Loc;

    #[test]
    fn test_sorted_worst_first() {
        let mut reports = Reports::default();
        let b = Loc::for_file(Path::new("b.txt"));
        let a = Loc::for_file(Path::new("a.txt"));
        warn(ErrorKey::Duplicate).msg("dup").loc(&a).push(&mut reports);
        err(ErrorKey::ParseError).msg("broken").loc(&b).push(&mut reports);
        err(ErrorKey::ParseError).msg("broken").loc(&a).push(&mut reports);

        let sorted = reports.into_sorted();
        let order: Vec<(ErrorKey, String)> = sorted
            .iter()
            .map(|r| (r.key, r.primary().loc.filename().to_string()))
            .collect();
        assert_eq!(
            order,
            vec![
                (ErrorKey::ParseError, "a.txt".to_string()),
                (ErrorKey::ParseError, "b.txt".to_string()),
                (ErrorKey::Duplicate, "a.txt".to_string()),
            ]
        );
    }

    #[test]
    fn test_duplicates_dropped() {
        let mut reports = Reports::default();
        let loc = Loc::for_file(Path::new("a.txt"));
        warn(ErrorKey::Duplicate).msg("dup").loc(&loc).push(&mut reports);
        warn(ErrorKey::Duplicate).msg("dup").loc(&loc).push(&mut reports);
        assert_eq!(reports.len(), 1);
    }
}
