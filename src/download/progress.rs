use std::io::Write;

/// Prints `\rDownloading: N%` whenever the whole percentage changes.
///
/// Nothing is printed when the server did not declare a size.
pub struct ProgressReporter<W: Write> {
    out: W,
    last_percent: Option<u64>,
}

impl<W: Write> ProgressReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_percent: None,
        }
    }

    pub fn update(&mut self, received: u64, total: Option<u64>) {
        let Some(percent) = percent(received, total) else {
            return;
        };
        if self.last_percent == Some(percent) {
            return;
        }
        self.last_percent = Some(percent);

        // Progress output is best effort
        let _ = write!(self.out, "\rDownloading: {}%", percent);
        if percent >= 100 {
            let _ = writeln!(self.out, "\n");
        }
        let _ = self.out.flush();
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// floor(received * 100 / total); `None` without a usable total.
pub fn percent(received: u64, total: Option<u64>) -> Option<u64> {
    match total {
        Some(total) if total > 0 => Some((received as u128 * 100 / total as u128) as u64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds_down() {
        assert_eq!(percent(0, Some(3)), Some(0));
        assert_eq!(percent(1, Some(3)), Some(33));
        assert_eq!(percent(2, Some(3)), Some(66));
        assert_eq!(percent(999, Some(1000)), Some(99));
        assert_eq!(percent(1000, Some(1000)), Some(100));
        assert_eq!(percent(u64::MAX, Some(u64::MAX)), Some(100));
    }

    #[test]
    fn test_percent_without_total() {
        assert_eq!(percent(10, None), None);
        assert_eq!(percent(10, Some(0)), None);
    }

    #[test]
    fn test_reporter_prints_changes_only() {
        let mut reporter = ProgressReporter::new(Vec::new());
        reporter.update(10, Some(1000));
        reporter.update(15, Some(1000));
        reporter.update(500, Some(1000));
        reporter.update(1000, Some(1000));

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            out,
            "\rDownloading: 1%\rDownloading: 50%\rDownloading: 100%\n\n"
        );
    }

    #[test]
    fn test_reporter_starts_at_zero() {
        let mut reporter = ProgressReporter::new(Vec::new());
        reporter.update(0, Some(12));
        reporter.update(12, Some(12));

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(out, "\rDownloading: 0%\rDownloading: 100%\n\n");
    }

    #[test]
    fn test_reporter_silent_without_total() {
        let mut reporter = ProgressReporter::new(Vec::new());
        reporter.update(4096, None);
        assert!(reporter.into_inner().is_empty());
    }
}
