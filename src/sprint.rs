use chrono::NaiveDate;

/// Sprint metadata supplied on the command line.
#[derive(Debug, Clone)]
pub struct Sprint {
    pub name: String,
    pub project: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Sprint {
    /// Share of the sprint that has elapsed on `today`, 0..=100.
    ///
    /// Zero-length or inverted ranges count as fully elapsed.
    pub fn elapsed_pct(&self, today: NaiveDate) -> u32 {
        let total = (self.end - self.start).num_days();
        if total <= 0 || today >= self.end {
            return 100;
        }
        if today <= self.start {
            return 0;
        }
        let elapsed = (today - self.start).num_days();
        (elapsed as f64 * 100.0 / total as f64).round() as u32
    }
}
