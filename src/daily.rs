//! Date-seeded selection of the daily artwork id

use chrono::NaiveDate;

/// Identifiers eligible for daily selection: `base .. base + span`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyRange {
    pub base: u32,
    pub span: u32,
}

impl DailyRange {
    /// `base + span` always fits in a `u32`; the range keeps at least one id.
    pub fn new(base: u32, span: u32) -> Self {
        let base = base.min(u32::MAX - 1);
        Self {
            base,
            span: span.min(u32::MAX - base).max(1),
        }
    }

    #[cfg(test)]
    pub fn contains(&self, id: u32) -> bool {
        id >= self.base && id - self.base < self.span
    }
}

/// Fixed-format date string the seed is computed from
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Sum of the character codes of the date key
pub fn daily_seed(date: NaiveDate) -> u32 {
    date_key(date).chars().map(|c| c as u32).sum()
}

pub fn daily_object_id(date: NaiveDate, range: DailyRange) -> u32 {
    range.base + daily_seed(date) % range.span
}

/// Today's id followed by its successors in the range, wrapping at the end.
/// Never yields the same id twice.
pub fn candidate_ids(date: NaiveDate, range: DailyRange, attempts: u32) -> impl Iterator<Item = u32> {
    let offset = u64::from(daily_seed(date) % range.span);
    let span = u64::from(range.span);
    (0..attempts.min(range.span)).map(move |i| range.base + ((offset + u64::from(i)) % span) as u32)
}
