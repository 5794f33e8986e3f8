//! Report kinds and their date ranges.

use std::ops::RangeInclusive;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::ReportError;

/// Period a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// The reference day only.
    Daily,
    /// Monday through Sunday of the reference week.
    Weekly,
    /// The whole calendar month of the reference day.
    Monthly,
}

impl ReportKind {
    /// All kinds, in selector order.
    pub const ALL: [Self; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    /// Selector label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Daily => "Diario",
            Self::Weekly => "Semanal",
            Self::Monthly => "Mensual",
        }
    }

    /// Lowercase label used in file names.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Daily => "diario",
            Self::Weekly => "semanal",
            Self::Monthly => "mensual",
        }
    }

    const fn english_name(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned for an unrecognized report kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown report kind '{0}' (expected diario, semanal or mensual)")]
pub struct UnknownReportKind(pub String);

impl std::str::FromStr for ReportKind {
    type Err = UnknownReportKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.slug() == wanted || k.english_name() == wanted)
            .ok_or_else(|| UnknownReportKind(s.to_string()))
    }
}

/// Inclusive date interval. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ReportRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A one-day range.
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// First day, inclusive.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day, inclusive.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` falls within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, counting both ends.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl std::fmt::Display for ReportRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Years a report can cover. Workbook dates cannot leave this span.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1900..=9999;

/// Returns true if `date` falls within [`SUPPORTED_YEARS`].
#[must_use]
pub fn is_supported_date(date: NaiveDate) -> bool {
    SUPPORTED_YEARS.contains(&date.year())
}

/// Computes the range a report of `kind` covers around `reference`.
///
/// - Daily: the reference date.
/// - Weekly: Monday on or before the reference, through the following Sunday.
/// - Monthly: the first of the month through the day before the first of
///   the next month.
///
/// Total over every `NaiveDate`: a week that would run past the first or
/// last representable day is cut short there.
#[must_use]
pub fn compute_range(kind: ReportKind, reference: NaiveDate) -> ReportRange {
    match kind {
        ReportKind::Daily => ReportRange::single_day(reference),
        ReportKind::Weekly => {
            let back = u64::from(reference.weekday().num_days_from_monday());
            let start = reference.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
            ReportRange {
                start,
                end: start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX),
            }
        }
        ReportKind::Monthly => {
            let start = reference.with_day(1).unwrap_or(reference);
            // Past the last representable month, the month ends at MAX
            let end = start
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap_or(NaiveDate::MAX);
            ReportRange { start, end }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_daily_is_single_day() {
        let range = compute_range(ReportKind::Daily, d(2024, 3, 15));
        assert_eq!(range.start(), d(2024, 3, 15));
        assert_eq!(range.end(), d(2024, 3, 15));
        assert_eq!(range.days(), 1);
    }

    #[rstest]
    #[case(d(2024, 3, 11), d(2024, 3, 11))] // Monday
    #[case(d(2024, 3, 15), d(2024, 3, 11))] // Friday
    #[case(d(2024, 3, 17), d(2024, 3, 11))] // Sunday
    #[case(d(2025, 1, 1), d(2024, 12, 30))] // week spans the new year
    fn test_weekly_starts_on_monday(#[case] reference: NaiveDate, #[case] monday: NaiveDate) {
        let range = compute_range(ReportKind::Weekly, reference);
        assert_eq!(range.start(), monday);
        assert_eq!(range.end(), monday + Days::new(6));
        assert!(range.contains(reference));
    }

    #[rstest]
    #[case(d(2024, 3, 15), d(2024, 3, 1), d(2024, 3, 31))]
    #[case(d(2024, 2, 10), d(2024, 2, 1), d(2024, 2, 29))] // leap year
    #[case(d(2023, 2, 28), d(2023, 2, 1), d(2023, 2, 28))]
    #[case(d(2024, 12, 31), d(2024, 12, 1), d(2024, 12, 31))] // December rollover
    #[case(d(2024, 4, 1), d(2024, 4, 1), d(2024, 4, 30))]
    fn test_monthly_bounds(
        #[case] reference: NaiveDate,
        #[case] start: NaiveDate,
        #[case] end: NaiveDate,
    ) {
        let range = compute_range(ReportKind::Monthly, reference);
        assert_eq!(range.start(), start);
        assert_eq!(range.end(), end);
    }

    #[rstest]
    #[case(ReportKind::Daily)]
    #[case(ReportKind::Weekly)]
    #[case(ReportKind::Monthly)]
    fn test_calendar_edges_do_not_overflow(#[case] kind: ReportKind) {
        for reference in [NaiveDate::MIN, NaiveDate::MAX] {
            let range = compute_range(kind, reference);
            assert!(range.contains(reference), "{kind} {reference}");
            assert!(range.start() <= range.end());
            assert!(range.days() <= 31);
        }
    }

    #[test]
    fn test_last_month_ends_at_max() {
        let range = compute_range(ReportKind::Monthly, NaiveDate::MAX);
        assert_eq!(range.start().day(), 1);
        assert_eq!(range.end(), NaiveDate::MAX);
    }

    #[rstest]
    #[case(d(1900, 1, 1), true)]
    #[case(d(9999, 12, 31), true)]
    #[case(d(1899, 12, 31), false)]
    #[case(NaiveDate::MAX, false)]
    fn test_is_supported_date(#[case] date: NaiveDate, #[case] expected: bool) {
        assert_eq!(is_supported_date(date), expected);
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        assert!(ReportRange::new(d(2024, 3, 2), d(2024, 3, 1)).is_err());
        assert!(ReportRange::new(d(2024, 3, 1), d(2024, 3, 1)).is_ok());
    }

    #[test]
    fn test_range_display() {
        let range = compute_range(ReportKind::Monthly, d(2024, 3, 15));
        assert_eq!(range.to_string(), "2024-03-01..=2024-03-31");
    }

    #[rstest]
    #[case("diario", ReportKind::Daily)]
    #[case("Semanal", ReportKind::Weekly)]
    #[case("MENSUAL", ReportKind::Monthly)]
    #[case("monthly", ReportKind::Monthly)]
    #[case(" weekly ", ReportKind::Weekly)]
    fn test_report_kind_from_str(#[case] input: &str, #[case] expected: ReportKind) {
        assert_eq!(ReportKind::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_report_kind_unknown() {
        assert_eq!(
            ReportKind::from_str("anual"),
            Err(UnknownReportKind("anual".to_string()))
        );
    }
}
