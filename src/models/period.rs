//! Budget period representation
//!
//! A budget period is the calendar month containing a reference instant,
//! expressed as a half-open `[start, end)` window of instants. The time zone
//! travels with the period so "local midnight" means the caller's midnight.

use chrono::{DateTime, Datelike, Duration, Local, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use std::fmt;

/// Longest daylight-saving gap we step over when local midnight does not exist
const MAX_MIDNIGHT_GAP_MINUTES: i64 = 240;

/// The calendar month used as the aggregation window
#[derive(Clone)]
pub struct BudgetPeriod<Tz: TimeZone = Local> {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl BudgetPeriod<Local> {
    /// Resolve the period for the current month in the machine's local zone
    pub fn current() -> Self {
        Self::resolve(&Local::now())
    }
}

impl<Tz: TimeZone> BudgetPeriod<Tz> {
    /// Resolve the month containing `now`
    ///
    /// `start` is the first of the month at local midnight, `end` is the first
    /// of the following month. December rolls over into January of the next
    /// year through calendar arithmetic.
    pub fn resolve(now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();
        let first = today - Duration::days(i64::from(today.day0()));
        let next = first
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX);

        Self {
            start: local_midnight(&tz, first),
            end: local_midnight(&tz, next),
        }
    }

    /// First instant of the period (inclusive)
    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    /// First instant after the period (exclusive)
    pub fn end(&self) -> &DateTime<Tz> {
        &self.end
    }

    /// The zone the period was resolved in
    pub fn timezone(&self) -> Tz {
        self.start.timezone()
    }

    /// Check if an instant falls within `[start, end)`
    pub fn contains<Tz2: TimeZone>(&self, instant: &DateTime<Tz2>) -> bool {
        let instant = instant.with_timezone(&Utc);
        instant >= self.start.with_timezone(&Utc) && instant < self.end.with_timezone(&Utc)
    }

    /// Month label, e.g. "2025-01"
    pub fn label(&self) -> String {
        let first = self.start.date_naive();
        format!("{:04}-{:02}", first.year(), first.month())
    }
}

impl<Tz: TimeZone> PartialEq for BudgetPeriod<Tz> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<Tz: TimeZone> Eq for BudgetPeriod<Tz> {}

impl<Tz: TimeZone> fmt::Debug for BudgetPeriod<Tz> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BudgetPeriod")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

impl<Tz: TimeZone> fmt::Display for BudgetPeriod<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} .. {})",
            self.label(),
            self.start.to_rfc3339(),
            self.end.to_rfc3339()
        )
    }
}

/// Midnight of `date` in `tz`, or the earliest instant after it when a DST
/// transition skips midnight.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);

    (0..=MAX_MIDNIGHT_GAP_MINUTES)
        .step_by(15)
        .find_map(|minutes| {
            tz.from_local_datetime(&(midnight + Duration::minutes(minutes)))
                .earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}
