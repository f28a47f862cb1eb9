//! Pure presentation helpers for the dashboard views.
//!
//! Everything here is side-effect free and safe to recompute on every
//! render: badge lookups, date bucketing, D-day labels, pass rates and
//! schedule formatting.

pub mod messages;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};

use super::applications::ApplicationStatus;
use super::interviews::InterviewStatus;

pub use messages::{extract_error_message, FALLBACK_MESSAGE};

/// Semantic badge class for an application status.
pub const fn application_status_badge(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Preparing => "neutral",
        ApplicationStatus::Applied => "info",
        ApplicationStatus::ResumePassed => "progress",
        ApplicationStatus::Interviewing => "warning",
        ApplicationStatus::Offer => "success",
        ApplicationStatus::Rejected => "danger",
    }
}

/// Semantic badge class for an interview status.
pub const fn interview_status_badge(status: InterviewStatus) -> &'static str {
    match status {
        InterviewStatus::Scheduled => "info",
        InterviewStatus::Passed => "success",
        InterviewStatus::Failed => "danger",
    }
}

/// Calendar window anchored at "now". Weeks run Monday through Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBucket {
    Today,
    ThisWeek,
    ThisMonth,
}

/// Inclusive `[start, end]` range for a bucket, in UTC. The end instant is
/// the last millisecond of the bucket's final day.
pub fn bucket_range(bucket: DateBucket, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now.date_naive();
    let (first, last) = match bucket {
        DateBucket::Today => (today, today),
        DateBucket::ThisWeek => {
            let week = today.week(Weekday::Mon);
            (week.first_day(), week.last_day())
        }
        DateBucket::ThisMonth => {
            let first = today.with_day(1).unwrap_or(today);
            let next_month = if today.month() == 12 {
                NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
            };
            let last = next_month
                .and_then(|date| date.pred_opt())
                .unwrap_or(today);
            (first, last)
        }
    };
    (day_start(first), day_end(last))
}

/// Whether `at` falls inside the bucket anchored at `now`.
pub fn in_bucket(bucket: DateBucket, now: DateTime<Utc>, at: DateTime<Utc>) -> bool {
    let (start, end) = bucket_range(bucket, now);
    start <= at && at <= end
}

/// Keeps the items whose timestamp falls inside the bucket.
pub fn filter_in_bucket<T>(
    bucket: DateBucket,
    now: DateTime<Utc>,
    items: &[T],
    timestamp: impl Fn(&T) -> Option<DateTime<Utc>>,
) -> Vec<&T> {
    items
        .iter()
        .filter(|item| timestamp(item).is_some_and(|at| in_bucket(bucket, now, at)))
        .collect()
}

const DAY_MILLIS: i64 = 86_400_000;

/// Countdown label toward `target`: `D-day` on the day itself, `D-N` while
/// the date is ahead, `D+N` once it has passed. Whole days are counted with
/// a ceiling on the millisecond delta, so any moment of the target day
/// still reads `D-day`.
pub fn dday_label(target: NaiveDate, now: DateTime<Utc>) -> String {
    let delta = day_start(target)
        .signed_duration_since(now)
        .num_milliseconds();
    let mut days = delta.div_euclid(DAY_MILLIS);
    if delta.rem_euclid(DAY_MILLIS) != 0 {
        days += 1;
    }
    if days > 0 {
        format!("D-{days}")
    } else if days < 0 {
        format!("D+{}", -days)
    } else {
        "D-day".to_string()
    }
}

/// `passed / total` as a one-decimal percentage. Zero totals read `0.0%`
/// instead of dividing by zero.
pub fn pass_rate(passed: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", passed as f64 / total as f64 * 100.0)
}

/// Renders a nullable schedule, substituting `-` while no slot is agreed.
pub fn format_schedule(scheduled_at: Option<DateTime<Utc>>) -> String {
    match scheduled_at {
        Some(at) => at.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn day_end(date: NaiveDate) -> DateTime<Utc> {
    match date.succ_opt() {
        Some(next) => day_start(next) - Duration::milliseconds(1),
        None => day_start(date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).single().expect("valid time")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn every_application_status_has_a_badge() {
        for status in ApplicationStatus::ALL {
            assert!(!application_status_badge(status).is_empty());
        }
        for status in InterviewStatus::ALL {
            assert!(!interview_status_badge(status).is_empty());
        }
    }

    #[test]
    fn today_bucket_spans_one_calendar_day() {
        let now = at(2025, 1, 27, 14, 30);
        let (start, end) = bucket_range(DateBucket::Today, now);
        assert_eq!(start, at(2025, 1, 27, 0, 0));
        assert_eq!(end.date_naive(), date(2025, 1, 27));
        assert!(in_bucket(DateBucket::Today, now, at(2025, 1, 27, 23, 59)));
        assert!(!in_bucket(DateBucket::Today, now, at(2025, 1, 28, 0, 0)));
    }

    #[test]
    fn week_bucket_runs_monday_through_sunday() {
        // 2025-01-29 is a Wednesday.
        let now = at(2025, 1, 29, 9, 0);
        let (start, end) = bucket_range(DateBucket::ThisWeek, now);
        assert_eq!(start.date_naive(), date(2025, 1, 27));
        assert_eq!(end.date_naive(), date(2025, 2, 2));
    }

    #[test]
    fn month_bucket_handles_the_december_rollover() {
        let now = at(2025, 12, 15, 12, 0);
        let (start, end) = bucket_range(DateBucket::ThisMonth, now);
        assert_eq!(start.date_naive(), date(2025, 12, 1));
        assert_eq!(end.date_naive(), date(2025, 12, 31));
    }

    #[test]
    fn filter_drops_undated_and_out_of_range_items() {
        let now = at(2025, 1, 27, 9, 0);
        let items = vec![
            Some(at(2025, 1, 27, 15, 0)),
            None,
            Some(at(2025, 2, 3, 10, 0)),
        ];
        let kept = filter_in_bucket(DateBucket::ThisWeek, now, &items, |item| *item);
        assert_eq!(kept.len(), 1);
        assert_eq!(*kept[0], Some(at(2025, 1, 27, 15, 0)));
    }

    #[test]
    fn dday_boundaries() {
        let now = at(2025, 1, 27, 10, 0);
        assert_eq!(dday_label(date(2025, 1, 27), now), "D-day");
        assert_eq!(dday_label(date(2025, 1, 29), now), "D-2");
        assert_eq!(dday_label(date(2025, 1, 20), now), "D+7");
    }

    #[test]
    fn dday_at_exact_midnight_is_still_dday() {
        let now = at(2025, 1, 27, 0, 0);
        assert_eq!(dday_label(date(2025, 1, 27), now), "D-day");
        assert_eq!(dday_label(date(2025, 1, 28), now), "D-1");
    }

    #[test]
    fn pass_rate_boundaries() {
        assert_eq!(pass_rate(0, 0), "0.0%");
        assert_eq!(pass_rate(1, 3), "33.3%");
        assert_eq!(pass_rate(3, 3), "100.0%");
    }

    #[test]
    fn missing_schedule_renders_a_dash() {
        assert_eq!(format_schedule(None), "-");
        assert_eq!(
            format_schedule(Some(at(2025, 3, 4, 1, 30))),
            "2025-03-04 01:30"
        );
    }
}
