use serde::Serialize;
use time::{Date, Duration, Month};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub day: Date,
    pub in_month: bool,
}

/// Monday-started week grid covering a month: from the Monday on/before the
/// 1st through the Sunday on/after the last day, inclusive. Pure date
/// arithmetic; the only failure is an out-of-range (year, month) input.
pub fn month_grid(year: i32, month: u8) -> Result<Vec<Vec<CalendarDay>>, ApiError> {
    let month = Month::try_from(month)
        .map_err(|_| ApiError::InvalidRange(format!("month {month} outside 1..=12")))?;
    let first = Date::from_calendar_date(year, month, 1)
        .map_err(|_| ApiError::InvalidRange(format!("year {year} out of range")))?;

    let (next_year, next_month) = match month {
        Month::December => (year + 1, Month::January),
        m => (year, m.next()),
    };
    let next_first = Date::from_calendar_date(next_year, next_month, 1)
        .map_err(|_| ApiError::InvalidRange(format!("year {year} out of range")))?;
    let last = next_first - Duration::days(1);

    let start = first - Duration::days(i64::from(first.weekday().number_days_from_monday()));
    let end = last + Duration::days(i64::from(6 - last.weekday().number_days_from_monday()));

    let mut weeks = Vec::new();
    let mut week = Vec::with_capacity(7);
    let mut cur = start;
    while cur <= end {
        week.push(CalendarDay {
            day: cur,
            in_month: cur.month() == month,
        });
        if week.len() == 7 {
            weeks.push(week);
            week = Vec::with_capacity(7);
        }
        cur += Duration::days(1);
    }
    Ok(weeks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Weekday;

    #[test]
    fn leap_february_2024_spans_five_monday_weeks() {
        let weeks = month_grid(2024, 2).expect("valid month");
        assert_eq!(weeks.len(), 5);
        assert!(weeks.iter().all(|w| w.len() == 7));

        assert_eq!(weeks[0][0].day, date!(2024 - 01 - 29));
        assert_eq!(weeks[0][0].day.weekday(), Weekday::Monday);
        assert_eq!(weeks[4][6].day, date!(2024 - 03 - 03));
        assert_eq!(weeks[4][6].day.weekday(), Weekday::Sunday);

        for week in &weeks {
            for cell in week {
                let in_feb = cell.day >= date!(2024 - 02 - 01) && cell.day <= date!(2024 - 02 - 29);
                assert_eq!(cell.in_month, in_feb, "{:?}", cell.day);
            }
        }
    }

    #[test]
    fn february_2021_starts_on_monday_and_needs_four_weeks() {
        let weeks = month_grid(2021, 2).expect("valid month");
        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[0][0].day, date!(2021 - 02 - 01));
        assert_eq!(weeks[3][6].day, date!(2021 - 02 - 28));
        assert!(weeks.iter().flatten().all(|c| c.in_month));
    }

    #[test]
    fn march_2025_needs_six_weeks() {
        let weeks = month_grid(2025, 3).expect("valid month");
        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[0][0].day, date!(2025 - 02 - 24));
        assert_eq!(weeks[5][6].day, date!(2025 - 04 - 06));
    }

    #[test]
    fn december_wraps_into_next_year() {
        let weeks = month_grid(2024, 12).expect("valid month");
        let last = weeks.last().and_then(|w| w.last()).expect("non-empty grid");
        assert_eq!(last.day, date!(2025 - 01 - 05));
        assert!(!last.in_month);
    }

    #[test]
    fn out_of_range_month_is_rejected_not_zero_weeks() {
        assert!(matches!(month_grid(2024, 0), Err(ApiError::InvalidRange(_))));
        assert!(matches!(month_grid(2024, 13), Err(ApiError::InvalidRange(_))));
    }
}
