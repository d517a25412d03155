use serde::Serialize;
use time::OffsetDateTime;

pub const FASTING_GOAL_HOURS: f64 = 16.0;

/// Hours elapsed since the last recorded meal end. `None` when no meal end
/// has ever been recorded. May be negative if `now` precedes the recorded
/// end; the caller decides how to display that.
pub fn fasting_hours_since(
    last_meal_end_at: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> Option<f64> {
    last_meal_end_at.map(|end| (now - end).as_seconds_f64() / 3600.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FastingReadout {
    pub hours: f64,
    pub remaining: f64,
    pub warning: bool,
}

pub fn readout(
    last_meal_end_at: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> Option<FastingReadout> {
    fasting_hours_since(last_meal_end_at, now).map(|hours| FastingReadout {
        hours,
        remaining: (FASTING_GOAL_HOURS - hours).max(0.0),
        warning: hours < FASTING_GOAL_HOURS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn absent_when_no_meal_end_recorded() {
        assert_eq!(
            fasting_hours_since(None, datetime!(2024-02-15 12:00 UTC)),
            None
        );
        assert_eq!(readout(None, datetime!(2024-02-15 12:00 UTC)), None);
    }

    #[test]
    fn seventeen_hours_after_meal_end() {
        let end = datetime!(2024-02-14 19:00 UTC);
        let now = datetime!(2024-02-15 12:00 UTC);
        let hours = fasting_hours_since(Some(end), now).expect("recorded");
        assert_eq!(hours, 17.0);

        let r = readout(Some(end), now).expect("recorded");
        assert_eq!(r.remaining, 0.0);
        assert!(!r.warning);
    }

    #[test]
    fn inside_window_warns_with_remaining() {
        let end = datetime!(2024-02-15 08:00 UTC);
        let now = datetime!(2024-02-15 12:30 UTC);
        let r = readout(Some(end), now).expect("recorded");
        assert_eq!(r.hours, 4.5);
        assert_eq!(r.remaining, 11.5);
        assert!(r.warning);
    }

    #[test]
    fn clock_skew_yields_negative_hours_not_an_error() {
        let end = datetime!(2024-02-15 12:00 UTC);
        let now = datetime!(2024-02-15 11:00 UTC);
        let r = readout(Some(end), now).expect("recorded");
        assert_eq!(r.hours, -1.0);
        assert!(r.warning);
        assert_eq!(r.remaining, 17.0);
    }
}
