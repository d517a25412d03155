use std::collections::HashMap;

use serde::Serialize;
use time::Date;

use crate::metrics::repo::DailyMetrics;
use crate::summary::rules::SummaryColor;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyTotals {
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
    /// Last recorded weight minus first recorded weight within the window;
    /// absent unless at least two days carry a weight.
    pub weight_change: Option<f64>,
    /// Mean over days with a recorded value; absent if none. A recorded
    /// value of 0.0 still counts as recorded.
    pub fasting_glucose_avg: Option<f64>,
}

/// Rolls a window of per-day colors and metrics into the weekly totals.
/// `days` and `colors` run in window order and have equal length.
pub fn weekly_totals(
    days: &[Date],
    colors: &[SummaryColor],
    metrics_by_day: &HashMap<Date, DailyMetrics>,
) -> WeeklyTotals {
    let green = colors.iter().filter(|c| **c == SummaryColor::Green).count();
    let yellow = colors
        .iter()
        .filter(|c| **c == SummaryColor::Yellow)
        .count();
    let red = colors.iter().filter(|c| **c == SummaryColor::Red).count();

    let weights: Vec<f64> = days
        .iter()
        .filter_map(|d| metrics_by_day.get(d).and_then(|m| m.weight_kg))
        .collect();
    let weight_change = if weights.len() >= 2 {
        Some(weights[weights.len() - 1] - weights[0])
    } else {
        None
    };

    let glucose: Vec<f64> = days
        .iter()
        .filter_map(|d| metrics_by_day.get(d).and_then(|m| m.fasting_glucose_mmol_l))
        .collect();
    let fasting_glucose_avg = if glucose.is_empty() {
        None
    } else {
        Some(glucose.iter().sum::<f64>() / glucose.len() as f64)
    };

    WeeklyTotals {
        green,
        yellow,
        red,
        weight_change,
        fasting_glucose_avg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;
    use time::macros::date;

    fn window(end: Date) -> Vec<Date> {
        (0..7).map(|i| end - Duration::days(6 - i)).collect()
    }

    fn metrics(day: Date, weight_kg: Option<f64>, glucose: Option<f64>) -> DailyMetrics {
        DailyMetrics {
            day,
            weight_kg,
            fasting_glucose_mmol_l: glucose,
            post2h_glucose_mmol_l: None,
            waist_cm: None,
            sleep_hours: None,
            bp_systolic: None,
            bp_diastolic: None,
        }
    }

    #[test]
    fn weight_delta_needs_two_recorded_days() {
        let days = window(date!(2024 - 02 - 15));
        let colors = vec![SummaryColor::Yellow; 7];

        let mut by_day = HashMap::new();
        by_day.insert(days[0], metrics(days[0], Some(80.0), None));
        by_day.insert(days[6], metrics(days[6], Some(78.5), None));

        let totals = weekly_totals(&days, &colors, &by_day);
        assert_eq!(totals.weight_change, Some(-1.5));

        by_day.remove(&days[6]);
        let totals = weekly_totals(&days, &colors, &by_day);
        assert_eq!(totals.weight_change, None);
    }

    #[test]
    fn color_counts_add_up() {
        let days = window(date!(2024 - 02 - 15));
        let colors = vec![
            SummaryColor::Green,
            SummaryColor::Green,
            SummaryColor::Yellow,
            SummaryColor::Red,
            SummaryColor::Green,
            SummaryColor::Yellow,
            SummaryColor::Red,
        ];
        let totals = weekly_totals(&days, &colors, &HashMap::new());
        assert_eq!((totals.green, totals.yellow, totals.red), (3, 2, 2));
    }

    #[test]
    fn glucose_average_over_recorded_days_only() {
        let days = window(date!(2024 - 02 - 15));
        let colors = vec![SummaryColor::Yellow; 7];

        let mut by_day = HashMap::new();
        by_day.insert(days[1], metrics(days[1], None, Some(5.0)));
        by_day.insert(days[2], metrics(days[2], None, Some(7.0)));
        // a day with a metrics row but no glucose value is not part of the mean
        by_day.insert(days[3], metrics(days[3], Some(81.0), None));

        let totals = weekly_totals(&days, &colors, &by_day);
        assert_eq!(totals.fasting_glucose_avg, Some(6.0));

        let totals = weekly_totals(&days, &colors, &HashMap::new());
        assert_eq!(totals.fasting_glucose_avg, None);
    }
}
