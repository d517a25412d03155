use serde::{Deserialize, Serialize};

use crate::food::repo::{FoodLog, SelfRating};
use crate::metrics::repo::DailyMetrics;

/// Declaration order is the dominance order: when the two axis flags are
/// combined, the worse one wins under green < yellow < red.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "summary_color", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SummaryColor {
    Green,
    Yellow,
    Red,
}

pub const GLUCOSE_RED_ABOVE_MMOL_L: f64 = 7.0;
pub const GLUCOSE_YELLOW_FROM_MMOL_L: f64 = 6.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayEvaluation {
    pub color: SummaryColor,
    pub score: i32,
    pub reasons: Vec<String>,
    pub commentary: String,
}

/// Turns one day's raw records into a verdict. Total and deterministic:
/// absent metrics, a missing glucose value and an empty food log all take
/// the "not recorded" branches rather than failing.
///
/// Two independent axes (glucose, diet) each produce a flag and a score
/// contribution; the overall color is the worse flag, the score the sum,
/// and the reasons list the glucose axis first.
pub fn evaluate_day(metrics: Option<&DailyMetrics>, food_logs: &[FoodLog]) -> DayEvaluation {
    let mut reasons: Vec<String> = Vec::new();
    let mut score = 0;

    let glucose_flag = match metrics.and_then(|m| m.fasting_glucose_mmol_l) {
        Some(g) if g > GLUCOSE_RED_ABOVE_MMOL_L => {
            reasons.push(format!("fasting glucose {g:.1} > 7.0"));
            score -= 4;
            SummaryColor::Red
        }
        Some(g) if g >= GLUCOSE_YELLOW_FROM_MMOL_L => {
            reasons.push(format!("fasting glucose {g:.1} in 6.0-7.0"));
            score -= 2;
            SummaryColor::Yellow
        }
        Some(_) => {
            score += 2;
            SummaryColor::Green
        }
        None => {
            reasons.push("no fasting glucose recorded".to_string());
            score -= 1;
            SummaryColor::Yellow
        }
    };

    let diet_flag = if food_logs.is_empty() {
        reasons.push("no food logged (possibly missed)".to_string());
        score -= 1;
        SummaryColor::Yellow
    } else {
        let any_danger = food_logs.iter().any(|l| l.self_rating == SelfRating::Danger);
        let any_risk = food_logs.iter().any(|l| l.self_rating == SelfRating::Risk);
        let any_sugar = food_logs.iter().any(|l| l.sugar);
        let any_refined = food_logs.iter().any(|l| l.refined_carbs);

        // sugar and refined carbs may come from different entries: the whole
        // day's pattern is what counts, not a single meal
        if any_danger || (any_sugar && any_refined) {
            reasons.push("diet: dangerous / high-sugar refined carbs".to_string());
            score -= 4;
            SummaryColor::Red
        } else if any_risk || any_sugar || any_refined {
            reasons.push("diet: risk items present".to_string());
            score -= 2;
            SummaryColor::Yellow
        } else {
            score += 2;
            SummaryColor::Green
        }
    };

    let color = glucose_flag.max(diet_flag);
    let commentary = match color {
        SummaryColor::Red => {
            "Red day: tighten up diet and routine immediately to avoid a red streak."
        }
        SummaryColor::Yellow => "Yellow day: risk items present, clear them out today.",
        SummaryColor::Green => "Green day: keep the rhythm and keep stacking green days.",
    }
    .to_string();

    DayEvaluation {
        color,
        score,
        reasons,
        commentary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};
    use uuid::Uuid;

    use crate::food::repo::MealType;

    fn metrics_with_glucose(glucose: Option<f64>) -> DailyMetrics {
        DailyMetrics {
            day: date!(2024 - 02 - 15),
            weight_kg: Some(82.0),
            fasting_glucose_mmol_l: glucose,
            post2h_glucose_mmol_l: None,
            waist_cm: None,
            sleep_hours: Some(7.5),
            bp_systolic: None,
            bp_diastolic: None,
        }
    }

    fn entry(sugar: bool, refined_carbs: bool, self_rating: SelfRating) -> FoodLog {
        FoodLog {
            id: Uuid::nil(),
            eaten_at: datetime!(2024-02-15 12:00 UTC),
            meal_type: MealType::Lunch,
            image_path: None,
            refined_carbs,
            sugar,
            veggies_first: false,
            protein_enough: true,
            self_rating,
            notes: None,
            meal_end_at: None,
        }
    }

    #[test]
    fn identical_inputs_yield_identical_output() {
        let metrics = metrics_with_glucose(Some(6.4));
        let logs = vec![entry(true, false, SelfRating::Safe)];
        let first = evaluate_day(Some(&metrics), &logs);
        let second = evaluate_day(Some(&metrics), &logs);
        assert_eq!(first, second);
    }

    #[test]
    fn fully_absent_day_is_yellow_with_two_reasons() {
        let eval = evaluate_day(None, &[]);
        assert_eq!(eval.color, SummaryColor::Yellow);
        assert_eq!(eval.score, -2);
        assert_eq!(
            eval.reasons,
            vec![
                "no fasting glucose recorded".to_string(),
                "no food logged (possibly missed)".to_string(),
            ]
        );
    }

    #[test]
    fn metrics_row_without_glucose_counts_as_not_recorded() {
        let metrics = metrics_with_glucose(None);
        let eval = evaluate_day(Some(&metrics), &[]);
        assert_eq!(eval.color, SummaryColor::Yellow);
        assert_eq!(eval.score, -2);
    }

    #[test]
    fn glucose_above_seven_is_red_regardless_of_diet() {
        let metrics = metrics_with_glucose(Some(7.1));
        let eval = evaluate_day(Some(&metrics), &[]);
        assert_eq!(eval.color, SummaryColor::Red);
        assert_eq!(eval.score, -5);
        assert!(eval.reasons[0].contains("7.1"));

        let clean = vec![entry(false, false, SelfRating::Safe)];
        let eval = evaluate_day(Some(&metrics), &clean);
        assert_eq!(eval.color, SummaryColor::Red);
        assert_eq!(eval.score, -2);
    }

    #[test]
    fn glucose_boundaries() {
        // 6.0 and 7.0 are both yellow; just below 6.0 is green
        let clean = vec![entry(false, false, SelfRating::Safe)];

        let eval = evaluate_day(Some(&metrics_with_glucose(Some(6.0))), &clean);
        assert_eq!(eval.color, SummaryColor::Yellow);
        assert_eq!(eval.score, 0);

        let eval = evaluate_day(Some(&metrics_with_glucose(Some(7.0))), &clean);
        assert_eq!(eval.color, SummaryColor::Yellow);

        let eval = evaluate_day(Some(&metrics_with_glucose(Some(5.9))), &clean);
        assert_eq!(eval.color, SummaryColor::Green);
        assert_eq!(eval.score, 4);
        assert!(eval.reasons.is_empty());
    }

    #[test]
    fn low_glucose_is_still_a_recorded_value() {
        // 0.0 must never collapse into "not recorded"
        let eval = evaluate_day(Some(&metrics_with_glucose(Some(0.0))), &[]);
        assert_eq!(eval.score, 2 - 1);
        assert_eq!(eval.reasons, vec!["no food logged (possibly missed)"]);
    }

    #[test]
    fn sugar_and_refined_across_different_entries_make_diet_red() {
        let logs = vec![
            entry(true, false, SelfRating::Safe),
            entry(false, true, SelfRating::Safe),
        ];
        let eval = evaluate_day(None, &logs);
        assert_eq!(eval.color, SummaryColor::Red);
        assert_eq!(eval.score, -5);
        assert!(eval
            .reasons
            .contains(&"diet: dangerous / high-sugar refined carbs".to_string()));
    }

    #[test]
    fn danger_rating_alone_makes_diet_red() {
        let logs = vec![entry(false, false, SelfRating::Danger)];
        let eval = evaluate_day(None, &logs);
        assert_eq!(eval.color, SummaryColor::Red);
    }

    #[test]
    fn single_risk_flag_is_yellow_not_red() {
        for logs in [
            vec![entry(true, false, SelfRating::Safe)],
            vec![entry(false, true, SelfRating::Safe)],
            vec![entry(false, false, SelfRating::Risk)],
        ] {
            let metrics = metrics_with_glucose(Some(5.2));
            let eval = evaluate_day(Some(&metrics), &logs);
            assert_eq!(eval.color, SummaryColor::Yellow);
            assert_eq!(eval.score, 0);
            assert_eq!(eval.reasons, vec!["diet: risk items present"]);
        }
    }

    #[test]
    fn all_clean_day_is_green_with_max_score() {
        let metrics = metrics_with_glucose(Some(5.2));
        let logs = vec![
            entry(false, false, SelfRating::Safe),
            entry(false, false, SelfRating::Safe),
        ];
        let eval = evaluate_day(Some(&metrics), &logs);
        assert_eq!(eval.color, SummaryColor::Green);
        assert_eq!(eval.score, 4);
        assert!(eval.reasons.is_empty());
        assert!(eval.commentary.starts_with("Green day"));
    }

    #[test]
    fn overall_color_is_worst_of_both_axes() {
        // glucose flag per input, diet flag per input, expected combined
        let glucose_inputs = [
            (Some(5.0), SummaryColor::Green),
            (Some(6.5), SummaryColor::Yellow),
            (Some(8.0), SummaryColor::Red),
        ];
        let diet_inputs = [
            (vec![entry(false, false, SelfRating::Safe)], SummaryColor::Green),
            (vec![entry(true, false, SelfRating::Safe)], SummaryColor::Yellow),
            (vec![entry(false, false, SelfRating::Danger)], SummaryColor::Red),
        ];

        for (glucose, glucose_flag) in &glucose_inputs {
            for (logs, diet_flag) in &diet_inputs {
                let metrics = metrics_with_glucose(*glucose);
                let eval = evaluate_day(Some(&metrics), logs);
                assert_eq!(
                    eval.color,
                    (*glucose_flag).max(*diet_flag),
                    "glucose {glucose:?} x diet {diet_flag:?}"
                );
            }
        }
    }

    #[test]
    fn commentary_tracks_overall_color() {
        let red = evaluate_day(Some(&metrics_with_glucose(Some(9.0))), &[]);
        assert!(red.commentary.starts_with("Red day"));
        let yellow = evaluate_day(None, &[]);
        assert!(yellow.commentary.starts_with("Yellow day"));
    }
}
