/// Body-mass index from kilograms and centimetres. Height is clamped to a
/// strictly positive value so a misconfigured profile cannot divide by zero.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm.max(1.0) / 100.0;
    weight_kg / (height_m * height_m)
}

/// Signed distance to the goal weight: positive while above it.
pub fn goal_delta(weight_kg: f64, goal_weight_kg: f64) -> f64 {
    weight_kg - goal_weight_kg
}

/// Largest whole multiple of 7 green days reached, once the first week of
/// green days is complete.
pub fn green_streak_milestone(total_green: i64) -> Option<i64> {
    if total_green >= 7 {
        Some((total_green / 7) * 7)
    } else {
        None
    }
}

/// Largest whole 5 kg step lost from the baseline weight, once at least
/// 5 kg are gone.
pub fn weight_loss_milestone(baseline_kg: f64, current_kg: f64) -> Option<i64> {
    let lost = baseline_kg - current_kg;
    if lost >= 5.0 {
        Some(((lost / 5.0).floor() as i64) * 5)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_from_typical_profile() {
        let value = bmi(80.0, 170.0);
        assert!((value - 27.68).abs() < 0.01, "{value}");
    }

    #[test]
    fn bmi_survives_zero_height() {
        let value = bmi(80.0, 0.0);
        assert!(value.is_finite());
    }

    #[test]
    fn goal_delta_is_signed() {
        assert_eq!(goal_delta(85.0, 80.0), 5.0);
        assert_eq!(goal_delta(78.0, 80.0), -2.0);
    }

    #[test]
    fn green_milestones_step_by_whole_weeks() {
        assert_eq!(green_streak_milestone(0), None);
        assert_eq!(green_streak_milestone(6), None);
        assert_eq!(green_streak_milestone(7), Some(7));
        assert_eq!(green_streak_milestone(13), Some(7));
        assert_eq!(green_streak_milestone(14), Some(14));
        assert_eq!(green_streak_milestone(30), Some(28));
    }

    #[test]
    fn weight_milestones_step_by_five_kilograms() {
        assert_eq!(weight_loss_milestone(90.0, 86.0), None);
        assert_eq!(weight_loss_milestone(90.0, 85.0), Some(5));
        assert_eq!(weight_loss_milestone(90.0, 80.5), Some(5));
        assert_eq!(weight_loss_milestone(90.0, 79.9), Some(10));
        // weight gain never produces a milestone
        assert_eq!(weight_loss_milestone(90.0, 92.0), None);
    }
}
