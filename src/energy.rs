//! Energy and macronutrient target calculations: BMR, TDEE, goal-adjusted
//! daily calories, macro split and water intake.
//!
//! BMR uses the Mifflin-St Jeor equation (Mifflin et al., 1990). All
//! functions here are total over their typed inputs; input completeness is
//! enforced upstream by the session layer.

use serde::Serialize;

use crate::session::{Gender, Goal, TrainingLevel, UserProfile};

/// Daily calories are never pushed below this, regardless of goal.
pub const MIN_DAILY_CALORIES: f64 = 1200.0;

/// Atwater factors.
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Calorie target plus macro gram targets for one day. Gram values are
/// already rounded to whole grams.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DailyTargets {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Mifflin-St Jeor resting energy expenditure.
///
/// Male: `10w + 6.25h - 5a + 5`; female: `10w + 6.25h - 5a - 161`.
/// `Other` uses the male constants. This is a documented approximation,
/// not a medical judgment; the formula has no variant for other genders.
pub fn basal_metabolic_rate(profile: &UserProfile) -> f64 {
    let base =
        10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age);
    match profile.gender {
        Gender::Female => base - 161.0,
        Gender::Male | Gender::Other => base + 5.0,
    }
}

/// Fixed step function of training level. An absent level defaults to the
/// sedentary multiplier.
pub fn activity_factor(level: Option<TrainingLevel>) -> f64 {
    match level {
        Some(TrainingLevel::Sedentary) | None => 1.2,
        Some(TrainingLevel::Light) => 1.375,
        Some(TrainingLevel::Moderate) => 1.55,
        Some(TrainingLevel::Intense) => 1.725,
        Some(TrainingLevel::VeryIntense) => 1.9,
    }
}

pub fn total_energy_expenditure(bmr: f64, level: Option<TrainingLevel>) -> f64 {
    bmr * activity_factor(level)
}

/// Goal adjustment on top of TDEE, clamped to the safety minimum.
pub fn adjust_for_goal(tdee: f64, goal: Goal) -> f64 {
    let adjusted = match goal {
        Goal::WeightLoss => tdee - 500.0,
        Goal::MuscleGain => tdee + 300.0,
        Goal::Maintenance | Goal::HealthyEating => tdee,
    };
    adjusted.max(MIN_DAILY_CALORIES)
}

/// Percentage of daily calories allocated to protein/carbs/fat per goal.
fn macro_percentages(goal: Goal) -> (f64, f64, f64) {
    match goal {
        Goal::MuscleGain => (30.0, 50.0, 20.0),
        Goal::WeightLoss => (35.0, 35.0, 30.0),
        Goal::Maintenance | Goal::HealthyEating => (25.0, 45.0, 30.0),
    }
}

/// Converts the calorie target into gram targets per macro. Each gram
/// value is rounded independently; the rounded macros are not
/// renormalized back to the calorie total, so a minor drift from rounding
/// is accepted.
pub fn macro_split(calories: f64, goal: Goal) -> (f64, f64, f64) {
    let (protein_pct, carbs_pct, fat_pct) = macro_percentages(goal);
    let protein_g = (calories * protein_pct / 100.0 / KCAL_PER_G_PROTEIN).round();
    let carbs_g = (calories * carbs_pct / 100.0 / KCAL_PER_G_CARBS).round();
    let fat_g = (calories * fat_pct / 100.0 / KCAL_PER_G_FAT).round();
    (protein_g, carbs_g, fat_g)
}

/// BMR -> TDEE -> goal adjustment -> macro split, in one call.
pub fn daily_targets(
    profile: &UserProfile,
    level: Option<TrainingLevel>,
    goal: Goal,
) -> DailyTargets {
    let bmr = basal_metabolic_rate(profile);
    let tdee = total_energy_expenditure(bmr, level);
    let calories = adjust_for_goal(tdee, goal);
    let (protein_g, carbs_g, fat_g) = macro_split(calories, goal);
    DailyTargets {
        calories,
        protein_g,
        carbs_g,
        fat_g,
    }
}

/// Daily water intake in liters: weight times an ml-per-kg step function
/// of training level, rounded to one decimal.
pub fn water_intake_liters(weight_kg: f64, level: Option<TrainingLevel>) -> f64 {
    let ml_per_kg = match level {
        Some(TrainingLevel::Sedentary) => 30.0,
        Some(TrainingLevel::Light) | None => 35.0,
        Some(TrainingLevel::Moderate) => 40.0,
        Some(TrainingLevel::Intense) => 45.0,
        Some(TrainingLevel::VeryIntense) => 50.0,
    };
    (weight_kg * ml_per_kg / 100.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    fn male_profile() -> UserProfile {
        UserProfile {
            weight_kg: 70.0,
            height_cm: 175.0,
            age: 30,
            gender: Gender::Male,
        }
    }

    #[test]
    fn test_bmr_male() {
        // 10*70 + 6.25*175 - 5*30 + 5 = 700 + 1093.75 - 150 + 5
        assert_eq!(basal_metabolic_rate(&male_profile()), 1648.75);
    }

    #[test]
    fn test_bmr_female() {
        let profile = UserProfile {
            weight_kg: 60.0,
            height_cm: 165.0,
            age: 25,
            gender: Gender::Female,
        };
        // 600 + 1031.25 - 125 - 161 = 1345.25
        assert_eq!(basal_metabolic_rate(&profile), 1345.25);
    }

    #[test]
    fn test_bmr_other_uses_male_constants() {
        let mut profile = male_profile();
        profile.gender = Gender::Other;
        assert_eq!(basal_metabolic_rate(&profile), 1648.75);
    }

    #[test]
    fn test_activity_factor_table() {
        assert_eq!(activity_factor(Some(TrainingLevel::Sedentary)), 1.2);
        assert_eq!(activity_factor(Some(TrainingLevel::Light)), 1.375);
        assert_eq!(activity_factor(Some(TrainingLevel::Moderate)), 1.55);
        assert_eq!(activity_factor(Some(TrainingLevel::Intense)), 1.725);
        assert_eq!(activity_factor(Some(TrainingLevel::VeryIntense)), 1.9);
        assert_eq!(activity_factor(None), 1.2);
    }

    #[test]
    fn test_tdee_moderate() {
        let tdee = total_energy_expenditure(1648.75, Some(TrainingLevel::Moderate));
        assert!(approx_eq(tdee, 2555.5625, 0.01));
    }

    #[test]
    fn test_goal_adjustment() {
        assert!(approx_eq(
            adjust_for_goal(2555.5625, Goal::WeightLoss),
            2055.5625,
            0.01
        ));
        assert!(approx_eq(
            adjust_for_goal(2555.5625, Goal::MuscleGain),
            2855.5625,
            0.01
        ));
        assert_eq!(adjust_for_goal(2555.5625, Goal::Maintenance), 2555.5625);
        assert_eq!(adjust_for_goal(2555.5625, Goal::HealthyEating), 2555.5625);
    }

    #[test]
    fn test_goal_adjustment_floor() {
        // A deficit can never push below the safety minimum
        assert_eq!(adjust_for_goal(1500.0, Goal::WeightLoss), 1200.0);
        assert_eq!(adjust_for_goal(900.0, Goal::Maintenance), 1200.0);
    }

    #[test]
    fn test_macro_split_muscle_gain() {
        // 2000 kcal at 30/50/20: 600/4=150g, 1000/4=250g, 400/9=44g
        let (protein, carbs, fat) = macro_split(2000.0, Goal::MuscleGain);
        assert_eq!(protein, 150.0);
        assert_eq!(carbs, 250.0);
        assert_eq!(fat, 44.0);
    }

    #[test]
    fn test_macro_split_weight_loss() {
        // 2000 kcal at 35/35/30: 700/4=175g, 700/4=175g, 600/9=66.7->67g
        let (protein, carbs, fat) = macro_split(2000.0, Goal::WeightLoss);
        assert_eq!(protein, 175.0);
        assert_eq!(carbs, 175.0);
        assert_eq!(fat, 67.0);
    }

    #[test]
    fn test_daily_targets_minimum_calories() {
        // Small, light profiles still land at or above the floor
        let profile = UserProfile {
            weight_kg: 40.0,
            height_cm: 145.0,
            age: 70,
            gender: Gender::Female,
        };
        for goal in [
            Goal::WeightLoss,
            Goal::MuscleGain,
            Goal::Maintenance,
            Goal::HealthyEating,
        ] {
            let targets = daily_targets(&profile, None, goal);
            assert!(targets.calories >= MIN_DAILY_CALORIES);
        }
    }

    #[test]
    fn test_water_intake() {
        assert_eq!(water_intake_liters(70.0, Some(TrainingLevel::Moderate)), 2.8);
        assert_eq!(water_intake_liters(70.0, Some(TrainingLevel::Sedentary)), 2.1);
        assert_eq!(
            water_intake_liters(80.0, Some(TrainingLevel::VeryIntense)),
            4.0
        );
        // Absent level uses the 35 ml/kg default
        assert_eq!(water_intake_liters(70.0, None), 2.5);
    }
}
