//! Whole-day aggregation of per-meal totals.

use crate::plan::{MacroTotals, Meal};

/// Sums the already-rounded per-meal totals into the day's totals. The
/// inputs are integers, so re-rounding the sum is a fixed point and the
/// operation is idempotent.
pub fn summarize(meals: &[Meal]) -> MacroTotals {
    let mut totals = MacroTotals::default();
    for meal in meals {
        totals.add(meal.totals);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(name: &str, totals: MacroTotals) -> Meal {
        Meal {
            name: name.to_string(),
            time: "12:00".to_string(),
            items: vec![],
            totals,
        }
    }

    #[test]
    fn test_summarize_sums_meal_totals() {
        let meals = vec![
            meal(
                "Breakfast",
                MacroTotals {
                    calories: 400,
                    protein_g: 30,
                    carbs_g: 60,
                    fat_g: 9,
                },
            ),
            meal(
                "Lunch",
                MacroTotals {
                    calories: 700,
                    protein_g: 53,
                    carbs_g: 88,
                    fat_g: 15,
                },
            ),
        ];
        let totals = summarize(&meals);
        assert_eq!(totals.calories, 1100);
        assert_eq!(totals.protein_g, 83);
        assert_eq!(totals.carbs_g, 148);
        assert_eq!(totals.fat_g, 24);
    }

    #[test]
    fn test_summarize_idempotent() {
        let meals = vec![
            meal(
                "Lunch",
                MacroTotals {
                    calories: 512,
                    protein_g: 41,
                    carbs_g: 63,
                    fat_g: 12,
                },
            ),
            meal(
                "Dinner",
                MacroTotals {
                    calories: 601,
                    protein_g: 44,
                    carbs_g: 55,
                    fat_g: 18,
                },
            ),
        ];
        let once = summarize(&meals);
        // Feeding the day total back in as a single meal changes nothing
        let again = summarize(&[meal("Day", once)]);
        assert_eq!(once, again);
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), MacroTotals::default());
    }
}
