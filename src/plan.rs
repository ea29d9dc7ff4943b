//! Output types handed to the rendering/export collaborators, plus the
//! human-readable quantity formatting.

use serde::Serialize;

use crate::catalog::{FoodItem, ServingUnit};

/// Rounded macro values, used for items, meals and the whole day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MacroTotals {
    pub calories: i64,
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fat_g: i64,
}

impl MacroTotals {
    pub fn add(&mut self, other: MacroTotals) {
        self.calories += other.calories;
        self.protein_g += other.protein_g;
        self.carbs_g += other.carbs_g;
        self.fat_g += other.fat_g;
    }
}

/// One selected food item with its display quantity and rounded
/// nutritional contribution.
#[derive(Debug, Clone, Serialize)]
pub struct MealItem {
    pub name: String,
    pub quantity: String,
    /// Display names of interchangeable items from the catalog entry.
    pub substitutes: Vec<String>,
    pub calories: i64,
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fat_g: i64,
}

impl MealItem {
    pub fn totals(&self) -> MacroTotals {
        MacroTotals {
            calories: self.calories,
            protein_g: self.protein_g,
            carbs_g: self.carbs_g,
            fat_g: self.fat_g,
        }
    }
}

/// A named, scheduled meal with its items and per-meal totals.
#[derive(Debug, Clone, Serialize)]
pub struct Meal {
    pub name: String,
    pub time: String,
    pub items: Vec<MealItem>,
    pub totals: MacroTotals,
}

/// The final plan: ordered meals, whole-day totals and the daily water
/// intake in liters. Totals always equal the sum of per-meal totals.
#[derive(Debug, Clone, Serialize)]
pub struct DietPlan {
    pub meals: Vec<Meal>,
    pub totals: MacroTotals,
    pub water_liters: f64,
}

/// Formats a gram quantity the way the plan displays it: mass and volume
/// directly, count/slice converted through grams-per-unit, to-taste items
/// without a number.
pub fn format_quantity(item: &FoodItem, grams: f64) -> String {
    let grams_rounded = grams.round() as i64;
    match item.unit {
        ServingUnit::Grams => format!("{} g", grams_rounded),
        ServingUnit::Milliliters => format!("{} ml", grams_rounded),
        ServingUnit::ToTaste => "to taste".to_string(),
        ServingUnit::Count | ServingUnit::Slice => {
            let label = if item.unit == ServingUnit::Count {
                ("unit", "units")
            } else {
                ("slice", "slices")
            };
            match item.grams_per_unit {
                Some(gpu) if gpu > 0.0 => {
                    let units = (grams / gpu).round().max(1.0) as i64;
                    let word = if units == 1 { label.0 } else { label.1 };
                    format!("{} {} ({} g)", units, word, grams_rounded)
                }
                _ => format!("{} g", grams_rounded),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DietaryFlags, FoodCategory, MealSlot};

    fn item_with_unit(unit: ServingUnit, grams_per_unit: Option<f64>) -> FoodItem {
        FoodItem {
            id: "test".to_string(),
            name: "Test item".to_string(),
            category: FoodCategory::Protein,
            meal_slots: vec![MealSlot::Lunch],
            kcal_per_100: 100.0,
            protein_per_100: 10.0,
            carbs_per_100: 10.0,
            fat_per_100: 1.0,
            unit,
            grams_per_unit,
            default_quantity_g: if unit == ServingUnit::ToTaste { 0.0 } else { 100.0 },
            flags: DietaryFlags::default(),
            substitutes: vec![],
        }
    }

    #[test]
    fn test_format_quantity_mass_and_volume() {
        assert_eq!(
            format_quantity(&item_with_unit(ServingUnit::Grams, None), 150.4),
            "150 g"
        );
        assert_eq!(
            format_quantity(&item_with_unit(ServingUnit::Milliliters, None), 200.0),
            "200 ml"
        );
    }

    #[test]
    fn test_format_quantity_count_and_slice() {
        assert_eq!(
            format_quantity(&item_with_unit(ServingUnit::Count, Some(50.0)), 100.0),
            "2 units (100 g)"
        );
        assert_eq!(
            format_quantity(&item_with_unit(ServingUnit::Count, Some(50.0)), 50.0),
            "1 unit (50 g)"
        );
        assert_eq!(
            format_quantity(&item_with_unit(ServingUnit::Slice, Some(25.0)), 50.0),
            "2 slices (50 g)"
        );
        // No grams-per-unit recorded: fall back to grams
        assert_eq!(
            format_quantity(&item_with_unit(ServingUnit::Count, None), 80.0),
            "80 g"
        );
    }

    #[test]
    fn test_format_quantity_to_taste() {
        assert_eq!(
            format_quantity(&item_with_unit(ServingUnit::ToTaste, None), 0.0),
            "to taste"
        );
    }
}
