//! Greedy meal assembly: splits the daily targets across the routine's
//! meals and fills each meal with one protein, one carb and one vegetable
//! item from the catalog, sized against the remaining macro targets.
//!
//! This is a single-pass fill, not an optimizer: there is no backtracking,
//! no rebalancing between meals, and remaining targets may go negative.

use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{Catalog, FoodCategory, FoodItem, MealSlot};
use crate::energy::DailyTargets;
use crate::plan::{format_quantity, MacroTotals, Meal, MealItem};
use crate::session::{Restrictions, Routine};

/// Nominal estimate for a to-taste vegetable serving. Vegetables are never
/// macro-optimized; every vegetable item contributes this flat amount.
const VEGETABLE_KCAL: i64 = 10;
const VEGETABLE_PROTEIN_G: i64 = 1;
const VEGETABLE_CARBS_G: i64 = 2;
const VEGETABLE_FAT_G: i64 = 0;

/// Fraction of the daily calories/protein/carbs/fat assigned to one meal.
struct MealShare {
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
}

/// Fixed distribution table. When the routine has no snack, the snack
/// share is simply not handed out; the day's meal-sum total then falls
/// short of the nominal target. That behavior is intentional and must not
/// be silently changed.
fn share_for(slot: MealSlot) -> MealShare {
    match slot {
        MealSlot::Breakfast => MealShare {
            calories: 0.20,
            protein: 0.20,
            carbs: 0.25,
            fat: 0.20,
        },
        MealSlot::Lunch => MealShare {
            calories: 0.35,
            protein: 0.35,
            carbs: 0.35,
            fat: 0.35,
        },
        MealSlot::Snack => MealShare {
            calories: 0.10,
            protein: 0.10,
            carbs: 0.10,
            fat: 0.10,
        },
        MealSlot::Dinner => MealShare {
            calories: 0.30,
            protein: 0.30,
            carbs: 0.25,
            fat: 0.30,
        },
    }
}

/// Remaining per-meal targets during the greedy fill. Values go negative
/// when an item overshoots; only protein drives protein sizing and carbs
/// the carb step, but every addition is subtracted from all four.
struct Remaining {
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
}

impl Remaining {
    fn subtract(&mut self, contribution: MacroTotals) {
        self.calories -= contribution.calories as f64;
        self.protein -= contribution.protein_g as f64;
        self.carbs -= contribution.carbs_g as f64;
        self.fat -= contribution.fat_g as f64;
    }
}

/// Whether an item passes every active restriction. An item qualifies for
/// a restriction only when explicitly flagged compatible.
fn satisfies(item: &FoodItem, restrictions: &Restrictions) -> bool {
    (!restrictions.vegetarian || item.flags.vegetarian)
        && (!restrictions.vegan || item.flags.vegan)
        && (!restrictions.gluten_free || item.flags.gluten_free)
        && (!restrictions.lactose_free || item.flags.lactose_free)
}

/// The meals a routine asks for, in serving order. Snack sits between
/// lunch and dinner when present.
fn meal_schedule(routine: &Routine) -> Vec<(MealSlot, String)> {
    let mut schedule = vec![
        (MealSlot::Breakfast, routine.breakfast.clone()),
        (MealSlot::Lunch, routine.lunch.clone()),
    ];
    if let Some(snack_time) = &routine.snack {
        schedule.push((MealSlot::Snack, snack_time.clone()));
    }
    schedule.push((MealSlot::Dinner, routine.dinner.clone()));
    schedule
}

/// Builds the ordered meal list for one day. Item choice is random among
/// eligible candidates; pass a seeded generator for reproducible plans.
pub fn build_meals<R: Rng>(
    targets: &DailyTargets,
    routine: &Routine,
    restrictions: &Restrictions,
    catalog: &Catalog,
    rng: &mut R,
) -> Vec<Meal> {
    meal_schedule(routine)
        .into_iter()
        .map(|(slot, time)| fill_meal(slot, time, targets, restrictions, catalog, rng))
        .collect()
}

fn fill_meal<R: Rng>(
    slot: MealSlot,
    time: String,
    targets: &DailyTargets,
    restrictions: &Restrictions,
    catalog: &Catalog,
    rng: &mut R,
) -> Meal {
    let share = share_for(slot);
    let mut remaining = Remaining {
        calories: targets.calories * share.calories,
        protein: targets.protein_g * share.protein,
        carbs: targets.carbs_g * share.carbs,
        fat: targets.fat_g * share.fat,
    };
    let mut items: Vec<MealItem> = Vec::new();

    // Protein step: one random eligible item, sized against the remaining
    // protein target. Items without protein density cannot be sized and
    // are left out of the pool.
    let protein_pool = eligible_pool(catalog, slot, restrictions, FoodCategory::Protein, |item| {
        item.protein_per_100 > 0.0
    });
    if let Some(item) = protein_pool.choose(rng).copied() {
        if let Some(meal_item) =
            sized_item(item, remaining.protein, item.protein_per_100, catalog)
        {
            remaining.subtract(meal_item.totals());
            items.push(meal_item);
        }
    } else {
        warn!(
            "no eligible protein item for {} under the active restrictions",
            slot.display_name()
        );
    }

    // Carb step: only while the carb target is still open.
    if remaining.carbs > 0.0 {
        let carb_pool = eligible_pool(catalog, slot, restrictions, FoodCategory::Carb, |item| {
            item.carbs_per_100 > 0.0
        });
        if let Some(item) = carb_pool.choose(rng).copied() {
            if let Some(meal_item) = sized_item(item, remaining.carbs, item.carbs_per_100, catalog)
            {
                remaining.subtract(meal_item.totals());
                items.push(meal_item);
            }
        } else {
            warn!(
                "no eligible carb item for {} under the active restrictions",
                slot.display_name()
            );
        }
    }

    // Vegetable step: always attempted, added to taste with a flat
    // nominal estimate.
    let vegetable_pool =
        eligible_pool(catalog, slot, restrictions, FoodCategory::Vegetable, |_| true);
    if let Some(item) = vegetable_pool.choose(rng).copied() {
        let meal_item = MealItem {
            name: item.name.clone(),
            quantity: "to taste".to_string(),
            substitutes: Vec::new(),
            calories: VEGETABLE_KCAL,
            protein_g: VEGETABLE_PROTEIN_G,
            carbs_g: VEGETABLE_CARBS_G,
            fat_g: VEGETABLE_FAT_G,
        };
        remaining.subtract(meal_item.totals());
        items.push(meal_item);
    } else {
        warn!("no eligible vegetable item for {}", slot.display_name());
    }

    // Per-meal totals are the integer sum of the already-rounded items.
    let mut totals = MacroTotals::default();
    for item in &items {
        totals.add(item.totals());
    }

    Meal {
        name: slot.display_name().to_string(),
        time,
        items,
        totals,
    }
}

fn eligible_pool<'a, F>(
    catalog: &'a Catalog,
    slot: MealSlot,
    restrictions: &Restrictions,
    category: FoodCategory,
    extra: F,
) -> Vec<&'a FoodItem>
where
    F: Fn(&FoodItem) -> bool,
{
    catalog
        .items()
        .iter()
        .filter(|item| {
            item.category == category
                && item.allowed_in(slot)
                && satisfies(item, restrictions)
                && extra(item)
        })
        .collect()
}

/// Sizes an item against the remaining target for its driving macro:
/// `min(default quantity, round(remaining / density-per-gram))`. A
/// non-positive quantity means the target is already covered and the item
/// is dropped entirely.
fn sized_item(
    item: &FoodItem,
    remaining_target: f64,
    density_per_100: f64,
    catalog: &Catalog,
) -> Option<MealItem> {
    let sized = (remaining_target / (density_per_100 / 100.0)).round();
    let quantity_g = sized.min(item.default_quantity_g);
    if quantity_g <= 0.0 {
        return None;
    }
    let scale = quantity_g / 100.0;
    Some(MealItem {
        name: item.name.clone(),
        quantity: format_quantity(item, quantity_g),
        substitutes: item
            .substitutes
            .iter()
            .map(|id| catalog.resolve_name(id))
            .collect(),
        calories: (item.kcal_per_100 * scale).round() as i64,
        protein_g: (item.protein_per_100 * scale).round() as i64,
        carbs_g: (item.carbs_per_100 * scale).round() as i64,
        fat_g: (item.fat_per_100 * scale).round() as i64,
    })
}
