//! The static food catalog: items with per-100 nutritional density, meal
//! applicability and dietary flags, loaded once at startup and never mutated.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Catalog shipped with the binary, parsed through the same CSV code path
/// as an external file.
const BUILTIN_CATALOG_CSV: &str = include_str!("../data/foods.csv");

// Expected column headers
const ID_COL: &str = "id";
const NAME_COL: &str = "name";
const CATEGORY_COL: &str = "category";
const MEALS_COL: &str = "meals";
const KCAL_COL: &str = "kcal_per_100";
const PROTEIN_COL: &str = "protein_per_100";
const CARBS_COL: &str = "carbs_per_100";
const FAT_COL: &str = "fat_per_100";
const UNIT_COL: &str = "unit";
const GRAMS_PER_UNIT_COL: &str = "grams_per_unit";
const DEFAULT_QTY_COL: &str = "default_qty_g";
const VEGETARIAN_COL: &str = "vegetarian";
const VEGAN_COL: &str = "vegan";
const GLUTEN_FREE_COL: &str = "gluten_free";
const LACTOSE_FREE_COL: &str = "lactose_free";
const SUBSTITUTES_COL: &str = "substitutes";

/// Nutritional role of a food item within a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    Protein,
    Carb,
    Fat,
    Vegetable,
    Fruit,
    Dairy,
    Other,
}

impl FoodCategory {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "protein" => Some(FoodCategory::Protein),
            "carb" | "carbohydrate" => Some(FoodCategory::Carb),
            "fat" => Some(FoodCategory::Fat),
            "vegetable" => Some(FoodCategory::Vegetable),
            "fruit" => Some(FoodCategory::Fruit),
            "dairy" => Some(FoodCategory::Dairy),
            "other" => Some(FoodCategory::Other),
            _ => None,
        }
    }
}

/// The meals of the day a food item may appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl MealSlot {
    pub fn display_name(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Snack => "Snack",
            MealSlot::Dinner => "Dinner",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Some(MealSlot::Breakfast),
            "lunch" => Some(MealSlot::Lunch),
            "snack" => Some(MealSlot::Snack),
            "dinner" => Some(MealSlot::Dinner),
            _ => None,
        }
    }
}

/// How a serving of the item is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServingUnit {
    Grams,
    Milliliters,
    Count,
    Slice,
    ToTaste,
}

impl ServingUnit {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "g" | "grams" => Some(ServingUnit::Grams),
            "ml" | "milliliters" => Some(ServingUnit::Milliliters),
            "unit" | "count" => Some(ServingUnit::Count),
            "slice" => Some(ServingUnit::Slice),
            "to_taste" => Some(ServingUnit::ToTaste),
            _ => None,
        }
    }
}

/// Dietary compatibility flags. A missing column value means false
/// (unknown compatibility is treated as incompatible).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DietaryFlags {
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub lactose_free: bool,
}

/// One catalog entry. Nutrition values are per 100 g (or per 100 ml for
/// volume-measured items).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub category: FoodCategory,
    pub meal_slots: Vec<MealSlot>,
    pub kcal_per_100: f64,
    pub protein_per_100: f64,
    pub carbs_per_100: f64,
    pub fat_per_100: f64,
    pub unit: ServingUnit,
    /// Grams represented by one count/slice unit, when applicable.
    pub grams_per_unit: Option<f64>,
    /// Suggested serving in grams. Zero for to-taste items.
    pub default_quantity_g: f64,
    pub flags: DietaryFlags,
    /// Ids of items that can stand in for this one in the same role.
    pub substitutes: Vec<String>,
}

impl FoodItem {
    pub fn allowed_in(&self, slot: MealSlot) -> bool {
        self.meal_slots.contains(&slot)
    }
}

/// Read-only, process-wide food table.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<FoodItem>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(items: Vec<FoodItem>) -> Self {
        let by_id = items
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.id.clone(), idx))
            .collect();
        Catalog { items, by_id }
    }

    /// The catalog embedded in the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_csv_reader(BUILTIN_CATALOG_CSV.as_bytes())
            .context("Failed to parse built-in food catalog")
    }

    pub fn from_csv_path(csv_path: &Path) -> Result<Self> {
        if !csv_path.exists() {
            return Err(anyhow::anyhow!(
                "Catalog CSV file not found at: {:?}",
                csv_path
            ));
        }
        let file = std::fs::File::open(csv_path)
            .with_context(|| format!("Failed to open catalog CSV file at {:?}", csv_path))?;
        Self::from_csv_reader(file)
            .with_context(|| format!("Failed to load catalog from {:?}", csv_path))
    }

    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = rdr.headers()?.clone();
        let col = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", name))
        };

        let id_idx = col(ID_COL)?;
        let name_idx = col(NAME_COL)?;
        let category_idx = col(CATEGORY_COL)?;
        let meals_idx = col(MEALS_COL)?;
        let kcal_idx = col(KCAL_COL)?;
        let protein_idx = col(PROTEIN_COL)?;
        let carbs_idx = col(CARBS_COL)?;
        let fat_idx = col(FAT_COL)?;
        let unit_idx = col(UNIT_COL)?;
        let gpu_idx = col(GRAMS_PER_UNIT_COL)?;
        let qty_idx = col(DEFAULT_QTY_COL)?;
        let vegetarian_idx = col(VEGETARIAN_COL)?;
        let vegan_idx = col(VEGAN_COL)?;
        let gluten_free_idx = col(GLUTEN_FREE_COL)?;
        let lactose_free_idx = col(LACTOSE_FREE_COL)?;
        let substitutes_idx = col(SUBSTITUTES_COL)?;

        let mut items = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let record =
                result.with_context(|| format!("Failed to read record at row index {}", row_index))?;

            let id = record
                .get(id_idx)
                .ok_or_else(|| anyhow::anyhow!("Missing id at row {}", row_index))?
                .trim()
                .to_string();
            if id.is_empty() {
                // Skip rows with empty ids
                continue;
            }

            let name = record.get(name_idx).unwrap_or("").trim().to_string();
            let category = record
                .get(category_idx)
                .and_then(FoodCategory::parse)
                .ok_or_else(|| {
                    anyhow::anyhow!("Invalid or missing category for '{}' at row {}", id, row_index)
                })?;
            let meal_slots: Vec<MealSlot> = record
                .get(meals_idx)
                .unwrap_or("")
                .split(';')
                .filter_map(MealSlot::parse)
                .collect();
            let unit = record.get(unit_idx).and_then(ServingUnit::parse).ok_or_else(|| {
                anyhow::anyhow!("Invalid or missing unit for '{}' at row {}", id, row_index)
            })?;

            let item = FoodItem {
                kcal_per_100: parse_density(&record, kcal_idx, "kcal", &id, row_index)?,
                protein_per_100: parse_density(&record, protein_idx, "protein", &id, row_index)?,
                carbs_per_100: parse_density(&record, carbs_idx, "carbs", &id, row_index)?,
                fat_per_100: parse_density(&record, fat_idx, "fat", &id, row_index)?,
                grams_per_unit: record
                    .get(gpu_idx)
                    .and_then(|s| s.trim().parse::<f64>().ok()),
                default_quantity_g: record
                    .get(qty_idx)
                    .and_then(|s| s.trim().parse::<f64>().ok())
                    .unwrap_or(0.0),
                flags: DietaryFlags {
                    vegetarian: parse_flag(record.get(vegetarian_idx)),
                    vegan: parse_flag(record.get(vegan_idx)),
                    gluten_free: parse_flag(record.get(gluten_free_idx)),
                    lactose_free: parse_flag(record.get(lactose_free_idx)),
                },
                substitutes: record
                    .get(substitutes_idx)
                    .unwrap_or("")
                    .split(';')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
                id,
                name,
                category,
                meal_slots,
                unit,
            };

            if item.unit == ServingUnit::ToTaste && item.default_quantity_g != 0.0 {
                return Err(anyhow::anyhow!(
                    "To-taste item '{}' must have a zero default quantity (row {})",
                    item.id,
                    row_index
                ));
            }

            items.push(item);
        }

        if items.is_empty() {
            return Err(anyhow::anyhow!("No valid food items loaded from catalog"));
        }

        Ok(Catalog::new(items))
    }

    pub fn get(&self, id: &str) -> Option<&FoodItem> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    /// Display name for an item id; unknown ids fall back to the raw id.
    pub fn resolve_name(&self, id: &str) -> String {
        self.get(id)
            .map(|item| item.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn parse_density(
    record: &csv::StringRecord,
    idx: usize,
    field: &str,
    id: &str,
    row_index: usize,
) -> Result<f64> {
    let value = record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>())
        .transpose()
        .with_context(|| format!("Invalid {} value for '{}' at row {}", field, id, row_index))?
        .unwrap_or(0.0);
    if value < 0.0 {
        return Err(anyhow::anyhow!(
            "Negative {} value for '{}' at row {}",
            field,
            id,
            row_index
        ));
    }
    Ok(value)
}

fn parse_flag(s: Option<&str>) -> bool {
    matches!(
        s.map(str::trim).unwrap_or("").to_ascii_lowercase().as_str(),
        "true" | "yes" | "1"
    )
}
