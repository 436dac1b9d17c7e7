use serde::Serialize;

use super::history::name_matches;
use super::model::{FoodEntry, NutritionFacts};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CatalogItem {
    pub name: &'static str,
    #[serde(flatten)]
    pub facts: NutritionFacts,
}

impl CatalogItem {
    pub fn to_entry(&self) -> FoodEntry {
        FoodEntry::new(self.name, self.facts)
    }
}

#[allow(clippy::too_many_arguments)]
const fn item(
    name: &'static str,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    fiber: f64,
    sugar: f64,
    sodium: f64,
) -> CatalogItem {
    CatalogItem {
        name,
        facts: NutritionFacts {
            calories,
            protein,
            carbs,
            fat,
            fiber,
            sugar,
            sodium,
        },
    }
}

/// Quick-add list.
pub static POPULAR_FOODS: [CatalogItem; 6] = [
    item("Nasi Putih", 130.0, 2.7, 28.0, 0.3, 0.4, 0.1, 1.0),
    item("Ayam Goreng", 250.0, 25.0, 8.0, 15.0, 0.0, 0.0, 400.0),
    item("Telur Dadar", 154.0, 11.0, 1.0, 12.0, 0.0, 1.0, 124.0),
    item("Tempe Goreng", 190.0, 19.0, 9.0, 11.0, 9.0, 2.0, 9.0),
    item("Sayur Bayam", 23.0, 2.9, 3.6, 0.4, 2.2, 0.4, 79.0),
    item("Pisang", 89.0, 1.1, 23.0, 0.3, 2.6, 12.0, 1.0),
];

pub fn search(query: &str) -> Vec<CatalogItem> {
    POPULAR_FOODS
        .iter()
        .filter(|i| name_matches(i.name, query))
        .copied()
        .collect()
}

/// Exact lookup, ignoring case.
pub fn find(name: &str) -> Option<&'static CatalogItem> {
    POPULAR_FOODS
        .iter()
        .find(|i| i.name.eq_ignore_ascii_case(name.trim()))
}
