use serde::Serialize;

use super::model::{FoodEntry, NutritionFacts};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
}

impl NutritionTotals {
    fn add(mut self, f: &NutritionFacts) -> Self {
        self.calories += f.calories;
        self.protein += f.protein;
        self.carbs += f.carbs;
        self.fat += f.fat;
        self.fiber += f.fiber;
        self.sugar += f.sugar;
        self.sodium += f.sodium;
        self
    }
}

/// Pointwise sum over any sequence of entries: today, one day, or the whole log.
pub fn totals<'a, I>(entries: I) -> NutritionTotals
where
    I: IntoIterator<Item = &'a FoodEntry>,
{
    entries
        .into_iter()
        .fold(NutritionTotals::default(), |acc, e| acc.add(&e.facts))
}

/// The last `n` entries, oldest first.
pub fn recent(entries: &[FoodEntry], n: usize) -> &[FoodEntry] {
    &entries[entries.len().saturating_sub(n)..]
}
