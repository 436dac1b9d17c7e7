use serde::{Deserialize, Serialize};

use super::history::{DayGroup, WeeklyRollup};
use super::metrics::{BmiReading, MacroShare, Progress};
use super::model::{DailyGoals, FoodEntry, NutritionFacts, UserProfile};
use super::totals::NutritionTotals;

#[derive(Debug, Deserialize)]
pub struct AddFoodRequest {
    pub name: String,
    #[serde(flatten)]
    pub facts: NutritionFacts,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuickAddRequest {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub totals: NutritionTotals,
    pub goals: DailyGoals,
    pub calories: Progress,
    pub goal_reached: bool,
    pub macros: [MacroShare; 3],
    pub recent: Vec<FoodEntry>,
}

#[derive(Debug, Serialize)]
pub struct HistoryDay {
    /// YYYY-MM-DD in the configured offset.
    pub date: String,
    pub entry_count: usize,
    pub totals: NutritionTotals,
    pub entries: Vec<FoodEntry>,
}

impl HistoryDay {
    /// Day totals cover the whole group; only matching entries are listed.
    pub fn from_group(group: &DayGroup, query: &str) -> Self {
        Self {
            date: group.date.to_string(),
            entry_count: group.entries.len(),
            totals: group.totals(),
            entries: group.matching_entries(query).cloned().collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub days: Vec<HistoryDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly: Option<WeeklyRollup>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: UserProfile,
    pub bmi: BmiReading,
}
