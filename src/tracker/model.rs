use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// The seven measured values of a food, in kcal / g / g / g / g / g / mg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default)]
    pub sugar: f64,
    #[serde(default)]
    pub sodium: f64,
}

impl NutritionFacts {
    pub fn is_non_negative(&self) -> bool {
        [
            self.calories,
            self.protein,
            self.carbs,
            self.fat,
            self.fiber,
            self.sugar,
            self.sodium,
        ]
        .iter()
        .all(|v| *v >= 0.0)
    }
}

/// One logged consumption event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: Uuid,
    pub name: String,
    #[serde(flatten)]
    pub facts: NutritionFacts,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl FoodEntry {
    /// Stamps a fresh id and the current instant. Values are not validated here.
    pub fn new(name: impl Into<String>, facts: NutritionFacts) -> Self {
        Self::at(name, facts, OffsetDateTime::now_utc())
    }

    pub fn at(name: impl Into<String>, facts: NutritionFacts, timestamp: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            facts,
            timestamp,
            image: None,
        }
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyGoals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Default for DailyGoals {
    fn default() -> Self {
        Self {
            calories: 2000.0,
            protein: 150.0,
            carbs: 250.0,
            fat: 65.0,
        }
    }
}

/// Partial goals; `None` fields are left untouched on merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalsPatch {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

impl GoalsPatch {
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        [self.calories, self.protein, self.carbs, self.fat]
            .into_iter()
            .flatten()
    }
}

impl DailyGoals {
    pub fn merged(&self, patch: &GoalsPatch) -> Self {
        Self {
            calories: patch.calories.unwrap_or(self.calories),
            protein: patch.protein.unwrap_or(self.protein),
            carbs: patch.carbs.unwrap_or(self.carbs),
            fat: patch.fat.unwrap_or(self.fat),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightGoal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    /// Kilograms.
    pub weight: f64,
    /// Centimetres.
    pub height: f64,
    pub activity_level: ActivityLevel,
    pub goal: WeightGoal,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "John Doe".into(),
            age: 30,
            weight: 70.0,
            height: 175.0,
            activity_level: ActivityLevel::Moderate,
            goal: WeightGoal::Maintain,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<WeightGoal>,
}

impl UserProfile {
    pub fn merged(&self, patch: &ProfilePatch) -> Self {
        Self {
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            age: patch.age.unwrap_or(self.age),
            weight: patch.weight.unwrap_or(self.weight),
            height: patch.height.unwrap_or(self.height),
            activity_level: patch.activity_level.unwrap_or(self.activity_level),
            goal: patch.goal.unwrap_or(self.goal),
        }
    }
}

/// Aggregate root. `todays_foods` holds entries added this session, not a
/// calendar-day window; `history` is the append-only permanent log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionState {
    pub daily_goals: DailyGoals,
    pub todays_foods: Vec<FoodEntry>,
    pub history: Vec<FoodEntry>,
    pub user_profile: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goals_patch_merges_only_given_fields() {
        let goals = DailyGoals::default().merged(&GoalsPatch {
            protein: Some(120.0),
            ..Default::default()
        });
        assert_eq!(goals.protein, 120.0);
        assert_eq!(goals.calories, 2000.0);
        assert_eq!(goals.carbs, 250.0);
        assert_eq!(goals.fat, 65.0);
    }

    #[test]
    fn profile_patch_merges_only_given_fields() {
        let profile = UserProfile::default().merged(&ProfilePatch {
            weight: Some(82.5),
            activity_level: Some(ActivityLevel::VeryActive),
            ..Default::default()
        });
        assert_eq!(profile.weight, 82.5);
        assert_eq!(profile.activity_level, ActivityLevel::VeryActive);
        assert_eq!(profile.name, "John Doe");
        assert_eq!(profile.height, 175.0);
        assert_eq!(profile.goal, WeightGoal::Maintain);
    }

    #[test]
    fn new_entries_get_distinct_ids() {
        let a = FoodEntry::new("Pisang", NutritionFacts::default());
        let b = FoodEntry::new("Pisang", NutritionFacts::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn activity_level_uses_kebab_case_on_the_wire() {
        let json = serde_json::to_string(&ActivityLevel::VeryActive).unwrap();
        assert_eq!(json, "\"very-active\"");
        let back: WeightGoal = serde_json::from_str("\"gain\"").unwrap();
        assert_eq!(back, WeightGoal::Gain);
    }

    #[test]
    fn negative_facts_are_detected() {
        let facts = NutritionFacts {
            sodium: -1.0,
            ..Default::default()
        };
        assert!(!facts.is_non_negative());
        assert!(NutritionFacts::default().is_non_negative());
    }

    #[test]
    fn entry_serializes_flat_with_rfc3339_timestamp() {
        let entry = FoodEntry::at(
            "Nasi Putih",
            NutritionFacts {
                calories: 130.0,
                ..Default::default()
            },
            time::macros::datetime!(2024-03-01 08:30 UTC),
        );
        let v = serde_json::to_value(&entry).unwrap();
        assert_eq!(v["calories"], 130.0);
        assert_eq!(v["timestamp"], "2024-03-01T08:30:00Z");
        assert!(v.get("image").is_none());
    }
}
