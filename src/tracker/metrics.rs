use std::fmt;

use serde::Serialize;

use super::model::DailyGoals;
use super::totals::NutritionTotals;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub percentage: f64,
    pub remaining: f64,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.percentage >= 100.0
    }
}

/// Share of `goal` reached, clamped to 0..=100. A non-positive goal reports 0%.
pub fn progress(current: f64, goal: f64) -> Progress {
    let percentage = if goal > 0.0 {
        (current / goal * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };
    Progress {
        percentage,
        remaining: (goal - current).max(0.0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Boundary values belong to the higher band.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        };
        f.write_str(label)
    }
}

/// Body-mass index rounded to one decimal, or `None` when the height is not positive.
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if height_cm <= 0.0 {
        return None;
    }
    let meters = height_cm / 100.0;
    let value = weight_kg / (meters * meters);
    value.is_finite().then(|| (value * 10.0).round() / 10.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiReading {
    pub value: Option<f64>,
    pub category: Option<BmiCategory>,
    /// "22.9" or "N/A".
    pub display: String,
}

pub fn bmi_reading(weight_kg: f64, height_cm: f64) -> BmiReading {
    let value = bmi(weight_kg, height_cm);
    BmiReading {
        value,
        category: value.map(BmiCategory::from_bmi),
        display: value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.1}")),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroShare {
    pub name: &'static str,
    pub grams: f64,
    pub goal: f64,
    /// Whole percent of goal, not clamped.
    pub percent_of_goal: f64,
}

fn share(name: &'static str, grams: f64, goal: f64) -> MacroShare {
    let percent_of_goal = if goal > 0.0 {
        (grams / goal * 100.0).round()
    } else {
        0.0
    };
    MacroShare {
        name,
        grams,
        goal,
        percent_of_goal,
    }
}

pub fn macro_breakdown(t: &NutritionTotals, goals: &DailyGoals) -> [MacroShare; 3] {
    [
        share("protein", t.protein, goals.protein),
        share("carbs", t.carbs, goals.carbs),
        share("fat", t.fat, goals.fat),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_examples() {
        assert_eq!(
            progress(0.0, 2000.0),
            Progress {
                percentage: 0.0,
                remaining: 2000.0
            }
        );
        assert_eq!(
            progress(2000.0, 2000.0),
            Progress {
                percentage: 100.0,
                remaining: 0.0
            }
        );
        let over = progress(2500.0, 2000.0);
        assert_eq!(over.percentage, 100.0);
        assert_eq!(over.remaining, 0.0);
        assert!(over.is_complete());
    }

    #[test]
    fn progress_partial() {
        let p = progress(500.0, 2000.0);
        assert_eq!(p.percentage, 25.0);
        assert_eq!(p.remaining, 1500.0);
        assert!(!p.is_complete());
    }

    #[test]
    fn zero_goal_reports_zero_percent() {
        let p = progress(300.0, 0.0);
        assert_eq!(p.percentage, 0.0);
        assert_eq!(p.remaining, 0.0);
        assert!(p.percentage.is_finite());
    }

    #[test]
    fn bmi_normal_and_underweight() {
        let normal = bmi(70.0, 175.0).unwrap();
        assert_eq!(normal, 22.9);
        assert_eq!(BmiCategory::from_bmi(normal), BmiCategory::Normal);

        let under = bmi(50.0, 175.0).unwrap();
        assert_eq!(BmiCategory::from_bmi(under), BmiCategory::Underweight);
    }

    #[test]
    fn band_boundaries_go_up() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
        assert_eq!(BmiCategory::from_bmi(41.2), BmiCategory::Obese);
    }

    #[test]
    fn zero_height_is_not_available() {
        assert_eq!(bmi(70.0, 0.0), None);
        let reading = bmi_reading(70.0, 0.0);
        assert_eq!(reading.display, "N/A");
        assert_eq!(reading.category, None);
    }

    #[test]
    fn reading_formats_one_decimal() {
        let reading = bmi_reading(80.0, 180.0);
        assert_eq!(reading.display, "24.7");
        assert_eq!(reading.category, Some(BmiCategory::Normal));
        assert_eq!(BmiCategory::Normal.to_string(), "Normal");
    }

    #[test]
    fn macro_breakdown_is_not_clamped() {
        let t = NutritionTotals {
            protein: 300.0,
            carbs: 125.0,
            fat: 0.0,
            ..Default::default()
        };
        let [protein, carbs, fat] = macro_breakdown(&t, &DailyGoals::default());
        assert_eq!(protein.percent_of_goal, 200.0);
        assert_eq!(carbs.percent_of_goal, 50.0);
        assert_eq!(fat.percent_of_goal, 0.0);
        assert_eq!(fat.goal, 65.0);
    }
}
