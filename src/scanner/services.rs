use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tracker::model::{FoodEntry, NutritionFacts};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureSource {
    #[default]
    Camera,
    Upload,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureRequest {
    #[serde(default)]
    pub source: CaptureSource,
    /// Opaque reference to the captured picture; carried onto the entry.
    #[serde(default)]
    pub image: Option<String>,
}

/// A provisional recognition result, not yet part of the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodCandidate {
    pub name: String,
    #[serde(flatten)]
    pub facts: NutritionFacts,
    /// 0..=100.
    pub confidence: u8,
}

impl FoodCandidate {
    pub fn into_entry(self, image: Option<String>) -> FoodEntry {
        FoodEntry::new(self.name, self.facts).with_image(image)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecognitionError {
    #[error("no food recognized in capture")]
    NothingRecognized,
    #[error("recognizer unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait FoodRecognizer: Send + Sync {
    async fn recognize(&self, request: &CaptureRequest) -> Result<FoodCandidate, RecognitionError>;
}

fn candidate(name: &str, facts: NutritionFacts, confidence: u8) -> FoodCandidate {
    FoodCandidate {
        name: name.to_string(),
        facts,
        confidence,
    }
}

pub fn mock_catalog() -> Vec<FoodCandidate> {
    vec![
        candidate(
            "Nasi Gudeg Yogya",
            NutritionFacts {
                calories: 320.0,
                protein: 12.0,
                carbs: 45.0,
                fat: 8.0,
                fiber: 3.0,
                sugar: 6.0,
                sodium: 450.0,
            },
            92,
        ),
        candidate(
            "Gado-gado",
            NutritionFacts {
                calories: 280.0,
                protein: 15.0,
                carbs: 35.0,
                fat: 12.0,
                fiber: 8.0,
                sugar: 8.0,
                sodium: 380.0,
            },
            88,
        ),
        candidate(
            "Rendang Daging",
            NutritionFacts {
                calories: 420.0,
                protein: 28.0,
                carbs: 8.0,
                fat: 32.0,
                fiber: 2.0,
                sugar: 4.0,
                sodium: 520.0,
            },
            95,
        ),
    ]
}

/// Stand-in recognizer: waits, then picks a random dish from a fixed list.
#[derive(Debug, Clone)]
pub struct MockRecognizer {
    delay: Duration,
    catalog: Vec<FoodCandidate>,
}

impl MockRecognizer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            catalog: mock_catalog(),
        }
    }
}

#[async_trait]
impl FoodRecognizer for MockRecognizer {
    async fn recognize(&self, request: &CaptureRequest) -> Result<FoodCandidate, RecognitionError> {
        tokio::time::sleep(self.delay).await;
        let picked = self
            .catalog
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(RecognitionError::NothingRecognized)?;
        debug!(source = ?request.source, name = %picked.name, "mock recognition");
        Ok(picked)
    }
}

/// Deterministic recognizer returning the same outcome every time.
#[derive(Debug, Clone)]
pub struct FixedRecognizer {
    outcome: Result<FoodCandidate, RecognitionError>,
}

impl FixedRecognizer {
    pub fn succeeding(candidate: FoodCandidate) -> Self {
        Self {
            outcome: Ok(candidate),
        }
    }

    pub fn failing(err: RecognitionError) -> Self {
        Self { outcome: Err(err) }
    }
}

#[async_trait]
impl FoodRecognizer for FixedRecognizer {
    async fn recognize(&self, _request: &CaptureRequest) -> Result<FoodCandidate, RecognitionError> {
        self.outcome.clone()
    }
}
