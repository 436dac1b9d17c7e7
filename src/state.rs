use std::sync::Arc;

use crate::config::AppConfig;
use crate::scanner::services::{FoodRecognizer, MockRecognizer};
use crate::scanner::session::ScanSession;
use crate::tracker::store::NutritionStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<NutritionStore>,
    pub config: Arc<AppConfig>,
    pub recognizer: Arc<dyn FoodRecognizer>,
    pub scan: Arc<ScanSession>,
}

impl AppState {
    pub fn init(config: AppConfig) -> Self {
        let recognizer = Arc::new(MockRecognizer::new(config.scan_delay)) as Arc<dyn FoodRecognizer>;
        Self::from_parts(Arc::new(NutritionStore::new()), Arc::new(config), recognizer)
    }

    pub fn from_parts(
        store: Arc<NutritionStore>,
        config: Arc<AppConfig>,
        recognizer: Arc<dyn FoodRecognizer>,
    ) -> Self {
        Self {
            store,
            config,
            recognizer,
            scan: Arc::new(ScanSession::new()),
        }
    }

    /// In-memory state with a deterministic recognizer, for tests.
    pub fn fake() -> Self {
        use crate::scanner::services::{FixedRecognizer, FoodCandidate};
        use crate::tracker::model::NutritionFacts;

        let candidate = FoodCandidate {
            name: "Rendang Daging".into(),
            facts: NutritionFacts {
                calories: 420.0,
                protein: 28.0,
                carbs: 8.0,
                fat: 32.0,
                fiber: 2.0,
                sugar: 4.0,
                sodium: 520.0,
            },
            confidence: 95,
        };
        let recognizer = Arc::new(FixedRecognizer::succeeding(candidate)) as Arc<dyn FoodRecognizer>;
        Self::from_parts(
            Arc::new(NutritionStore::new()),
            Arc::new(AppConfig::default()),
            recognizer,
        )
    }
}
