use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;
use uuid::Uuid;

use super::model::{FoodEntry, GoalsPatch, NutritionState, ProfilePatch};

/// The closed set of mutations the store accepts.
#[derive(Debug, Clone)]
pub enum Command {
    AddFood(FoodEntry),
    RemoveFood(Uuid),
    UpdateGoals(GoalsPatch),
    UpdateProfile(ProfilePatch),
}

/// Builds the next snapshot from the previous one. Never fails.
pub fn reduce(state: &NutritionState, command: &Command) -> NutritionState {
    match command {
        Command::AddFood(entry) => {
            let mut next = state.clone();
            next.todays_foods.push(entry.clone());
            next.history.push(entry.clone());
            next
        }
        Command::RemoveFood(id) => {
            let mut next = state.clone();
            if let Some(pos) = next.todays_foods.iter().position(|f| f.id == *id) {
                next.todays_foods.remove(pos);
            }
            next
        }
        Command::UpdateGoals(patch) => NutritionState {
            daily_goals: state.daily_goals.merged(patch),
            ..state.clone()
        },
        Command::UpdateProfile(patch) => NutritionState {
            user_profile: state.user_profile.merged(patch),
            ..state.clone()
        },
    }
}

/// Owner of the current snapshot. Readers get an `Arc` they can hold while
/// writers swap in the next one.
#[derive(Debug, Default)]
pub struct NutritionStore {
    current: RwLock<Arc<NutritionState>>,
}

impl NutritionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: NutritionState) -> Self {
        Self {
            current: RwLock::new(Arc::new(state)),
        }
    }

    pub fn snapshot(&self) -> Arc<NutritionState> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies one command and returns the resulting snapshot.
    pub fn dispatch(&self, command: Command) -> Arc<NutritionState> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let next = Arc::new(reduce(&guard, &command));
        match &command {
            Command::AddFood(entry) => {
                debug!(id = %entry.id, name = %entry.name, "food added")
            }
            Command::RemoveFood(id) => {
                let removed = next.todays_foods.len() < guard.todays_foods.len();
                debug!(%id, removed, "food remove requested")
            }
            Command::UpdateGoals(patch) => debug!(?patch, "goals updated"),
            Command::UpdateProfile(_) => debug!("profile updated"),
        }
        *guard = next.clone();
        next
    }
}
