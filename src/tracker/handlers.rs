use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::catalog::{self, CatalogItem};
use super::dto::{
    AddFoodRequest, DashboardResponse, HistoryDay, HistoryResponse, ProfileResponse,
    QuickAddRequest, SearchQuery,
};
use super::history::{filter_groups, group_by_day, sort_groups_descending, weekly_rollup};
use super::metrics::{bmi_reading, macro_breakdown, progress};
use super::model::{
    DailyGoals, FoodEntry, GoalsPatch, NutritionFacts, NutritionState, ProfilePatch,
};
use super::store::Command;
use super::totals::{recent, totals};
use crate::state::AppState;

const RECENT_LIMIT: usize = 5;

type ApiResult<T> = Result<T, (StatusCode, String)>;

// --- public routers ---

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/state", get(get_state))
        .route("/foods/today", get(list_today))
        .route("/catalog", get(search_catalog))
        .route("/dashboard", get(dashboard))
        .route("/history", get(history))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", post(add_food))
        .route("/foods/:id", delete(remove_food))
        .route("/catalog/add", post(quick_add))
        .route("/goals", get(get_goals).patch(update_goals))
        .route("/profile", get(get_profile).patch(update_profile))
}

// --- handlers ---

pub async fn get_state(State(state): State<AppState>) -> Json<NutritionState> {
    Json(Arc::unwrap_or_clone(state.store.snapshot()))
}

pub async fn list_today(State(state): State<AppState>) -> Json<Vec<FoodEntry>> {
    Json(state.store.snapshot().todays_foods.clone())
}

pub async fn search_catalog(Query(q): Query<SearchQuery>) -> Json<Vec<CatalogItem>> {
    Json(catalog::search(&q.q))
}

#[instrument(skip(state))]
pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let snap = state.store.snapshot();
    let today = totals(&snap.todays_foods);
    let calories = progress(today.calories, snap.daily_goals.calories);
    Json(DashboardResponse {
        totals: today,
        goals: snap.daily_goals,
        calories,
        goal_reached: calories.is_complete(),
        macros: macro_breakdown(&today, &snap.daily_goals),
        recent: recent(&snap.todays_foods, RECENT_LIMIT).to_vec(),
    })
}

#[instrument(skip(state))]
pub async fn history(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Json<HistoryResponse> {
    let snap = state.store.snapshot();
    let offset = state.config.utc_offset;
    let groups = sort_groups_descending(filter_groups(group_by_day(&snap.history, offset), &q.q));
    let days: Vec<HistoryDay> = groups
        .iter()
        .map(|g| HistoryDay::from_group(g, &q.q))
        .collect();
    let weekly = (!days.is_empty()).then(|| weekly_rollup(&snap.history, offset));
    Json(HistoryResponse { days, weekly })
}

#[instrument(skip(state, body))]
pub async fn add_food(
    State(state): State<AppState>,
    Json(body): Json<AddFoodRequest>,
) -> ApiResult<(StatusCode, Json<FoodEntry>)> {
    validate_food(&body.name, &body.facts)?;
    let entry = FoodEntry::new(body.name.trim(), body.facts).with_image(body.image);
    state.store.dispatch(Command::AddFood(entry.clone()));
    info!(id = %entry.id, "food logged");
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state))]
pub async fn quick_add(
    State(state): State<AppState>,
    Json(body): Json<QuickAddRequest>,
) -> ApiResult<(StatusCode, Json<FoodEntry>)> {
    let Some(item) = catalog::find(&body.name) else {
        warn!(name = %body.name, "unknown catalog item");
        return Err((StatusCode::NOT_FOUND, "Catalog item not found".into()));
    };
    let entry = item.to_entry();
    state.store.dispatch(Command::AddFood(entry.clone()));
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Unknown ids are accepted silently.
#[instrument(skip(state))]
pub async fn remove_food(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    state.store.dispatch(Command::RemoveFood(id));
    StatusCode::NO_CONTENT
}

pub async fn get_goals(State(state): State<AppState>) -> Json<DailyGoals> {
    Json(state.store.snapshot().daily_goals)
}

#[instrument(skip(state))]
pub async fn update_goals(
    State(state): State<AppState>,
    Json(patch): Json<GoalsPatch>,
) -> ApiResult<Json<DailyGoals>> {
    if patch.values().any(|v| !(v.is_finite() && v > 0.0)) {
        return Err(bad_request("goals must be positive numbers"));
    }
    let snap = state.store.dispatch(Command::UpdateGoals(patch));
    Ok(Json(snap.daily_goals))
}

pub async fn get_profile(State(state): State<AppState>) -> Json<ProfileResponse> {
    Json(profile_response(&state.store.snapshot()))
}

#[instrument(skip(state, patch))]
pub async fn update_profile(
    State(state): State<AppState>,
    Json(patch): Json<ProfilePatch>,
) -> ApiResult<Json<ProfileResponse>> {
    if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(bad_request("name must not be empty"));
    }
    if [patch.weight, patch.height]
        .into_iter()
        .flatten()
        .any(|v| !(v.is_finite() && v > 0.0))
    {
        return Err(bad_request("weight and height must be positive numbers"));
    }
    let snap = state.store.dispatch(Command::UpdateProfile(patch));
    Ok(Json(profile_response(&snap)))
}

fn profile_response(snap: &NutritionState) -> ProfileResponse {
    let p = &snap.user_profile;
    ProfileResponse {
        profile: p.clone(),
        bmi: bmi_reading(p.weight, p.height),
    }
}

fn validate_food(name: &str, facts: &NutritionFacts) -> ApiResult<()> {
    if name.trim().is_empty() {
        return Err(bad_request("name is required"));
    }
    if !facts.is_non_negative() {
        return Err(bad_request("nutrition values must be non-negative"));
    }
    Ok(())
}

fn bad_request(msg: &str) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, msg.to_string())
}
