use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::services::{CaptureRequest, FoodCandidate, FoodRecognizer, RecognitionError};
use crate::tracker::model::FoodEntry;
use crate::tracker::store::{Command, NutritionStore};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ScanStatus {
    Idle,
    Scanning,
    Ready { candidate: FoodCandidate },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("a scan is already in progress")]
    AlreadyScanning,
    #[error("no scan result to accept")]
    NothingToAccept,
}

#[derive(Debug)]
struct Slot {
    status: ScanStatus,
    request: Option<CaptureRequest>,
    /// Bumped on every start and reset; results from older generations are dropped.
    generation: u64,
}

/// Single pending capture. A reset discards the outcome but does not abort
/// the recognizer call.
#[derive(Debug)]
pub struct ScanSession {
    slot: Mutex<Slot>,
}

impl Default for ScanSession {
    fn default() -> Self {
        Self {
            slot: Mutex::new(Slot {
                status: ScanStatus::Idle,
                request: None,
                generation: 0,
            }),
        }
    }
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> ScanStatus {
        self.lock().status.clone()
    }

    /// Marks the session as scanning and returns the generation the result must match.
    pub fn begin(&self, request: CaptureRequest) -> Result<u64, ScanError> {
        let mut slot = self.lock();
        if slot.status == ScanStatus::Scanning {
            return Err(ScanError::AlreadyScanning);
        }
        slot.generation += 1;
        slot.status = ScanStatus::Scanning;
        slot.request = Some(request);
        Ok(slot.generation)
    }

    /// Records an outcome if the session has not been reset since `generation` began.
    pub fn complete(
        &self,
        generation: u64,
        outcome: Result<FoodCandidate, RecognitionError>,
    ) -> bool {
        let mut slot = self.lock();
        if slot.generation != generation || slot.status != ScanStatus::Scanning {
            debug!(generation, current = slot.generation, "stale scan result dropped");
            return false;
        }
        slot.status = match outcome {
            Ok(candidate) => ScanStatus::Ready { candidate },
            Err(e) => {
                warn!(error = %e, "scan failed");
                ScanStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };
        true
    }

    pub fn reset(&self) {
        let mut slot = self.lock();
        slot.generation += 1;
        slot.status = ScanStatus::Idle;
        slot.request = None;
    }

    /// Turns a ready candidate into a log entry and dispatches it. The slot
    /// is released before the store is touched.
    pub fn accept(&self, store: &NutritionStore) -> Result<FoodEntry, ScanError> {
        let entry = {
            let mut slot = self.lock();
            let ScanStatus::Ready { candidate } = &slot.status else {
                return Err(ScanError::NothingToAccept);
            };
            let candidate = candidate.clone();
            let image = slot.request.take().and_then(|r| r.image);
            slot.status = ScanStatus::Idle;
            candidate.into_entry(image)
        };
        store.dispatch(Command::AddFood(entry.clone()));
        info!(id = %entry.id, name = %entry.name, "scan accepted");
        Ok(entry)
    }
}

/// Starts a capture in the background. The recognizer runs to completion
/// even if the session is reset meanwhile.
pub fn spawn_scan(
    session: Arc<ScanSession>,
    recognizer: Arc<dyn FoodRecognizer>,
    request: CaptureRequest,
) -> Result<tokio::task::JoinHandle<bool>, ScanError> {
    let generation = session.begin(request.clone())?;
    debug!(generation, source = ?request.source, "scan started");
    Ok(tokio::spawn(async move {
        let outcome = recognizer.recognize(&request).await;
        session.complete(generation, outcome)
    }))
}
