use std::sync::Arc;

use axum::{
    Json,
    extract::{self, rejection::JsonRejection},
};
use catalog::{IndexStats, ResolvedRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::AppError, state::State};

#[derive(Deserialize)]
pub struct SearchRequest {
    pub roll_no: String,
}

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub college_to_exam: usize,
    pub exam_to_file: usize,
    pub visitors: u64,
    pub built_at: DateTime<Utc>,
}

pub async fn search_handler(
    extract::State(state): extract::State<Arc<State>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<ResolvedRecord>, AppError> {
    let Json(request) = payload.map_err(|_| AppError::MalformedPayload)?;

    state.visitors.increment();

    let record = state.index.snapshot().resolve(&request.roll_no).map_err(|e| {
        debug!("Search for {:?}: {e}", request.roll_no);
        e
    })?;

    Ok(Json(record))
}

pub async fn health_handler(extract::State(state): extract::State<Arc<State>>) -> Json<Health> {
    let index = state.index.snapshot();
    let stats = index.stats();

    Json(Health {
        status: "ok",
        college_to_exam: stats.college_to_exam,
        exam_to_file: stats.exam_to_file,
        visitors: state.visitors.get(),
        built_at: index.built_at,
    })
}

pub async fn reload_handler(
    extract::State(state): extract::State<Arc<State>>,
) -> Result<Json<IndexStats>, AppError> {
    Ok(Json(state.reload().await?))
}
