use crate::dto::{ResponseDto, ResponsePageDto, StatusChangeRequest};
use crate::{error::AppError, AppState};
use analytics::TrialStatistics;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use core_types::{NewTrial, Trial, TrialId, TrialUpdate};
use service::ListParams;
use std::sync::Arc;

/// # GET /v1/trials?page&size&sort
pub async fn list_trials(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ResponsePageDto<Trial>>, AppError> {
    let Query(params) = params?;
    let page = state.service.list(params).await?;
    Ok(Json(page.into()))
}

/// # GET /v1/trials/status/:status
pub async fn list_trials_by_status(
    State(state): State<Arc<AppState>>,
    status: Result<Path<String>, PathRejection>,
) -> Result<Json<ResponseDto<Trial>>, AppError> {
    let Path(status) = status?;
    let trials = state.service.list_by_status(&status).await?;
    Ok(Json(ResponseDto::success(trials)))
}

/// # GET /v1/trials/statistics
/// Acquisition statistics for the trials ending this month.
pub async fn get_statistics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ResponseDto<TrialStatistics>>, AppError> {
    let stats = state.service.statistics().await?;
    Ok(Json(ResponseDto::single(stats)))
}

/// # POST /v1/trials
/// Answers 200, not 201, like every other successful route.
pub async fn create_trial(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewTrial>, JsonRejection>,
) -> Result<Json<ResponseDto<Trial>>, AppError> {
    let Json(request) = payload?;
    let trial = state.service.create(request).await?;
    Ok(Json(ResponseDto::single(trial)))
}

/// # PUT /v1/trials/update
pub async fn update_trial(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TrialUpdate>, JsonRejection>,
) -> Result<Json<ResponseDto<Trial>>, AppError> {
    let Json(update) = payload?;
    let trial = state.service.update(update).await?;
    Ok(Json(ResponseDto::single(trial)))
}

/// # PUT /v1/trials/update-status
pub async fn update_trial_status(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StatusChangeRequest>, JsonRejection>,
) -> Result<Json<ResponseDto<Trial>>, AppError> {
    let Json(request) = payload?;
    let trial = state.service.set_status(request.id, &request.status).await?;
    Ok(Json(ResponseDto::single(trial)))
}

/// # DELETE /v1/trials/delete/:id
pub async fn delete_trial(
    State(state): State<Arc<AppState>>,
    id: Result<Path<TrialId>, PathRejection>,
) -> Result<Json<ResponseDto<()>>, AppError> {
    let Path(id) = id?;
    state.service.delete(id).await?;
    Ok(Json(ResponseDto::success(Vec::new())))
}
