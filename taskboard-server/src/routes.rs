//! Request handlers and the API router

use crate::error::ApiError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use taskboard::card::{AddCard, DeleteCard, GetCard, ListCards, ReplaceCards, UpdateCard};
use taskboard::{BoardContext, BoardListing, BoardOperationProcessor, Card, CardFilter, CardPatch};
use tower_http::trace::TraceLayer;

/// Actor recorded for operations arriving over HTTP
pub const HTTP_ACTOR: &str = "http";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<BoardContext>,
    pub processor: BoardOperationProcessor,
}

impl AppState {
    pub fn new(ctx: Arc<BoardContext>) -> Self {
        Self {
            ctx,
            processor: BoardOperationProcessor::with_actor(HTTP_ACTOR),
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Body of `DELETE /api/cards/:id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub ok: bool,
    pub deleted: Card,
}

/// Body of `PUT /api/cards`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Build the API router
pub fn router(ctx: Arc<BoardContext>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/cards",
            get(list_cards).post(create_card).put(replace_cards),
        )
        .route(
            "/api/cards/:id",
            get(get_card).patch(update_card).delete(delete_card),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(ctx))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

async fn list_cards(
    State(state): State<AppState>,
    filter: Result<Query<CardFilter>, QueryRejection>,
) -> Result<Json<BoardListing>, ApiError> {
    let Query(filter) = filter?;
    let listing = state
        .processor
        .process(&ListCards::with_filter(filter), &state.ctx)
        .await?;
    Ok(Json(listing))
}

async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Card>, ApiError> {
    let card = state.processor.process(&GetCard::new(id), &state.ctx).await?;
    Ok(Json(card))
}

async fn create_card(
    State(state): State<AppState>,
    payload: Result<Json<AddCard>, JsonRejection>,
) -> Result<(StatusCode, Json<Card>), ApiError> {
    let Json(cmd) = payload?;
    let card = state.processor.process(&cmd, &state.ctx).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

async fn update_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CardPatch>, JsonRejection>,
) -> Result<Json<Card>, ApiError> {
    let Json(patch) = payload?;
    let card = state
        .processor
        .process(&UpdateCard::with_patch(id, patch), &state.ctx)
        .await?;
    Ok(Json(card))
}

async fn delete_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = state
        .processor
        .process(&DeleteCard::new(id), &state.ctx)
        .await?;
    Ok(Json(DeleteResponse { ok: true, deleted }))
}

async fn replace_cards(
    State(state): State<AppState>,
    payload: Result<Json<ReplaceCards>, JsonRejection>,
) -> Result<Json<OkResponse>, ApiError> {
    let Json(cmd) = payload?;
    state.processor.process(&cmd, &state.ctx).await?;
    Ok(Json(OkResponse { ok: true }))
}
