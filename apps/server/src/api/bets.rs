use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use wagerbook_core::bets::{Bet, ImportSummary, NewBet};
use wagerbook_core::users::Identity;

async fn list_bets(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<Vec<Bet>>> {
    let bets = state.bet_service.get_bets(&identity.user_id)?;
    Ok(Json(bets))
}

async fn create_bet(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<NewBet>,
) -> ApiResult<Json<Bet>> {
    let created = state.bet_service.add_bet(&identity.user_id, payload).await?;
    Ok(Json(created))
}

async fn delete_bet(
    Path(bet_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<StatusCode> {
    state
        .bet_service
        .delete_bet(&identity.user_id, &bet_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn import_bets(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    mut multipart: Multipart,
) -> ApiResult<Json<ImportSummary>> {
    let mut file_content: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() == Some("file") {
            file_content = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        ApiError::BadRequest(format!("Failed to read file content: {}", e))
                    })?
                    .to_vec(),
            );
        }
    }

    let content = file_content
        .ok_or_else(|| ApiError::BadRequest("Missing file in multipart request".to_string()))?;

    let summary = state
        .bet_service
        .import_table(&identity.user_id, &content)
        .await?;
    Ok(Json(summary))
}

async fn export_bets(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<impl IntoResponse> {
    let table = state.bet_service.export_table(&identity.user_id)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"betting_data.csv\"",
            ),
        ],
        table,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bets", get(list_bets).post(create_bet))
        .route("/bets/{id}", delete(delete_bet))
        .route("/bets/import", post(import_bets))
        .route("/bets/export", get(export_bets))
}
