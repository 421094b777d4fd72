use std::sync::Arc;

use crate::error::ApiResult;
use crate::main_lib::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use wagerbook_core::dashboard::{DashboardCommand, DashboardView, ViewOptions};
use wagerbook_core::ledger::{Granularity, ProfitBucket};
use wagerbook_core::users::Identity;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DashboardBody {
    #[serde(default)]
    view: ViewOptions,
    /// Defaults to a plain refresh when no command is supplied.
    command: Option<DashboardCommand>,
}

/// One user action in, one immutable view-state out.
async fn execute_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<DashboardBody>,
) -> ApiResult<Json<DashboardView>> {
    let command = body.command.unwrap_or(DashboardCommand::Refresh);
    let view = state
        .dashboard_service
        .execute(&identity.user_id, command, body.view)
        .await?;
    Ok(Json(view))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeriesQuery {
    #[serde(default)]
    granularity: Granularity,
}

async fn profit_series(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<SeriesQuery>,
) -> ApiResult<Json<Vec<ProfitBucket>>> {
    let series = state
        .ledger_service
        .profit_series(&identity.user_id, query.granularity)?;
    Ok(Json(series))
}

async fn running_total(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<rust_decimal::Decimal>> {
    let total = state.ledger_service.running_total(&identity.user_id)?;
    Ok(Json(total))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonthQuery {
    month: String,
}

async fn month_detail(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<Vec<ProfitBucket>>> {
    let series = state
        .ledger_service
        .month_detail(&identity.user_id, &query.month)?;
    Ok(Json(series))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", post(execute_dashboard))
        .route("/ledger/series", get(profit_series))
        .route("/ledger/total", get(running_total))
        .route("/ledger/month-detail", get(month_detail))
}
