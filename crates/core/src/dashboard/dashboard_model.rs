//! Dashboard view-state models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bets::{Bet, NewBet};
use crate::ledger::{Granularity, ProfitBucket};

/// Explicit per-request view context. Nothing here survives between requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewOptions {
    #[serde(default)]
    pub granularity: Granularity,
    /// Month label like "January 2024" selected for the daily drill-down.
    #[serde(default)]
    pub selected_month: Option<String>,
}

/// One user action against the ledger. Executing a command always yields a
/// fresh view built from a re-fetched record list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum DashboardCommand {
    /// Rebuild the view without mutating anything.
    Refresh,
    AddBet { bet: NewBet },
    DeleteBet { bet_id: String },
    ImportTable { content: Vec<u8> },
    SelectMonth { month_label: Option<String> },
}

/// Immutable snapshot the rendering layer is a pure function of.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub granularity: Granularity,
    pub selected_month: Option<String>,
    /// Full collection for the table, ordered by bet date ascending.
    pub rows: Vec<Bet>,
    /// Profit series for the chart at the requested granularity.
    pub series: Vec<ProfitBucket>,
    pub total_profit: Decimal,
    /// Daily series inside the selected month, when one is selected.
    pub month_detail: Option<Vec<ProfitBucket>>,
}
