use log::debug;
use std::sync::Arc;

use super::dashboard_model::{DashboardCommand, DashboardView, ViewOptions};
use crate::bets::{Bet, BetServiceTrait};
use crate::errors::Result;
use crate::ledger::{bucket_profit, filter_by_month, total_profit, Granularity};

/// Builds the immutable dashboard view from an explicitly supplied record
/// list. Pure: no storage access, no ambient state.
pub fn build_dashboard(mut bets: Vec<Bet>, options: &ViewOptions) -> Result<DashboardView> {
    bets.sort_by(|a, b| {
        a.bet_date
            .cmp(&b.bet_date)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });

    let series = bucket_profit(&bets, options.granularity);
    let total = total_profit(&bets);
    let month_detail = match options.selected_month.as_deref() {
        Some(label) => {
            let in_month = filter_by_month(&bets, label)?;
            Some(bucket_profit(&in_month, Granularity::Day))
        }
        None => None,
    };

    Ok(DashboardView {
        granularity: options.granularity,
        selected_month: options.selected_month.clone(),
        rows: bets,
        series,
        total_profit: total,
        month_detail,
    })
}

/// Trait defining the contract for dashboard command execution.
#[async_trait::async_trait]
pub trait DashboardServiceTrait: Send + Sync {
    /// Applies one user command for the given owner and returns the new view.
    async fn execute(
        &self,
        owner_id: &str,
        command: DashboardCommand,
        options: ViewOptions,
    ) -> Result<DashboardView>;
}

/// Maps user commands onto the bet service and rebuilds the view from a
/// freshly fetched collection after every action.
pub struct DashboardService {
    bet_service: Arc<dyn BetServiceTrait>,
}

impl DashboardService {
    pub fn new(bet_service: Arc<dyn BetServiceTrait>) -> Self {
        Self { bet_service }
    }
}

#[async_trait::async_trait]
impl DashboardServiceTrait for DashboardService {
    async fn execute(
        &self,
        owner_id: &str,
        command: DashboardCommand,
        options: ViewOptions,
    ) -> Result<DashboardView> {
        let mut options = options;
        match command {
            DashboardCommand::Refresh => {}
            DashboardCommand::AddBet { bet } => {
                self.bet_service.add_bet(owner_id, bet).await?;
            }
            DashboardCommand::DeleteBet { bet_id } => {
                self.bet_service.delete_bet(owner_id, &bet_id).await?;
            }
            DashboardCommand::ImportTable { content } => {
                self.bet_service.import_table(owner_id, &content).await?;
            }
            DashboardCommand::SelectMonth { month_label } => {
                debug!("Selecting month {:?} for owner {}", month_label, owner_id);
                options.selected_month = month_label;
            }
        }

        let bets = self.bet_service.get_bets(owner_id)?;
        build_dashboard(bets, &options)
    }
}
