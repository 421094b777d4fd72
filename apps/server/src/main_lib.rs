use std::sync::Arc;

use crate::auth::{self, AuthManager};
use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use wagerbook_core::{
    bets::{BetService, BetServiceTrait},
    dashboard::{DashboardService, DashboardServiceTrait},
    ledger::{LedgerService, LedgerServiceTrait},
    users::{UserService, UserServiceTrait},
};
use wagerbook_storage_sqlite::{
    bets::BetRepository, db, users::UserRepository,
};

pub struct AppState {
    pub bet_service: Arc<dyn BetServiceTrait>,
    pub ledger_service: Arc<dyn LedgerServiceTrait>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let bet_repository = Arc::new(BetRepository::new(pool.clone(), writer.clone()));
    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));

    let bet_service: Arc<dyn BetServiceTrait> = Arc::new(BetService::new(bet_repository.clone()));
    let ledger_service: Arc<dyn LedgerServiceTrait> =
        Arc::new(LedgerService::new(bet_repository.clone()));
    let dashboard_service: Arc<dyn DashboardServiceTrait> =
        Arc::new(DashboardService::new(bet_service.clone()));
    let user_service: Arc<dyn UserServiceTrait> = Arc::new(UserService::new(user_repository));

    let secret = auth::decode_secret_key(&config.secret_key)?;
    let auth = Arc::new(AuthManager::new(&secret, config.token_ttl));

    Ok(Arc::new(AppState {
        bet_service,
        ledger_service,
        dashboard_service,
        user_service,
        auth,
    }))
}
