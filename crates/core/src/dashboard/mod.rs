//! Dashboard module - user commands and the immutable view they produce.

mod dashboard_model;
mod dashboard_service;


pub use dashboard_model::{DashboardCommand, DashboardView, ViewOptions};
pub use dashboard_service::{build_dashboard, DashboardService, DashboardServiceTrait};
