mod charts;
mod config;
mod export;
mod login;
mod logs;
mod stats;

use mailmind_core::logs::PeriodSelector;

use crate::DashboardQuery;

pub use crate::templates::fragments::ChartCard;
pub use charts::{charts_page, trends_page};
pub use config::{config_page, ConfigEntry};
pub use export::export_page;
pub use login::login_page;
pub use logs::{logs_page, LogsView};
pub use stats::stats_page;

/// Period the page was rendered for, and the query that selected it
pub struct PeriodView {
    pub selector: PeriodSelector,
    pub query: DashboardQuery,
}
