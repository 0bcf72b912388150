pub mod components;
pub mod fragments;
pub mod layouts;
pub mod pages;

pub use fragments::{stats_panel, FilterOptions, StatsView};
pub use layouts::{CurrentPage, PageConfig};
pub use pages::{
    charts_page, config_page, export_page, login_page, logs_page, stats_page, trends_page,
    ChartCard, ConfigEntry, LogsView, PeriodView,
};
