mod config;
mod fragments;
mod pages;

pub use config::config_handler;
pub use fragments::stats_fragment_handler;
pub use pages::{
    charts_handler, export_page_handler, logs_handler, stats_handler, trends_handler,
    CHARTS_TAB, TRENDS_TAB,
};
