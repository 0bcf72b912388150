mod chart_card;
mod filter_form;
mod log_table;
mod stats_panel;

pub use chart_card::{chart_card, ChartCard};
pub use filter_form::{filter_form, FilterOptions};
pub use log_table::{log_table, row_class};
pub use stats_panel::{stats_panel, StatsView};
