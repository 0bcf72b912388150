mod auth;
mod log_store;
mod query;
pub mod routes;
mod startup;
pub mod templates;
mod utils;

pub use auth::*;
pub use log_store::*;
pub use query::*;
pub use routes::*;
pub use startup::*;
pub use templates::PeriodView;
pub use utils::*;
