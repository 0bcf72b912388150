mod navbar;
mod period_form;

pub use navbar::navbar;
pub use period_form::{empty_notice, period_form, EMPTY_MESSAGE};
