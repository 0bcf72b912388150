mod error;
mod mail;
mod report;
mod schedule;
mod utils;

pub use error::*;
pub use mail::*;
pub use report::*;
pub use schedule::*;
pub use utils::*;
