pub mod exports;
pub mod login;
pub mod ui;

mod period;

pub use exports::*;
pub use login::*;
pub use ui::*;
