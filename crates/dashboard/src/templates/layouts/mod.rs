mod base;

pub use base::{bare, base, CurrentPage, PageConfig};
