mod auth;
mod exports;
mod helpers;
mod ui_pages;
