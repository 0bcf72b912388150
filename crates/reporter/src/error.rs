#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Missing setting: {0}")]
    MissingSetting(&'static str),
    #[error("Invalid send time '{0}', expected HH:MM")]
    InvalidSendAt(String),
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("Invalid content type: {0}")]
    ContentType(#[from] lettre::message::header::ContentTypeErr),
    #[error("Failed to build email: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("Failed to export report: {0}")]
    Export(#[from] mailmind_core::export::Error),
    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
