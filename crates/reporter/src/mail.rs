use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};
use mailmind_core::export::PDF_FILE_NAME;
use slog::{info, Logger};

use crate::{BuiltReport, Cli, Error};

const BODY: &str = "Beste manager,\n\nIn de bijlage vindt u het dagelijkse MailMind rapport.\n\nGroeten,\nMailMind";

/// Where and how the report is delivered
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub recipient: String,
}

impl SmtpSettings {
    pub fn from_cli(cli: &Cli) -> Result<Self, Error> {
        Ok(Self {
            server: cli
                .smtp_server
                .clone()
                .ok_or(Error::MissingSetting("smtp_server"))?,
            port: cli.smtp_port(),
            user: cli
                .smtp_user
                .clone()
                .ok_or(Error::MissingSetting("smtp_user"))?,
            password: cli
                .smtp_pass
                .clone()
                .ok_or(Error::MissingSetting("smtp_pass"))?,
            recipient: cli
                .report_email
                .clone()
                .ok_or(Error::MissingSetting("report_email"))?,
        })
    }
}

/// Plain text note with the PDF attached
pub fn build_message(settings: &SmtpSettings, report: &BuiltReport) -> Result<Message, Error> {
    let from: Mailbox = settings.user.parse()?;
    let to: Mailbox = settings.recipient.parse()?;
    let pdf = ContentType::parse("application/pdf")?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(report.summary.email_subject())
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(BODY.to_string()))
                .singlepart(
                    Attachment::new(PDF_FILE_NAME.to_string()).body(report.pdf.clone(), pdf),
                ),
        )?;
    Ok(message)
}

/// Deliver over SMTP with STARTTLS. Runs the blocking transport off the runtime.
pub async fn send_report(
    logger: &Logger,
    settings: &SmtpSettings,
    report: &BuiltReport,
) -> Result<(), Error> {
    let message = build_message(settings, report)?;
    let mailer = SmtpTransport::starttls_relay(&settings.server)?
        .port(settings.port)
        .credentials(Credentials::new(
            settings.user.clone(),
            settings.password.clone(),
        ))
        .build();

    tokio::task::spawn_blocking(move || mailer.send(&message)).await??;
    info!(
        logger,
        "report mailed to {} via {}:{}", settings.recipient, settings.server, settings.port
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailmind_core::{
        export::ReportSummary,
        logs::{PeriodMode, PeriodSelector},
    };
    use time::macros::date;

    fn settings() -> SmtpSettings {
        SmtpSettings {
            server: "smtp.example.com".to_string(),
            port: 587,
            user: "mailmind@example.com".to_string(),
            password: "secret".to_string(),
            recipient: "manager@example.com".to_string(),
        }
    }

    fn report() -> BuiltReport {
        let day = date!(2024 - 05 - 08);
        BuiltReport {
            summary: ReportSummary::new(day, &PeriodSelector::new(PeriodMode::Day, day), &[]),
            pdf: b"%PDF-1.3 test".to_vec(),
        }
    }

    #[test]
    fn message_carries_subject_body_and_attachment() {
        let message = build_message(&settings(), &report()).unwrap();
        let raw = String::from_utf8_lossy(&message.formatted()).to_string();

        assert!(raw.contains("Subject: MailMind Rapport - 2024-05-08"));
        assert!(raw.contains("From: mailmind@example.com"));
        assert!(raw.contains("To: manager@example.com"));
        assert!(raw.contains("Beste manager,"));
        assert!(raw.contains("filename=\"rapport.pdf\""));
        assert!(raw.contains("Content-Type: application/pdf"));
    }

    #[test]
    fn bad_recipient_is_an_error() {
        let mut settings = settings();
        settings.recipient = "not an address".to_string();
        assert!(matches!(
            build_message(&settings, &report()),
            Err(Error::Address(_))
        ));
    }

    #[test]
    fn all_smtp_settings_are_required() {
        let cli = Cli {
            smtp_server: Some("smtp.example.com".into()),
            smtp_user: Some("mailmind@example.com".into()),
            smtp_pass: Some("secret".into()),
            ..Default::default()
        };
        assert!(matches!(
            SmtpSettings::from_cli(&cli),
            Err(Error::MissingSetting("report_email"))
        ));

        let cli = Cli {
            report_email: Some("manager@example.com".into()),
            ..cli
        };
        let settings = SmtpSettings::from_cli(&cli).unwrap();
        assert_eq!(settings.port, 587);
    }
}
