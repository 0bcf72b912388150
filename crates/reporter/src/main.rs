use mailmind_core::logs::PeriodMode;
use reporter::{
    build_report, get_config_info, local_now, parse_send_at, send_report, setup_logger,
    DailySchedule, SmtpSettings,
};
use slog::{debug, error, info, warn, Logger};
use std::{path::PathBuf, time::Duration};
use tokio::{signal, time::interval};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = get_config_info();
    let logger = setup_logger(&cli);

    let send_at = parse_send_at(&cli.send_at())?;
    let settings = SmtpSettings::from_cli(&cli)?;
    let logs_dir = PathBuf::from(cli.logs_dir());
    let mode = cli.report_mode();

    info!(logger, "MailMind Reporter starting...");
    info!(logger, "  Logs dir: {}", logs_dir.display());
    info!(logger, "  Send at: {} ({} report)", cli.send_at(), mode);
    info!(logger, "  Recipient: {}", settings.recipient);
    info!(logger, "  SMTP: {}:{}", settings.server, settings.port);

    if cli.once {
        run_once(&logger, &settings, logs_dir, mode).await?;
        return Ok(());
    }

    let mut schedule = DailySchedule::new(send_at);
    let check_interval = cli.check_interval();
    info!(logger, "Checking schedule every {} seconds", check_interval);

    let mut ticker = interval(Duration::from_secs(check_interval));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = local_now();
                if !schedule.is_due(now) {
                    debug!(logger, "not due at {}", now);
                    continue;
                }
                // A failed send is not retried until tomorrow
                schedule.mark_attempted(now.date());
                match run_once(&logger, &settings, logs_dir.clone(), mode).await {
                    Ok(_) => info!(
                        logger,
                        "Daily report done, next one tomorrow at {}",
                        schedule.send_at()
                    ),
                    Err(err) => error!(logger, "Error sending daily report: {}", err),
                }
            }
            _ = signal::ctrl_c() => {
                warn!(logger, "Shutting down");
                break;
            }
        }
    }
    Ok(())
}

async fn run_once(
    logger: &Logger,
    settings: &SmtpSettings,
    logs_dir: PathBuf,
    mode: PeriodMode,
) -> Result<(), anyhow::Error> {
    let today = local_now().date();
    let report = build_report(logger, logs_dir, mode, today).await?;
    send_report(logger, settings, &report).await?;
    Ok(())
}
