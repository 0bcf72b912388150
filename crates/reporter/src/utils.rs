use clap::Parser;
use mailmind_core::{
    find_config_file, load_config, logs::PeriodMode, ConfigSource, DEFAULT_CHECK_INTERVAL,
    DEFAULT_LOGS_DIR, DEFAULT_SEND_AT,
};
use slog::{o, Drain, Level, Logger};
use std::env;
use time::{OffsetDateTime, PrimitiveDateTime};

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "MailMind Reporter - Mails the daily PDF summary of the mail logs"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $MAILMIND_REPORTER_CONFIG, ./reporter.toml,
    /// $XDG_CONFIG_HOME/mailmind/reporter.toml, /etc/mailmind/reporter.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Build and send one report now, then exit
    #[arg(long)]
    #[serde(skip)]
    pub once: bool,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "MAILMIND_REPORTER_LEVEL")]
    pub level: Option<String>,

    /// Directory containing the daily mail_log_YYYY-MM-DD.xlsx files
    #[arg(long, env = "MAILMIND_LOGS_DIR")]
    pub logs_dir: Option<String>,

    /// Seconds between schedule checks
    #[arg(long, env = "MAILMIND_REPORTER_CHECK_INTERVAL")]
    pub check_interval: Option<u64>,

    /// Local time of day the report is sent (HH:MM)
    #[arg(short, long, env = "MAILMIND_REPORTER_SEND_AT")]
    pub send_at: Option<String>,

    /// Period covered by the report, counted back from today: day, week or month
    #[arg(short = 'm', long, env = "MAILMIND_REPORTER_MODE")]
    pub report_mode: Option<PeriodMode>,

    /// Recipient of the report
    #[arg(short, long, env = "REPORT_EMAIL")]
    pub report_email: Option<String>,

    /// SMTP server, contacted with STARTTLS
    #[arg(long, env = "SMTP_SERVER")]
    pub smtp_server: Option<String>,

    /// SMTP port
    #[arg(long, env = "SMTP_PORT")]
    pub smtp_port: Option<u16>,

    /// SMTP login, also used as the sender address
    #[arg(long, env = "SMTP_USER")]
    pub smtp_user: Option<String>,

    /// SMTP password
    #[arg(long, env = "SMTP_PASS", hide_env_values = true)]
    pub smtp_pass: Option<String>,
}

impl Cli {
    pub fn logs_dir(&self) -> String {
        self.logs_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_LOGS_DIR.to_string())
    }

    pub fn check_interval(&self) -> u64 {
        self.check_interval.unwrap_or(DEFAULT_CHECK_INTERVAL).max(1)
    }

    pub fn send_at(&self) -> String {
        self.send_at
            .clone()
            .unwrap_or_else(|| DEFAULT_SEND_AT.to_string())
    }

    pub fn report_mode(&self) -> PeriodMode {
        self.report_mode.unwrap_or_default()
    }

    pub fn smtp_port(&self) -> u16 {
        self.smtp_port.unwrap_or(587)
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Cli {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("MAILMIND_REPORTER_CONFIG", "reporter.toml")
    };

    let file_config: Cli = load_config(&source).unwrap_or_default();
    merge_config(cli_args, file_config)
}

/// CLI args override file config (env vars are handled by clap)
pub fn merge_config(cli_args: Cli, file_config: Cli) -> Cli {
    Cli {
        config: cli_args.config,
        once: cli_args.once,
        level: cli_args.level.or(file_config.level),
        logs_dir: cli_args.logs_dir.or(file_config.logs_dir),
        check_interval: cli_args.check_interval.or(file_config.check_interval),
        send_at: cli_args.send_at.or(file_config.send_at),
        report_mode: cli_args.report_mode.or(file_config.report_mode),
        report_email: cli_args.report_email.or(file_config.report_email),
        smtp_server: cli_args.smtp_server.or(file_config.smtp_server),
        smtp_port: cli_args.smtp_port.or(file_config.smtp_port),
        smtp_user: cli_args.smtp_user.or(file_config.smtp_user),
        smtp_pass: cli_args.smtp_pass.or(file_config.smtp_pass),
    }
}

pub fn setup_logger(cli: &Cli) -> Logger {
    let level = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_default();
    let log_level = match level.to_lowercase().as_str() {
        "trace" => Level::Trace,
        "debug" => Level::Debug,
        "info" => Level::Info,
        "warn" => Level::Warning,
        "error" => Level::Error,
        _ => Level::Info,
    };

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = drain.filter_level(log_level).fuse();
    slog::Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}

/// Wall-clock time in the local zone, or UTC when the offset cannot be determined
pub fn local_now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    PrimitiveDateTime::new(now.date(), now.time())
}
