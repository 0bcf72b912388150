use clap::Parser;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::LevelFilter;
use mailmind_core::{
    find_config_file, load_config, ConfigSource, DEFAULT_DASHBOARD_PORT, DEFAULT_LOGS_DIR,
};
use std::env;
use time::{format_description::well_known::Iso8601, Date, OffsetDateTime};

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "MailMind Dashboard - statistics, charts and exports for processed mail logs"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $MAILMIND_DASHBOARD_CONFIG, ./dashboard.toml,
    /// $XDG_CONFIG_HOME/mailmind/dashboard.toml, /etc/mailmind/dashboard.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "MAILMIND_DASHBOARD_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, env = "MAILMIND_DASHBOARD_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "MAILMIND_DASHBOARD_PORT")]
    pub port: Option<String>,

    /// Directory containing the daily mail_log_YYYY-MM-DD.xlsx files
    #[arg(long, env = "MAILMIND_LOGS_DIR")]
    pub logs_dir: Option<String>,

    /// Directory containing static assets (styles, logo)
    #[arg(short, long, env = "MAILMIND_DASHBOARD_UI_DIR")]
    pub ui_dir: Option<String>,

    /// Username allowed to log in
    #[arg(long, env = "MAILMIND_AUTH_USERNAME")]
    pub auth_username: Option<String>,

    /// Password for the dashboard user
    #[arg(long, env = "MAILMIND_AUTH_PASSWORD", hide_env_values = true)]
    pub auth_password: Option<String>,
}

impl Cli {
    pub fn host(&self) -> String {
        self.host.clone().unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> String {
        self.port
            .clone()
            .unwrap_or_else(|| DEFAULT_DASHBOARD_PORT.to_string())
    }

    pub fn logs_dir(&self) -> String {
        self.logs_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_LOGS_DIR.to_string())
    }

    pub fn static_dir(&self) -> String {
        self.ui_dir
            .clone()
            .unwrap_or_else(|| "./static".to_string())
    }

    /// Configured login, if both halves are present
    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.auth_username, &self.auth_password) {
            (Some(user), Some(pass)) if !user.is_empty() => Some((user.clone(), pass.clone())),
            _ => None,
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Cli {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("MAILMIND_DASHBOARD_CONFIG", "dashboard.toml")
    };

    let file_config: Cli = load_config(&source).unwrap_or_default();
    merge_config(cli_args, file_config)
}

/// CLI args (and env, via clap) win over the config file
pub fn merge_config(cli_args: Cli, file_config: Cli) -> Cli {
    Cli {
        config: cli_args.config,
        level: cli_args.level.or(file_config.level),
        host: cli_args.host.or(file_config.host),
        port: cli_args.port.or(file_config.port),
        logs_dir: cli_args.logs_dir.or(file_config.logs_dir),
        ui_dir: cli_args.ui_dir.or(file_config.ui_dir),
        auth_username: cli_args.auth_username.or(file_config.auth_username),
        auth_password: cli_args.auth_password.or(file_config.auth_password),
    }
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level_str = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    match level_str.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}: {}",
                OffsetDateTime::now_utc()
                    .format(&Iso8601::DEFAULT)
                    .unwrap_or_default(),
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}

/// Today's date in local time, falling back to UTC when the offset is unknown
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}
