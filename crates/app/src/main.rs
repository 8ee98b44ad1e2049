use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use energy_core::model::SessionKey;
use services::{AppServices, AssemblyService, AssetResolver, Clock, ProgressService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://energy.sqlite3";
const DEFAULT_SESSION: &str = "local";
const DEFAULT_TTL_DAYS: i64 = 30;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidSession { raw: String },
    InvalidTtl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidSession { raw } => write!(f, "invalid --session value: {raw:?}"),
            ArgsError::InvalidTtl { raw } => write!(f, "invalid --ttl-days value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    session: SessionKey,
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn session_key(&self) -> SessionKey {
        self.session.clone()
    }

    fn assembly(&self) -> Arc<AssemblyService> {
        self.services.assembly()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn assets(&self) -> Arc<AssetResolver> {
        self.services.assets()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [ui]   [--db <sqlite_url>] [--session <key>] [--assets <dir>]");
    eprintln!("  cargo run -p app -- progress [--db <sqlite_url>] [--session <key>] [--json]");
    eprintln!("  cargo run -p app -- purge    [--db <sqlite_url>] [--ttl-days <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --session {DEFAULT_SESSION}");
    eprintln!("  --assets .");
    eprintln!("  --ttl-days {DEFAULT_TTL_DAYS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ENERGY_DB_URL, ENERGY_SESSION, ENERGY_ASSETS_DIR, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Progress,
    Purge,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "progress" => Some(Self::Progress),
            "purge" => Some(Self::Purge),
            _ => None,
        }
    }

    fn accepts(self, flag: &str) -> bool {
        match self {
            Command::Ui => matches!(flag, "--db" | "--session" | "--assets"),
            Command::Progress => matches!(flag, "--db" | "--session" | "--json"),
            Command::Purge => matches!(flag, "--db" | "--ttl-days"),
        }
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    session: SessionKey,
    assets_dir: PathBuf,
    json: bool,
    ttl: chrono::Duration,
}

impl Args {
    fn parse(cmd: Command, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("ENERGY_DB_URL")
            .ok()
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let session_raw =
            std::env::var("ENERGY_SESSION").unwrap_or_else(|_| DEFAULT_SESSION.into());
        let mut session = parse_session(session_raw)?;
        let mut assets_dir = std::env::var("ENERGY_ASSETS_DIR")
            .ok()
            .map_or_else(|| PathBuf::from("."), PathBuf::from);
        let mut json = false;
        let mut ttl = chrono::Duration::days(DEFAULT_TTL_DAYS);

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                print_usage();
                std::process::exit(0);
            }
            if !cmd.accepts(&arg) {
                return Err(ArgsError::UnknownArg(arg));
            }
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--session" => {
                    session = parse_session(require_value(args, "--session")?)?;
                }
                "--assets" => {
                    assets_dir = PathBuf::from(require_value(args, "--assets")?);
                }
                "--json" => json = true,
                "--ttl-days" => {
                    let value = require_value(args, "--ttl-days")?;
                    ttl = value
                        .parse::<i64>()
                        .ok()
                        .filter(|days| *days > 0)
                        .and_then(chrono::Duration::try_days)
                        .ok_or(ArgsError::InvalidTtl { raw: value })?;
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            session,
            assets_dir,
            json,
            ttl,
        })
    }
}

fn parse_session(raw: String) -> Result<SessionKey, ArgsError> {
    SessionKey::new(&raw).map_err(|_| ArgsError::InvalidSession { raw })
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app=info,services=info,storage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let clock = Clock::system();
    let services = AppServices::new_sqlite(&parsed.db_url, clock, parsed.assets_dir.clone()).await?;
    tracing::info!(db = %parsed.db_url, command = ?cmd, "storage ready");

    match cmd {
        Command::Ui => {
            if !parsed.assets_dir.is_dir() {
                tracing::warn!(
                    assets = %parsed.assets_dir.display(),
                    "asset directory not found, images will show placeholders"
                );
            }
            tracing::info!(
                session = %parsed.session,
                assets = %parsed.assets_dir.display(),
                "launching desktop ui"
            );
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                session: parsed.session,
                services,
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Sustainable Energy Builder")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Progress => {
            let overview = services.progress().overview(&parsed.session).await?;
            if parsed.json {
                println!("{}", overview.to_json_pretty()?);
            } else {
                println!("Session: {}", overview.session);
                println!("Total Score: {}/{}", overview.total_score, overview.max_score);
                println!(
                    "Systems Completed: {}/{}",
                    overview.completed_count, overview.module_count
                );
                println!("Progress: {}%", overview.completion_rate);
                if let Some(rank) = overview.rank {
                    println!("Rank: {}", rank.title());
                }
                for module in &overview.modules {
                    let status = if module.completed { "completed" } else { "available" };
                    println!(
                        "  {} {:<24} {:>3}/100  {status}",
                        module.icon, module.title, module.score
                    );
                }
            }
            Ok(())
        }
        Command::Purge => {
            let removed = services
                .progress()
                .purge_expired(parsed.ttl)
                .await?;
            println!("removed {removed} stale session(s)");
            Ok(())
        }
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(cmd: Command, args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(cmd, &mut iter)
    }

    #[test]
    fn sqlite_urls_are_made_absolute() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/energy.db".into()),
            "sqlite:///tmp/energy.db"
        );
        assert_eq!(
            normalize_sqlite_url("sqlite:/tmp/energy.db".into()),
            "sqlite:///tmp/energy.db"
        );
        let relative = normalize_sqlite_url("energy.db".into());
        assert!(relative.starts_with("sqlite:///"), "{relative}");
        assert!(relative.ends_with("/energy.db"), "{relative}");
    }

    #[test]
    fn flags_are_scoped_to_their_command() {
        assert!(matches!(
            parse(Command::Purge, &["--json"]),
            Err(ArgsError::UnknownArg(_))
        ));
        assert!(matches!(
            parse(Command::Ui, &["--ttl-days", "3"]),
            Err(ArgsError::UnknownArg(_))
        ));
    }

    #[test]
    fn progress_flags_parse() {
        let args = parse(
            Command::Progress,
            &["--db", "sqlite::memory:", "--session", "  alice ", "--json"],
        )
        .unwrap();
        assert_eq!(args.db_url, "sqlite::memory:");
        assert_eq!(args.session.as_str(), "alice");
        assert!(args.json);
    }

    #[test]
    fn ttl_days_become_a_duration() {
        let args = parse(Command::Purge, &["--ttl-days", "7"]).unwrap();
        assert_eq!(args.ttl, chrono::Duration::days(7));
        let args = parse(Command::Purge, &[]).unwrap();
        assert_eq!(args.ttl, chrono::Duration::days(DEFAULT_TTL_DAYS));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            parse(Command::Purge, &["--ttl-days", "0"]),
            Err(ArgsError::InvalidTtl { .. })
        ));
        assert!(matches!(
            parse(Command::Purge, &["--ttl-days", "200000000000"]),
            Err(ArgsError::InvalidTtl { .. })
        ));
        assert!(matches!(
            parse(Command::Ui, &["--session", "   "]),
            Err(ArgsError::InvalidSession { .. })
        ));
        assert!(matches!(
            parse(Command::Ui, &["--db"]),
            Err(ArgsError::MissingValue { flag: "--db" })
        ));
    }
}
