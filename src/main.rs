//! ticketscope command line: lists ticket pages from browsing history.
//!
//! Reads the local ticketscope database by default, or a Chromium profile
//! `History` file with `--chromium-history`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use ticketscope::app::App;
use ticketscope::rpc_handler::results_json;
use ticketscope::services::renderer::render_table;
use ticketscope::services::settings_engine::SettingsEngineTrait;
use ticketscope::services::ticket_search::SearchRequest;
use ticketscope::types::settings::SortOrder;
use ticketscope::types::time_filter::{TimeFilter, WeekStart};

#[derive(Parser)]
#[command(
    name = "ticketscope",
    version,
    about = "Find recently visited ticket pages in browsing history"
)]
struct Cli {
    /// Time window: oneHourAgo, today, yesterday, thisWeek, thisMonth or a number of hours
    #[arg(long)]
    since: Option<String>,
    /// Only show tickets whose title contains this text (case-insensitive)
    #[arg(long)]
    phrase: Option<String>,
    /// Read a Chromium profile History file instead of the local database
    /// (the default Chrome profile when FILE is omitted)
    #[cfg(feature = "chromium")]
    #[arg(long, value_name = "FILE", num_args = 0..=1, conflicts_with = "db")]
    chromium_history: Option<Option<PathBuf>>,
    /// Local history database
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,
    /// Settings file
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
    #[arg(long, value_enum)]
    week_start: Option<WeekStartArg>,
    #[arg(long, value_enum)]
    sort: Option<SortArg>,
    /// Print results as JSON
    #[arg(long)]
    json: bool,
    /// Save --since, --week-start and --sort as the new defaults
    #[arg(long)]
    save: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum WeekStartArg {
    Monday,
    Sunday,
}

impl From<WeekStartArg> for WeekStart {
    fn from(arg: WeekStartArg) -> Self {
        match arg {
            WeekStartArg::Monday => WeekStart::Monday,
            WeekStartArg::Sunday => WeekStart::Sunday,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Recency,
    Visits,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Recency => SortOrder::Recency,
            SortArg::Visits => SortOrder::VisitCount,
        }
    }
}

#[cfg(feature = "chromium")]
fn open_chromium(cli: &Cli, settings_path: &Option<String>) -> Option<Result<App, Box<dyn std::error::Error>>> {
    let history = cli.chromium_history.as_ref()?;
    let path = history
        .clone()
        .unwrap_or_else(ticketscope::platform::get_chromium_history_path);
    Some(App::with_chromium_history(&path, settings_path.clone()))
}

#[cfg(not(feature = "chromium"))]
fn open_chromium(_cli: &Cli, _settings_path: &Option<String>) -> Option<Result<App, Box<dyn std::error::Error>>> {
    None
}

fn open_app(cli: &Cli) -> Result<App, Box<dyn std::error::Error>> {
    let settings_path = cli
        .settings
        .as_ref()
        .map(|p| p.to_string_lossy().to_string());

    if let Some(app) = open_chromium(cli, &settings_path) {
        return app;
    }

    let db_path = cli.db.clone().unwrap_or_else(App::default_db_path);
    App::open_local(&db_path, settings_path)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = open_app(&cli)?;

    if cli.save {
        let mut settings = app.settings_engine.get().clone();
        if let Some(since) = &cli.since {
            settings.filter.since = since.clone();
        }
        if let Some(week_start) = cli.week_start {
            settings.week_start = week_start.into();
        }
        if let Some(sort) = cli.sort {
            settings.sort = sort.into();
        }
        app.settings_engine.set(settings)?;
        log::info!("saved defaults to {}", app.settings_engine.get_config_path());
    }

    let mut request = SearchRequest::from_settings(app.settings_engine.get(), cli.phrase.as_deref());
    if let Some(since) = &cli.since {
        request.filter = TimeFilter::parse(since);
    }
    if let Some(week_start) = cli.week_start {
        request.week_start = week_start.into();
    }
    if let Some(sort) = cli.sort {
        request.sort = sort.into();
    }

    let now = chrono::Utc::now().timestamp_millis();
    let results = app.search.execute(&request, now)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results_json(&results, now))?);
    } else {
        if results.query.is_unbounded() {
            eprintln!("warning: unrecognized time window {}; showing all time", request.filter);
        }
        print!("{}", render_table(&results.rows, now));
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ticketscope: {}", e);
            ExitCode::FAILURE
        }
    }
}
