//! `rolo` — terminal contact browser with an offline cache.
//!
//! Contacts come from randomuser.me a page at a time and are kept in a local
//! SQLite file, so previously fetched pages are available without a network.
//!
//! # Usage
//!
//! ```text
//! rolo
//! rolo --config ~/.config/rolo/config.toml
//! rolo --seed demo --reset
//! ```

mod app;
mod settings;
mod ui;

use std::{
  fs::OpenOptions,
  io,
  path::{Path, PathBuf},
  sync::{Arc, Mutex},
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use rolo_core::LocalStore;
use rolo_remote::RandomUserClient;
use rolo_store_sqlite::SqliteStore;
use rolo_sync::{ContactRepository, SyncRepository};
use settings::Settings;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "rolo", version, about = "Terminal contact browser with an offline cache")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Location of the contact cache (default: ~/.local/share/rolo/contacts.db).
  #[arg(long, env = "ROLO_DB", value_name = "PATH")]
  db: Option<PathBuf>,

  /// Dataset seed; the same seed always yields the same people.
  #[arg(long, env = "ROLO_SEED")]
  seed: Option<String>,

  /// Results endpoint to page through.
  #[arg(long, env = "ROLO_BASE_URL")]
  base_url: Option<String>,

  /// Empty the contact cache before starting.
  #[arg(long)]
  reset: bool,

  /// Where to write logs (default: ~/.local/state/rolo/rolo.log).
  #[arg(long, env = "ROLO_LOG_FILE", value_name = "PATH")]
  log_file: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let settings = Settings::load(&args)?;
  init_tracing(&settings.log_file)?;

  info!(
    db = %settings.db_path.display(),
    seed = %settings.remote.seed,
    page_size = settings.remote.page_size,
    "starting rolo"
  );

  if let Some(dir) = settings.db_path.parent() {
    std::fs::create_dir_all(dir)
      .with_context(|| format!("failed to create {}", dir.display()))?;
  }
  let store = SqliteStore::open(&settings.db_path)
    .await
    .with_context(|| format!("failed to open contact cache at {:?}", settings.db_path))?;

  if args.reset {
    store.delete_all().await.context("failed to clear contact cache")?;
    info!("contact cache cleared");
  }

  let remote =
    RandomUserClient::new(settings.remote.clone()).context("failed to build HTTP client")?;
  let mut app = App::new(Arc::new(SyncRepository::new(store, remote)));

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app);

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

fn init_tracing(log_file: &Path) -> Result<()> {
  if let Some(dir) = log_file.parent() {
    std::fs::create_dir_all(dir)
      .with_context(|| format!("failed to create {}", dir.display()))?;
  }
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(log_file)
    .with_context(|| format!("failed to open log file {}", log_file.display()))?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .init();
  Ok(())
}

// ─── Event loop ───────────────────────────────────────────────────────────────

fn run_event_loop<R: ContactRepository>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<R>,
) -> Result<()> {
  loop {
    // Pagination runs on the runtime's workers; pick up whatever landed.
    app.sync().context("contact cache failed")?;

    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;
    app.report_visible_rows();

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && key.kind == KeyEventKind::Press
      && !app.handle_key(key)
    {
      break;
    }
  }

  Ok(())
}
