//! Runtime settings, layered lowest to highest: built-in defaults, the
//! optional TOML file, `ROLO_*` environment variables, command-line flags.
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `ROLO_REMOTE__PAGE_SIZE=50`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rolo_remote::RemoteConfig;
use serde::Deserialize;

use crate::Args;

const DEFAULT_DB_PATH: &str = "~/.local/share/rolo/contacts.db";
const DEFAULT_LOG_FILE: &str = "~/.local/state/rolo/rolo.log";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  pub db_path:  PathBuf,
  /// The terminal belongs to the UI, so logs go here instead.
  pub log_file: PathBuf,
  #[serde(default)]
  pub remote:   RemoteConfig,
}

impl Settings {
  pub fn load(args: &Args) -> anyhow::Result<Self> {
    let mut builder = config::Config::builder()
      .set_default("db_path", DEFAULT_DB_PATH)?
      .set_default("log_file", DEFAULT_LOG_FILE)?;

    if let Some(path) = &args.config {
      builder = builder.add_source(config::File::from(path.as_path()));
    }

    let layered = builder
      .add_source(
        config::Environment::with_prefix("ROLO")
          .prefix_separator("_")
          .separator("__"),
      )
      .set_override_option("db_path", args.db.as_deref().map(path_value))?
      .set_override_option("log_file", args.log_file.as_deref().map(path_value))?
      .set_override_option("remote.seed", args.seed.clone())?
      .set_override_option("remote.base_url", args.base_url.clone())?
      .build()
      .context("failed to read configuration")?;

    let mut settings: Settings = layered
      .try_deserialize()
      .context("failed to deserialise settings")?;
    settings.db_path = expand_tilde(&settings.db_path);
    settings.log_file = expand_tilde(&settings.log_file);
    Ok(settings)
  }
}

fn path_value(path: &Path) -> String { path.to_string_lossy().into_owned() }

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
