// Copyright (C) 2026 The sesmail Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs::read;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context as _;
use anyhow::Result;

use serde::Deserialize;

use serde_json::from_slice as from_json;


/// Defaults for sending emails, as read from a configuration file.
///
/// All values are optional and get overwritten by explicitly provided
/// ones.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// The address to send emails from.
  pub from: Option<String>,
  /// The region to use for the delivery API, e.g., `eu-west-1`.
  pub region: Option<String>,
  /// The configuration set to apply to sent messages.
  pub configuration_set: Option<String>,
  /// The charset used for subject and body.
  pub charset: Option<String>,
}

impl Config {
  /// Load a configuration from the JSON file at `path`.
  pub fn load(path: &Path) -> Result<Self> {
    let data = read(path)
      .with_context(|| format!("failed to read configuration file `{}`", path.display()))?;
    Self::parse(&data)
      .with_context(|| format!("failed to parse `{}` contents as JSON", path.display()))
  }

  fn parse(data: &[u8]) -> Result<Self> {
    let config = from_json::<Self>(data)?;
    Ok(config)
  }
}


/// Retrieve the path to the system-wide configuration file.
pub fn system_config_path() -> Result<PathBuf> {
  let path = dirs::config_dir()
    .context("failed to determine user configuration directory")?
    .join("sesmail")
    .join("config.json");
  Ok(path)
}


/// Load the system-wide configuration, if it exists.
pub fn system_config() -> Result<Option<Config>> {
  let path = system_config_path()?;
  match Config::load(&path) {
    Ok(config) => Ok(Some(config)),
    Err(err) => {
      let not_found = err
        .downcast_ref::<std::io::Error>()
        .map(|err| err.kind() == ErrorKind::NotFound)
        .unwrap_or(false);
      if not_found {
        Ok(None)
      } else {
        Err(err)
      }
    },
  }
}
