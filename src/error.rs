// Copyright (C) 2026 The sesmail Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use crate::delivery::DeliveryError;


/// Result type alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;


/// An error reported while rendering a template.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
  /// The template could not be read or parsed.
  #[error("failed to parse template `{}`", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
  /// The template parsed but executing it against the data failed.
  #[error("failed to execute template `{}`", path.display())]
  Exec {
    path: PathBuf,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}


/// The error type of this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The provided format suffix does not name a known sender.
  #[error("undefined sender: '{0}'")]
  UndefinedSender(String),
  /// The message body ended up empty.
  #[error("message body is empty")]
  EmptyBody,
  #[error(transparent)]
  Render(#[from] RenderError),
  /// A session against the delivery API could not be established.
  #[error("failed to create session: {0}")]
  Session(String),
  #[error(transparent)]
  Delivery(#[from] DeliveryError),
}
