// Copyright (C) 2026 The sesmail Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use serde::Serialize;

use crate::deliver;
use crate::render;
use crate::Email;
use crate::Error;
use crate::Format;
use crate::Ses;
use crate::Transport;
use crate::DEFAULT_CHARSET;


/// The capability of sending a single email message.
#[allow(async_fn_in_trait)]
pub trait Mailer {
  /// Send `body` with the given `subject` to `to`.
  ///
  /// On success the provider assigned message identifier is returned.
  async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, Error>;

  /// Render the template at `path` using `data` and send the result.
  ///
  /// Nothing is sent if rendering fails.
  async fn send_template<D>(
    &self,
    to: &str,
    subject: &str,
    path: &Path,
    data: &D,
  ) -> Result<String, Error>
  where
    D: Serialize + ?Sized;
}


/// A sender of emails from a single address, in a single format.
#[derive(Clone, Debug)]
pub struct Sender<T> {
  /// The address emails are sent from, e.g., `example@example.com`.
  from: String,
  format: Format,
  charset: String,
  configuration_set: Option<String>,
  transport: T,
}

impl Sender<Ses> {
  /// Create a sender delivering via Amazon SES in `region`.
  ///
  /// `format` is a file suffix style format specification, i.e., one
  /// of `.txt`, `.text`, or `.html`.
  pub fn new(
    from: impl Into<String>,
    region: impl Into<String>,
    format: &str,
  ) -> Result<Self, Error> {
    let format = Format::from_suffix(format)?;
    Ok(Self::with_transport(from, format, Ses::new(region)))
  }
}

impl<T> Sender<T> {
  /// Create a sender delivering through the provided transport.
  pub fn with_transport(from: impl Into<String>, format: Format, transport: T) -> Self {
    Self {
      from: from.into(),
      format,
      charset: DEFAULT_CHARSET.to_string(),
      configuration_set: None,
      transport,
    }
  }

  /// Set the charset used for subject and body.
  pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
    self.charset = charset.into();
    self
  }

  /// Set the name of the configuration set to use when sending.
  pub fn with_configuration_set(mut self, configuration_set: Option<String>) -> Self {
    self.configuration_set = configuration_set;
    self
  }

  #[inline]
  pub fn format(&self) -> Format {
    self.format
  }

  #[inline]
  pub fn transport(&self) -> &T {
    &self.transport
  }
}

impl<T> Mailer for Sender<T>
where
  T: Transport,
{
  async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, Error> {
    let email = Email::new(&self.from, to, subject, body, self.format)?;
    let request = email.assemble(&self.charset, self.configuration_set.as_deref());
    deliver(&self.transport, &request).await
  }

  async fn send_template<D>(
    &self,
    to: &str,
    subject: &str,
    path: &Path,
    data: &D,
  ) -> Result<String, Error>
  where
    D: Serialize + ?Sized,
  {
    let body = render(path, data)?;
    self.send(to, subject, &body).await
  }
}
