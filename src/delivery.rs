// Copyright (C) 2026 The sesmail Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::error::Error as StdError;
use std::fmt::Debug;

use aws_config::BehaviorVersion;
use aws_sdk_ses::config::Region;
use aws_sdk_ses::error::DisplayErrorContext;
use aws_sdk_ses::error::ProvideErrorMetadata;
use aws_sdk_ses::error::SdkError;
use aws_sdk_ses::operation::send_email::SendEmailInput;
use aws_sdk_ses::types;
use aws_sdk_ses::Client;

use crate::message::Content;
use crate::message::SendRequest;
use crate::Error;


/// The error code the provider reports for rejected messages.
pub const MESSAGE_REJECTED: &str = "MessageRejected";
/// The error code the provider reports when the "MAIL FROM" domain is
/// not verified.
pub const MAIL_FROM_DOMAIN_NOT_VERIFIED: &str = "MailFromDomainNotVerifiedException";
/// The error code the provider reports for unknown configuration sets.
pub const CONFIGURATION_SET_DOES_NOT_EXIST: &str = "ConfigurationSetDoesNotExist";


/// An error as reported by the delivery API, prior to classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderError {
  /// The provider's error code, if one was reported.
  pub code: Option<String>,
  /// The provider's raw error text.
  pub message: String,
}

impl ProviderError {
  pub fn new(code: Option<&str>, message: impl Into<String>) -> Self {
    Self {
      code: code.map(str::to_string),
      message: message.into(),
    }
  }
}


/// An error reported while delivering a message.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
  /// The provider rejected the message, e.g., because it contains a
  /// virus or an address is not verified.
  #[error("failed to send email: {code}; error: {0}", code = MESSAGE_REJECTED)]
  MessageRejected(String),
  /// The sender's "MAIL FROM" domain is not verified.
  #[error("failed to send email: {code}; error: {0}", code = MAIL_FROM_DOMAIN_NOT_VERIFIED)]
  DomainNotVerified(String),
  /// The configuration set requested does not exist.
  #[error("failed to send email: {code}; error: {0}", code = CONFIGURATION_SET_DOES_NOT_EXIST)]
  ConfigurationSetMissing(String),
  /// Any other transport or API error.
  #[error("failed to send email: {}; error: {message}", .code.as_deref().unwrap_or("unknown"))]
  Api {
    code: Option<String>,
    message: String,
  },
}

impl From<ProviderError> for DeliveryError {
  fn from(err: ProviderError) -> Self {
    let ProviderError { code, message } = err;

    match code.as_deref() {
      Some(MESSAGE_REJECTED) => Self::MessageRejected(message),
      Some(MAIL_FROM_DOMAIN_NOT_VERIFIED) => Self::DomainNotVerified(message),
      Some(CONFIGURATION_SET_DOES_NOT_EXIST) => Self::ConfigurationSetMissing(message),
      _ => Self::Api { code, message },
    }
  }
}

impl From<ProviderError> for Error {
  fn from(err: ProviderError) -> Self {
    Self::Delivery(DeliveryError::from(err))
  }
}


/// A transport capable of submitting an assembled request to the
/// delivery API.
#[allow(async_fn_in_trait)]
pub trait Transport {
  /// Submit the request, returning the provider assigned message
  /// identifier on success.
  async fn send_email(&self, request: &SendRequest) -> Result<String, Error>;
}


/// A [`Transport`] sending messages via Amazon SES.
///
/// A new session, with credentials resolved from the environment, is
/// established for every message sent.
#[derive(Clone, Debug)]
pub struct Ses {
  region: String,
}

impl Ses {
  /// Create a new SES transport targeting the given region.
  pub fn new(region: impl Into<String>) -> Self {
    Self {
      region: region.into(),
    }
  }

  async fn client(&self) -> Result<Client, Error> {
    let region = self.region.trim();
    if region.is_empty() {
      return Err(Error::Session("no region provided".to_string()))
    }

    let config = aws_config::defaults(BehaviorVersion::latest())
      .region(Region::new(region.to_string()))
      .load()
      .await;
    Ok(Client::new(&config))
  }

  #[inline]
  pub fn region(&self) -> &str {
    &self.region
  }
}

fn ses_content(content: &Content) -> Result<types::Content, Error> {
  let content = types::Content::builder()
    .charset(&content.charset)
    .data(&content.data)
    .build()
    .map_err(|err| ProviderError::new(None, format!("failed to build content: {err}")))?;
  Ok(content)
}

/// Convert an assembled request into the SDK's input type.
fn send_email_input(request: &SendRequest) -> Result<SendEmailInput, Error> {
  let destination = types::Destination::builder()
    .set_to_addresses(Some(request.destination.to.clone()))
    .set_cc_addresses(Some(request.destination.cc.clone()))
    .build();

  let body = &request.message.body;
  let body = types::Body::builder()
    .set_text(body.text.as_ref().map(ses_content).transpose()?)
    .set_html(body.html.as_ref().map(ses_content).transpose()?)
    .build();

  let message = types::Message::builder()
    .subject(ses_content(&request.message.subject)?)
    .body(body)
    .build();

  let input = SendEmailInput::builder()
    .source(&request.source)
    .destination(destination)
    .message(message)
    .set_configuration_set_name(request.configuration_set.clone())
    .build()
    .map_err(|err| ProviderError::new(None, format!("failed to build request: {err}")))?;
  Ok(input)
}

/// Extract code and text from an error reported by the SDK.
///
/// Errors without a provider message (e.g., dispatch failures or
/// timeouts) are described by their full error chain.
fn provider_error<E, R>(err: &SdkError<E, R>) -> ProviderError
where
  E: ProvideErrorMetadata + StdError + 'static,
  R: Debug,
{
  let message = err
    .message()
    .map(str::to_string)
    .unwrap_or_else(|| DisplayErrorContext(err).to_string());
  ProviderError::new(err.code(), message)
}

impl Transport for Ses {
  async fn send_email(&self, request: &SendRequest) -> Result<String, Error> {
    let input = send_email_input(request)?;
    let client = self.client().await?;

    let output = client
      .send_email()
      .set_source(input.source)
      .set_destination(input.destination)
      .set_message(input.message)
      .set_configuration_set_name(input.configuration_set_name)
      .send()
      .await
      .map_err(|err| provider_error(&err))?;

    Ok(output.message_id().to_string())
  }
}


/// Deliver an assembled request using the provided transport.
///
/// Delivery is attempted exactly once.
#[cfg_attr(
  feature = "tracing",
  tracing::instrument(skip_all, fields(source = %request.source, to = ?request.destination.to), err)
)]
pub async fn deliver<T>(transport: &T, request: &SendRequest) -> Result<String, Error>
where
  T: Transport,
{
  let message_id = transport.send_email(request).await?;
  #[cfg(feature = "tracing")]
  tracing::debug!(%message_id, "message accepted for delivery");
  Ok(message_id)
}
