// Copyright (C) 2026 The sesmail Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! A library for sending single text or HTML emails, optionally
//! rendered from a template, via Amazon SES.

#![allow(
  clippy::collapsible_else_if,
  clippy::collapsible_if,
  clippy::let_and_return,
  clippy::let_unit_value
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "config")]
mod config;
mod delivery;
mod error;
mod format;
mod message;
mod sender;
mod template;

#[cfg(feature = "config")]
#[cfg_attr(docsrs, doc(cfg(feature = "config")))]
pub use crate::config::system_config;
#[cfg(feature = "config")]
#[cfg_attr(docsrs, doc(cfg(feature = "config")))]
pub use crate::config::system_config_path;
#[cfg(feature = "config")]
#[cfg_attr(docsrs, doc(cfg(feature = "config")))]
pub use crate::config::Config;
pub use crate::delivery::deliver;
pub use crate::delivery::DeliveryError;
pub use crate::delivery::ProviderError;
pub use crate::delivery::Ses;
pub use crate::delivery::Transport;
pub use crate::delivery::CONFIGURATION_SET_DOES_NOT_EXIST;
pub use crate::delivery::MAIL_FROM_DOMAIN_NOT_VERIFIED;
pub use crate::delivery::MESSAGE_REJECTED;
pub use crate::error::Error;
pub use crate::error::RenderError;
pub use crate::error::Result;
pub use crate::format::Format;
pub use crate::message::Body;
pub use crate::message::Content;
pub use crate::message::Destination;
pub use crate::message::Email;
pub use crate::message::Message;
pub use crate::message::SendRequest;
pub use crate::message::DEFAULT_CHARSET;
pub use crate::sender::Mailer;
pub use crate::sender::Sender;
pub use crate::template::render;
