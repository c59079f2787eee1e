// Copyright (C) 2026 The sesmail Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use clap::ArgAction;
use clap::Parser;


/// Parse a `KEY=VALUE` template variable assignment.
fn parse_var(s: &str) -> Result<(String, String), String> {
  let (key, value) = s
    .split_once('=')
    .ok_or_else(|| format!("invalid variable assignment `{s}`: expected KEY=VALUE"))?;

  if key.is_empty() {
    return Err(format!("invalid variable assignment `{s}`: empty key"))
  }
  Ok((key.to_string(), value.to_string()))
}


/// A program for sending an email via Amazon SES.
#[derive(Debug, Parser)]
#[clap(version)]
pub(crate) struct Args {
  /// The address to send the email from.
  ///
  /// Falls back to the value from the configuration file, if any.
  #[clap(short, long)]
  pub from: Option<String>,
  /// The region of the delivery API to use (e.g., eu-west-1).
  ///
  /// Falls back to the value from the configuration file, if any.
  #[clap(short, long)]
  pub region: Option<String>,
  /// The recipient's email address.
  #[clap(short, long)]
  pub to: Option<String>,
  /// The subject to use for the email.
  #[clap(short, long)]
  pub subject: Option<String>,
  /// The message body to send.
  #[clap(short, long, conflicts_with = "template")]
  pub body: Option<String>,
  /// The path to a template to render the message body from.
  #[clap(short = 'T', long)]
  pub template: Option<PathBuf>,
  /// The format of the message body: one of '.txt', '.text', or '.html'.
  ///
  /// Defaults to the template's file extension if a template is used
  /// and to '.txt' otherwise.
  #[clap(long)]
  pub format: Option<String>,
  /// A JSON file containing an object with data for the template.
  #[clap(short, long, requires = "template")]
  pub data: Option<PathBuf>,
  /// A template variable, overriding any value provided by --data.
  #[clap(long = "var", value_name = "KEY=VALUE", value_parser = parse_var, requires = "template")]
  pub vars: Vec<(String, String)>,
  /// The name of the configuration set to use.
  #[clap(long)]
  pub configuration_set: Option<String>,
  /// The charset of subject and body; defaults to 'UTF-8'.
  #[clap(long)]
  pub charset: Option<String>,
  /// The path to the configuration file.
  #[clap(short, long)]
  pub config: Option<PathBuf>,
  /// Increase verbosity (can be supplied multiple times).
  #[clap(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
  pub verbosity: u8,
}
