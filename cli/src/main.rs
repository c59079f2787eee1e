// Copyright (C) 2026 The sesmail Developers
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(
  clippy::collapsible_if,
  clippy::let_and_return,
  clippy::let_unit_value
)]

mod args;

use std::env::args_os;
use std::env::var_os;
use std::ffi::OsString;
use std::fs::read;
use std::io::stdout;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::CommandFactory as _;
use clap::Parser as _;

use anyhow::Context as _;
use anyhow::Result;

use serde_json::from_slice as from_json;
use serde_json::Map;
use serde_json::Value;

use sesmail::system_config;
use sesmail::Config;
use sesmail::Format;
use sesmail::Mailer as _;
use sesmail::Sender;
use sesmail::Ses;
use sesmail::Transport;

use tracing::subscriber::set_global_default as set_global_subscriber;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::FmtSubscriber;

use crate::args::Args;


/// An error indicating that required flags were not provided.
#[derive(Debug, thiserror::Error)]
#[error("missing required flags: {}", .0.join(", "))]
struct MissingFlags(Vec<&'static str>);


/// The content of the email to send.
#[derive(Debug)]
enum Content {
  Body(String),
  Template(PathBuf),
}


fn require<T>(value: Option<T>, flag: &'static str, missing: &mut Vec<&'static str>) -> Option<T> {
  if value.is_none() {
    let () = missing.push(flag);
  }
  value
}


/// Assemble the data to render a template with.
///
/// Variables take precedence over values from the data file.
fn template_data(data: Option<&Path>, vars: Vec<(String, String)>) -> Result<Map<String, Value>> {
  let mut map = if let Some(path) = data {
    let data = read(path)
      .with_context(|| format!("failed to read template data file `{}`", path.display()))?;
    from_json::<Map<String, Value>>(&data).with_context(|| {
      format!(
        "failed to parse `{}` contents as JSON object",
        path.display()
      )
    })?
  } else {
    Map::new()
  };

  for (key, value) in vars {
    let _prev = map.insert(key, Value::String(value));
  }
  Ok(map)
}


/// Send the email described by `args`.
///
/// `connect` creates the transport to use for the configured region.
/// Confirmation of a successful send is written to `out`.
async fn run_impl<C, T, W>(args: Args, connect: C, out: &mut W) -> Result<()>
where
  C: FnOnce(String) -> T,
  T: Transport,
  W: Write,
{
  let Args {
    from,
    region,
    to,
    subject,
    body,
    template,
    format,
    data,
    vars,
    configuration_set,
    charset,
    config,
    verbosity: _,
  } = args;

  let config = if let Some(path) = config {
    Config::load(&path)?
  } else {
    system_config()?.unwrap_or_default()
  };

  let content = body
    .map(Content::Body)
    .or_else(|| template.map(Content::Template));

  let mut missing = Vec::new();
  let from = require(from.or(config.from), "--from", &mut missing);
  let region = require(region.or(config.region), "--region", &mut missing);
  let to = require(to, "--to", &mut missing);
  let subject = require(subject, "--subject", &mut missing);
  let content = require(content, "--body or --template", &mut missing);

  let (Some(from), Some(region), Some(to), Some(subject), Some(content)) =
    (from, region, to, subject, content)
  else {
    return Err(MissingFlags(missing).into())
  };

  let format = match (format, &content) {
    (Some(format), _) => format,
    (None, Content::Template(path)) => path
      .extension()
      .map(|ext| format!(".{}", ext.to_string_lossy()))
      .unwrap_or_default(),
    (None, Content::Body(_)) => ".txt".to_string(),
  };

  let format = Format::from_suffix(&format).context("failed to create sender")?;
  let mut sender = Sender::with_transport(from, format, connect(region))
    .with_configuration_set(configuration_set.or(config.configuration_set));
  if let Some(charset) = charset.or(config.charset) {
    sender = sender.with_charset(charset);
  }

  let message_id = match content {
    Content::Body(body) => sender
      .send(&to, &subject, &body)
      .await
      .with_context(|| format!("failed to send email to {to}"))?,
    Content::Template(path) => {
      let data = template_data(data.as_deref(), vars)?;
      sender
        .send_template(&to, &subject, &path, &data)
        .await
        .with_context(|| format!("failed to send templated email to {to}"))?
    },
  };

  tracing::info!(%message_id, "sent email");
  let () = writeln!(out, "successfully sent message {message_id}")
    .context("failed to write confirmation")?;
  Ok(())
}

fn setup_tracing(verbosity: u8) -> Result<()> {
  let builder =
    FmtSubscriber::builder().with_timer(ChronoLocal::new("%Y-%m-%dT%H:%M:%S%.3f%:z".to_string()));

  if verbosity != 0 {
    let level = match verbosity {
      1 => LevelFilter::INFO,
      2 => LevelFilter::DEBUG,
      _ => LevelFilter::TRACE,
    };
    let subscriber = builder.with_max_level(level).finish();
    let () =
      set_global_subscriber(subscriber).with_context(|| "failed to set tracing subscriber")?;
  } else {
    let directive = var_os(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let directive = directive
      .to_str()
      .with_context(|| format!("env var `{}` is not valid UTF-8", EnvFilter::DEFAULT_ENV))?;

    let subscriber = builder.with_env_filter(EnvFilter::new(directive)).finish();
    let () =
      set_global_subscriber(subscriber).with_context(|| "failed to set tracing subscriber")?;
  }
  Ok(())
}


/// Run the program and report errors, if any.
async fn run<A, T>(args: A) -> Result<()>
where
  A: IntoIterator<Item = T>,
  T: Into<OsString> + Clone,
{
  let args = match Args::try_parse_from(args) {
    Ok(args) => args,
    Err(err) => match err.kind() {
      clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
        print!("{}", err);
        return Ok(())
      },
      _ => return Err(err.into()),
    },
  };

  let () = setup_tracing(args.verbosity)?;

  run_impl(args, |region| Ses::new(region), &mut stdout()).await
}


#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  match run(args_os()).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      if let Some(missing) = err.downcast_ref::<MissingFlags>() {
        eprintln!("{missing}\n");
        eprintln!("{}", Args::command().render_help());
      } else {
        eprintln!("Error: {err:?}");
      }
      ExitCode::FAILURE
    },
  }
}
