// Copyright (C) 2026 The sesmail Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::str::FromStr;

use crate::Error;


/// The format of a message body.
///
/// The format decides which content-type field of the request body is
/// populated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
  /// A `text/plain` body.
  Text,
  /// A `text/html` body.
  Html,
}

impl Format {
  /// Parse a file-suffix style format specification.
  ///
  /// Accepted are `.txt`, `.text`, and `.html`.
  pub fn from_suffix(suffix: &str) -> Result<Self, Error> {
    match suffix {
      ".txt" | ".text" => Ok(Self::Text),
      ".html" => Ok(Self::Html),
      _ => Err(Error::UndefinedSender(suffix.to_string())),
    }
  }

  /// Retrieve the internal tag for the format.
  pub fn tag(&self) -> &'static str {
    match self {
      Self::Text => "txt",
      Self::Html => "html",
    }
  }
}

impl FromStr for Format {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::from_suffix(s)
  }
}

impl Display for Format {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.write_str(self.tag())
  }
}


#[cfg(test)]
mod tests {
  use super::*;


  /// Check that all known suffixes map to the expected tag.
  #[test]
  fn known_suffixes() {
    let suffixes = [(".txt", "txt"), (".text", "txt"), (".html", "html")];
    for (suffix, tag) in suffixes {
      let format = Format::from_suffix(suffix).unwrap();
      assert_eq!(format.tag(), tag, "{suffix}");
    }
  }

  /// Make sure that unknown suffixes are rejected.
  #[test]
  fn unknown_suffixes() {
    for suffix in ["txt", ".htm", ".md", "", ".HTML", ". txt"] {
      let err = Format::from_suffix(suffix).unwrap_err();
      assert!(matches!(&err, Error::UndefinedSender(s) if s == suffix));
      assert_eq!(err.to_string(), format!("undefined sender: '{suffix}'"));
    }
  }
}
