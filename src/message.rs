// Copyright (C) 2026 The sesmail Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::Error;
use crate::Format;


/// The charset used for subject and body unless configured otherwise.
pub const DEFAULT_CHARSET: &str = "UTF-8";


/// A single email message, ready to be assembled into a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Email {
  from: String,
  to: String,
  subject: String,
  body: String,
  format: Format,
}

impl Email {
  /// Create a new email message.
  ///
  /// The body is required to be non-empty.
  pub fn new(
    from: impl Into<String>,
    to: impl Into<String>,
    subject: impl Into<String>,
    body: impl Into<String>,
    format: Format,
  ) -> Result<Self, Error> {
    let body = body.into();
    if body.is_empty() {
      return Err(Error::EmptyBody)
    }

    Ok(Self {
      from: from.into(),
      to: to.into(),
      subject: subject.into(),
      body,
      format,
    })
  }

  /// Assemble a provider-shaped request from the message, consuming it.
  pub fn assemble(self, charset: &str, configuration_set: Option<&str>) -> SendRequest {
    let Self {
      from,
      to,
      subject,
      body,
      format,
    } = self;

    let content = Content::new(charset, body);
    let body = match format {
      Format::Text => Body {
        text: Some(content),
        html: None,
      },
      Format::Html => Body {
        text: None,
        html: Some(content),
      },
    };

    SendRequest {
      source: from,
      destination: Destination {
        to: vec![to],
        cc: Vec::new(),
      },
      message: Message {
        subject: Content::new(charset, subject),
        body,
      },
      configuration_set: configuration_set.map(str::to_string),
    }
  }
}


/// Text with an associated charset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Content {
  pub charset: String,
  pub data: String,
}

impl Content {
  fn new(charset: &str, data: String) -> Self {
    Self {
      charset: charset.to_string(),
      data,
    }
  }
}


/// A message body, keyed by content type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Body {
  pub text: Option<Content>,
  pub html: Option<Content>,
}


#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
  pub subject: Content,
  pub body: Body,
}


/// The recipients of a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
  pub to: Vec<String>,
  pub cc: Vec<String>,
}


/// A fully assembled "send email" request.
///
/// The shape mirrors what the delivery API expects, but the type is
/// independent of any SDK so that it can be inspected and sent through
/// arbitrary transports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendRequest {
  /// The sender address.
  pub source: String,
  pub destination: Destination,
  pub message: Message,
  /// The name of the configuration set to apply, if any.
  pub configuration_set: Option<String>,
}


#[cfg(test)]
mod tests {
  use super::*;


  /// Check that plain text messages populate the text body only.
  #[test]
  fn assemble_text() {
    let email = Email::new(
      "sender@example.com",
      "ann@example.com",
      "Greetings",
      "Hello Ann",
      Format::Text,
    )
    .unwrap();
    let request = email.assemble(DEFAULT_CHARSET, None);

    let expected = SendRequest {
      source: "sender@example.com".to_string(),
      destination: Destination {
        to: vec!["ann@example.com".to_string()],
        cc: Vec::new(),
      },
      message: Message {
        subject: Content {
          charset: "UTF-8".to_string(),
          data: "Greetings".to_string(),
        },
        body: Body {
          text: Some(Content {
            charset: "UTF-8".to_string(),
            data: "Hello Ann".to_string(),
          }),
          html: None,
        },
      },
      configuration_set: None,
    };
    assert_eq!(request, expected);
  }

  /// Check that HTML messages populate the HTML body only.
  #[test]
  fn assemble_html() {
    let email = Email::new("a@b.c", "d@e.f", "Hi", "<p>Hi</p>", Format::Html).unwrap();
    let request = email.assemble("ISO-8859-1", Some("tracking"));

    assert_eq!(request.message.body.text, None);
    let html = request.message.body.html.unwrap();
    assert_eq!(html.data, "<p>Hi</p>");
    assert_eq!(html.charset, "ISO-8859-1");
    assert_eq!(request.message.subject.charset, "ISO-8859-1");
    assert_eq!(request.configuration_set.as_deref(), Some("tracking"));
  }

  /// Make sure that we reject empty bodies.
  #[test]
  fn empty_body() {
    let err = Email::new("a@b.c", "d@e.f", "Hi", "", Format::Text).unwrap_err();
    assert!(matches!(err, Error::EmptyBody));
  }
}
