// Copyright (C) 2026 The sesmail Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::borrow::Cow;
use std::error::Error;
use std::fs::read_to_string;
use std::path::Path;

use serde::Serialize;

use tera::Context;
use tera::Tera;

use crate::RenderError;


fn is_ident(c: char) -> bool {
  c.is_alphanumeric() || c == '_'
}


/// Rewrite leading-dot field references (`{{.Name}}`,
/// `{% if .User.Admin %}`) inside tags into plain variable references
/// (`{{Name}}`, `{% if User.Admin %}`).
///
/// Text outside of tags as well as string literals are left untouched.
fn rewrite_field_access(template: &str) -> Cow<'_, str> {
  let mut out = String::with_capacity(template.len());
  let mut changed = false;
  let mut close = None;
  let mut quote = None;
  let mut prev = ' ';
  let mut chars = template.char_indices().peekable();

  while let Some((idx, c)) = chars.next() {
    let rest = &template[idx..];
    if let Some(end) = close {
      if let Some(q) = quote {
        if c == q {
          quote = None;
        }
      } else if rest.starts_with(end) {
        close = None;
      } else if matches!(c, '"' | '\'' | '`') {
        quote = Some(c);
      } else if c == '.'
        && !is_ident(prev)
        && !matches!(prev, ')' | ']')
        && chars
          .peek()
          .is_some_and(|(_, next)| next.is_alphabetic() || *next == '_')
      {
        changed = true;
        prev = c;
        continue
      }
    } else if rest.starts_with("{{") {
      close = Some("}}");
    } else if rest.starts_with("{%") {
      close = Some("%}");
    }

    let () = out.push(c);
    prev = c;
  }

  if changed {
    Cow::Owned(out)
  } else {
    Cow::Borrowed(template)
  }
}


/// Load the template at `path` and render it using `data`.
///
/// `data` has to serialize into a map, with its keys becoming the
/// variables available to the template. Fields may be referenced either
/// as `{{ Name }}` or as `{{.Name}}`. No auto-escaping is performed,
/// irrespective of the template's file extension.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(data), err))]
pub fn render<D>(path: &Path, data: &D) -> Result<String, RenderError>
where
  D: Serialize + ?Sized,
{
  let parse_err = |source: Box<dyn Error + Send + Sync>| RenderError::Parse {
    path: path.to_path_buf(),
    source,
  };
  let exec_err = |source: Box<dyn Error + Send + Sync>| RenderError::Exec {
    path: path.to_path_buf(),
    source,
  };

  let content = read_to_string(path).map_err(|err| parse_err(err.into()))?;
  let content = rewrite_field_access(&content);
  let name = path.to_string_lossy();

  let mut tera = Tera::default();
  let () = tera.autoescape_on(Vec::new());
  let () = tera
    .add_raw_template(&name, &content)
    .map_err(|err| parse_err(err.into()))?;

  let context = Context::from_serialize(data).map_err(|err| exec_err(err.into()))?;
  let body = tera
    .render(&name, &context)
    .map_err(|err| exec_err(err.into()))?;
  Ok(body)
}


#[cfg(test)]
mod tests {
  use super::*;

  use std::collections::HashMap;
  use std::path::PathBuf;

  use serde_json::json;


  fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
      .join("tests")
      .join("data")
      .join(name)
  }


  /// Check that leading-dot field references are rewritten inside of
  /// tags only.
  #[test]
  fn field_access_rewriting() {
    let tests = [
      ("Hello {{.Name}}", "Hello {{Name}}"),
      ("{{ .User.Email }}", "{{ User.Email }}"),
      ("{{- .Name -}}", "{{- Name -}}"),
      ("{% if .Admin %}x{% endif %}", "{% if Admin %}x{% endif %}"),
      ("{{ user.name }}", "{{ user.name }}"),
      ("{{ items[0].name }}", "{{ items[0].name }}"),
      ("{{ 1.5 }}", "{{ 1.5 }}"),
      (r#"{{ "a .b" ~ .c }}"#, r#"{{ "a .b" ~ c }}"#),
      ("Hi .Name, {# .Name #}", "Hi .Name, {# .Name #}"),
      ("{{ .Name", "{{ Name"),
    ];

    for (template, expected) in tests {
      assert_eq!(rewrite_field_access(template), expected, "{template}");
    }

    assert!(matches!(
      rewrite_field_access("{{ Name }}"),
      Cow::Borrowed(_)
    ));
  }

  /// Check that a simple template gets rendered as expected.
  #[test]
  fn render_greeting() {
    #[derive(Serialize)]
    #[allow(non_snake_case)]
    struct Data {
      Name: &'static str,
    }

    let body = render(&data_path("greeting.txt"), &Data { Name: "Ann" }).unwrap();
    assert_eq!(body, "Hello Ann");

    let data = HashMap::from([("Name", "Bob")]);
    let body = render(&data_path("greeting.txt"), &data).unwrap();
    assert_eq!(body, "Hello Bob");

    let data = json!({"User": {"Name": "Ann", "Team": "Ops"}});
    let body = render(&data_path("nested.txt"), &data).unwrap();
    assert_eq!(body, "Ann (Ops)");
  }

  /// Make sure that HTML templates are not escaped.
  #[test]
  fn render_html_unescaped() {
    let data = json!({"name": "<b>Ann</b>", "items": ["one", "two"]});
    let body = render(&data_path("welcome.html"), &data).unwrap();
    assert!(body.contains("<p>Welcome, <b>Ann</b>!</p>"), "{body}");
    assert!(body.contains("<li>one</li>"), "{body}");
    assert!(body.contains("<li>two</li>"), "{body}");
  }

  /// Check that a missing template file is reported as a parse error.
  #[test]
  fn render_missing_file() {
    let path = data_path("does-not-exist.txt");
    let err = render(&path, &json!({})).unwrap_err();
    assert!(matches!(&err, RenderError::Parse { path: p, .. } if p == &path));
  }

  /// Check that syntactically invalid templates are rejected.
  #[test]
  fn render_invalid_syntax() {
    let err = render(&data_path("broken.txt"), &json!({"Name": "Ann"})).unwrap_err();
    assert!(matches!(err, RenderError::Parse { .. }), "{err:?}");
  }

  /// Check that referencing an unknown variable fails execution.
  #[test]
  fn render_missing_variable() {
    let err = render(&data_path("greeting.txt"), &json!({"Other": "x"})).unwrap_err();
    assert!(matches!(err, RenderError::Exec { .. }), "{err:?}");

    // Data has to be map-like.
    let err = render(&data_path("greeting.txt"), &json!(["Ann"])).unwrap_err();
    assert!(matches!(err, RenderError::Exec { .. }), "{err:?}");
  }
}
