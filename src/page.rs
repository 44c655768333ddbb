//! Standalone HTML export of the response panel.

use std::fs;
use std::path::Path;

use tera::{Context, Tera};

use crate::error::{Error, Result};
use crate::markup::Markup;

/// The export page.  `panel` is serialized (and escaped) by [`Markup::to_html`]
/// before it gets here, so it is inserted as-is.
const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
<style>
body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; }
#responseContent { border: 1px solid #ccc; border-radius: 6px; padding: 1rem; }
.qa-entry p { margin: 0.25rem 0; white-space: pre-wrap; }
.news-list { list-style: none; padding: 0; }
.news-item { padding: 0.4rem 0; border-bottom: 1px solid #eee; }
.sentiment { display: inline-block; padding: 0 0.5rem; border-radius: 999px; font-size: 0.8rem; color: #fff; background: #888; }
.sentiment.positive { background: #2e7d32; }
.sentiment.negative { background: #c62828; }
.sentiment.neutral { background: #757575; }
.score, .textblob { color: #777; font-size: 0.8rem; }
.error { color: #c62828; }
.placeholder { color: #777; font-style: italic; }
</style>
</head>
<body>
<h1>{{ title }}</h1>
<div id="responseContent">{{ panel | safe }}</div>
</body>
</html>
"#;

/// Wraps panel markup in a complete HTML document.
pub fn render_document(title: &str, panel: &Markup) -> Result<String> {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("panel", &panel.to_html());
    Tera::one_off(PAGE_TEMPLATE, &context, true)
        .map_err(|err| Error::template("failed to render export page", err))
}

/// Writes [`render_document`] to `path`.
pub fn export_to<P: AsRef<Path>>(path: P, title: &str, panel: &Markup) -> Result<()> {
    let document = render_document(title, panel)?;
    fs::write(path.as_ref(), document)
        .map_err(|err| Error::io("failed to write export file", err))
}
