//! Template rendering with Tera
//!
//! The template set is every `*.html` file in the template directory,
//! addressed by file name (`index.html`, `default.html`, ...).

use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tera::{Context, Tera, Value};

use crate::content::{Post, User};
use crate::error::{Error, Result};
use crate::helpers;

/// A loaded template set
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Load all `*.html` templates in `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let pattern = dir.join("*.html");
        let mut tera = Tera::new(&pattern.to_string_lossy())?;
        register_filters(&mut tera);
        tracing::debug!(
            "Loaded templates: {:?}",
            tera.get_template_names().collect::<Vec<_>>()
        );
        Ok(Self { tera })
    }

    /// Build a renderer from in-memory templates
    pub fn from_raw(templates: Vec<(&str, &str)>) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates)?;
        register_filters(&mut tera);
        Ok(Self { tera })
    }

    /// Render a template with given data
    pub fn render<T: Serialize>(&self, template_name: &str, data: &T) -> Result<String> {
        let context = Context::from_serialize(data)?;
        Ok(self.tera.render(template_name, &context)?)
    }

    /// Render a template into `dst`, creating or truncating it
    pub fn render_to<T: Serialize>(&self, dst: &Path, template_name: &str, data: &T) -> Result<()> {
        let html = self.render(template_name, data).map_err(|e| {
            tracing::error!("Failed to render {:?}", dst);
            e
        })?;

        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(dst, html).map_err(|e| Error::io(dst, e))?;
        tracing::debug!("Wrote {:?}", dst);
        Ok(())
    }
}

fn register_filters(tera: &mut Tera) {
    tera.register_filter("format_date", format_date_filter);
    tera.register_filter("short_date", short_date_filter);
    tera.register_filter("print_bytes", print_bytes_filter);
    tera.register_filter("join_tags", JoinTags);
    tera.register_filter("print_html", PrintHtml);
    tera.register_filter("lop", lop_filter);
    tera.register_filter("has_title", has_title_filter);
}

/// Read a serialized post date back
fn date_arg(filter: &str, value: &Value) -> tera::Result<helpers::PostDate> {
    let s = tera::try_get_value!(filter, "value", String, value);
    helpers::parse_rfc1123(&s)
        .map_err(|e| tera::Error::msg(format!("Filter `{}`: invalid date {:?}: {}", filter, s, e)))
}

/// Tera filter: RFC 1123 date, zone as written
fn format_date_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let date = date_arg("format_date", value)?;
    Ok(Value::String(helpers::format_rfc1123(&date)))
}

/// Tera filter: "January  2, 2006"
fn short_date_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let date = date_arg("short_date", value)?;
    Ok(Value::String(helpers::short_date(&date)))
}

/// Tera filter: byte array (or string) to string
fn print_bytes_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    match value {
        Value::String(_) => Ok(value.clone()),
        Value::Array(_) => {
            let bytes = tera::try_get_value!("print_bytes", "value", Vec<u8>, value);
            Ok(Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        }
        Value::Null => Ok(Value::String(String::new())),
        _ => Err(tera::Error::msg(
            "Filter `print_bytes` expects a string or an array of bytes",
        )),
    }
}

/// Tera filter: tag objects (or names) to "a, b, c". Output is not escaped.
struct JoinTags;

impl tera::Filter for JoinTags {
    fn filter(&self, value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        let tags = tera::try_get_value!("join_tags", "value", Vec<Value>, value);
        let names: Vec<String> = tags
            .iter()
            .map(|tag| match tag {
                Value::String(name) => name.clone(),
                other => other
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect();
        Ok(Value::String(names.join(", ")))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Tera filter: emit rendered HTML as is
struct PrintHtml;

impl tera::Filter for PrintHtml {
    fn filter(&self, value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
        print_bytes_filter(value, args)
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Tera filter: `lop(start=0, end=5)`, a slice that never runs past the end
fn lop_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let items = tera::try_get_value!("lop", "value", Vec<Value>, value);
    let start = match args.get("start") {
        Some(val) => tera::try_get_value!("lop", "start", usize, val),
        None => 0,
    };
    let end = match args.get("end") {
        Some(val) => tera::try_get_value!("lop", "end", usize, val),
        None => items.len(),
    };
    Ok(Value::Array(helpers::lop(&items, start, end).to_vec()))
}

/// Tera filter: whether a title is set
fn has_title_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let title = tera::try_get_value!("has_title", "value", String, value);
    Ok(Value::Bool(!title.is_empty()))
}

/// Data for a single post page (`default.html`)
#[derive(Debug, Serialize)]
pub struct PostPage<'a> {
    pub content: &'a Post,
}

/// Data for the listing pages (`index.html`, `about.html`, ...)
#[derive(Debug, Serialize)]
pub struct ListPage<'a> {
    pub title: &'a str,
    pub posts: &'a [Post],
    pub author: &'a User,
}
