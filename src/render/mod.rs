use crate::config::OutputSettings;
use crate::error::{Error, Result};
use crate::feed::NormalizedRecord;
use handlebars::Handlebars;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

const TEMPLATE_NAME: &str = "news";
const DEFAULT_TEMPLATE: &str = include_str!("../../templates/news.hbs");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Json,
    Text,
}

/// Data handed to the text template.
#[derive(Serialize)]
struct TemplateContext<'a> {
    feed_name: &'a str,
    records: &'a [NormalizedRecord],
}

/// Serializes extracted records as JSON or as human-readable text.
pub struct Renderer {
    registry: Handlebars<'static>,
    pretty_json: bool,
}

impl Renderer {
    /// Renderer using the built-in text template.
    pub fn new() -> Result<Self> {
        Self::with_template_str(DEFAULT_TEMPLATE)
    }

    pub fn with_template_str(template: &str) -> Result<Self> {
        let mut registry = Handlebars::new();
        // Output is plain text, so HTML escaping would only mangle it.
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(TEMPLATE_NAME, template)
            .map_err(|e| Error::Template(format!("Invalid template: {}", e)))?;

        Ok(Self {
            registry,
            pretty_json: false,
        })
    }

    pub fn with_template_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading template from {}", path.display());
        let template = std::fs::read_to_string(path).map_err(|e| {
            Error::Template(format!("Cannot read template {}: {}", path.display(), e))
        })?;
        Self::with_template_str(&template)
    }

    pub fn from_settings(settings: &OutputSettings) -> Result<Self> {
        let renderer = match &settings.template {
            Some(path) => Self::with_template_file(path)?,
            None => Self::new()?,
        };
        Ok(renderer.with_pretty_json(settings.pretty_json))
    }

    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }

    pub fn render(
        &self,
        feed_name: &str,
        records: &[NormalizedRecord],
        mode: OutputMode,
    ) -> Result<String> {
        match mode {
            OutputMode::Json => self.render_json(records),
            OutputMode::Text => self.render_text(feed_name, records),
        }
    }

    /// JSON array of records. The caller has already applied the limit.
    pub fn render_json(&self, records: &[NormalizedRecord]) -> Result<String> {
        let json = if self.pretty_json {
            serde_json::to_string_pretty(records)?
        } else {
            serde_json::to_string(records)?
        };
        Ok(json)
    }

    pub fn render_text(&self, feed_name: &str, records: &[NormalizedRecord]) -> Result<String> {
        let context = TemplateContext { feed_name, records };
        self.registry
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| Error::Template(format!("Failed to render template: {}", e)))
    }
}
