//! Renderer module
//!
//! Renders cache reports to the supported output formats: jsonl, json, md

use serde::Serialize;

use crate::core::model::CachedEntry;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// What a command found out about one URL
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub url: String,
    pub key: String,
    pub path: String,

    /// hit/miss/stale for `get`, missing/fresh/stale for `inspect`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Age of the entry at report time, e.g. `5m12s`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<CachedEntry>,
}

/// Renderer for reports
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, report: &Report) -> String {
        match self.config.format {
            OutputFormat::Jsonl | OutputFormat::Json => self.render_json(report),
            OutputFormat::Markdown => self.render_markdown(report),
        }
    }

    /// jsonl is a single compact line unless pretty is set; json is always pretty
    fn render_json(&self, report: &Report) -> String {
        let pretty = self.config.pretty || self.config.format == OutputFormat::Json;
        let rendered = if pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        rendered.unwrap_or_else(|_| "{}".to_string())
    }

    fn render_markdown(&self, report: &Report) -> String {
        let mut output = String::new();

        match &report.entry {
            Some(entry) => output.push_str(&format!("# {}\n\n", entry.feed.title)),
            None => output.push_str(&format!("# {}\n\n", report.url)),
        }

        output.push_str(&format!("- **URL**: {}\n", report.url));
        output.push_str(&format!("- **Key**: `{}`\n", report.key));
        output.push_str(&format!("- **Path**: `{}`\n", report.path));
        if let Some(status) = &report.status {
            output.push_str(&format!("- **Status**: {}\n", status));
        }
        if let Some(age) = &report.age {
            output.push_str(&format!("- **Age**: {}\n", age));
        }

        if let Some(entry) = &report.entry {
            output.push_str(&format!("- **Fetched**: {}\n", entry.fetched_at.to_rfc3339()));
            output.push('\n');

            if !entry.feed.description.is_empty() {
                output.push_str(&entry.feed.description);
                output.push_str("\n\n");
            }

            if !entry.feed.items.is_empty() {
                output.push_str("## Items\n\n");
                for item in &entry.feed.items {
                    let title = item.title.as_deref().unwrap_or("(untitled)");
                    match &item.link {
                        Some(link) => output.push_str(&format!("- [{}]({})", title, link)),
                        None => output.push_str(&format!("- {}", title)),
                    }
                    if let Some(date) = &item.pub_date {
                        output.push_str(&format!(" ({})", date));
                    }
                    output.push('\n');
                }
            }
        }

        output
    }
}
