//! Renderer module
//!
//! Renders report items to text, jsonl or json. Text and jsonl are streamed
//! item by item so that interactive prompts interleave with the output; json
//! is emitted as one array once the run is over.

use colored::Colorize;
use serde::Serialize;

use crate::core::model::{Kind, ReportItem, ReportSet, Summary};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    /// Hide per-document details in text output
    pub quiet: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self {
            pretty,
            ..Self::new(format)
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

/// Where a rendered item goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Stdout(String),
    Stderr(String),
    Nothing,
}

#[derive(Serialize)]
struct SummaryRecord<'a> {
    kind: &'static str,
    #[serde(flatten)]
    summary: &'a Summary,
}

/// Renderer for report items
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Print one item as soon as it is produced
    pub fn emit_item(&self, item: &ReportItem) {
        if matches!(item.kind, Kind::Error) && self.config.format != OutputFormat::Text {
            // Machine formats keep stdout parseable; still tell the user
            if let Some(error) = item.errors.first() {
                eprintln!("error: {}", error.message);
            }
        }

        match self.render_item(item) {
            Rendered::Stdout(s) => println!("{}", s),
            Rendered::Stderr(s) => eprintln!("{}", s),
            Rendered::Nothing => {}
        }
    }

    /// Print what is left once the run is over
    pub fn emit_final(&self, report: &ReportSet) {
        println!("{}", self.render_final(report));
    }

    /// Render a single item for streaming formats
    pub fn render_item(&self, item: &ReportItem) -> Rendered {
        match self.config.format {
            OutputFormat::Text => self.render_item_text(item),
            OutputFormat::Jsonl => Rendered::Stdout(self.to_json(item)),
            OutputFormat::Json => Rendered::Nothing,
        }
    }

    /// Render the closing output: summary line, summary record or the full array
    pub fn render_final(&self, report: &ReportSet) -> String {
        let summary = report.summary();
        match self.config.format {
            OutputFormat::Text => render_summary_text(&summary),
            OutputFormat::Jsonl => self.to_json(&summary_record(&summary)),
            OutputFormat::Json => {
                let mut values: Vec<serde_json::Value> = report
                    .items
                    .iter()
                    .filter_map(|item| serde_json::to_value(item).ok())
                    .collect();
                if let Ok(value) = serde_json::to_value(summary_record(&summary)) {
                    values.push(value);
                }
                self.to_json(&values)
            }
        }
    }

    fn to_json<T: Serialize>(&self, value: &T) -> String {
        let rendered = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| "null".to_string())
    }

    fn render_item_text(&self, item: &ReportItem) -> Rendered {
        let path = item.path.as_deref().unwrap_or_default();
        match item.kind {
            Kind::Document if self.config.quiet => Rendered::Nothing,
            Kind::Document => Rendered::Stdout(render_document_text(item)),
            Kind::WouldDelete => Rendered::Stdout(format!(
                "  {} {}",
                "would delete".yellow(),
                path
            )),
            Kind::Deleted => Rendered::Stdout(format!("  {}      {}", "deleted".green(), path)),
            Kind::Kept => {
                let mut line = format!("  {}         {}", "kept".dimmed(), path);
                if let Some(error) = item.errors.first() {
                    line.push_str(&format!(" ({})", error.message));
                }
                Rendered::Stdout(line)
            }
            Kind::Failed => {
                let reason = item
                    .errors
                    .first()
                    .map(|e| e.message.as_str())
                    .unwrap_or("unknown error");
                Rendered::Stdout(format!(
                    "  {}       {} ({})",
                    "failed".red().bold(),
                    path,
                    reason
                ))
            }
            Kind::Error => {
                let message = item
                    .errors
                    .first()
                    .map(|e| e.message.clone())
                    .unwrap_or_else(|| "unknown error".to_string());
                Rendered::Stderr(format!("{} {}", "error:".red().bold(), message))
            }
            Kind::Warning => {
                let reason = item
                    .errors
                    .first()
                    .map(|e| e.message.as_str())
                    .unwrap_or("ignored");
                Rendered::Stderr(format!("{} ignoring {} ({})", "warning:".yellow(), path, reason))
            }
        }
    }
}

fn summary_record(summary: &Summary) -> SummaryRecord<'_> {
    SummaryRecord {
        kind: "summary",
        summary,
    }
}

fn render_document_text(item: &ReportItem) -> String {
    let document = item.document.as_deref().unwrap_or_default();
    let mut output = document.bold().to_string();

    let Some(meta) = &item.meta else {
        return output;
    };
    let asset_dir = meta.asset_dir.as_deref().unwrap_or_default();

    if !meta.asset_dir_exists {
        output.push_str(&format!("\n  no asset directory {} (skipped)", asset_dir));
        return output;
    }

    output.push_str(&format!(
        "\n  assets: {} ({} file(s), {} unused)",
        asset_dir, meta.asset_count, meta.unused_count
    ));
    if meta.references.is_empty() {
        output.push_str("\n  referenced: (none)");
    } else {
        output.push_str(&format!(
            "\n  referenced ({}): {}",
            meta.references.len(),
            meta.references.join(", ")
        ));
    }
    if meta.unused_count == 0 {
        output.push_str("\n  no unused files");
    }
    output
}

fn render_summary_text(summary: &Summary) -> String {
    if summary.dry_run {
        return format!(
            "Dry run: {} file(s) would be deleted, nothing was removed.",
            summary.would_delete
        );
    }

    let mut line = format!(
        "Finished. {} file(s) deleted, {} kept, {} failed.",
        summary.deleted, summary.kept, summary.failed
    );
    if summary.aborted {
        line.push_str(" Aborted by user.");
    }
    line
}
