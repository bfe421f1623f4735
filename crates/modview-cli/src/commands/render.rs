//! Render command
//!
//! Build the unmoderated and/or moderated views and export them.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

use modview_core::export::{ExportManager, HtmlExporter, MarkdownExporter};
use modview_core::view::{ViewBuilder, MAX_INDENT_DEPTH_LIMIT};
use modview_core::{Category, ViewMode};

use super::context::AppContext;

/// Which views to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewSelection {
    /// Original conversations only
    Unmoderated,
    /// Moderated conversations only
    Moderated,
    /// Both views, unmoderated first
    Both,
}

impl ViewSelection {
    /// View modes in display order
    pub fn modes(&self) -> Vec<ViewMode> {
        match self {
            ViewSelection::Unmoderated => vec![ViewMode::Unmoderated],
            ViewSelection::Moderated => vec![ViewMode::Moderated],
            ViewSelection::Both => ViewMode::ALL.to_vec(),
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone HTML page
    Html,
    /// Markdown document
    Markdown,
    /// JSON render instructions
    Json,
    /// Indented plain text
    Text,
}

impl OutputFormat {
    /// Exporter format name
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}

/// Arguments for the render command
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Subreddit to show ("All" for every subreddit)
    #[arg(long, short)]
    pub subreddit: Option<String>,

    /// Views to render
    #[arg(long, value_enum)]
    pub view: Option<ViewSelection>,

    /// Output format
    #[arg(long, short, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Deepest indentation level
    #[arg(
        long,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new()
            .range(0..=MAX_INDENT_DEPTH_LIMIT as u64)
    )]
    pub max_depth: Option<usize>,

    /// Leave out the per-view statistics in Markdown output
    #[arg(long)]
    pub no_stats: bool,

    /// Fail when the two datasets differ in structure
    #[arg(long)]
    pub strict: bool,
}

/// Execute the render command
pub fn execute(args: RenderArgs, ctx: &AppContext) -> Result<()> {
    use colored::Colorize;

    let render = &ctx.config.render;

    let format = match args.format {
        Some(format) => format,
        None => OutputFormat::from_str(&render.default_format, true)
            .map_err(|e| anyhow::anyhow!("Invalid render.default_format: {}", e))?,
    };
    let selection = match args.view {
        Some(view) => view,
        None => ViewSelection::from_str(&render.default_view, true)
            .map_err(|e| anyhow::anyhow!("Invalid render.default_view: {}", e))?,
    };
    let category = Category::from(
        args.subreddit
            .as_deref()
            .unwrap_or(&ctx.config.filter.default_subreddit),
    );

    let (store, _) = ctx.load_store(args.strict)?;

    let mut builder = ViewBuilder::from_config(render);
    if let Some(depth) = args.max_depth {
        builder = builder.with_max_indent_depth(depth);
    }
    let doc = builder.build_document(&store, &category, &selection.modes());

    if doc.is_empty() {
        eprintln!(
            "{} No threads found for subreddit '{}'",
            "⚠".yellow(),
            category.label().cyan()
        );
    }

    let mut export_manager = ExportManager::new();
    export_manager.register(Box::new(
        HtmlExporter::new().with_indent_px(render.indent_px),
    ));
    export_manager.register(Box::new(MarkdownExporter::new().with_stats(!args.no_stats)));

    if let Some(output_path) = args.output {
        let written = export_manager
            .export_to_file(&doc, format.name(), &output_path)
            .with_context(|| format!("Failed to write to {}", output_path.display()))?;
        eprintln!(
            "{} Rendered {} thread(s) to {}",
            "✓".green(),
            doc.views.first().map(|v| v.threads.len()).unwrap_or(0),
            written.display()
        );
    } else {
        let output = export_manager.export(&doc, format.name())?;
        std::io::stdout()
            .write_all(output.as_bytes())
            .context("Failed to write to stdout")?;
    }

    Ok(())
}
