//! Threads command
//!
//! List the threads of a subreddit with their sizes.

use anyhow::Result;
use clap::Args;
use serde_json::json;

use modview_core::record::RecordView;
use modview_core::thread::assemble_thread;
use modview_core::{Category, ThreadId, ViewMode};

use super::context::AppContext;

/// Arguments for the threads command
#[derive(Debug, Args)]
pub struct ThreadsArgs {
    /// Subreddit to list ("All" for every subreddit)
    #[arg(long, short)]
    pub subreddit: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Summary of one thread across both views
struct ThreadSummary {
    thread_id: ThreadId,
    subreddit: String,
    records: usize,
    shown: usize,
    flagged: usize,
}

impl ThreadSummary {
    fn collect(view: &RecordView<'_>, thread_id: ThreadId) -> Self {
        let records = view.records_for_thread(ViewMode::Unmoderated, thread_id);
        let moderated = view.records_for_thread(ViewMode::Moderated, thread_id);
        let ordered = assemble_thread(records.iter().copied());

        Self {
            thread_id,
            subreddit: ordered
                .first()
                .map(|e| e.record.subreddit.clone())
                .unwrap_or_default(),
            records: records.len(),
            shown: ordered.len(),
            flagged: moderated.iter().filter(|r| r.flagged).count(),
        }
    }
}

/// Execute the threads command
pub fn execute(args: ThreadsArgs, ctx: &AppContext) -> Result<()> {
    use colored::Colorize;

    let category = Category::from(
        args.subreddit
            .as_deref()
            .unwrap_or(&ctx.config.filter.default_subreddit),
    );
    let (store, _) = ctx.load_store(false)?;
    let view = store.filter_by_category(&category);

    let summaries: Vec<ThreadSummary> = view
        .thread_ids()
        .into_iter()
        .map(|id| ThreadSummary::collect(&view, id))
        .collect();

    if args.json {
        let items: Vec<_> = summaries
            .iter()
            .map(|s| {
                json!({
                    "thread_id": s.thread_id,
                    "post_number": s.thread_id.post_number(),
                    "subreddit": s.subreddit,
                    "records": s.records,
                    "shown": s.shown,
                    "flagged": s.flagged,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!("No threads found for subreddit '{}'.", category);
        return Ok(());
    }

    println!(
        "{}",
        format!("Threads in {}:", category).bold().underline()
    );
    println!();

    for s in &summaries {
        let hidden = s.records.saturating_sub(s.shown);
        let mut line = format!(
            "  {} {} ({} comments, {} flagged)",
            format!("Post {}", s.thread_id.post_number()).green(),
            s.subreddit.cyan(),
            s.shown.saturating_sub(1),
            s.flagged
        );
        if hidden > 0 {
            line.push_str(&format!(" {}", format!("[{} unreachable]", hidden).yellow()));
        }
        println!("{}", line);
    }

    println!();
    println!("{} thread(s)", summaries.len());
    Ok(())
}
