//! Check command
//!
//! Load both datasets, report thread anomalies and structural parity.

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use modview_core::record::{list_thread_ids, records_for_thread, Dataset, ParityReport};
use modview_core::thread::assemble_thread;
use modview_core::ThreadId;

use super::context::AppContext;

/// Arguments for the check command
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Per-dataset health figures
#[derive(Debug, Serialize)]
struct DatasetHealth {
    mode: String,
    records: usize,
    threads: usize,
    flagged: usize,
    /// Threads without exactly one root
    irregular_roots: Vec<ThreadId>,
    /// Records not reachable from their thread's root
    unreachable: usize,
}

impl DatasetHealth {
    fn inspect(dataset: &Dataset) -> Self {
        let thread_ids = list_thread_ids(dataset.records());
        let mut irregular_roots = Vec::new();
        let mut unreachable = 0;

        for thread_id in &thread_ids {
            let records = records_for_thread(dataset.records(), *thread_id);
            let roots = records.iter().filter(|r| r.is_root()).count();
            if roots != 1 {
                irregular_roots.push(*thread_id);
            }
            unreachable += records.len() - assemble_thread(records.iter().copied()).len();
        }

        Self {
            mode: dataset.mode().to_string(),
            records: dataset.len(),
            threads: thread_ids.len(),
            flagged: dataset.flagged_count(),
            irregular_roots,
            unreachable,
        }
    }

    fn is_regular(&self) -> bool {
        self.irregular_roots.is_empty() && self.unreachable == 0
    }
}

#[derive(Debug, Serialize)]
struct CheckReport {
    datasets: Vec<DatasetHealth>,
    parity: ParityReport,
}

/// Execute the check command
pub fn execute(args: CheckArgs, ctx: &AppContext) -> Result<()> {
    use colored::Colorize;
    use modview_core::ViewMode;

    let (store, parity) = ctx.load_store(false)?;
    let report = CheckReport {
        datasets: ViewMode::ALL
            .iter()
            .map(|mode| DatasetHealth::inspect(store.dataset(*mode)))
            .collect(),
        parity,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for health in &report.datasets {
            println!("\n{}", format!("{} dataset", health.mode).bold().underline());
            println!("  Records:  {}", health.records);
            println!("  Threads:  {}", health.threads);
            println!("  Flagged:  {}", health.flagged);
            if health.is_regular() {
                println!("  {} Every thread has one root and no orphans", "✓".green());
            } else {
                if !health.irregular_roots.is_empty() {
                    let ids: Vec<String> =
                        health.irregular_roots.iter().map(|t| t.to_string()).collect();
                    println!(
                        "  {} Threads without exactly one root: {}",
                        "⚠".yellow(),
                        ids.join(", ")
                    );
                }
                if health.unreachable > 0 {
                    println!(
                        "  {} {} record(s) unreachable from their root (not shown)",
                        "⚠".yellow(),
                        health.unreachable
                    );
                }
            }
        }

        println!("\n{}", "Structural parity".bold().underline());
        if report.parity.is_clean() {
            println!("  {} {}", "✓".green(), report.parity.summary());
        } else {
            println!("  {} {}", "✗".red(), report.parity.summary());
            for id in &report.parity.only_in_unmoderated {
                println!("    comment {} missing from moderated dataset", id);
            }
            for id in &report.parity.only_in_moderated {
                println!("    comment {} missing from unmoderated dataset", id);
            }
            for mismatch in &report.parity.mismatches {
                println!("    {}", mismatch);
            }
        }
        println!();
    }

    if !report.parity.is_clean() {
        bail!(
            "Datasets differ in structure ({} issue(s))",
            report.parity.issue_count()
        );
    }
    Ok(())
}
