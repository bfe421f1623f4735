//! Subreddits command

use anyhow::Result;
use clap::Args;

use modview_core::Category;

use super::context::AppContext;

/// Arguments for the subreddits command
#[derive(Debug, Args)]
pub struct SubredditsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the subreddits command
pub fn execute(args: SubredditsArgs, ctx: &AppContext) -> Result<()> {
    let (store, _) = ctx.load_store(false)?;

    let mut options = vec![Category::ALL_LABEL.to_string()];
    options.extend(store.subreddits());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        for option in &options {
            println!("{}", option);
        }
    }
    Ok(())
}
