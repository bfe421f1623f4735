//! modview - moderated forum thread viewer
//!
//! Renders simulated forum conversations with and without moderation.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a config pointing at your datasets
//! modview config init
//!
//! # Render both views as an HTML page
//! modview render --output threads.html
//!
//! # Only the moderated view of one subreddit, as text
//! modview render --subreddit r/cats --view moderated --format text
//!
//! # Compare the two datasets
//! modview check
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
