//! # chatlens CLI
//!
//! Command-line dashboard for the chatlens library.

use std::fs;
use std::process;

use clap::Parser as ClapParser;
use tracing::{info, warn};

use chatlens::analysis::{Outcome, UserFilter};
use chatlens::cli::{Args, init_logging};
use chatlens::config::AnalysisConfig;
use chatlens::format::{OutputFormat, to_format_string, write_to_format};
use chatlens::output::render_users;
use chatlens::{ChatlensError, Session};

const CLOUD_WIDTH: u32 = 800;
const CLOUD_HEIGHT: u32 = 600;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), ChatlensError> {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose)?;

    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(top) = args.top {
        config.text.top_words = top;
    }

    let session = Session::open(&args.input, config)?;
    for skipped in &session.report().skipped {
        warn!("{}", skipped.to_error());
    }

    if args.list_users {
        print!("{}", render_users(&session.filter_options()));
        return Ok(());
    }

    let filter = match args.user.as_deref() {
        Some(name) => {
            let Ok(filter) = name.parse::<UserFilter>();
            filter
        }
        None => UserFilter::Overall,
    };
    let dashboard = session.dashboard(&filter)?;

    if let Some(path) = &args.cloud {
        match &dashboard.word_cloud {
            Outcome::Ready(cloud) => {
                fs::write(path, cloud.to_svg(CLOUD_WIDTH, CLOUD_HEIGHT))?;
                info!(path = %path.display(), "word cloud written");
            }
            Outcome::InsufficientData { reason } => {
                warn!(%reason, "word cloud not written");
            }
        }
    }

    let format: OutputFormat = args.format.into();
    match &args.output {
        Some(path) => {
            write_to_format(&session, &dashboard, path, format)?;
            println!("✅ Done! {format} output saved to {}", path.display());
        }
        None => print!("{}", to_format_string(&session, &dashboard, format)?),
    }

    Ok(())
}
