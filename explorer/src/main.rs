//! Wordvec Explorer Entry Point
//!
//! Loads the embedding model once, then runs the interactive menu on
//! stdin/stdout. Logs go to stderr so they never mix with the console.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wordvec_explorer::{open_model, FormatChoice, InvalidSelectionPolicy, Session, SessionConfig};

#[derive(Parser)]
#[command(name = "wordvec-explorer")]
#[command(about = "Explore semantic relationships in a pre-trained word embedding model")]
#[command(version)]
struct Args {
    /// Model to load: word2vec/GloVe file or Model2Vec directory
    #[arg(long, short)]
    model: Option<PathBuf>,

    /// Model format (detected from the path by default)
    #[arg(long, short, value_enum, default_value_t = FormatChoice::Auto)]
    format: FormatChoice,

    /// Show the menu again after an invalid selection instead of exiting
    #[arg(long)]
    reprompt: bool,

    /// Debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_filter = if args.verbose {
        "wordvec_explorer=debug,wordvec_model=debug"
    } else {
        "wordvec_explorer=info,wordvec_model=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let model = open_model(args.model.as_deref(), args.format.model_format())?;

    let config = SessionConfig {
        invalid_selection: if args.reprompt {
            InvalidSelectionPolicy::Reprompt
        } else {
            InvalidSelectionPolicy::Terminate
        },
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Session::new(&model, stdin.lock(), stdout.lock(), config).run()?;

    Ok(())
}
