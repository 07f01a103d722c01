mod cli;

use anyhow::Context as _;
use clap::Parser as _;
use cli::{
    args::Args,
    config::Config,
    errors::{CliError, init_error, run_error},
    page::{format_log_entry, render_page},
};
use log::{info, warn};
use parallel_highlight::{
    ChatCompletionMatcher, MatchOutcome, NO_MATCH_MESSAGE, Selection, Side, Workbench,
};
use tokio::fs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}={}",
                    env!("CARGO_CRATE_NAME"),
                    args.verbose.log_level_filter().as_str().to_lowercase()
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("Failed to initialise tracing")
        .map_err(init_error)?;

    info!(
        "Starting parallel-highlight version {}",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::read_or_create(&args.config_path)
        .await
        .map_err(init_error)?;
    let matcher = ChatCompletionMatcher::new(config.matcher.clone())
        .context("Failed to set up the semantic matcher")
        .map_err(init_error)?;

    run(&args, &config, matcher).await.map_err(run_error)
}

async fn run(args: &Args, config: &Config, matcher: ChatCompletionMatcher) -> anyhow::Result<()> {
    let left = fs::read_to_string(&args.left)
        .await
        .with_context(|| format!("Cannot read {}", args.left.display()))?;
    let right = fs::read_to_string(&args.right)
        .await
        .with_context(|| format!("Cannot read {}", args.right.display()))?;

    let mut session = config.session();
    session.set_text(Side::Left, left);
    session.set_text(Side::Right, right);
    session.set_brush(args.color);

    let workbench = Workbench::new(session, matcher);
    let selection = workbench
        .select_range(args.side, args.start, args.end)
        .await
        .context("Invalid selection")?;

    match selection {
        Selection::Ignored => warn!("The selection is empty, nothing to do"),
        Selection::Cleared(removed) => info!("Removed {} highlight(s)", removed.len()),
        Selection::Pending(task) => match task.await.context("Match request failed")? {
            MatchOutcome::Highlighted {
                side, highlight, ..
            } => info!(
                "Highlighted {}..{} in the {side} document",
                highlight.start, highlight.end
            ),
            MatchOutcome::NotFound(reason) => warn!("{NO_MATCH_MESSAGE}: {reason:?}"),
        },
    }

    let page = workbench
        .with_session(|session| {
            for entry in session.log() {
                println!("{}", format_log_entry(entry));
            }

            render_page(session)
        })
        .await;

    match &args.out {
        Some(path) => fs::write(path, page)
            .await
            .with_context(|| format!("Cannot write {}", path.display()))?,
        None => println!("{page}"),
    }

    Ok(())
}
