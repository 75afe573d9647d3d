mod changelog;
mod config;
mod formatter;
mod github;

use std::path::PathBuf;
use std::time::Duration;

use crate::changelog::ChangelogRequest;
use crate::github::prelude::*;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser, Debug)]
#[command(version, about = "Changelog generator for GitHub releases")]
struct Cli {
    #[arg(value_parser = parse_repository, value_name = "OWNER/REPO")]
    repository: (String, String),
    #[arg(
        long,
        value_parser = parse_date,
        value_name = "YYYY-MM-DD",
        help = "Only list releases published after this date"
    )]
    since: Option<chrono::NaiveDate>,
    #[arg(
        long,
        value_name = "FILE",
        env = "CHANGELOG_LABELS",
        help = "TOML file with a [labels] table mapping categories to labels"
    )]
    labels: Option<PathBuf>,
    #[arg(
        long,
        value_name = "HOST",
        default_value = "github.com",
        help = "Target GitHub hostname",
        env = "GH_HOST"
    )]
    hostname: String,
    #[arg(long, value_name = "SECONDS", help = "Abort if the run takes longer")]
    timeout: Option<u64>,
    #[arg(short, long, help = "Log every request and decision")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli {
        repository: (owner, repo),
        since,
        labels,
        hostname,
        timeout,
        verbose,
    } = Cli::parse();

    init_tracing(verbose);

    let policy = crate::config::load_label_policy(labels.as_deref())?;
    let token = crate::github::fetch_token(&hostname)?;
    let cancel = cancel_on_interrupt(timeout);
    let client = Client::new(&hostname, token)?.with_cancellation(cancel);

    let request = ChangelogRequest {
        owner,
        repo,
        since: since.map(start_of_day),
    };
    let releases = crate::changelog::aggregate(&client, &request, &policy).await?;
    let output = crate::formatter::format_markdown(
        &format!("{}/{}", request.owner, request.repo),
        &releases,
    );

    print!("{output}");

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cancel_on_interrupt(timeout: Option<u64>) -> CancellationToken {
    let cancel = CancellationToken::new();

    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling outstanding requests");
            on_signal.cancel();
        }
    });

    if let Some(seconds) = timeout {
        let on_timeout = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(seconds)).await;
            tracing::warn!(seconds, "timeout reached, cancelling outstanding requests");
            on_timeout.cancel();
        });
    }

    cancel
}

fn parse_repository(input: &str) -> anyhow::Result<(String, String)> {
    match input.trim().split_once('/') {
        Some((owner, repo))
            if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
        {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => anyhow::bail!("expected OWNER/REPO, got `{input}`"),
    }
}

fn parse_date(input: &str) -> anyhow::Result<chrono::NaiveDate, chrono::ParseError> {
    chrono::NaiveDate::parse_from_str(input, "%Y-%m-%d")
}

fn start_of_day(date: chrono::NaiveDate) -> chrono::DateTime<chrono::Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
