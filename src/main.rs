mod config;
mod github;
mod stats;
mod svg;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use github::GithubClient;
use stats::HudStats;

const OUTPUT_PATH: &str = "assets/hud.svg";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let client = GithubClient::new(config.token.clone())?;

    tracing::info!(handle = %config.handle, "fetching account data");
    let profile = client.profile(&config.handle).await?;
    let repos = client.repos(&config.handle).await?;
    tracing::info!(repos = repos.len(), "repository listing fetched");

    // Best-effort enrichment: a repo whose language breakdown cannot be
    // fetched simply contributes no bytes.
    let mut breakdowns = Vec::new();
    for repo in repos.iter().take(stats::LANGUAGE_REPO_LIMIT) {
        let Some(url) = repo.languages_url.as_deref() else {
            continue;
        };
        match client.languages(url).await {
            Ok(bytes) => breakdowns.push(bytes),
            Err(err) => tracing::warn!(%err, "skipping language breakdown"),
        }
    }

    let hud = HudStats {
        handle: config.handle.clone(),
        followers: profile.followers,
        public_repos: profile.public_repos,
        total_stars: stats::total_stars(&repos),
        languages: stats::language_shares(&stats::tally_languages(breakdowns)),
        signal_bars: stats::signal_bars(&repos),
    };

    let stamp = Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
    let document = svg::generate_svg(&hud, &stamp);

    write_artifact(Path::new(OUTPUT_PATH), &document)?;
    tracing::info!(path = OUTPUT_PATH, "artifact written");

    Ok(())
}

/// Write the rendered document, creating the output directory if needed.
/// Runs only after every input is assembled; a failed fetch leaves any
/// previous artifact untouched.
fn write_artifact(path: &Path, document: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, document).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
