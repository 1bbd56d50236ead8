//! Arcade - headless CLI
//!
//! Replays scripted sessions and lists difficulty presets.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use arcade::{PlayerStats, ReplayReport, ReplayScript, presets, replay};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay {
            script,
            json,
            stats,
            player,
        } => run_replay(&script, json, stats.as_deref(), &player),
        Command::Presets { json } => list_presets(json),
    }
}

/// Replays a script and prints the outcome.
#[instrument]
fn run_replay(path: &Path, json: bool, stats: Option<&Path>, player: &str) -> Result<()> {
    let script = ReplayScript::from_file(path)
        .with_context(|| format!("loading replay script {}", path.display()))?;
    let report = replay(&script).context("starting replay session")?;
    info!(entries = report.entries.len(), "Replay complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let (Some(stats_path), Some(record)) = (stats, &report.record) {
        let mut stats = load_stats(stats_path, player)?;
        let new_high = stats.add_score(report.view.kind, record);
        std::fs::write(stats_path, serde_json::to_string_pretty(&stats)?)
            .with_context(|| format!("writing stats {}", stats_path.display()))?;
        if !json {
            println!(
                "{}: {} games, average {:.2}{}",
                stats.name(),
                stats.games_played(),
                stats.average_score(),
                if new_high { ", new high score" } else { "" }
            );
        }
    }
    Ok(())
}

/// Reads a stats file, or starts fresh stats when it does not exist.
#[instrument]
fn load_stats(path: &Path, player: &str) -> Result<PlayerStats> {
    if !path.exists() {
        info!("Creating new stats file");
        return Ok(PlayerStats::new(player));
    }
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading stats {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing stats {}", path.display()))
}

fn print_report(report: &ReplayReport) {
    println!(
        "{} ({}) session {}",
        report.view.kind.title(),
        report.view.difficulty,
        report.view.id
    );
    for entry in &report.entries {
        match (&entry.feedback, &entry.error) {
            (Some(feedback), _) => println!("  +{:>6}ms {:?} -> {:?}", entry.at_ms, entry.intent, feedback),
            (None, Some(error)) => println!("  +{:>6}ms {:?} rejected: {}", entry.at_ms, entry.intent, error),
            (None, None) => println!("  +{:>6}ms {:?}", entry.at_ms, entry.intent),
        }
    }
    println!("Outcome: {}", report.view.outcome);
    match &report.record {
        Some(record) => println!(
            "Score: {}{} in {:.1}s over {} attempts",
            record.score(),
            if *record.perfect() { " (perfect)" } else { "" },
            record.elapsed().as_secs_f64(),
            record.attempts()
        ),
        None => println!("Score: session not finished"),
    }
}

/// Prints the preset catalogue.
#[instrument]
fn list_presets(json: bool) -> Result<()> {
    let all = presets();
    if json {
        println!("{}", serde_json::to_string_pretty(&all)?);
        return Ok(());
    }
    for preset in &all {
        println!(
            "{:<16} {:<7} x{} {}",
            preset.kind.title(),
            preset.difficulty,
            preset.weight,
            preset.summary()
        );
    }
    Ok(())
}
