//! `license-scan` — find license files in a directory tree, classify them, and
//! print a Markdown summary.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and set up stderr diagnostics ([`logging`]).
//! 2. Resolve the scan root (the current directory by default).
//! 3. Load extra license patterns and build the catalog ([`config`], [`license::catalog`]).
//! 4. Walk the tree and classify each license file as it arrives ([`walker`], [`pipeline`]).
//! 5. Once the walk has finished cleanly, render the report to stdout ([`report`]).
//!
//! Any setup or traversal failure exits non-zero before anything is printed to stdout.

mod cli;
mod config;
mod error;
mod license;
mod logging;
mod models;
mod pipeline;
mod report;
mod walker;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cli::Cli;
use config::load_config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    // Resolve scan root
    let root = match cli.path {
        Some(path) => path,
        None => std::env::current_dir().context("cannot determine the current directory")?,
    };
    let root = root.canonicalize().unwrap_or(root);

    let config = load_config(&root, cli.config.as_deref())?;
    let catalog = config.catalog()?;
    tracing::debug!(labels = catalog.entries().len(), "catalog ready");

    let pb = if !cli.quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {pos} license files {msg}")?,
        );
        Some(pb)
    } else {
        None
    };

    let mut records = pipeline::scan(&root, &catalog, |record| {
        if let Some(pb) = &pb {
            pb.set_message(record.package_name.clone());
            pb.inc(1);
        }
    })
    .await?;

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    if cli.sort {
        pipeline::sort_by_path(&mut records);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::markdown::render(&mut out, &root, &records)?;
    out.flush()?;

    if !cli.quiet {
        let unknown = records
            .iter()
            .filter(|r| r.license_labels.iter().any(|l| l == models::UNKNOWN_LABEL))
            .count();
        eprintln!(
            "  {} {} license files, {} unrecognized",
            "→".cyan(),
            records.len(),
            if unknown > 0 {
                unknown.to_string().yellow()
            } else {
                unknown.to_string().green()
            }
        );
    }

    Ok(())
}
