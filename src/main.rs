use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use semver_release::cli::{self, Args};
use semver_release::config;
use semver_release::git::Git2Repository;
use semver_release::ui;

fn init_tracing(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("semver_release={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let workflow_args = match args.to_workflow_args(&config) {
        Ok(workflow_args) => workflow_args,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let repo = match Git2Repository::open(&args.repo, &workflow_args.remote) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let result = match cli::run_release_workflow(&workflow_args, &repo) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    result
        .outputs
        .write_github_output()
        .context("Failed to write step outputs")?;

    ui::display_workflow_result(&result, workflow_args.dry_run);
    Ok(())
}
