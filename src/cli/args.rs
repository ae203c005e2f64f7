//! Command-line arguments and their action-input environment fallbacks

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::Parser;

use crate::cli::orchestration::WorkflowArgs;
use crate::config::Config;
use crate::domain::PrefixConfig;
use crate::error::Result;

/// Arguments accepted by the `semver-release` binary.
///
/// Every option falls back to the environment variable a GitHub Action step
/// receives (`INPUT_*`) or the runner's event context (`GITHUB_*`).
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "semver-release",
    version,
    about = "Create SemVer release tags for release branches"
)]
pub struct Args {
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true, help = "Token used to push tags")]
    pub token: Option<String>,

    #[arg(
        long,
        env = "INPUT_DEBUG",
        value_parser = BoolishValueParser::new(),
        help = "Enable debug logging"
    )]
    pub debug: bool,

    #[arg(
        long,
        env = "INPUT_DRY_RUN",
        value_parser = BoolishValueParser::new(),
        help = "Compute the decision without creating tags"
    )]
    pub dry_run: bool,

    #[arg(
        long,
        env = "INPUT_TARGET_BRANCH",
        help = "Release branch to evaluate on workflow_dispatch"
    )]
    pub target_branch: Option<String>,

    #[arg(
        long,
        env = "INPUT_ALIASES",
        value_parser = BoolishValueParser::new(),
        help = "Move major (vX) and minor (vX.Y) alias tags"
    )]
    pub aliases: bool,

    #[arg(long, env = "INPUT_RELEASE_PREFIX", help = "Prefix of release branch names [default: release/v]")]
    pub release_prefix: Option<String>,

    #[arg(long, env = "INPUT_TAG_PREFIX", help = "Prefix of version tags and aliases [default: v]")]
    pub tag_prefix: Option<String>,

    #[arg(long, env = "GITHUB_EVENT_NAME", help = "Triggering event (create, push, workflow_dispatch)")]
    pub event: Option<String>,

    #[arg(long, env = "GITHUB_REF_NAME", help = "Branch or tag that triggered the run")]
    pub ref_name: Option<String>,

    #[arg(long, env = "GITHUB_REF_TYPE", help = "Kind of ref that triggered the run (branch, tag)")]
    pub ref_type: Option<String>,

    #[arg(long, env = "GITHUB_SHA", help = "Commit that triggered the run")]
    pub sha: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(long, default_value = ".", help = "Path inside the git repository")]
    pub repo: PathBuf,

    #[arg(long, help = "Remote to push tags to [default: origin]")]
    pub remote: Option<String>,

    #[arg(long, help = "Push created tags and aliases to the remote")]
    pub push: bool,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

impl Args {
    /// Token from `--token`/`INPUT_TOKEN`, else `GITHUB_TOKEN`
    pub fn token(&self) -> Option<String> {
        non_empty(&self.token).or_else(|| std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()))
    }

    /// Prefix scheme: arguments win over the config file
    pub fn prefixes(&self, config: &Config) -> PrefixConfig {
        PrefixConfig {
            release_prefix: non_empty(&self.release_prefix)
                .unwrap_or_else(|| config.prefixes.release_prefix.clone()),
            tag_prefix: non_empty(&self.tag_prefix).unwrap_or_else(|| config.prefixes.tag_prefix.clone()),
        }
    }

    /// Merge with the loaded config into workflow arguments
    ///
    /// # Returns
    /// * `Err` - If the resulting prefixes are not usable in git ref names
    pub fn to_workflow_args(&self, config: &Config) -> Result<WorkflowArgs> {
        let prefixes = self.prefixes(config);
        prefixes.validate()?;

        Ok(WorkflowArgs {
            event_name: non_empty(&self.event).unwrap_or_default(),
            ref_name: non_empty(&self.ref_name).unwrap_or_default(),
            ref_type: non_empty(&self.ref_type).unwrap_or_default(),
            sha: non_empty(&self.sha),
            target_branch: non_empty(&self.target_branch),
            prefixes,
            dry_run: self.dry_run,
            aliases: self.aliases || config.behavior.aliases,
            push: self.push || config.behavior.push,
            remote: non_empty(&self.remote).unwrap_or_else(|| config.behavior.remote.clone()),
            token: self.token(),
        })
    }
}
