//! Main workflow orchestration logic
//!
//! Reads repository state into a [`ReleaseEvent`], runs the decision engine
//! and applies the result. Kept apart from `main.rs` so it can be driven
//! with a [`MockRepository`](crate::git::MockRepository) in tests.

use tracing::{info, warn};

use crate::domain::{EventKind, PrefixConfig, ReleaseEvent, Stream, TagDecision};
use crate::engine::{self, parser};
use crate::error::{DecisionError, ReleaseError, Result};
use crate::git::Repository;
use crate::output::ActionOutputs;

/// Arguments for the release workflow
///
/// Mirrors the CLI Args after merging with the config file. This decoupling
/// allows the workflow to be called programmatically without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    /// GitHub event name (`create`, `push`, `workflow_dispatch`)
    pub event_name: String,

    /// Branch or tag that triggered the run
    pub ref_name: String,

    /// `branch` or `tag`
    pub ref_type: String,

    /// Commit that triggered the run
    pub sha: Option<String>,

    /// Branch to evaluate on manual dispatch
    pub target_branch: Option<String>,

    pub prefixes: PrefixConfig,

    /// Preview mode - decide but don't create or move tags
    pub dry_run: bool,

    /// Move alias tags for GA and patch releases
    pub aliases: bool,

    /// Push what was written to `remote`
    pub push: bool,

    pub remote: String,

    pub token: Option<String>,
}

impl Default for WorkflowArgs {
    fn default() -> Self {
        WorkflowArgs {
            event_name: String::new(),
            ref_name: String::new(),
            ref_type: String::new(),
            sha: None,
            target_branch: None,
            prefixes: PrefixConfig::default(),
            dry_run: false,
            aliases: false,
            push: false,
            remote: "origin".to_string(),
            token: None,
        }
    }
}

/// Result of a release workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub decision: TagDecision,

    pub outputs: ActionOutputs,

    /// Whether the decided tag was created by this run
    pub created: bool,

    /// Aliases moved to the decided tag, in order
    pub moved_aliases: Vec<String>,

    /// Tags pushed to the remote
    pub pushed: Vec<String>,
}

impl WorkflowResult {
    fn new(decision: TagDecision) -> Self {
        WorkflowResult {
            outputs: ActionOutputs::from(&decision),
            decision,
            created: false,
            moved_aliases: Vec::new(),
            pushed: Vec::new(),
        }
    }
}

/// Main release workflow
///
/// 1. Map the event name and ref type to an [`EventKind`]
/// 2. Snapshot the stream's tags, the release branches and the major's newest release
/// 3. Classify and decide
/// 4. For pushed tags, check the tag's commit lies on its release branch
/// 5. Create the tag, move aliases and push, unless the decision must not persist
///
/// # Returns
/// * `Ok(WorkflowResult)` - Including skipped decisions
/// * `Err` - Inconsistent tag data or a failed repository operation
pub fn run_release_workflow<R: Repository>(args: &WorkflowArgs, repo: &R) -> Result<WorkflowResult> {
    let prefixes = &args.prefixes;

    let kind = match EventKind::from_github(&args.event_name, &args.ref_type) {
        Ok(kind) => kind,
        Err(e) => {
            warn!("unhandled event, skipping: {}", e);
            return Ok(WorkflowResult::new(TagDecision::skipped(e, None)));
        }
    };

    let identifier = match kind {
        EventKind::ManualDispatch => args
            .target_branch
            .clone()
            .unwrap_or_else(|| args.ref_name.clone()),
        _ => args.ref_name.clone(),
    };
    info!(event = %kind, identifier = %identifier, "processing event");

    let stream = stream_hint(kind, &identifier, prefixes);
    let commit = resolve_commit(kind, &identifier, args, repo);

    let existing = match stream {
        Some(stream) => repo.list_tags_for_stream(stream, prefixes)?,
        None => Default::default(),
    };
    let major_peak = match stream {
        Some(stream) => repo.major_peak(stream.major, prefixes)?,
        None => None,
    };

    let mut event = ReleaseEvent::new(kind, identifier)
        .with_existing_tags(existing)
        .with_release_branches(repo.release_branches(prefixes)?)
        .with_major_peak(major_peak)
        .with_dry_run(args.dry_run);
    if let Some(commit) = &commit {
        event = event.with_commit(commit.clone());
    }

    let mut decision = engine::evaluate(&event, prefixes)?;

    if kind == EventKind::TagPushed && !decision.is_skipped() {
        decision = check_tag_on_branch(decision, commit.as_deref(), prefixes, repo)?;
    }

    let mut result = WorkflowResult::new(decision);
    if result.decision.persist {
        apply(&mut result, kind, commit.as_deref(), args, repo)?;
    } else if !result.decision.is_skipped() {
        info!(
            tag = %result.decision.tag,
            aliases = ?result.decision.aliases,
            "dry run, nothing written"
        );
    }

    Ok(result)
}

fn stream_hint(kind: EventKind, identifier: &str, prefixes: &PrefixConfig) -> Option<Stream> {
    match kind {
        EventKind::TagPushed => parser::parse_tag(identifier, prefixes).ok().map(|v| v.stream()),
        _ => parser::parse_branch(identifier, prefixes).ok(),
    }
}

fn resolve_commit<R: Repository>(
    kind: EventKind,
    identifier: &str,
    args: &WorkflowArgs,
    repo: &R,
) -> Option<String> {
    match kind {
        // The dispatch ref is wherever the workflow ran, not the target branch
        EventKind::ManualDispatch => repo.branch_head(identifier).ok().or_else(|| args.sha.clone()),
        EventKind::TagPushed => args.sha.clone().or_else(|| {
            repo.list_tags()
                .ok()?
                .into_iter()
                .find(|t| t.name == identifier)
                .map(|t| t.target)
        }),
        _ => args.sha.clone().or_else(|| repo.branch_head(identifier).ok()),
    }
}

fn check_tag_on_branch<R: Repository>(
    decision: TagDecision,
    commit: Option<&str>,
    prefixes: &PrefixConfig,
    repo: &R,
) -> Result<TagDecision> {
    let Some(stream) = decision.stream else {
        return Ok(decision);
    };
    let branch = stream.branch_name(prefixes);

    let on_branch = match commit {
        Some(commit) => repo.branch_contains(&branch, commit)?,
        None => false,
    };

    if on_branch {
        Ok(decision)
    } else {
        let error = DecisionError::phase_invalid(format!(
            "tag '{}' does not point to a commit on branch '{}'",
            decision.tag, branch
        ));
        warn!("{}", error);
        Ok(TagDecision::skipped(error, Some(stream)))
    }
}

fn apply<R: Repository>(
    result: &mut WorkflowResult,
    kind: EventKind,
    commit: Option<&str>,
    args: &WorkflowArgs,
    repo: &R,
) -> Result<()> {
    let decision = &result.decision;
    let commit = commit.ok_or_else(|| {
        ReleaseError::tag(format!("No commit known for tag '{}'", decision.tag))
    })?;

    // A pushed tag already exists; only its aliases are ours to write
    if kind != EventKind::TagPushed {
        repo.create_tag(&decision.tag, commit)?;
        info!(tag = %decision.tag, commit = %short(commit), "created tag");
        result.created = true;
    }

    if decision.tag_type.moves_aliases() && !decision.aliases.is_empty() {
        if args.aliases {
            for alias in &decision.aliases {
                repo.move_tag(alias, commit)?;
                info!(alias = %alias, tag = %decision.tag, "moved alias");
                result.moved_aliases.push(alias.clone());
            }
        } else {
            info!(aliases = ?decision.aliases, "alias updates disabled, discarding");
        }
    }

    if args.push {
        let mut names: Vec<&str> = Vec::new();
        if result.created {
            names.push(&decision.tag);
        }
        names.extend(result.moved_aliases.iter().map(String::as_str));

        if !names.is_empty() {
            repo.push_tags(&args.remote, &names, args.token.as_deref())?;
            info!(remote = %args.remote, tags = ?names, "pushed tags");
            result.pushed = names.into_iter().map(str::to_string).collect();
        }
    }

    Ok(())
}

fn short(commit: &str) -> &str {
    commit.get(..7).unwrap_or(commit)
}
