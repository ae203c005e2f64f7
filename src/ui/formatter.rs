//! Pure formatting functions for UI output.
//!
//! Functions returning `String` build the text; `display_*` functions print it.

use console::style;

use crate::cli::WorkflowResult;
use crate::domain::{TagDecision, TagType};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a warning with a yellow marker.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// One-line summary of a decision.
///
/// Skipped decisions carry their reason; releases their aliases.
pub fn format_decision(decision: &TagDecision) -> String {
    match decision.tag_type {
        TagType::Skipped => match decision.reason() {
            Some(reason) => format!("skipped: {}", reason),
            None => "skipped".to_string(),
        },
        tag_type if decision.aliases.is_empty() => format!("{} ({})", decision.tag, tag_type),
        tag_type => format!(
            "{} ({}), aliases: {}",
            decision.tag,
            tag_type,
            decision.aliases.join(", ")
        ),
    }
}

/// Display the outcome of a workflow run.
///
/// # Arguments
/// * `result` - The workflow result to summarize
/// * `dry_run` - Whether nothing was written
pub fn display_workflow_result(result: &WorkflowResult, dry_run: bool) {
    let decision = &result.decision;

    if decision.is_skipped() {
        display_warning(&format_decision(decision));
        return;
    }

    println!("\n{}", style("Release Decision:").bold());
    println!("  Tag:  {}", style(&decision.tag).green());
    println!("  Type: {}", decision.tag_type);
    if !decision.aliases.is_empty() {
        println!("  Aliases: {}", style(decision.aliases.join(", ")).cyan());
    }

    if dry_run {
        display_status("Dry run: no tags were created or moved");
        return;
    }

    if result.created {
        display_success(&format!("Created tag: {}", decision.tag));
    }
    for alias in &result.moved_aliases {
        display_success(&format!("Moved alias {} -> {}", alias, decision.tag));
    }
    if !result.pushed.is_empty() {
        display_success(&format!("Pushed: {}", result.pushed.join(", ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Version;
    use crate::error::DecisionError;

    #[test]
    fn test_format_rc_decision() {
        let decision = TagDecision::release("v1.2.0-rc1", TagType::Rc, Version::new(1, 2, 0));
        assert_eq!(format_decision(&decision), "v1.2.0-rc1 (rc)");
    }

    #[test]
    fn test_format_decision_with_aliases() {
        let mut decision = TagDecision::release("v1.2.0", TagType::Ga, Version::new(1, 2, 0));
        decision.aliases = vec!["v1".to_string(), "v1.2".to_string()];
        assert_eq!(format_decision(&decision), "v1.2.0 (ga), aliases: v1, v1.2");
    }

    #[test]
    fn test_format_skipped_decision() {
        let decision = TagDecision::skipped(DecisionError::phase_invalid("no release branch"), None);
        let text = format_decision(&decision);
        assert!(text.starts_with("skipped: "));
        assert!(text.contains("no release branch"));
    }

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }
}
