//! User interface module - terminal formatting of run results.

pub mod formatter;

pub use formatter::{
    display_error, display_status, display_success, display_warning, display_workflow_result,
    format_decision,
};
