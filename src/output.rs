//! Step outputs for the surrounding workflow

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use crate::domain::{TagDecision, TagType};
use crate::error::Result;

/// Values published as `tag`, `tag-type`, `major` and `minor`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutputs {
    pub tag: String,
    pub tag_type: String,
    pub major: String,
    pub minor: String,
}

impl Default for ActionOutputs {
    fn default() -> Self {
        ActionOutputs {
            tag: String::new(),
            tag_type: TagType::Skipped.to_string(),
            major: String::new(),
            minor: String::new(),
        }
    }
}

impl From<&TagDecision> for ActionOutputs {
    fn from(decision: &TagDecision) -> Self {
        let (major, minor) = decision
            .stream
            .map(|s| (s.major.to_string(), s.minor.to_string()))
            .unwrap_or_default();

        ActionOutputs {
            tag: decision.tag.clone(),
            tag_type: decision.tag_type.to_string(),
            major,
            minor,
        }
    }
}

impl ActionOutputs {
    /// `key=value` lines in the GitHub output file format
    pub fn to_lines(&self) -> String {
        format!(
            "tag={}\ntag-type={}\nmajor={}\nminor={}\n",
            self.tag, self.tag_type, self.major, self.minor
        )
    }

    /// Append the outputs to `path`
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(self.to_lines().as_bytes())?;
        info!(tag = %self.tag, tag_type = %self.tag_type, "set outputs");
        Ok(())
    }

    /// Append the outputs to the file named by `GITHUB_OUTPUT`, if set
    pub fn write_github_output(&self) -> Result<()> {
        match std::env::var_os("GITHUB_OUTPUT").filter(|p| !p.is_empty()) {
            Some(path) => self.write_to(Path::new(&path)),
            None => {
                warn!("GITHUB_OUTPUT not set, outputs will not be written");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Stream, Version};
    use crate::error::DecisionError;

    #[test]
    fn test_from_release_decision() {
        let decision = TagDecision::release("v1.2.1", TagType::Patch, Version::new(1, 2, 1));
        let outputs = ActionOutputs::from(&decision);
        assert_eq!(outputs.to_lines(), "tag=v1.2.1\ntag-type=patch\nmajor=1\nminor=2\n");
    }

    #[test]
    fn test_from_skipped_decision() {
        let decision = TagDecision::skipped(DecisionError::phase_invalid("x"), Some(Stream::new(3, 4)));
        let outputs = ActionOutputs::from(&decision);
        assert_eq!(outputs.tag, "");
        assert_eq!(outputs.tag_type, "skipped");
        assert_eq!(outputs.major, "3");

        let unparsed = TagDecision::skipped(DecisionError::phase_invalid("x"), None);
        assert_eq!(ActionOutputs::from(&unparsed), ActionOutputs::default());
    }

    #[test]
    fn test_write_appends() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "existing=1\n").unwrap();

        ActionOutputs::default().write_to(file.path()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "existing=1\ntag=\ntag-type=skipped\nmajor=\nminor=\n");
    }
}
