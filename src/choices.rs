//! User choices consumed from the template front end.
//!
//! The interactive prompt flow lives in the template engine, not here; it
//! records the answers as a flat JSON object of `"y"`/`"n"` strings that this
//! module deserializes into typed toggles. Stringly-typed answers become
//! proper enums so the rest of the hook can match exhaustively.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{HookError, Result};

/// Yes/no choice as the template front end records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString)]
pub enum Toggle {
    #[default]
    #[serde(rename = "n")]
    #[strum(serialize = "n")]
    No,
    #[serde(rename = "y")]
    #[strum(serialize = "y")]
    Yes,
}

impl Toggle {
    pub fn is_yes(self) -> bool {
        self == Toggle::Yes
    }
}

/// The flat set of user choices this hook consumes.
///
/// Missing keys default to `n`, so a minimal choices file only has to name
/// what was switched on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateChoices {
    /// Debug mode: fixed sentinel secrets for reproducible local setups.
    #[serde(default)]
    pub debug: Toggle,
    /// Container-based deployment selected.
    #[serde(default)]
    pub use_docker: Toggle,
    /// PaaS deployment selected.
    #[serde(default)]
    pub use_heroku: Toggle,
    /// Keep the local env files under version control.
    #[serde(default)]
    pub keep_local_envs_in_vcs: Toggle,
}

impl TemplateChoices {
    /// Load choices from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            HookError::choices(format!("failed to read {}: {}", path.display(), e))
        })?;
        let choices: Self = serde_json::from_str(&contents).map_err(|e| {
            HookError::choices(format!("failed to parse {}: {}", path.display(), e))
        })?;
        Ok(choices)
    }

    /// Whether debug-mode sentinels replace random secrets.
    pub fn debug(&self) -> bool {
        self.debug.is_yes()
    }

    /// Whether the `.envs` tree survives in the generated project.
    ///
    /// Env files are only consumed by container or PaaS deployments; without
    /// either, the tree is removed after seeding.
    pub fn keeps_envs(&self) -> bool {
        self.use_docker.is_yes() || self.use_heroku.is_yes()
    }

    /// Patterns to append to the project's ignore file when env files are
    /// kept. Empty when the `.envs` tree is removed anyway.
    pub fn ignore_patterns(&self) -> Vec<&'static str> {
        if !self.keeps_envs() {
            return Vec::new();
        }
        let mut patterns = vec![".env", ".envs/*"];
        if self.keep_local_envs_in_vcs.is_yes() {
            patterns.push("!.envs/.local/");
        }
        patterns
    }

    /// Advisory notes for choice combinations that are legal but pointless.
    /// These print and the run continues.
    pub fn advisories(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if self.keep_local_envs_in_vcs.is_yes() && !self.keeps_envs() {
            notes.push(
                "env files are only used with container or PaaS deployments, \
                 so keeping them in VCS has no effect with your current setup"
                    .to_string(),
            );
        }
        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_toggle_parsing() {
        assert_eq!("y".parse::<Toggle>().unwrap(), Toggle::Yes);
        assert_eq!("n".parse::<Toggle>().unwrap(), Toggle::No);
        assert!("maybe".parse::<Toggle>().is_err());
        assert_eq!(Toggle::Yes.to_string(), "y");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"debug": "y", "use_docker": "y"}}"#).unwrap();

        let choices = TemplateChoices::load_from_file(file.path()).unwrap();
        assert!(choices.debug());
        assert!(choices.use_docker.is_yes());
        // Missing keys default to "n"
        assert!(!choices.use_heroku.is_yes());
        assert!(!choices.keep_local_envs_in_vcs.is_yes());
    }

    #[test]
    fn test_load_rejects_unknown_toggle_value() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"debug": "yes"}}"#).unwrap();

        let err = TemplateChoices::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, HookError::Choices(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = TemplateChoices::load_from_file(Path::new("/nonexistent/choices.json"))
            .unwrap_err();
        assert!(matches!(err, HookError::Choices(_)));
    }

    #[test]
    fn test_keeps_envs() {
        let mut choices = TemplateChoices::default();
        assert!(!choices.keeps_envs());

        choices.use_docker = Toggle::Yes;
        assert!(choices.keeps_envs());

        choices.use_docker = Toggle::No;
        choices.use_heroku = Toggle::Yes;
        assert!(choices.keeps_envs());
    }

    #[test]
    fn test_ignore_patterns() {
        let mut choices = TemplateChoices {
            use_docker: Toggle::Yes,
            ..Default::default()
        };
        assert_eq!(choices.ignore_patterns(), vec![".env", ".envs/*"]);

        choices.keep_local_envs_in_vcs = Toggle::Yes;
        assert_eq!(
            choices.ignore_patterns(),
            vec![".env", ".envs/*", "!.envs/.local/"]
        );

        // No docker, no heroku: nothing to ignore, the tree goes away
        let bare = TemplateChoices::default();
        assert!(bare.ignore_patterns().is_empty());
    }

    #[test]
    fn test_advisories() {
        let pointless = TemplateChoices {
            keep_local_envs_in_vcs: Toggle::Yes,
            ..Default::default()
        };
        assert_eq!(pointless.advisories().len(), 1);

        let sensible = TemplateChoices {
            use_docker: Toggle::Yes,
            keep_local_envs_in_vcs: Toggle::Yes,
            ..Default::default()
        };
        assert!(sensible.advisories().is_empty());
    }
}
