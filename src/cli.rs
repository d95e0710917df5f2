use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// postgen - post-generation scaffolding hook
#[derive(Parser)]
#[command(name = "postgen")]
#[command(about = "Seeds secrets and prunes opt-out features in freshly generated project templates")]
#[command(version)]
pub struct Cli {
    /// Dry-run mode: log what would change without touching any file.
    ///
    /// Seeding and removals are skipped and reported; reading the choices
    /// file still happens so the preview is realistic.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Seed generated secrets and ignore patterns into a generated project
    Run {
        /// Project directory produced by the template engine
        #[arg(short, long, default_value = ".")]
        project_dir: PathBuf,

        /// Path to the JSON choices file recorded by the template front end
        #[arg(short, long)]
        choices: PathBuf,
    },
    /// Validate a choices file without touching the project
    Validate {
        /// Path to the choices file to validate
        choices: PathBuf,
    },
    /// Generate one secret and print it (for fixing a leftover flag token)
    Secret {
        /// Number of characters to generate
        #[arg(short, long, default_value = "64")]
        length: usize,

        /// Include digits in the alphabet
        #[arg(long)]
        digits: bool,

        /// Include ASCII letters in the alphabet
        #[arg(long)]
        letters: bool,

        /// Include shell-safe punctuation in the alphabet
        #[arg(long)]
        punctuation: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_run_with_choices() {
        let result = Cli::try_parse_from([
            "postgen",
            "run",
            "--project-dir",
            "/tmp/generated",
            "--choices",
            "choices.json",
        ]);
        assert!(result.is_ok());
        let cli = result.unwrap();
        assert!(!cli.dry_run);
        match cli.command {
            Commands::Run {
                project_dir,
                choices,
            } => {
                assert_eq!(project_dir, PathBuf::from("/tmp/generated"));
                assert_eq!(choices, PathBuf::from("choices.json"));
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_run_requires_choices() {
        let result = Cli::try_parse_from(["postgen", "run"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_run_defaults_project_dir() {
        let cli = Cli::try_parse_from(["postgen", "run", "--choices", "c.json"]).unwrap();
        match cli.command {
            Commands::Run { project_dir, .. } => {
                assert_eq!(project_dir, PathBuf::from("."));
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_global_dry_run_after_subcommand() {
        let cli =
            Cli::try_parse_from(["postgen", "run", "--choices", "c.json", "--dry-run"]).unwrap();
        assert!(cli.dry_run);
    }

    #[test]
    fn test_cli_validate_command() {
        let cli = Cli::try_parse_from(["postgen", "validate", "choices.json"]).unwrap();
        match cli.command {
            Commands::Validate { choices } => {
                assert_eq!(choices, PathBuf::from("choices.json"));
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_cli_secret_command() {
        let cli = Cli::try_parse_from([
            "postgen",
            "secret",
            "--length",
            "32",
            "--digits",
            "--letters",
        ])
        .unwrap();
        match cli.command {
            Commands::Secret {
                length,
                digits,
                letters,
                punctuation,
            } => {
                assert_eq!(length, 32);
                assert!(digits);
                assert!(letters);
                assert!(!punctuation);
            }
            _ => panic!("Expected Secret command"),
        }
    }
}
