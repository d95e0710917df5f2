//! postgen - Main entry point
//!
//! One-shot hook that runs after the template engine has materialized a
//! project tree: seeds generated secrets into env files, maintains the ignore
//! file, and removes the env tree when no deployment target consumes it.
//!
//! Exit behavior: unrecovered I/O errors terminate the process with a
//! non-zero status; advisory conditions print and the run continues.

use anyhow::Result;
use log::{debug, error, info};
use std::path::Path;

use postgen::choices::TemplateChoices;
use postgen::cleanup::{self, CleanupPlan};
use postgen::cli::{Cli, Commands};
use postgen::entropy::SystemEntropy;
use postgen::flows::{EnvLayout, seed_project_secrets};
use postgen::ignore;
use postgen::secret::{self, Alphabet, SecretOutcome};

/// Initialize the logger with appropriate settings
fn init_logger() {
    use env_logger::Builder;
    use std::io::Write;

    Builder::from_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Info)
        .parse_default_env() // Allows RUST_LOG env var to override
        .init();
}

/// Main application entry point
fn main() -> Result<()> {
    init_logger();
    debug!("postgen starting up");

    let cli = Cli::parse_args();

    match cli.command {
        Commands::Run {
            project_dir,
            choices,
        } => {
            run_hook(&project_dir, &choices, cli.dry_run)?;
        }
        Commands::Validate { choices } => match TemplateChoices::load_from_file(&choices) {
            Ok(parsed) => {
                info!("choices file valid: {}", choices.display());
                println!("✓ Choices file is valid: {}", choices.display());
                for note in parsed.advisories() {
                    println!("[INFO] {}", note);
                }
            }
            Err(e) => {
                error!("choices validation failed: {}", e);
                eprintln!("✗ Choices validation failed: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Secret {
            length,
            digits,
            letters,
            punctuation,
        } => {
            print_secret(length, digits, letters, punctuation);
        }
    }

    Ok(())
}

/// Run the full post-generation flow against a generated project.
fn run_hook(project_dir: &Path, choices_path: &Path, dry_run: bool) -> Result<()> {
    let choices = TemplateChoices::load_from_file(choices_path)?;
    debug!("choices loaded from {}", choices_path.display());

    for note in choices.advisories() {
        println!("[INFO] {}", note);
    }

    let layout = EnvLayout::under(project_dir);

    if dry_run {
        println!("Dry run: no files will be modified.");
        for path in layout.all_files() {
            println!("  would seed secrets in {}", path.display());
        }
        for pattern in choices.ignore_patterns() {
            println!("  would append '{}' to .gitignore", pattern);
        }
    } else {
        let mut source = SystemEntropy;
        let report = seed_project_secrets(&layout, choices.debug(), &mut source)?;
        println!("✓ Secrets seeded: {}", report);

        ignore::append_patterns(
            &project_dir.join(".gitignore"),
            &choices.ignore_patterns(),
        )?;
    }

    if !choices.keeps_envs() {
        // No deployment target reads the env files; drop the whole tree
        let plan = CleanupPlan::new().remove_dir(".envs");
        let report = cleanup::apply(&plan, project_dir, dry_run)?;
        if report.dry_run {
            println!("  would remove {} path(s)", report.removed);
        } else {
            println!("✓ Removed unused env tree");
        }
    }

    println!("✓ Project initialized, keep up the good work!");
    Ok(())
}

/// Generate one secret and print it, or warn and exit non-zero when the host
/// has no secure random source.
fn print_secret(length: usize, digits: bool, letters: bool, punctuation: bool) {
    // Bare `postgen secret` means the standard credential policy
    let alphabet = if digits || letters || punctuation {
        Alphabet {
            digits,
            letters,
            punctuation,
        }
    } else {
        Alphabet::letters_and_digits()
    };

    let mut source = SystemEntropy;
    match secret::generate(&mut source, length, alphabet) {
        Ok(SecretOutcome::Generated(s)) => println!("{}", s),
        Ok(SecretOutcome::Unavailable) => {
            eprintln!("✗ No secure random source available on this system");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}
