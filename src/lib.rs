//! postgen library
//!
//! Core functionality for the post-generation scaffolding hook: secret
//! generation, flag substitution, the derived seed flows, ignore-file upkeep
//! and cleanup of opted-out features.

pub mod choices;
pub mod cleanup;
pub mod cli;
pub mod entropy;
pub mod error;
pub mod flag;
pub mod flows;
pub mod ignore;
pub mod secret;

// Re-export main types for convenience
pub use choices::{TemplateChoices, Toggle};
pub use cleanup::{CleanupOp, CleanupPlan, CleanupReport};
pub use entropy::{EntropySource, EntropyUnavailable, SystemEntropy};
pub use error::{HookError, Result};
pub use flag::{FlagRequest, FlagValue, GeneratorArgs, set_flag};
pub use flows::{DEBUG_VALUE, EnvLayout, SeedReport, seed_project_secrets};
pub use secret::{Alphabet, SecretOutcome, generate};
