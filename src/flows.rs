//! Derived secret flows.
//!
//! Fixed parameterizations of the flag engine for the secrets a freshly
//! generated project needs: the application secret key, the admin URL
//! fragment, the database credentials and the monitoring dashboard
//! credentials. Each flow pins a token string and an alphabet/length policy;
//! [`seed_project_secrets`] runs them all across the project's env layout.
//!
//! # Debug Mode
//!
//! In debug mode every credential is the constant [`DEBUG_VALUE`] instead of
//! a random string, so local development environments are reproducible.

use std::path::{Path, PathBuf};

use crate::entropy::EntropySource;
use crate::error::Result;
use crate::flag::{FlagRequest, GeneratorArgs, set_flag};
use crate::secret::{self, Alphabet, SecretOutcome};

/// Fixed sentinel credential used for every secret in debug mode.
pub const DEBUG_VALUE: &str = "debug";

// Flag tokens embedded in the template's env files
pub const SECRET_KEY_TOKEN: &str = "!!!SET SECRET_KEY!!!";
pub const ADMIN_URL_TOKEN: &str = "!!!SET ADMIN_URL!!!";
pub const POSTGRES_USER_TOKEN: &str = "!!!SET POSTGRES_USER!!!";
pub const POSTGRES_PASSWORD_TOKEN: &str = "!!!SET POSTGRES_PASSWORD!!!";
pub const MONITORING_USER_TOKEN: &str = "!!!SET MONITORING_USER!!!";
pub const MONITORING_PASSWORD_TOKEN: &str = "!!!SET MONITORING_PASSWORD!!!";

// ============================================================================
// Individual flows
// ============================================================================

/// Set the application secret key: 64 characters, letters+digits.
pub fn set_secret_key(path: &Path, source: &mut dyn EntropySource) -> Result<String> {
    set_flag(
        path,
        &FlagRequest::generated(SECRET_KEY_TOKEN, GeneratorArgs::letters_and_digits(64)),
        source,
    )
}

/// Set the admin URL fragment: 32 characters, letters+digits, with a trailing
/// slash so it drops straight into a URL path.
pub fn set_admin_url(path: &Path, source: &mut dyn EntropySource) -> Result<String> {
    set_flag(
        path,
        &FlagRequest::generated(ADMIN_URL_TOKEN, GeneratorArgs::letters_and_digits(32))
            .formatted("{}/"),
        source,
    )
}

/// Set the database user to an explicit value (generated once by the caller
/// and reused across local and production env files).
pub fn set_postgres_user(path: &Path, value: &str) -> Result<String> {
    set_flag(
        path,
        &FlagRequest::with_value(POSTGRES_USER_TOKEN, value),
        // Explicit values never generate; the source goes unused
        &mut crate::entropy::SystemEntropy,
    )
}

/// Set the database password: explicit value if given (debug mode), else a
/// generated 64-character letters+digits secret.
pub fn set_postgres_password(
    path: &Path,
    value: Option<&str>,
    source: &mut dyn EntropySource,
) -> Result<String> {
    let request = match value {
        Some(v) => FlagRequest::with_value(POSTGRES_PASSWORD_TOKEN, v),
        None => FlagRequest::generated(
            POSTGRES_PASSWORD_TOKEN,
            GeneratorArgs::letters_and_digits(64),
        ),
    };
    set_flag(path, &request, source)
}

/// Set the monitoring dashboard user to an explicit value.
pub fn set_monitoring_user(path: &Path, value: &str) -> Result<String> {
    set_flag(
        path,
        &FlagRequest::with_value(MONITORING_USER_TOKEN, value),
        &mut crate::entropy::SystemEntropy,
    )
}

/// Set the monitoring dashboard password: explicit value if given (debug
/// mode), else a generated 64-character letters+digits secret.
pub fn set_monitoring_password(
    path: &Path,
    value: Option<&str>,
    source: &mut dyn EntropySource,
) -> Result<String> {
    let request = match value {
        Some(v) => FlagRequest::with_value(MONITORING_PASSWORD_TOKEN, v),
        None => FlagRequest::generated(
            MONITORING_PASSWORD_TOKEN,
            GeneratorArgs::letters_and_digits(64),
        ),
    };
    set_flag(path, &request, source)
}

/// Generate a random user name: 32 letters.
pub fn generate_random_user(source: &mut dyn EntropySource) -> Result<SecretOutcome> {
    secret::generate(source, 32, Alphabet::letters_only())
}

// ============================================================================
// Env layout
// ============================================================================

/// Paths of the env files the seed flow touches.
///
/// The defaults mirror the template's `.envs` tree; tests point the fields at
/// temporary fixtures instead.
#[derive(Debug, Clone)]
pub struct EnvLayout {
    /// Local application env file (monitoring credentials).
    pub local_app_env: PathBuf,
    /// Production application env file (secret key, admin URL, monitoring
    /// credentials).
    pub production_app_env: PathBuf,
    /// Local database env file.
    pub local_postgres_env: PathBuf,
    /// Production database env file.
    pub production_postgres_env: PathBuf,
    /// Settings env files that carry their own secret key (local, test).
    pub settings_envs: Vec<PathBuf>,
}

impl EnvLayout {
    /// The standard layout of a generated project.
    pub fn under(project_dir: &Path) -> Self {
        Self {
            local_app_env: project_dir.join(".envs/.local/.app"),
            production_app_env: project_dir.join(".envs/.production/.app"),
            local_postgres_env: project_dir.join(".envs/.local/.postgres"),
            production_postgres_env: project_dir.join(".envs/.production/.postgres"),
            settings_envs: vec![
                project_dir.join("config/settings/local.env"),
                project_dir.join("config/settings/test.env"),
            ],
        }
    }

    /// All files the seed flow will open, in visiting order.
    pub fn all_files(&self) -> Vec<&Path> {
        let mut files: Vec<&Path> = vec![
            &self.production_app_env,
            &self.local_postgres_env,
            &self.production_postgres_env,
            &self.local_app_env,
        ];
        files.extend(self.settings_envs.iter().map(PathBuf::as_path));
        files
    }
}

// ============================================================================
// Seed orchestration
// ============================================================================

/// Summary of a completed seed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Number of flag substitutions performed.
    pub flags_set: usize,
    /// Whether debug-mode sentinels were used instead of random secrets.
    pub debug: bool,
}

impl std::fmt::Display for SeedReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.debug {
            write!(f, "{} flags set (debug sentinels)", self.flags_set)
        } else {
            write!(f, "{} flags set", self.flags_set)
        }
    }
}

/// Run every secret flow across the project's env layout.
///
/// The database and monitoring user names are generated once each and reused
/// across the local and production files, so both environments agree on the
/// credentials. In debug mode all values are [`DEBUG_VALUE`].
///
/// Any I/O failure aborts immediately; files already rewritten stay
/// rewritten (acceptable for one-shot post-generation output).
pub fn seed_project_secrets(
    layout: &EnvLayout,
    debug: bool,
    source: &mut dyn EntropySource,
) -> Result<SeedReport> {
    let postgres_user = resolve_user(debug, POSTGRES_USER_TOKEN, source)?;
    let monitoring_user = resolve_user(debug, MONITORING_USER_TOKEN, source)?;
    let password_override = if debug { Some(DEBUG_VALUE) } else { None };

    let mut flags_set = 0;

    set_secret_key(&layout.production_app_env, source)?;
    set_admin_url(&layout.production_app_env, source)?;
    flags_set += 2;

    for path in [&layout.local_postgres_env, &layout.production_postgres_env] {
        set_postgres_user(path, &postgres_user)?;
        set_postgres_password(path, password_override, source)?;
        flags_set += 2;
    }

    for path in [&layout.local_app_env, &layout.production_app_env] {
        set_monitoring_user(path, &monitoring_user)?;
        set_monitoring_password(path, password_override, source)?;
        flags_set += 2;
    }

    for path in &layout.settings_envs {
        set_secret_key(path, source)?;
        flags_set += 1;
    }

    log::info!("seeded {} flags across {} env files", flags_set, layout.all_files().len());
    Ok(SeedReport { flags_set, debug })
}

/// Resolve a user name: the debug sentinel, a fresh random name, or, when no
/// secure randomness exists, the flag token itself as a visible marker,
/// consistent with the engine's own fallback.
fn resolve_user(debug: bool, token: &str, source: &mut dyn EntropySource) -> Result<String> {
    if debug {
        return Ok(DEBUG_VALUE.to_string());
    }
    match generate_random_user(source)? {
        SecretOutcome::Generated(user) => Ok(user),
        SecretOutcome::Unavailable => {
            log::warn!(
                "no secure random source; leaving {} for manual replacement",
                token
            );
            Ok(token.to_string())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
