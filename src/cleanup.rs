//! Cleanup of opted-out features.
//!
//! Translates "the user did not select this feature" into an ordered sequence
//! of atomic removal operations. Which paths go into the plan is the
//! orchestration layer's business; this module only provides the typed
//! operations and a sequential executor.
//!
//! # Design
//!
//! - **Pure plan**: building a [`CleanupPlan`] does no I/O
//! - **Typed output**: each [`CleanupOp`] names exactly one file or tree
//! - **Dry-run aware**: the executor can log the plan without touching disk
//!
//! # Failure Policy
//!
//! **FATAL**: a missing path or permission error aborts the run, possibly
//! leaving the tree partially cleaned. The hook runs once against freshly
//! generated output, so aborting loudly beats silently skipping.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

// ============================================================================
// Cleanup Operation Types
// ============================================================================

/// A single atomic removal operation, relative to the project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOp {
    /// Remove one file.
    RemoveFile(PathBuf),
    /// Remove a directory tree.
    RemoveDir(PathBuf),
}

impl CleanupOp {
    /// The project-relative path this operation targets.
    pub fn path(&self) -> &Path {
        match self {
            Self::RemoveFile(p) | Self::RemoveDir(p) => p,
        }
    }
}

impl fmt::Display for CleanupOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoveFile(p) => write!(f, "RemoveFile({})", p.display()),
            Self::RemoveDir(p) => write!(f, "RemoveDir({})", p.display()),
        }
    }
}

/// An ordered list of removal operations.
#[derive(Debug, Clone, Default)]
pub struct CleanupPlan {
    /// Ordered sequence of removal operations.
    pub ops: Vec<CleanupOp>,
}

impl CleanupPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file removal to the plan.
    pub fn remove_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ops.push(CleanupOp::RemoveFile(path.into()));
        self
    }

    /// Add a directory-tree removal to the plan.
    pub fn remove_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.ops.push(CleanupOp::RemoveDir(path.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }
}

/// Outcome of executing a cleanup plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    /// Number of operations executed (or, in dry-run, that would execute).
    pub removed: usize,
    /// Whether this was a dry run.
    pub dry_run: bool,
}

// ============================================================================
// Execution
// ============================================================================

/// Execute the plan sequentially against `project_dir`.
///
/// In dry-run mode each operation is logged and skipped; the report still
/// counts them so callers can present an accurate preview.
pub fn apply(plan: &CleanupPlan, project_dir: &Path, dry_run: bool) -> Result<CleanupReport> {
    for op in &plan.ops {
        let target = project_dir.join(op.path());

        if dry_run {
            log::info!("dry-run: would {}", op);
            continue;
        }

        match op {
            CleanupOp::RemoveFile(_) => fs::remove_file(&target)?,
            CleanupOp::RemoveDir(_) => fs::remove_dir_all(&target)?,
        }
        log::info!("{}", op);
    }

    Ok(CleanupReport {
        removed: plan.len(),
        dry_run,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, CleanupPlan) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".envs/.local")).unwrap();
        fs::write(dir.path().join(".envs/.local/.app"), "A=1\n").unwrap();
        fs::write(dir.path().join("merge_dotenvs.py"), "# helper\n").unwrap();

        let plan = CleanupPlan::new()
            .remove_dir(".envs")
            .remove_file("merge_dotenvs.py");
        (dir, plan)
    }

    #[test]
    fn test_apply_removes_targets() {
        let (dir, plan) = fixture();

        let report = apply(&plan, dir.path(), false).unwrap();
        assert_eq!(report.removed, 2);
        assert!(!report.dry_run);

        assert!(!dir.path().join(".envs").exists());
        assert!(!dir.path().join("merge_dotenvs.py").exists());
    }

    #[test]
    fn test_dry_run_leaves_everything() {
        let (dir, plan) = fixture();

        let report = apply(&plan, dir.path(), true).unwrap();
        assert_eq!(report.removed, 2);
        assert!(report.dry_run);

        assert!(dir.path().join(".envs/.local/.app").exists());
        assert!(dir.path().join("merge_dotenvs.py").exists());
    }

    #[test]
    fn test_missing_target_is_fatal() {
        let dir = TempDir::new().unwrap();
        let plan = CleanupPlan::new().remove_file("not-there.txt");

        let err = apply(&plan, dir.path(), false).unwrap_err();
        assert!(matches!(err, crate::error::HookError::Io(_)));
    }

    #[test]
    fn test_empty_plan() {
        let dir = TempDir::new().unwrap();
        let plan = CleanupPlan::new();
        assert!(plan.is_empty());

        let report = apply(&plan, dir.path(), false).unwrap();
        assert_eq!(report.removed, 0);
    }

    #[test]
    fn test_op_display() {
        let op = CleanupOp::RemoveDir(PathBuf::from(".envs"));
        assert_eq!(op.to_string(), "RemoveDir(.envs)");

        let op = CleanupOp::RemoveFile(PathBuf::from("Procfile"));
        assert_eq!(op.to_string(), "RemoveFile(Procfile)");
    }
}
