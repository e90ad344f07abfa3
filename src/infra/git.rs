use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;

use crate::domain::branch::BranchName;
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn current_branch(&self) -> AppResult<BranchName> {
        let output = Command::new("git")
            .args(["rev-parse", "--abbrev-ref", "HEAD"])
            .current_dir(&self.workspace_root)
            .output()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to run git: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::VersionControl(format!(
                "git rev-parse --abbrev-ref HEAD failed: {}",
                stderr.trim()
            )));
        }

        Ok(BranchName::new(String::from_utf8_lossy(&output.stdout)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_failure_outside_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitCli::new(dir.path().join("missing"));
        let error = git.current_branch().await.unwrap_err();
        assert!(matches!(error, AppError::VersionControl(_)));
    }
}
