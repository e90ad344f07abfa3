#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName(pub String);

impl BranchName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `git rev-parse --abbrev-ref HEAD` prints `HEAD` when no branch is checked out.
    pub fn is_detached(&self) -> bool {
        self.0 == "HEAD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_git_output() {
        let name = BranchName::new("feature/PROJ-12-login\n");
        assert_eq!(name.as_str(), "feature/PROJ-12-login");
        assert!(!name.is_detached());
    }

    #[test]
    fn detects_detached_head() {
        assert!(BranchName::new("HEAD").is_detached());
    }
}
