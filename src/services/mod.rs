pub mod issue_tracker;
pub mod version_control;

pub use issue_tracker::{IssueTrackerService, ValidationOutcome};
pub use version_control::VersionControlService;
