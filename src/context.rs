use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::pattern::PatternSet;
use crate::services::{IssueTrackerService, VersionControlService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub patterns: PatternSet,
    pub version_control: Arc<dyn VersionControlService>,
    pub issue_tracker: Arc<dyn IssueTrackerService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        patterns: PatternSet,
        version_control: Arc<dyn VersionControlService>,
        issue_tracker: Arc<dyn IssueTrackerService>,
    ) -> Self {
        Self {
            config,
            patterns,
            version_control,
            issue_tracker,
        }
    }
}
