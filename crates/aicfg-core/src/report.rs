//! Human-readable and serialisable views of directory plans

use serde::Serialize;
use tracing::info;

use crate::plan::DirectoryPlan;

/// Classification of a plan, in the priority order used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanStatus {
    /// Neither the source nor the project has the directory
    AbsentBoth,
    /// The source lacks the directory; the local copy would be deleted
    RemovedUpstream { removed: usize },
    /// The project lacks the directory; it would be created
    Created { files: usize },
    /// Local copy matches the source
    UpToDate,
    /// Both exist and differ
    Changed {
        added: usize,
        modified: usize,
        removed: usize,
    },
}

impl PlanStatus {
    pub fn of(plan: &DirectoryPlan) -> Self {
        match (plan.source.is_present(), plan.destination_exists) {
            (false, false) => Self::AbsentBoth,
            (false, true) => Self::RemovedUpstream {
                removed: plan.removed.len(),
            },
            (true, false) => Self::Created {
                files: plan.added.len() + plan.modified.len(),
            },
            (true, true) if !plan.needs_change() => Self::UpToDate,
            (true, true) => Self::Changed {
                added: plan.added.len(),
                modified: plan.modified.len(),
                removed: plan.removed.len(),
            },
        }
    }
}

/// One-line description of a plan.
pub fn describe(plan: &DirectoryPlan) -> String {
    let name = plan.directory;
    match PlanStatus::of(plan) {
        PlanStatus::AbsentBoth => format!("Directory {name} absent both locally and remotely."),
        PlanStatus::RemovedUpstream { removed } => {
            format!("Directory {name} missing in remote. {removed} files would be removed.")
        }
        PlanStatus::Created { files } => {
            format!("Directory {name} will be created with {files} files.")
        }
        PlanStatus::UpToDate => format!("Directory {name} already up to date."),
        PlanStatus::Changed {
            added,
            modified,
            removed,
        } => format!("Directory {name} changes -> add:{added} modify:{modified} remove:{removed}"),
    }
}

/// Emit the description of every plan at info level.
pub fn log_plans(plans: &[DirectoryPlan]) {
    for plan in plans {
        info!("{}", describe(plan));
    }
}

/// Serialisable summary of a plan for machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub directory: String,
    #[serde(flatten)]
    pub status: PlanStatus,
    pub needs_change: bool,
    pub description: String,
    pub added_files: Vec<String>,
    pub modified_files: Vec<String>,
    pub removed_files: Vec<String>,
}

impl From<&DirectoryPlan> for PlanSummary {
    fn from(plan: &DirectoryPlan) -> Self {
        Self {
            directory: plan.directory.to_string(),
            status: PlanStatus::of(plan),
            needs_change: plan.needs_change(),
            description: describe(plan),
            added_files: plan.added.clone(),
            modified_files: plan.modified.clone(),
            removed_files: plan.removed.clone(),
        }
    }
}
