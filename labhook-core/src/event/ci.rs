//! CI/CD payloads: pipelines, jobs and deployments.

use super::common::{Commit, Environment, Project, Repository, Runner, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `Pipeline Hook`.
///
/// `object_attributes` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineEvent {
    /// Always `pipeline`.
    #[serde(default)]
    pub object_kind: String,
    /// The pipeline itself.
    pub object_attributes: PipelineAttributes,
    /// Merge request the pipeline runs for, if any.
    #[serde(default)]
    pub merge_request: Option<PipelineMergeRequest>,
    /// Who triggered the pipeline.
    #[serde(default)]
    pub user: Option<User>,
    /// Owning project.
    #[serde(default)]
    pub project: Project,
    /// Head commit.
    #[serde(default)]
    pub commit: Option<Commit>,
    /// Jobs of the pipeline.
    #[serde(default)]
    pub builds: Vec<PipelineJob>,
}

/// Pipeline attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineAttributes {
    /// Global id.
    pub id: u64,
    /// Project-scoped id.
    pub iid: Option<u64>,
    /// Pipeline name, when set by `workflow:name`.
    pub name: Option<String>,
    /// Branch or tag name.
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Whether `ref` is a tag.
    pub tag: bool,
    /// Head SHA.
    pub sha: String,
    /// SHA before the triggering push.
    pub before_sha: String,
    /// `push`, `merge_request_event`, `schedule`, ...
    pub source: String,
    /// `pending`, `running`, `success`, `failed`, ...
    pub status: String,
    /// Human-facing status.
    pub detailed_status: String,
    /// Stage names in order.
    pub stages: Vec<String>,
    /// Creation time.
    #[serde(with = "crate::event::time::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Finish time.
    #[serde(with = "crate::event::time::option")]
    pub finished_at: Option<DateTime<Utc>>,
    /// Run time in seconds.
    pub duration: Option<f64>,
    /// Queue time in seconds.
    pub queued_duration: Option<f64>,
    /// Browser URL.
    pub url: String,
}

/// The merge request a pipeline runs for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineMergeRequest {
    /// Global id.
    pub id: u64,
    /// Project-scoped id.
    pub iid: u64,
    /// Title.
    pub title: String,
    /// Source branch.
    pub source_branch: String,
    /// Target branch.
    pub target_branch: String,
    /// Merge request state.
    pub state: String,
    /// Browser URL.
    pub url: String,
}

/// A job as listed in a pipeline payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineJob {
    /// Job id.
    pub id: u64,
    /// Stage name.
    pub stage: String,
    /// Job name.
    pub name: String,
    /// Job status.
    pub status: String,
    /// Creation time.
    #[serde(with = "crate::event::time::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Start time.
    #[serde(with = "crate::event::time::option")]
    pub started_at: Option<DateTime<Utc>>,
    /// Finish time.
    #[serde(with = "crate::event::time::option")]
    pub finished_at: Option<DateTime<Utc>>,
    /// Run time in seconds.
    pub duration: Option<f64>,
    /// Queue time in seconds.
    pub queued_duration: Option<f64>,
    /// Why the job failed.
    pub failure_reason: Option<String>,
    /// `on_success`, `manual`, ...
    pub when: String,
    /// Whether the job is manual.
    pub manual: bool,
    /// Whether failure is tolerated.
    pub allow_failure: bool,
    /// Who started the job.
    pub user: Option<User>,
    /// Runner that picked it up.
    pub runner: Option<Runner>,
    /// Deployment environment.
    pub environment: Option<Environment>,
}

/// `Job Hook`: a job changed status.
///
/// `build_id` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobEvent {
    /// Always `build`.
    #[serde(default)]
    pub object_kind: String,
    /// Branch or tag name.
    #[serde(default, rename = "ref")]
    pub git_ref: String,
    /// Whether `ref` is a tag.
    #[serde(default)]
    pub tag: bool,
    /// SHA before the triggering push.
    #[serde(default)]
    pub before_sha: String,
    /// Head SHA.
    #[serde(default)]
    pub sha: String,
    /// Job id.
    pub build_id: u64,
    /// Job name.
    #[serde(default)]
    pub build_name: String,
    /// Stage name.
    #[serde(default)]
    pub build_stage: String,
    /// Job status.
    #[serde(default)]
    pub build_status: String,
    /// Creation time.
    #[serde(default, with = "crate::event::time::option")]
    pub build_created_at: Option<DateTime<Utc>>,
    /// Start time.
    #[serde(default, with = "crate::event::time::option")]
    pub build_started_at: Option<DateTime<Utc>>,
    /// Finish time.
    #[serde(default, with = "crate::event::time::option")]
    pub build_finished_at: Option<DateTime<Utc>>,
    /// Run time in seconds.
    #[serde(default)]
    pub build_duration: Option<f64>,
    /// Queue time in seconds.
    #[serde(default)]
    pub build_queued_duration: Option<f64>,
    /// Whether failure is tolerated.
    #[serde(default)]
    pub build_allow_failure: bool,
    /// Why the job failed.
    #[serde(default)]
    pub build_failure_reason: Option<String>,
    /// Owning pipeline id.
    #[serde(default)]
    pub pipeline_id: u64,
    /// Runner that picked it up.
    #[serde(default)]
    pub runner: Option<Runner>,
    /// Owning project id.
    #[serde(default)]
    pub project_id: u64,
    /// Owning project name.
    #[serde(default)]
    pub project_name: String,
    /// Who started the job.
    #[serde(default)]
    pub user: Option<User>,
    /// Commit under test.
    #[serde(default)]
    pub commit: Option<JobCommit>,
    /// Legacy repository block.
    #[serde(default)]
    pub repository: Repository,
    /// Owning project.
    #[serde(default)]
    pub project: Project,
    /// Deployment environment.
    #[serde(default)]
    pub environment: Option<Environment>,
}

impl JobEvent {
    /// Whether the job reached a terminal status.
    pub fn is_finished(&self) -> bool {
        matches!(
            self.build_status.as_str(),
            "success" | "failed" | "canceled" | "skipped"
        )
    }
}

/// The commit block of a job payload, which differs from [`Commit`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobCommit {
    /// Owning pipeline id (GitLab reuses the name).
    pub id: u64,
    /// Commit SHA.
    pub sha: String,
    /// Commit message.
    pub message: String,
    /// Author name.
    pub author_name: String,
    /// Author email.
    pub author_email: String,
    /// Pipeline status.
    pub status: String,
    /// Pipeline run time in seconds.
    pub duration: Option<f64>,
    /// Pipeline start time.
    #[serde(with = "crate::event::time::option")]
    pub started_at: Option<DateTime<Utc>>,
    /// Pipeline finish time.
    #[serde(with = "crate::event::time::option")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// `Deployment Hook`.
///
/// `deployment_id` and `status` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentEvent {
    /// Always `deployment`.
    #[serde(default)]
    pub object_kind: String,
    /// `running`, `success`, `failed` or `canceled`.
    pub status: String,
    /// When `status` last changed.
    #[serde(default, with = "crate::event::time::option")]
    pub status_changed_at: Option<DateTime<Utc>>,
    /// Deployment id.
    pub deployment_id: u64,
    /// Job that performs the deployment.
    #[serde(default)]
    pub deployable_id: Option<u64>,
    /// Browser URL of that job.
    #[serde(default)]
    pub deployable_url: Option<String>,
    /// Environment name.
    #[serde(default)]
    pub environment: String,
    /// `production`, `staging`, ...
    #[serde(default)]
    pub environment_tier: Option<String>,
    /// External URL of the environment.
    #[serde(default)]
    pub environment_external_url: Option<String>,
    /// Owning project.
    #[serde(default)]
    pub project: Project,
    /// Deployed short SHA.
    #[serde(default)]
    pub short_sha: String,
    /// Who deployed.
    #[serde(default)]
    pub user: User,
    /// Browser URL of the deployer.
    #[serde(default)]
    pub user_url: String,
    /// Browser URL of the deployed commit.
    #[serde(default)]
    pub commit_url: String,
    /// Title of the deployed commit.
    #[serde(default)]
    pub commit_title: String,
    /// Deployed branch or tag.
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
}
