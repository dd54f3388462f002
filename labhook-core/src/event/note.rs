//! Comment (note) payloads.

use super::{
    common::{Commit, Project, Repository, User},
    issue::IssueAttributes,
    merge_request::MergeRequestAttributes,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `Note Hook` and `Confidential Note Hook`: a comment on a commit, merge
/// request, issue or snippet.
///
/// `object_attributes` is required. Exactly one of `commit`, `merge_request`,
/// `issue` and `snippet` is normally present; [`NoteEvent::target`] picks it
/// according to `noteable_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Always `note`.
    #[serde(default)]
    pub object_kind: String,
    /// `note` or `confidential_note`.
    #[serde(default)]
    pub event_type: String,
    /// Comment author.
    #[serde(default)]
    pub user: User,
    /// Owning project id.
    #[serde(default)]
    pub project_id: u64,
    /// Owning project.
    #[serde(default)]
    pub project: Project,
    /// Legacy repository block.
    #[serde(default)]
    pub repository: Repository,
    /// The comment itself.
    pub object_attributes: NoteAttributes,
    /// Commented commit.
    #[serde(default)]
    pub commit: Option<Commit>,
    /// Commented merge request.
    #[serde(default)]
    pub merge_request: Option<MergeRequestAttributes>,
    /// Commented issue.
    #[serde(default)]
    pub issue: Option<IssueAttributes>,
    /// Commented snippet.
    #[serde(default)]
    pub snippet: Option<Snippet>,
}

/// What a comment was made on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoteTarget<'a> {
    /// A commit; the payload may omit the commit body.
    Commit(Option<&'a Commit>),
    /// A merge request.
    MergeRequest(Option<&'a MergeRequestAttributes>),
    /// An issue.
    Issue(Option<&'a IssueAttributes>),
    /// A snippet.
    Snippet(Option<&'a Snippet>),
    /// A `noteable_type` this crate does not model.
    Unknown(&'a str),
}

impl NoteEvent {
    /// Resolve the commented object from `noteable_type`.
    pub fn target(&self) -> NoteTarget<'_> {
        match self.object_attributes.noteable_type.as_str() {
            "Commit" => NoteTarget::Commit(self.commit.as_ref()),
            "MergeRequest" => NoteTarget::MergeRequest(self.merge_request.as_ref()),
            "Issue" => NoteTarget::Issue(self.issue.as_ref()),
            "Snippet" => NoteTarget::Snippet(self.snippet.as_ref()),
            other => NoteTarget::Unknown(other),
        }
    }
}

/// Comment attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteAttributes {
    /// Note id.
    pub id: u64,
    /// Comment body in Markdown.
    pub note: String,
    /// `Commit`, `MergeRequest`, `Issue` or `Snippet`.
    pub noteable_type: String,
    /// Id of the commented object, when it has one.
    pub noteable_id: Option<u64>,
    /// Author id.
    pub author_id: u64,
    /// Owning project id.
    pub project_id: u64,
    /// Commented commit SHA, for commit and diff comments.
    pub commit_id: Option<String>,
    /// Diff line code, for diff comments.
    pub line_code: Option<String>,
    /// Discussion thread id.
    pub discussion_id: Option<String>,
    /// `DiffNote`, `DiscussionNote`, or absent for plain notes.
    #[serde(rename = "type")]
    pub note_type: Option<String>,
    /// Whether GitLab generated the note.
    pub system: bool,
    /// Whether the note is internal.
    pub internal: bool,
    /// Creation time.
    #[serde(with = "crate::event::time::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update.
    #[serde(with = "crate::event::time::option")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Browser URL.
    pub url: String,
    /// `create` or `update`.
    pub action: Option<String>,
}

/// A code snippet, as embedded in snippet comments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snippet {
    /// Snippet id.
    pub id: u64,
    /// Title.
    pub title: String,
    /// File content.
    pub content: String,
    /// Author id.
    pub author_id: u64,
    /// Owning project id.
    pub project_id: Option<u64>,
    /// File name.
    pub file_name: String,
    /// `ProjectSnippet` or `PersonalSnippet`.
    #[serde(rename = "type")]
    pub snippet_type: String,
    /// 0 private, 10 internal, 20 public.
    pub visibility_level: u32,
    /// Creation time.
    #[serde(with = "crate::event::time::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update.
    #[serde(with = "crate::event::time::option")]
    pub updated_at: Option<DateTime<Utc>>,
}
