//! Job and category descriptors plus the input-side collaborator trait.
//!
//! These are plain data types with no tree or rendering knowledge. A
//! [`JobSource`] supplies the ordered todo list and the category registry;
//! [`SelectionTree::build`](crate::SelectionTree::build) validates and
//! consumes them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single runnable test job, with its effective category already resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescriptor {
    /// Globally unique job id (the externally meaningful selection result).
    pub id: String,
    /// Translated human-readable summary.
    pub name: String,
    /// Id of the category this job is grouped under.
    pub category_id: String,
}

impl JobDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category_id: category_id.into(),
        }
    }
}

/// A category registry entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id, unique among categories.
    pub id: String,
    /// Translated display name, used for sorting and labels.
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Supplies jobs and categories to the selection tree.
///
/// Implemented by whatever owns the session's job list — a test-session
/// manager in production, [`StaticJobSource`] in tests and simple callers.
pub trait JobSource {
    /// Ordered ids of the jobs that are candidates for this run.
    fn todo_list(&self) -> Vec<String>;

    /// Resolve a job id to its descriptor, or `None` if unknown.
    fn job(&self, id: &str) -> Option<JobDescriptor>;

    /// Categories that participate in this run.
    fn participating_categories(&self) -> Vec<Category>;
}

/// In-memory [`JobSource`] over flat lists.
///
/// The todo list is the job list's order.
#[derive(Clone, Debug, Default)]
pub struct StaticJobSource {
    categories: Vec<Category>,
    jobs: Vec<JobDescriptor>,
}

impl StaticJobSource {
    pub fn new(categories: Vec<Category>, jobs: Vec<JobDescriptor>) -> Self {
        Self { categories, jobs }
    }
}

impl JobSource for StaticJobSource {
    fn todo_list(&self) -> Vec<String> {
        self.jobs.iter().map(|j| j.id.clone()).collect()
    }

    fn job(&self, id: &str) -> Option<JobDescriptor> {
        self.jobs.iter().find(|j| j.id == id).cloned()
    }

    fn participating_categories(&self) -> Vec<Category> {
        self.categories.clone()
    }
}

/// Failure while building a [`SelectionTree`](crate::SelectionTree).
///
/// Malformed input is never recovered internally; it surfaces to the caller
/// at construction time.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The todo list references a job the source cannot resolve.
    #[error("todo list references unknown job `{job_id}`")]
    UnknownJob { job_id: String },

    /// A job references a category with no registry entry.
    #[error("job `{job_id}` references unknown category `{category_id}`")]
    UnknownCategory {
        job_id: String,
        category_id: String,
    },
}

// ── Tests ─────────────────────────────────────────────────────────────
