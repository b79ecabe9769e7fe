//! Key-value backed task repository.

use async_trait::async_trait;
use std::sync::Arc;

use crate::project::domain::ProjectId;
use crate::storage::{JsonCollection, TASKS_KEY, ports::KeyValueStore};
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;

/// Task repository persisting the collection under [`TASKS_KEY`].
pub struct KeyValueTaskRepository<S> {
    tasks: JsonCollection<S, Task>,
}

impl<S: KeyValueStore> KeyValueTaskRepository<S> {
    /// Creates a repository over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self {
            tasks: JsonCollection::new(store, TASKS_KEY),
        }
    }

    fn matching(&self, predicate: impl Fn(&Task) -> bool) -> TaskRepositoryResult<Vec<Task>> {
        let mut tasks = self.tasks.load()?;
        tasks.retain(|task| predicate(task));
        Ok(tasks)
    }
}

#[async_trait]
impl<S: KeyValueStore> TaskRepository for KeyValueTaskRepository<S> {
    async fn find_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.tasks.load()?;
        Ok(tasks.into_iter().find(|task| task.id() == id))
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        Ok(self.tasks.load()?)
    }

    async fn list_by_project(&self, project_id: &ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.matching(|task| task.project_id() == project_id)
    }

    async fn list_assigned_to(&self, user_id: &UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.matching(|task| task.assigned_to() == Some(user_id))
    }

    async fn upsert(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.tasks.update(|tasks| {
            match tasks.iter_mut().find(|existing| existing.id() == task.id()) {
                Some(slot) => *slot = task.clone(),
                None => tasks.push(task.clone()),
            }
            Ok::<_, TaskRepositoryError>(())
        })
    }

    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        self.tasks.update(|tasks| {
            let before = tasks.len();
            tasks.retain(|task| task.id() != id);
            if tasks.len() == before {
                return Err(TaskRepositoryError::NotFound(id.clone()));
            }
            Ok(())
        })
    }

    async fn delete_by_project(&self, project_id: &ProjectId) -> TaskRepositoryResult<usize> {
        self.tasks.update(|tasks| {
            let before = tasks.len();
            tasks.retain(|task| task.project_id() != project_id);
            Ok::<_, TaskRepositoryError>(before - tasks.len())
        })
    }
}
