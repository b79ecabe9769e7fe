//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::project::domain::ProjectId;
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    insertion_order: Vec<TaskId>,
    project_index: HashMap<ProjectId, Vec<TaskId>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Removes a task ID from the project index, cleaning up the entry if empty.
fn remove_from_index(
    index: &mut HashMap<ProjectId, Vec<TaskId>>,
    task_id: &TaskId,
    project_id: &ProjectId,
) {
    if let Some(ids) = index.get_mut(project_id) {
        ids.retain(|id| id != task_id);
        if ids.is_empty() {
            index.remove(project_id);
        }
    }
}

impl InMemoryTaskState {
    fn ordered<'a>(&'a self, ids: impl IntoIterator<Item = &'a TaskId>) -> Vec<Task> {
        ids.into_iter()
            .filter_map(|id| self.tasks.get(id).cloned())
            .collect()
    }

    fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let removed = self.tasks.remove(id)?;
        self.insertion_order.retain(|existing| existing != id);
        remove_from_index(&mut self.project_index, id, removed.project_id());
        Some(removed)
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(id).cloned())
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.ordered(&state.insertion_order))
    }

    async fn list_by_project(&self, project_id: &ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .project_index
            .get(project_id)
            .map(|ids| state.ordered(ids))
            .unwrap_or_default())
    }

    async fn list_assigned_to(&self, user_id: &UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut assigned = state.ordered(&state.insertion_order);
        assigned.retain(|task| task.assigned_to() == Some(user_id));
        Ok(assigned)
    }

    async fn upsert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let previous_project = state
            .tasks
            .get(task.id())
            .map(|existing| existing.project_id().clone());

        match previous_project {
            Some(project_id) if project_id != *task.project_id() => {
                remove_from_index(&mut state.project_index, task.id(), &project_id);
                state
                    .project_index
                    .entry(task.project_id().clone())
                    .or_default()
                    .push(task.id().clone());
            }
            Some(_) => {}
            None => {
                state.insertion_order.push(task.id().clone());
                state
                    .project_index
                    .entry(task.project_id().clone())
                    .or_default()
                    .push(task.id().clone());
            }
        }

        state.tasks.insert(task.id().clone(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))
    }

    async fn delete_by_project(&self, project_id: &ProjectId) -> TaskRepositoryResult<usize> {
        let mut state = self.state.write().map_err(poisoned)?;
        let ids = state
            .project_index
            .get(project_id)
            .cloned()
            .unwrap_or_default();
        let removed = ids
            .iter()
            .filter(|id| state.remove(id).is_some())
            .count();
        Ok(removed)
    }
}
