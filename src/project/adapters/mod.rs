//! Adapter implementations of the project repository port.

pub mod key_value;
pub mod memory;

pub use key_value::KeyValueProjectRepository;
pub use memory::InMemoryProjectRepository;

use crate::project::{
    domain::{Project, ProjectId},
    ports::{ProjectRepositoryError, ProjectRepositoryResult},
};

fn upsert_into(projects: &mut Vec<Project>, project: &Project) {
    match projects
        .iter_mut()
        .find(|existing| existing.id() == project.id())
    {
        Some(slot) => *slot = project.clone(),
        None => projects.push(project.clone()),
    }
}

fn remove_from(projects: &mut Vec<Project>, id: &ProjectId) -> ProjectRepositoryResult<()> {
    let before = projects.len();
    projects.retain(|project| project.id() != id);
    if projects.len() == before {
        return Err(ProjectRepositoryError::NotFound(id.clone()));
    }
    Ok(())
}
