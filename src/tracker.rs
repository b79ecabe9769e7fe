//! Composition root wiring a key-value store to every service.

use std::sync::Arc;

use mockable::DefaultClock;
use thiserror::Error;
use tracing::info;

use crate::authorization::{TransitionAuthorizer, TransitionTable};
use crate::config::TrackerConfig;
use crate::project::{
    adapters::KeyValueProjectRepository,
    ports::{ProjectRepository, ProjectRepositoryError},
    services::ProjectService,
};
use crate::seed::{SeedDocument, SeedError};
use crate::status::StatusRegistry;
use crate::storage::{
    adapters::{DirectoryKeyValueStore, InMemoryKeyValueStore},
    ports::{KeyValueStore, StorageError, StorageResult},
};
use crate::task::{
    adapters::KeyValueTaskRepository,
    ports::{TaskRepository, TaskRepositoryError},
    services::TaskLifecycleService,
};
use crate::user::{
    adapters::{KeyValueSessionStore, KeyValueUserRepository},
    ports::{UserRepository, UserRepositoryError},
    services::AuthService,
};

/// Errors raised while opening a tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The backing store could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The seed document could not be read or converted.
    #[error(transparent)]
    Seed(#[from] SeedError),
    /// Writing seed users failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// Writing seed projects failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
    /// Writing seed tasks failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

/// Store selected by [`TrackerConfig::data_dir`].
pub enum ConfiguredStore {
    /// Process-local map.
    Memory(InMemoryKeyValueStore),
    /// One JSON file per key inside a directory.
    Directory(DirectoryKeyValueStore),
}

impl KeyValueStore for ConfiguredStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match self {
            Self::Memory(store) => store.get(key),
            Self::Directory(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        match self {
            Self::Memory(store) => store.set(key, value),
            Self::Directory(store) => store.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        match self {
            Self::Memory(store) => store.remove(key),
            Self::Directory(store) => store.remove(key),
        }
    }
}

/// User service over the key-value adapters.
pub type TrackerAuthService<S> = AuthService<KeyValueUserRepository<S>, KeyValueSessionStore<S>>;
/// Project service over the key-value adapters.
pub type TrackerProjectService<S> =
    ProjectService<KeyValueProjectRepository<S>, KeyValueTaskRepository<S>>;
/// Task service over the key-value adapters.
pub type TrackerTaskService<S> =
    TaskLifecycleService<KeyValueTaskRepository<S>, KeyValueProjectRepository<S>, DefaultClock>;

/// The assembled tracker: status catalog, transition policy, and services
/// sharing one store.
pub struct Tracker<S: KeyValueStore> {
    store: Arc<S>,
    registry: Arc<StatusRegistry>,
    authorizer: Arc<TransitionAuthorizer>,
    auth: TrackerAuthService<S>,
    projects: TrackerProjectService<S>,
    tasks: TrackerTaskService<S>,
}

impl Tracker<ConfiguredStore> {
    /// Opens the store named by `config` and seeds it when requested.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the store cannot be opened or the seed
    /// cannot be loaded.
    pub async fn open(config: &TrackerConfig) -> Result<Self, TrackerError> {
        let store = match &config.data_dir {
            Some(path) => {
                info!(data_dir = %path, "opening directory store");
                ConfiguredStore::Directory(DirectoryKeyValueStore::open(path)?)
            }
            None => ConfiguredStore::Memory(InMemoryKeyValueStore::new()),
        };
        Self::with_store(Arc::new(store), config.load_seed).await
    }
}

impl<S: KeyValueStore> Tracker<S> {
    /// Assembles a tracker over `store`.
    ///
    /// The status catalog always comes from the bundled seed document. Users,
    /// projects, and tasks are seeded only when `load_seed` is set and the
    /// store holds no user collection yet.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the seed cannot be read or written.
    pub async fn with_store(store: Arc<S>, load_seed: bool) -> Result<Self, TrackerError> {
        let document = SeedDocument::bundled()?;
        let registry = Arc::new(document.registry()?);
        let authorizer = Arc::new(TransitionAuthorizer::new(TransitionTable::standard()));
        let clock = Arc::new(DefaultClock);

        let users = Arc::new(KeyValueUserRepository::new(Arc::clone(&store)));
        let projects = Arc::new(KeyValueProjectRepository::new(Arc::clone(&store)));
        let tasks = Arc::new(KeyValueTaskRepository::new(Arc::clone(&store)));

        if load_seed && !users.is_initialized()? {
            let data = document.into_data(&*clock)?;
            for project in &data.projects {
                projects.upsert(project).await?;
            }
            for task in &data.tasks {
                tasks.upsert(task).await?;
            }
            // Users go last: their key marks the store as seeded.
            for user in &data.users {
                users.upsert(user).await?;
            }
            info!(
                users = data.users.len(),
                projects = data.projects.len(),
                tasks = data.tasks.len(),
                "seed data loaded"
            );
        }

        Ok(Self {
            auth: AuthService::new(
                users,
                Arc::new(KeyValueSessionStore::new(Arc::clone(&store))),
            ),
            projects: ProjectService::new(Arc::clone(&projects), Arc::clone(&tasks)),
            tasks: TaskLifecycleService::new(
                tasks,
                projects,
                Arc::clone(&registry),
                Arc::clone(&authorizer),
                clock,
            ),
            store,
            registry,
            authorizer,
        })
    }

    /// Returns the backing store.
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns the status catalog.
    #[must_use]
    pub fn registry(&self) -> &StatusRegistry {
        &self.registry
    }

    /// Returns the transition policy.
    #[must_use]
    pub fn authorizer(&self) -> &TransitionAuthorizer {
        &self.authorizer
    }

    /// Returns the registration and sign-in service.
    #[must_use]
    pub const fn auth(&self) -> &TrackerAuthService<S> {
        &self.auth
    }

    /// Returns the project service.
    #[must_use]
    pub const fn projects(&self) -> &TrackerProjectService<S> {
        &self.projects
    }

    /// Returns the task service.
    #[must_use]
    pub const fn tasks(&self) -> &TrackerTaskService<S> {
        &self.tasks
    }
}
