//! Shared world state for task status transition BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use taskboard::{
    authorization::{Role, TransitionAuthorizer, TransitionTable},
    project::{adapters::InMemoryProjectRepository, domain::Project},
    seed::SeedDocument,
    status::StatusRegistry,
    task::{
        adapters::InMemoryTaskRepository,
        domain::Task,
        services::{TaskLifecycleError, TaskLifecycleService},
    },
    user::domain::{EmailAddress, PasswordDigest, User},
};
use mockable::DefaultClock;

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryProjectRepository, DefaultClock>;

/// Scenario world for status transition behaviour tests.
pub struct StatusTransitionWorld {
    pub service: TestTaskService,
    pub projects: Arc<InMemoryProjectRepository>,
    pub registry: Arc<StatusRegistry>,
    pub setup_manager: User,
    pub project: Project,
    pub actor: Option<User>,
    pub task: Option<Task>,
    pub last_transition_result: Option<Result<Task, TaskLifecycleError>>,
}

impl StatusTransitionWorld {
    /// Creates a world with an unsaved project run by a setup manager.
    ///
    /// # Panics
    ///
    /// Panics if the bundled status catalog or the setup records are
    /// invalid.
    #[must_use]
    pub fn new() -> Self {
        let registry = Arc::new(
            SeedDocument::bundled()
                .and_then(|document| document.registry())
                .expect("bundled status catalog is valid"),
        );
        let projects = Arc::new(InMemoryProjectRepository::new());
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&projects),
            Arc::clone(&registry),
            Arc::new(TransitionAuthorizer::new(TransitionTable::standard())),
            Arc::new(DefaultClock),
        );
        let setup_manager = user("setup@test.com", vec![Role::Manager]);
        let project = Project::new("Scenario project", "", [setup_manager.id().clone()])
            .expect("valid project");

        Self {
            service,
            projects,
            registry,
            setup_manager,
            project,
            actor: None,
            task: None,
            last_transition_result: None,
        }
    }
}

impl Default for StatusTransitionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a user with the given roles and the password `"123"`.
///
/// # Panics
///
/// Panics if `email` is malformed or `roles` is empty.
pub fn user(email: &str, roles: Vec<Role>) -> User {
    User::new(
        email,
        EmailAddress::new(email).expect("valid email"),
        PasswordDigest::hash("123").expect("hash password"),
        roles,
    )
    .expect("valid user")
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> StatusTransitionWorld {
    StatusTransitionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
