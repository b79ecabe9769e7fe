//! Service orchestration tests for project management.

use std::sync::{Arc, OnceLock};

use crate::authorization::Role;
use crate::project::{
    adapters::InMemoryProjectRepository,
    domain::{Project, ProjectDomainError, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
    services::{CreateProjectRequest, ProjectService, ProjectServiceError, UpdateProjectRequest},
};
use crate::status::StatusId;
use crate::task::{
    adapters::InMemoryTaskRepository,
    domain::{Task, TaskDraft, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::{EmailAddress, PasswordDigest, User, UserId};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = ProjectService<InMemoryProjectRepository, InMemoryTaskRepository>;

struct Harness {
    service: TestService,
    tasks: Arc<InMemoryTaskRepository>,
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    Harness {
        service: ProjectService::new(
            Arc::new(InMemoryProjectRepository::new()),
            Arc::clone(&tasks),
        ),
        tasks,
    }
}

fn user(email: &str, roles: impl IntoIterator<Item = Role>) -> User {
    static DIGEST: OnceLock<PasswordDigest> = OnceLock::new();
    let digest = DIGEST
        .get_or_init(|| PasswordDigest::hash("123").expect("hash password"))
        .clone();
    User::new(
        email,
        EmailAddress::new(email).expect("valid email"),
        digest,
        roles,
    )
    .expect("valid user")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_adds_creator_as_first_manager(harness: Harness) {
    let laura = user("manager@test.com", [Role::Manager]);
    let jorge = user("dual@test.com", [Role::Manager, Role::Developer]);

    let project = harness
        .service
        .create(
            &laura,
            CreateProjectRequest::new("Website")
                .with_description("Landing page")
                .with_managers([jorge.id().clone(), laura.id().clone()]),
        )
        .await
        .expect("creation should succeed");

    assert_eq!(project.manager_ids(), [laura.id().clone(), jorge.id().clone()]);
    assert_eq!(
        harness.service.find_by_id(project.id()).await.expect("lookup"),
        Some(project)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_requires_manager_role(harness: Harness) {
    let david = user("dev@test.com", [Role::Developer]);

    let result = harness
        .service
        .create(&david, CreateProjectRequest::new("Website"))
        .await;

    assert!(matches!(result, Err(ProjectServiceError::ManagerRoleRequired(ref id)) if id == david.id()));
    assert!(harness.service.list().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_is_limited_to_project_managers(harness: Harness) {
    let laura = user("manager@test.com", [Role::Manager]);
    let jorge = user("dual@test.com", [Role::Manager, Role::Developer]);
    let project = harness
        .service
        .create(&laura, CreateProjectRequest::new("Website"))
        .await
        .expect("creation should succeed");

    let denied = harness
        .service
        .update(
            &jorge,
            project.id(),
            UpdateProjectRequest::new().with_title("Hijacked"),
        )
        .await;
    let updated = harness
        .service
        .update(
            &laura,
            project.id(),
            UpdateProjectRequest::new()
                .with_title("Website v2")
                .with_managers([laura.id().clone(), jorge.id().clone()]),
        )
        .await
        .expect("manager update should succeed");

    assert!(matches!(denied, Err(ProjectServiceError::NotProjectManager { .. })));
    assert_eq!(updated.title(), "Website v2");
    assert!(updated.is_managed_by(jorge.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_blank_title(harness: Harness) {
    let laura = user("manager@test.com", [Role::Manager]);
    let project = harness
        .service
        .create(&laura, CreateProjectRequest::new("Website"))
        .await
        .expect("creation should succeed");

    let result = harness
        .service
        .update(&laura, project.id(), UpdateProjectRequest::new().with_title(" "))
        .await;

    assert!(matches!(
        result,
        Err(ProjectServiceError::Domain(ProjectDomainError::EmptyTitle))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_cascades_to_project_tasks(harness: Harness) {
    let laura = user("manager@test.com", [Role::Manager]);
    let website = harness
        .service
        .create(&laura, CreateProjectRequest::new("Website"))
        .await
        .expect("create website");
    let mobile = harness
        .service
        .create(&laura, CreateProjectRequest::new("Mobile app"))
        .await
        .expect("create mobile");
    for (project_id, title) in [(website.id(), "Settings"), (website.id(), "Login"), (mobile.id(), "Push")] {
        let draft = TaskDraft {
            project_id: project_id.clone(),
            title: title.to_owned(),
            description: String::new(),
            status: StatusId::new("1"),
            assigned_to: None,
        };
        let task = Task::new(draft, &DefaultClock).expect("valid task");
        harness.tasks.upsert(&task).await.expect("store task");
    }

    let removed = harness
        .service
        .delete(&laura, website.id())
        .await
        .expect("delete should succeed");

    assert_eq!(removed, 2);
    assert_eq!(harness.service.find_by_id(website.id()).await.expect("lookup"), None);
    let remaining = harness.tasks.list().await.expect("list tasks");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].project_id(), mobile.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_reports_missing_project(harness: Harness) {
    let laura = user("manager@test.com", [Role::Manager]);

    let result = harness
        .service
        .delete(&laura, &ProjectId::from_raw("missing"))
        .await;

    assert!(matches!(
        result,
        Err(ProjectServiceError::Repository(ProjectRepositoryError::NotFound(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_for_manager_filters_by_membership(harness: Harness) {
    let laura = user("manager@test.com", [Role::Manager]);
    let jorge = user("dual@test.com", [Role::Manager, Role::Developer]);
    let shared = harness
        .service
        .create(
            &laura,
            CreateProjectRequest::new("Website").with_managers([jorge.id().clone()]),
        )
        .await
        .expect("create shared");
    harness
        .service
        .create(&laura, CreateProjectRequest::new("Mobile app"))
        .await
        .expect("create solo");

    let for_jorge = harness
        .service
        .list_for_manager(jorge.id())
        .await
        .expect("lookup");

    assert_eq!(for_jorge, vec![shared]);
    assert_eq!(harness.service.list().await.expect("list").len(), 2);
}

mockall::mock! {
    Projects {}

    #[async_trait::async_trait]
    impl ProjectRepository for Projects {
        async fn find_by_id(&self, id: &ProjectId) -> ProjectRepositoryResult<Option<Project>>;
        async fn list(&self) -> ProjectRepositoryResult<Vec<Project>>;
        async fn upsert(&self, project: &Project) -> ProjectRepositoryResult<()>;
        async fn delete(&self, id: &ProjectId) -> ProjectRepositoryResult<()>;
    }
}

mockall::mock! {
    Tasks {}

    #[async_trait::async_trait]
    impl TaskRepository for Tasks {
        async fn find_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>>;
        async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;
        async fn list_by_project(&self, project_id: &ProjectId) -> TaskRepositoryResult<Vec<Task>>;
        async fn list_assigned_to(&self, user_id: &UserId) -> TaskRepositoryResult<Vec<Task>>;
        async fn upsert(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()>;
        async fn delete_by_project(&self, project_id: &ProjectId) -> TaskRepositoryResult<usize>;
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_keeps_tasks_when_project_removal_fails() {
    let laura = user("manager@test.com", [Role::Manager]);
    let website = Project::new("Website", "", [laura.id().clone()]).expect("valid project");
    let stored = website.clone();
    let mut projects = MockProjects::new();
    projects
        .expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    projects.expect_delete().times(1).returning(|_| {
        Err(ProjectRepositoryError::persistence(std::io::Error::other(
            "disk full",
        )))
    });
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let draft = TaskDraft {
        project_id: website.id().clone(),
        title: "Settings".to_owned(),
        description: String::new(),
        status: StatusId::new("1"),
        assigned_to: None,
    };
    let task = Task::new(draft, &DefaultClock).expect("valid task");
    tasks.upsert(&task).await.expect("store task");
    let service = ProjectService::new(Arc::new(projects), Arc::clone(&tasks));

    let result = service.delete(&laura, website.id()).await;

    assert!(matches!(
        result,
        Err(ProjectServiceError::Repository(ProjectRepositoryError::Persistence(_)))
    ));
    let remaining = tasks
        .list_by_project(website.id())
        .await
        .expect("list tasks");
    assert_eq!(remaining, vec![task]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_restores_project_when_task_removal_fails() {
    let laura = user("manager@test.com", [Role::Manager]);
    let projects = Arc::new(InMemoryProjectRepository::new());
    let mut tasks = MockTasks::new();
    tasks.expect_delete_by_project().times(1).returning(|_| {
        Err(TaskRepositoryError::persistence(std::io::Error::other(
            "disk full",
        )))
    });
    let service = ProjectService::new(Arc::clone(&projects), Arc::new(tasks));
    let website = service
        .create(&laura, CreateProjectRequest::new("Website"))
        .await
        .expect("create website");

    let result = service.delete(&laura, website.id()).await;

    assert!(matches!(
        result,
        Err(ProjectServiceError::Tasks(TaskRepositoryError::Persistence(_)))
    ));
    let restored = projects
        .find_by_id(website.id())
        .await
        .expect("lookup");
    assert_eq!(restored, Some(website));
}
