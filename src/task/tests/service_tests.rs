//! Service orchestration tests for task lifecycle operations.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::{numbered_registry, user_with_roles};
use crate::authorization::{Role, TransitionAuthorizer, TransitionTable};
use crate::project::{
    adapters::InMemoryProjectRepository,
    domain::{Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use crate::status::{StatusId, StatusKey};
use crate::task::{
    adapters::InMemoryTaskRepository,
    domain::{Task, TaskDomainError, TaskDraft},
    ports::{TaskRepository, TaskRepositoryError},
    services::{AddTaskRequest, TaskLifecycleError, TaskLifecycleService, UpdateTaskRequest},
};
use crate::user::domain::User;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryProjectRepository, DefaultClock>;

struct Harness {
    service: TestService,
    tasks: Arc<InMemoryTaskRepository>,
    projects: Arc<InMemoryProjectRepository>,
    manager: User,
    developer: User,
    dual: User,
    project: Project,
}

#[fixture]
async fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let projects = Arc::new(InMemoryProjectRepository::new());
    let service = TaskLifecycleService::new(
        Arc::clone(&tasks),
        Arc::clone(&projects),
        Arc::new(numbered_registry()),
        Arc::new(TransitionAuthorizer::new(TransitionTable::standard())),
        Arc::new(DefaultClock),
    );
    let manager = user_with_roles("manager@test.com", [Role::Manager]);
    let developer = user_with_roles("dev@test.com", [Role::Developer]);
    let dual = user_with_roles("dual@test.com", [Role::Manager, Role::Developer]);
    let project =
        Project::new("Website", "", [manager.id().clone()]).expect("valid project");
    projects.upsert(&project).await.expect("store project");
    Harness {
        service,
        tasks,
        projects,
        manager,
        developer,
        dual,
        project,
    }
}

impl Harness {
    async fn task_in(&self, status: StatusKey) -> Task {
        self.service
            .add_task(
                &self.manager,
                AddTaskRequest::new(self.project.id().clone(), "Settings").with_status(status),
            )
            .await
            .expect("task creation should succeed")
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_task_defaults_to_to_do_and_links_project(#[future] harness: Harness) {
    let h = harness.await;

    let task = h
        .service
        .add_task(
            &h.manager,
            AddTaskRequest::new(h.project.id().clone(), "Settings")
                .with_description("Profile form")
                .assigned_to(h.developer.id().clone()),
        )
        .await
        .expect("task creation should succeed");

    assert_eq!(task.status(), &StatusId::new("1"));
    assert_eq!(task.assigned_to(), Some(h.developer.id()));
    let project = h
        .projects
        .find_by_id(h.project.id())
        .await
        .expect("lookup")
        .expect("project exists");
    assert_eq!(project.task_ids(), [task.id().clone()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_task_requires_manager_role(#[future] harness: Harness) {
    let h = harness.await;

    let result = h
        .service
        .add_task(
            &h.developer,
            AddTaskRequest::new(h.project.id().clone(), "Settings"),
        )
        .await;

    assert!(matches!(result, Err(TaskLifecycleError::ManagerRoleRequired(ref id)) if id == h.developer.id()));
    assert!(h.tasks.list().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_task_rejects_unknown_project(#[future] harness: Harness) {
    let h = harness.await;

    let result = h
        .service
        .add_task(
            &h.manager,
            AddTaskRequest::new(ProjectId::from_raw("missing"), "Settings"),
        )
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Project(ProjectRepositoryError::NotFound(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_details_never_touches_status(#[future] harness: Harness) {
    let h = harness.await;
    let task = h.task_in(StatusKey::Valid).await;

    let updated = h
        .service
        .update_details(
            &h.manager,
            task.id(),
            UpdateTaskRequest::new()
                .with_title("Settings page")
                .assign_to(h.dual.id().clone()),
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.title(), "Settings page");
    assert_eq!(updated.assigned_to(), Some(h.dual.id()));
    assert_eq!(updated.status(), task.status());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_details_rejects_blank_title(#[future] harness: Harness) {
    let h = harness.await;
    let task = h.task_in(StatusKey::ToDo).await;

    let result = h
        .service
        .update_details(&h.manager, task.id(), UpdateTaskRequest::new().with_title("  "))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::EmptyTitle))
    ));
}

#[rstest]
#[case(StatusKey::Valid, StatusKey::InProgress, "3")]
#[case(StatusKey::InProgress, StatusKey::Done, "5")]
#[tokio::test(flavor = "multi_thread")]
async fn developer_moves_along_permitted_edges(
    #[future] harness: Harness,
    #[case] from: StatusKey,
    #[case] to: StatusKey,
    #[case] expected_id: &str,
) {
    let h = harness.await;
    let task = h.task_in(from).await;

    let moved = h
        .service
        .change_status(&h.developer, task.id(), to)
        .await
        .expect("transition should be permitted");

    assert_eq!(moved.status().as_str(), expected_id);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn denied_transition_leaves_task_untouched(#[future] harness: Harness) {
    let h = harness.await;
    let task = h.task_in(StatusKey::ToDo).await;

    let result = h
        .service
        .change_status(&h.developer, task.id(), StatusKey::InProgress)
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::TransitionDenied {
            from: StatusKey::ToDo,
            to: StatusKey::InProgress,
            ..
        })
    ));
    let stored = h.tasks.find_by_id(task.id()).await.expect("lookup");
    assert_eq!(stored, Some(task));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dual_role_user_gets_union_of_transitions(#[future] harness: Harness) {
    let h = harness.await;
    let task = h.task_in(StatusKey::Valid).await;

    let available = h
        .service
        .available_statuses(&h.dual, task.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(
        available,
        BTreeSet::from([
            StatusKey::Valid,
            StatusKey::InProgress,
            StatusKey::Done,
            StatusKey::Cancelled,
        ])
    );
    h.service
        .change_status(&h.dual, task.id(), StatusKey::InProgress)
        .await
        .expect("developer edge applies to dual-role user");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unresolvable_status_is_reported_and_offers_nothing(#[future] harness: Harness) {
    let h = harness.await;
    let orphan = Task::new(
        TaskDraft {
            project_id: h.project.id().clone(),
            title: "Orphan".to_owned(),
            description: String::new(),
            status: StatusId::new("99"),
            assigned_to: None,
        },
        &DefaultClock,
    )
    .expect("valid task");
    h.tasks.upsert(&orphan).await.expect("store orphan");

    let available = h
        .service
        .available_statuses(&h.manager, orphan.id())
        .await
        .expect("lookup should succeed");
    let result = h
        .service
        .change_status(&h.manager, orphan.id(), StatusKey::Done)
        .await;

    assert!(available.is_empty());
    assert!(matches!(
        result,
        Err(TaskLifecycleError::UnresolvableStatus { ref status, .. }) if status.as_str() == "99"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn change_status_reports_missing_task(#[future] harness: Harness) {
    let h = harness.await;

    let result = h
        .service
        .change_status(&h.manager, &crate::task::domain::TaskId::from_raw("nope"), StatusKey::Done)
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Repository(TaskRepositoryError::NotFound(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn any_user_can_comment(#[future] harness: Harness) {
    let h = harness.await;
    let task = h.task_in(StatusKey::ToDo).await;

    let commented = h
        .service
        .add_comment(&h.developer, task.id(), "  on it  ")
        .await
        .expect("comment should be accepted");
    let blank = h.service.add_comment(&h.developer, task.id(), "   ").await;

    let [comment] = commented.comments() else {
        panic!("expected exactly one comment");
    };
    assert_eq!(comment.content(), "on it");
    assert_eq!(comment.author_id(), h.developer.id());
    assert!(matches!(
        blank,
        Err(TaskLifecycleError::Domain(TaskDomainError::EmptyComment))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lists_tasks_by_assignee(#[future] harness: Harness) {
    let h = harness.await;
    let assigned = h
        .service
        .add_task(
            &h.manager,
            AddTaskRequest::new(h.project.id().clone(), "Login").assigned_to(h.developer.id().clone()),
        )
        .await
        .expect("task creation");
    h.task_in(StatusKey::ToDo).await;

    let mine = h
        .service
        .list_assigned_to(h.developer.id())
        .await
        .expect("lookup");
    let all = h
        .service
        .list_by_project(h.project.id())
        .await
        .expect("lookup");

    assert_eq!(mine, vec![assigned]);
    assert_eq!(all.len(), 2);
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

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_task_removes_task_when_project_write_fails() {
    let manager = user_with_roles("manager@test.com", [Role::Manager]);
    let project = Project::new("Website", "", [manager.id().clone()]).expect("valid project");
    let stored = project.clone();
    let mut projects = MockProjects::new();
    projects
        .expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    projects.expect_upsert().times(1).returning(|_| {
        Err(ProjectRepositoryError::persistence(std::io::Error::other(
            "disk full",
        )))
    });
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let service = TaskLifecycleService::new(
        Arc::clone(&tasks),
        Arc::new(projects),
        Arc::new(numbered_registry()),
        Arc::new(TransitionAuthorizer::new(TransitionTable::standard())),
        Arc::new(DefaultClock),
    );

    let result = service
        .add_task(&manager, AddTaskRequest::new(project.id().clone(), "Settings"))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Project(ProjectRepositoryError::Persistence(_)))
    ));
    assert!(tasks.list().await.expect("list tasks").is_empty());
}
