//! Domain-focused tests for the project aggregate.

use crate::project::domain::{Project, ProjectDomainError};
use crate::user::domain::UserId;
use rstest::rstest;

fn laura() -> UserId {
    UserId::from_raw("u1")
}

fn jorge() -> UserId {
    UserId::from_raw("u3")
}

#[rstest]
fn new_project_deduplicates_managers_in_order() {
    let project = Project::new(" Website ", "Landing page", [laura(), jorge(), laura()])
        .expect("valid project");

    assert_eq!(project.title(), "Website");
    assert_eq!(project.manager_ids(), [laura(), jorge()]);
    assert!(project.task_ids().is_empty());
    assert!(project.is_managed_by(&jorge()));
}

#[rstest]
#[case("   ", vec![laura()], ProjectDomainError::EmptyTitle)]
#[case("Website", Vec::new(), ProjectDomainError::NoManagers)]
fn new_project_validates_input(
    #[case] title: &str,
    #[case] managers: Vec<UserId>,
    #[case] expected: ProjectDomainError,
) {
    assert_eq!(Project::new(title, "", managers), Err(expected));
}

#[rstest]
fn replacing_managers_with_nobody_keeps_current_list() {
    let mut project = Project::new("Website", "", [laura()]).expect("valid project");

    let result = project.replace_managers(Vec::new());

    assert_eq!(result, Err(ProjectDomainError::NoManagers));
    assert_eq!(project.manager_ids(), [laura()]);
}

