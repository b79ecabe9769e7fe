//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    AddTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    UpdateTaskRequest,
};
