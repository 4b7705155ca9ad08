//! Shared test helpers for in-memory store integration tests.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use taskboard::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{
        Hours, PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus, User, UserId, UserRole,
    },
    services::TaskLifecycleService,
};

/// Lifecycle service over the in-memory store.
pub type TestService = TaskLifecycleService<InMemoryTaskStore, DefaultClock>;

/// Store, service and a registered user shared by a test.
pub struct Workspace {
    pub store: Arc<InMemoryTaskStore>,
    pub service: TestService,
    pub member: User,
}

/// Provides a fresh store with one registered member.
///
/// # Panics
///
/// Panics if the fixture user cannot be registered.
#[fixture]
pub fn workspace() -> Workspace {
    let store = Arc::new(InMemoryTaskStore::new());
    let member =
        User::new("Dana", "dana@example.com", UserRole::Member).expect("fixture user is valid");
    store
        .insert_user(member.clone())
        .expect("fixture user is stored");
    let service = TaskLifecycleService::new(Arc::clone(&store), Arc::new(DefaultClock));
    Workspace {
        store,
        service,
        member,
    }
}

/// Builds a calendar date.
///
/// # Panics
///
/// Panics on an invalid date.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

fn base_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
        .single()
        .expect("valid base instant")
}

/// Builds a persisted task created `age_minutes` before a fixed instant.
///
/// Larger ages sort later in newest-first listings.
#[must_use]
pub fn persisted_task(
    title: &str,
    status: TaskStatus,
    due_date: Option<NaiveDate>,
    age_minutes: i64,
) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: title.to_owned(),
        description: String::new(),
        status,
        priority: TaskPriority::Medium,
        assignee: None,
        assignee_profile: None,
        created_by: UserId::new(),
        start_date: None,
        due_date,
        estimated_hours: Hours::ZERO,
        time_spent: Hours::ZERO,
        created_at: base_instant() - Duration::minutes(age_minutes),
    })
}

/// Returns task titles in order.
#[must_use]
pub fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(Task::title).collect()
}
