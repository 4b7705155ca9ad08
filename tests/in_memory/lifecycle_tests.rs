//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Workspace, date, titles, workspace};
use eyre::{bail, ensure};
use rstest::rstest;
use taskboard::task::{
    domain::{ActivityAction, Hours, TaskPatch, TaskPriority, TaskStatus},
    ports::TaskStore,
    services::CreateTaskRequest,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_edit_and_complete_a_task(workspace: Workspace) -> eyre::Result<()> {
    let actor = workspace.member.id();
    let created = workspace
        .service
        .create_task(
            CreateTaskRequest::new("Prepare demo")
                .with_assignee(actor)
                .with_due_date(date(2024, 4, 2))
                .with_estimated_hours(4.0),
            actor,
        )
        .await?;

    let edited = workspace
        .service
        .update_task(
            created.id(),
            TaskPatch::new()
                .priority(TaskPriority::Urgent)
                .description("Record a backup video"),
            actor,
        )
        .await?;
    ensure!(edited.priority() == TaskPriority::Urgent, "priority not updated");
    ensure!(edited.due_date() == Some(date(2024, 4, 2)), "due date lost");

    workspace
        .service
        .log_time(created.id(), 2.5, actor)
        .await?;
    let completed = workspace
        .service
        .update_status(created.id(), TaskStatus::Completed, actor)
        .await?;
    ensure!(completed.status() == TaskStatus::Completed, "not completed");
    ensure!(completed.time_spent() == Hours::new(2.5)?, "time not kept");

    let actions: Vec<ActivityAction> = workspace
        .store
        .recent_activity(10)
        .await?
        .into_iter()
        .map(|entry| entry.action)
        .collect();
    ensure!(
        actions
            == vec![
                ActivityAction::Completed,
                ActivityAction::TimeLog,
                ActivityAction::Updated,
                ActivityAction::Created,
            ],
        "unexpected activity trail: {actions:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_profile_is_resolved_on_reads(workspace: Workspace) -> eyre::Result<()> {
    let actor = workspace.member.id();
    let created = workspace
        .service
        .create_task(CreateTaskRequest::new("Pair on bug").with_assignee(actor), actor)
        .await?;

    let Some(found) = workspace.store.find_task(created.id()).await? else {
        bail!("created task not found");
    };
    let Some(profile) = found.assignee_profile() else {
        bail!("assignee profile missing");
    };
    ensure!(profile.name == "Dana", "unexpected assignee {}", profile.name);
    ensure!(profile.email == "dana@example.com", "unexpected email");

    let unassigned = workspace
        .service
        .update_task(created.id(), TaskPatch::new().assignee(None), actor)
        .await?;
    ensure!(unassigned.assignee_profile().is_none(), "stale profile kept");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listings_are_newest_first(workspace: Workspace) -> eyre::Result<()> {
    let actor = workspace.member.id();
    for title in ["first", "second", "third"] {
        workspace
            .service
            .create_task(CreateTaskRequest::new(title), actor)
            .await?;
    }

    let tasks = workspace.service.list_tasks().await?;
    ensure!(tasks.len() == 3, "unexpected tasks: {:?}", titles(&tasks));
    ensure!(
        tasks
            .windows(2)
            .all(|pair| matches!(pair, [newer, older] if newer.created_at() >= older.created_at())),
        "listing is not newest first: {:?}",
        titles(&tasks)
    );

    let users = workspace.service.users().await?;
    ensure!(users.len() == 1, "expected one registered user");
    Ok(())
}
