//! Board moves persisted through the in-memory store.

use std::sync::Arc;

use super::helpers::{Workspace, persisted_task, titles, workspace};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use taskboard::board::{Board, BoardController, TaskMove};
use taskboard::task::{
    domain::{ActivityAction, Task, TaskStatus},
    ports::TaskStore,
};

fn seed(workspace: &Workspace) -> eyre::Result<Vec<Task>> {
    let tasks = vec![
        persisted_task("task1", TaskStatus::Todo, None, 0),
        persisted_task("task2", TaskStatus::Todo, None, 10),
        persisted_task("task3", TaskStatus::InProgress, None, 20),
    ];
    for task in &tasks {
        workspace.store.seed_task(task.clone())?;
    }
    Ok(tasks)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn committed_move_survives_a_reload(workspace: Workspace) -> eyre::Result<()> {
    let tasks = seed(&workspace)?;
    let task1 = tasks.first().map(Task::id).ok_or_eyre("seeded task1")?;
    let actor = workspace.member.id();

    let mut controller = BoardController::load(Arc::clone(&workspace.store), actor).await;
    let outcome = controller
        .move_task(TaskMove {
            task_id: task1,
            source: TaskStatus::Todo,
            source_index: 0,
            destination: TaskStatus::InProgress,
            destination_index: 0,
        })
        .await?;
    ensure!(outcome.is_committed(), "move not committed: {outcome:?}");

    let board = controller.board();
    ensure!(
        titles(board.column(TaskStatus::Todo).tasks()) == vec!["task2"],
        "unexpected todo column"
    );
    ensure!(
        titles(board.column(TaskStatus::InProgress).tasks()) == vec!["task1", "task3"],
        "unexpected in-progress column"
    );

    let reloaded = Board::from_tasks(workspace.store.list_tasks().await?);
    ensure!(&reloaded == board, "board diverged from the store");

    let activity = workspace.store.recent_activity(1).await?;
    let entry = activity.first().ok_or_eyre("status change not logged")?;
    ensure!(entry.action == ActivityAction::StatusChange, "wrong action");
    ensure!(entry.user_name.as_deref() == Some("Dana"), "actor not resolved");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_column_pair_preserves_the_task_count(workspace: Workspace) -> eyre::Result<()> {
    seed(&workspace)?;
    let mut controller =
        BoardController::load(Arc::clone(&workspace.store), workspace.member.id()).await;
    let total = controller.board().task_count();

    for destination in TaskStatus::ALL {
        let task_id = controller
            .board()
            .column(TaskStatus::InProgress)
            .tasks()
            .first()
            .or_else(|| controller.board().column(TaskStatus::Todo).tasks().first())
            .map(Task::id)
            .ok_or_eyre("board has a task to move")?;
        let task_move = controller.board().move_to_end(task_id, destination)?;
        controller.move_task(task_move).await?;

        ensure!(controller.board().task_count() == total, "task count changed");
        let moved = controller.board().task(task_id).ok_or_eyre("task vanished")?;
        ensure!(moved.status() == destination, "status not applied");
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn change_status_completes_a_task(workspace: Workspace) -> eyre::Result<()> {
    let tasks = seed(&workspace)?;
    let task2 = tasks.get(1).map(Task::id).ok_or_eyre("seeded task2")?;
    let mut controller =
        BoardController::load(Arc::clone(&workspace.store), workspace.member.id()).await;

    controller
        .change_status(task2, TaskStatus::Completed)
        .await?;

    let stored = workspace
        .store
        .find_task(task2)
        .await?
        .ok_or_eyre("task2 stored")?;
    ensure!(stored.status() == TaskStatus::Completed, "store not updated");
    let activity = workspace.store.recent_activity(1).await?;
    ensure!(
        activity.first().map(|entry| entry.action) == Some(ActivityAction::Completed),
        "completion not logged"
    );
    Ok(())
}
