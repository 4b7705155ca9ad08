//! Then steps for board move BDD scenarios.

use super::world::{BoardWorld, parse_status, run_async};
use eyre::ensure;
use rstest_bdd_macros::then;
use taskboard::board::{Board, BoardError, MoveOutcome};
use taskboard::task::{domain::Task, ports::TaskStore};

#[then(r#"the "{status}" column lists "{titles}""#)]
fn column_lists(world: &BoardWorld, status: String, titles: String) -> Result<(), eyre::Report> {
    let column_status = parse_status(&status)?;
    let controller = world
        .controller
        .as_ref()
        .ok_or_else(|| eyre::eyre!("board has not been loaded"))?;
    let expected: Vec<&str> = titles.split(',').map(str::trim).collect();
    let actual: Vec<&str> = controller
        .board()
        .column(column_status)
        .tasks()
        .iter()
        .map(Task::title)
        .collect();
    ensure!(
        actual == expected,
        "{status} column holds {actual:?}, expected {expected:?}"
    );
    Ok(())
}

#[then(r#""{title}" has status "{status}""#)]
fn task_has_status(world: &BoardWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let task = world.task_on_board(&title)?;
    ensure!(
        task.status() == expected,
        "{title} has status {}, expected {expected}",
        task.status()
    );
    Ok(())
}

#[then("the board holds {count:usize} tasks")]
fn board_holds(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let controller = world
        .controller
        .as_ref()
        .ok_or_else(|| eyre::eyre!("board has not been loaded"))?;
    let held = controller.board().task_count();
    ensure!(held == count, "board holds {held} tasks, expected {count}");
    Ok(())
}

#[then(r#"the latest activity is "{action}""#)]
fn latest_activity(world: &BoardWorld, action: String) -> Result<(), eyre::Report> {
    let entries = run_async(world.store.recent_activity(1))?;
    let Some(latest) = entries.first() else {
        eyre::bail!("no activity was recorded");
    };
    ensure!(
        latest.action.as_str() == action,
        "latest activity is {}, expected {action}",
        latest.action
    );
    Ok(())
}

#[then("the board matches a fresh listing")]
fn board_matches_listing(world: &BoardWorld) -> Result<(), eyre::Report> {
    let controller = world
        .controller
        .as_ref()
        .ok_or_else(|| eyre::eyre!("board has not been loaded"))?;
    let fresh = Board::from_tasks(run_async(world.store.list_tasks())?);
    ensure!(
        *controller.board() == fresh,
        "board diverges from the stored tasks"
    );
    Ok(())
}

#[then("the move was reconciled")]
fn move_reconciled(world: &BoardWorld) -> Result<(), eyre::Report> {
    ensure!(
        matches!(world.last_move, Some(Ok(MoveOutcome::Reconciled { .. }))),
        "expected a reconciled move, got {:?}",
        world.last_move
    );
    Ok(())
}

#[then("the move is rejected")]
fn move_rejected(world: &BoardWorld) -> Result<(), eyre::Report> {
    ensure!(
        matches!(
            world.last_move,
            Some(Err(BoardError::TaskNotAtPosition { .. }))
        ),
        "expected a stale position error, got {:?}",
        world.last_move
    );
    Ok(())
}
