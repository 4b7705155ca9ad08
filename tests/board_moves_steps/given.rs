//! Given steps for board move BDD scenarios.

use std::sync::Arc;

use super::world::{BoardWorld, parse_status, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::BoardController;
use taskboard::task::{domain::TaskStatus, ports::TaskStore};

#[given(r#"a task titled "{title}" with status "{status}""#)]
fn seeded_task(world: &mut BoardWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let parsed = parse_status(&status)?;
    let task = world.next_task(title, parsed);
    world
        .store
        .inner
        .seed_task(task)
        .wrap_err("seed task for board scenario")?;
    Ok(())
}

#[given("the board is loaded")]
fn board_loaded(world: &mut BoardWorld) {
    let controller = run_async(BoardController::load(Arc::clone(&world.store), world.actor));
    world.controller = Some(controller);
}

#[given(r#"another user has completed "{title}""#)]
fn completed_elsewhere(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let task_id = world.task_on_board(&title)?.id();
    run_async(
        world
            .store
            .update_task_status(task_id, TaskStatus::Completed, world.actor),
    )
    .wrap_err("complete task behind the board's back")?;
    Ok(())
}

#[given("the store rejects status updates")]
fn store_rejects_updates(world: &mut BoardWorld) {
    world.store.reject_status_updates();
}
