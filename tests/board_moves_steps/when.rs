//! When steps for board move BDD scenarios.

use super::world::{BoardWorld, parse_status, run_async};
use rstest_bdd_macros::when;
use taskboard::board::TaskMove;

#[when(
    r#""{title}" is dragged from "{source}" position {from:usize} to "{destination}" position {to:usize}"#
)]
fn drag_task(
    world: &mut BoardWorld,
    title: String,
    source: String,
    from: usize,
    destination: String,
    to: usize,
) -> Result<(), eyre::Report> {
    let task_move = TaskMove {
        task_id: world.task_on_board(&title)?.id(),
        source: parse_status(&source)?,
        source_index: from,
        destination: parse_status(&destination)?,
        destination_index: to,
    };
    let result = run_async(world.controller()?.move_task(task_move));
    world.last_move = Some(result);
    Ok(())
}
