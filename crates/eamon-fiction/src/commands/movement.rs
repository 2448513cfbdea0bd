use eamon_core::{Direction, Reaction, RoomId};

use super::describe_room;
use crate::command::Command;
use crate::context::TurnContext;
use crate::error::{FictionError, FictionResult};

const NO_EXIT: &str = "You can't go that way!";

/// Walk through an exit: `north`, `n`, ..., or `go <direction>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveCommand;

impl Command for MoveCommand {
    fn name(&self) -> &str {
        "move"
    }

    fn verbs(&self) -> &[&str] {
        &[
            "north", "n", "south", "s", "east", "e", "west", "w", "up", "u", "down", "d", "go",
        ]
    }

    fn run(&self, ctx: &mut TurnContext<'_>, verb: &str, arg: &str) -> FictionResult<String> {
        let token = if verb == "go" { arg } else { verb };
        if token.is_empty() {
            return Ok("Go where?".to_string());
        }
        let destination = Direction::parse(token).and_then(|direction| {
            ctx.registry()
                .room(ctx.current_room())
                .and_then(|room| room.exit(direction))
                .map(|exit| exit.room_to)
        });
        let Some(destination) = destination else {
            return Ok(NO_EXIT.to_string());
        };
        let first_visit = ctx.enter_room(destination)?;
        describe_room(ctx.registry_mut(), destination, first_visit)
    }
}

/// Run from hostile monsters through a random exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct FleeCommand;

impl Command for FleeCommand {
    fn name(&self) -> &str {
        "flee"
    }

    fn verbs(&self) -> &[&str] {
        &["flee"]
    }

    fn run(&self, ctx: &mut TurnContext<'_>, _verb: &str, _arg: &str) -> FictionResult<String> {
        let here = ctx.current_room();
        let in_battle = ctx
            .registry()
            .monsters_in_room(here)
            .any(|m| m.reaction == Reaction::Hostile);
        if !in_battle {
            return Err(FictionError::Refused("There is nothing to flee from!".to_string()));
        }
        let exits: Vec<RoomId> = ctx
            .registry()
            .room(here)
            .map(|room| room.exits.iter().map(|e| e.room_to).collect())
            .unwrap_or_default();
        let Some(pick) = ctx.dice().pick_index(exits.len()) else {
            return Err(FictionError::Refused("There is nowhere to flee to!".to_string()));
        };
        let destination = exits[pick];
        let first_visit = ctx.enter_room(destination)?;
        let room = describe_room(ctx.registry_mut(), destination, first_visit)?;
        Ok(format!("You flee!\n{room}"))
    }
}
