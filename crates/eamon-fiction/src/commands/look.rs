use eamon_core::{ArtifactId, CoreError, Registry, RoomId};

use crate::command::Command;
use crate::context::TurnContext;
use crate::error::FictionResult;

/// Describe the room, or a monster or artifact in view.
#[derive(Debug, Clone, Copy, Default)]
pub struct LookCommand;

impl Command for LookCommand {
    fn name(&self) -> &str {
        "look"
    }

    fn verbs(&self) -> &[&str] {
        &["look", "examine", "l"]
    }

    fn run(&self, ctx: &mut TurnContext<'_>, _verb: &str, arg: &str) -> FictionResult<String> {
        if arg.is_empty() {
            let room = ctx.current_room();
            return describe_room(ctx.registry_mut(), room, true);
        }

        let scope = ctx.scope();
        if let Some(monster) = ctx.registry().find_monster(arg, scope) {
            return Ok(describe(&monster.name, &monster.description));
        }
        let id = ctx.registry().require_artifact(arg, scope)?;
        let artifact = ctx
            .registry_mut()
            .artifact_mut(id)
            .ok_or_else(|| CoreError::NotFound(arg.to_string()))?;
        artifact.seen = true;
        Ok(describe(&artifact.name, &artifact.description))
    }
}

fn describe(name: &str, description: &str) -> String {
    if description.is_empty() {
        format!("You see nothing special about the {name}.")
    } else {
        description.to_string()
    }
}

/// The room's name, its description when `verbose`, who and what is here,
/// and the exits. Listed artifacts are marked seen.
pub(crate) fn describe_room(
    registry: &mut Registry,
    room_id: RoomId,
    verbose: bool,
) -> FictionResult<String> {
    let room = registry
        .room(room_id)
        .ok_or_else(|| CoreError::NotFound(room_id.to_string()))?;

    let mut output = room.name.clone();
    if verbose && !room.description.is_empty() {
        output.push('\n');
        output.push_str(&room.description);
    }

    for monster in registry.monsters_in_room(room_id) {
        output.push_str(&format!("\n{} is here.", super::capitalize(&monster.name)));
    }

    let artifacts: Vec<ArtifactId> = registry.artifacts_in_room(room_id).map(|a| a.id).collect();
    for &id in &artifacts {
        if let Some(artifact) = registry.artifact(id) {
            output.push_str(&format!("\nYou see {}.", artifact.name));
        }
    }

    let exits: Vec<&str> = room.exits.iter().map(|e| e.direction.name()).collect();
    if !exits.is_empty() {
        output.push_str(&format!("\nExits: {}", exits.join(", ")));
    }

    for id in artifacts {
        if let Some(artifact) = registry.artifact_mut(id) {
            artifact.seen = true;
        }
    }
    Ok(output)
}
