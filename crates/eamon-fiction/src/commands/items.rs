use eamon_core::{ArtifactId, CoreError, Location, Owner};

use super::{capitalize, required};
use crate::command::Command;
use crate::context::TurnContext;
use crate::error::{FictionError, FictionResult};

/// Pick up an artifact, or `all` of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetCommand;

impl Command for GetCommand {
    fn name(&self) -> &str {
        "get"
    }

    fn verbs(&self) -> &[&str] {
        &["get", "take"]
    }

    fn run(&self, ctx: &mut TurnContext<'_>, verb: &str, arg: &str) -> FictionResult<String> {
        let arg = required(verb, arg)?;
        if arg.eq_ignore_ascii_case("all") {
            let room = ctx.current_room();
            let here: Vec<ArtifactId> = ctx.registry().artifacts_in_room(room).map(|a| a.id).collect();
            if here.is_empty() {
                return Ok("There is nothing here to take.".to_string());
            }
            for id in here {
                if let Some(refusal) = ctx.item_refused(self.name(), verb, id) {
                    ctx.narrate(refusal);
                    continue;
                }
                // One refusal doesn't stop the rest.
                match pick_up(ctx, id) {
                    Ok(line) => ctx.narrate(line),
                    Err(FictionError::Core(
                        e @ (CoreError::NotCarryable(_) | CoreError::TooHeavy(_)),
                    )) => {
                        ctx.narrate(e.to_string());
                        continue;
                    }
                    Err(e) => return Err(e),
                }
                ctx.item_done(self.name(), verb, id);
            }
            return Ok(String::new());
        }

        let id = ctx.registry().require_artifact(arg, ctx.scope())?;
        if let Some(artifact) = ctx
            .registry()
            .artifact(id)
            .filter(|a| a.location == Location::Carried(Owner::Player))
        {
            return Ok(format!("You already have the {}.", artifact.name));
        }
        pick_up(ctx, id)
    }
}

fn pick_up(ctx: &mut TurnContext<'_>, id: ArtifactId) -> FictionResult<String> {
    ctx.registry_mut()
        .move_artifact(id, Location::Carried(Owner::Player))?;
    Ok(format!("{} taken.", capitalize(&artifact_name(ctx, id))))
}

fn artifact_name(ctx: &TurnContext<'_>, id: ArtifactId) -> String {
    ctx.registry()
        .artifact(id)
        .map(|a| a.name.clone())
        .unwrap_or_default()
}

/// Put down a carried artifact, or `all` of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropCommand;

impl Command for DropCommand {
    fn name(&self) -> &str {
        "drop"
    }

    fn verbs(&self) -> &[&str] {
        &["drop"]
    }

    fn run(&self, ctx: &mut TurnContext<'_>, verb: &str, arg: &str) -> FictionResult<String> {
        let arg = required(verb, arg)?;
        let all = arg.eq_ignore_ascii_case("all");
        let targets: Vec<ArtifactId> = if all {
            let carried: Vec<ArtifactId> = ctx.registry().inventory().map(|a| a.id).collect();
            if carried.is_empty() {
                return Ok("You aren't carrying anything.".to_string());
            }
            carried
        } else {
            let id = ctx
                .registry()
                .inventory()
                .find(|a| a.matches(arg))
                .map(|a| a.id)
                .ok_or_else(|| FictionError::NotCarrying(arg.to_string()))?;
            vec![id]
        };

        let room = ctx.current_room();
        for id in targets {
            let refusal = if all {
                ctx.item_refused(self.name(), verb, id)
            } else {
                None
            };
            if let Some(refusal) = refusal {
                ctx.narrate(refusal);
                continue;
            }
            ctx.registry_mut().move_artifact(id, Location::Room(room))?;
            let line = format!("{} dropped.", capitalize(&artifact_name(ctx, id)));
            ctx.narrate(line);
            if all {
                ctx.item_done(self.name(), verb, id);
            }
        }
        Ok(String::new())
    }
}

/// List what the player carries.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryCommand;

impl Command for InventoryCommand {
    fn name(&self) -> &str {
        "inventory"
    }

    fn verbs(&self) -> &[&str] {
        &["inventory", "inv", "i"]
    }

    fn run(&self, ctx: &mut TurnContext<'_>, _verb: &str, _arg: &str) -> FictionResult<String> {
        let registry = ctx.registry();
        let player = registry.player();

        let mut output = String::new();
        let mut carried = registry.inventory().peekable();
        if carried.peek().is_none() {
            output.push_str("You are carrying nothing.");
        } else {
            output.push_str("You are carrying:");
            for artifact in carried {
                output.push_str("\n  ");
                output.push_str(&artifact.name);
                if player.ready_weapon == Some(artifact.id) {
                    output.push_str(" (ready)");
                }
                if player.worn_armor.contains(&artifact.id) {
                    output.push_str(" (worn)");
                }
            }
        }
        output.push_str(&format!(
            "\nWeight: {}/{}",
            registry.carried_weight(Owner::Player),
            player.carry_limit()
        ));
        output.push_str(&format!("\nGold: {}", player.gold));
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use eamon_core::{ArtifactId, Location, Owner, RoomId};

    use crate::commands::testing::{in_hall, session};

    #[test]
    fn get_and_drop_one() {
        let mut session = in_hall();
        assert_eq!(session.submit("get sword").text, "Sword taken.");
        assert_eq!(session.submit("take sword").text, "You already have the sword.");
        let sword = session.registry().artifact(ArtifactId(2)).unwrap();
        assert_eq!(sword.location, Location::Carried(Owner::Player));

        assert_eq!(session.submit("drop sword").text, "Sword dropped.");
        let sword = session.registry().artifact(ArtifactId(2)).unwrap();
        assert_eq!(sword.location, Location::Room(RoomId(2)));
        assert_eq!(
            session.submit("drop sword").text,
            "You aren't carrying a sword!"
        );
    }

    #[test]
    fn rejections_leave_things_in_place() {
        let mut session = in_hall();
        assert_eq!(session.submit("get chest").text, "You can't carry the chest!");
        assert_eq!(session.submit("get lamp").text, "I see no lamp here!");
        assert_eq!(session.submit("get").text, "Get what?");
        assert_eq!(
            session.registry().artifact(ArtifactId(1)).unwrap().location,
            Location::Room(RoomId(2))
        );
    }

    #[test]
    fn get_all_and_drop_all() {
        let mut session = in_hall();
        let text = session.submit("get all").text;
        assert_eq!(
            text,
            "You can't carry the chest!\nSword taken.\nGreat axe taken.\nChain mail taken.\nShield taken."
        );
        assert_eq!(session.registry().inventory().count(), 4);
        assert_eq!(session.submit("get all").text, "You can't carry the chest!");

        let text = session.submit("drop all").text;
        assert_eq!(text.lines().count(), 4);
        assert_eq!(session.submit("drop all").text, "You aren't carrying anything.");
    }

    #[test]
    fn nothing_to_take() {
        let mut session = session();
        assert_eq!(session.submit("get all").text, "There is nothing here to take.");
    }

    #[test]
    fn inventory_listing() {
        let mut session = in_hall();
        assert_eq!(
            session.submit("i").text,
            "You are carrying nothing.\nWeight: 0/150\nGold: 200"
        );
        session.submit("get sword");
        session.submit("ready sword");
        let text = session.submit("inventory").text;
        assert!(text.starts_with("You are carrying:\n  sword (ready)\nWeight: 1/150"));
    }
}
