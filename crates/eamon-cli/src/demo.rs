//! Scripting for the bundled demo adventure.

use eamon_core::{ArtifactId, Location, Owner};
use eamon_fiction::{
    Adventure, Command, FnCommand, HookBinding, HookOutcome, HookStage, PowerFn, TurnContext,
};

/// The demo castle, embedded in the binary.
pub const DEMO_ADVENTURE: &str = include_str!("../adventures/demo.json");

const THRONE: ArtifactId = ArtifactId(1);
const MAGIC_SWORD: ArtifactId = ArtifactId(3);

/// Custom commands and hooks for the demo castle.
pub struct DemoAdventure;

impl Adventure for DemoAdventure {
    fn commands(&self) -> Vec<Box<dyn Command>> {
        vec![
            Box::new(FnCommand::new("go", &["go"], |ctx, _, arg| {
                if !arg.is_empty() {
                    ctx.dispatch(arg)?;
                    return Ok(String::new());
                }
                let exits: Vec<&'static str> = ctx
                    .registry()
                    .room(ctx.current_room())
                    .map(|room| room.exits.iter().map(|e| e.direction.name()).collect())
                    .unwrap_or_default();
                match ctx.dice().pick_index(exits.len()) {
                    Some(i) => {
                        ctx.dispatch(exits[i])?;
                        Ok(String::new())
                    }
                    None => Ok("There's nowhere to go.".into()),
                }
            })),
            Box::new(FnCommand::new("trollsfire", &["trollsfire"], |ctx, _, _| {
                if carrying_sword(ctx) {
                    Ok("As you say the magic word (Trollsfire), green flames rise from the \
                        sword's blade."
                        .into())
                } else {
                    Ok("Nothing happens.".into())
                }
            })),
        ]
    }

    fn hooks(&self) -> Vec<HookBinding> {
        vec![
            HookBinding::new(HookStage::Before("get".into()), |_, event| {
                if event.artifact == Some(THRONE) {
                    Ok(HookOutcome::Veto(
                        "There's no way you'll ever be able to carry the throne!".into(),
                    ))
                } else {
                    Ok(HookOutcome::Continue)
                }
            }),
            HookBinding::new(HookStage::After("get".into()), |ctx, event| {
                let readied = ctx.player().ready_weapon == Some(MAGIC_SWORD);
                if event.artifact == Some(MAGIC_SWORD) && carrying_sword(ctx) && !readied {
                    ctx.player_mut().ready_weapon = Some(MAGIC_SWORD);
                    ctx.narrate("The magic sword is so shiny you decided to ready it.");
                }
                Ok(HookOutcome::Continue)
            }),
            HookBinding::new(HookStage::Verb("say".into()), |ctx, event| {
                if event.arg.eq_ignore_ascii_case("trollsfire") {
                    ctx.dispatch("trollsfire")?;
                }
                Ok(HookOutcome::Continue)
            }),
        ]
    }

    fn power(&self) -> Option<Box<PowerFn>> {
        Some(Box::new(|ctx: &mut TurnContext<'_>, roll: u32| {
            if roll <= 50 {
                ctx.narrate("You hear a loud sonic boom which echoes all around you!");
            } else {
                let damage = ctx.player().damage;
                ctx.player_mut().heal(damage);
                ctx.narrate("All your wounds are healed!");
            }
            Ok(())
        }))
    }
}

fn carrying_sword(ctx: &TurnContext<'_>) -> bool {
    ctx.registry()
        .artifact(MAGIC_SWORD)
        .is_some_and(|a| a.location == Location::Carried(Owner::Player))
}
