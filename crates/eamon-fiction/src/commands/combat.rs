use eamon_core::{Artifact, CoreError, MonsterId, Reaction};
use eamon_mechanics::combat::{
    monster_damage, monster_odds, player_armor_class, player_damage, player_odds, roll_reaction,
    speed_bonus,
};
use eamon_mechanics::{Strike, StrikeOutcome};
use tracing::debug;

use super::equipment::worn_armor;
use super::{capitalize, required};
use crate::command::Command;
use crate::context::{GameState, TurnContext};
use crate::error::FictionResult;

/// Swing the ready weapon (or a fist) at a monster.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttackCommand;

impl Command for AttackCommand {
    fn name(&self) -> &str {
        "attack"
    }

    fn verbs(&self) -> &[&str] {
        &["attack", "a"]
    }

    fn run(&self, ctx: &mut TurnContext<'_>, verb: &str, arg: &str) -> FictionResult<String> {
        let arg = required(verb, arg)?;
        let target = ctx.registry().require_monster(arg, ctx.scope())?;
        let hasted = ctx.speed_turns() > 0;

        let (strike, name) = {
            let registry = ctx.registry();
            let player = registry.player();
            let weapon = player
                .ready_weapon
                .and_then(|id| registry.artifact(id))
                .and_then(Artifact::weapon);
            let worn = worn_armor(registry);
            let monster = registry
                .monster(target)
                .ok_or_else(|| CoreError::NotFound(arg.to_string()))?;
            let mut odds = player_odds(player, weapon, &worn);
            if hasted {
                odds += speed_bonus(player);
            }
            let strike = Strike {
                odds,
                damage: player_damage(weapon)?,
                armor_class: monster.armor_class,
            };
            (strike, monster.name.clone())
        };

        if let Some(monster) = ctx.registry_mut().monster_mut(target) {
            monster.provoke();
        }

        let outcome = strike.resolve(ctx.dice());
        debug!(%target, ?outcome, "player attacks");
        let mut lines = Vec::new();
        match outcome {
            StrikeOutcome::Miss => lines.push(format!("You swing at the {name} and miss.")),
            StrikeOutcome::Hit { damage, critical } => {
                if critical {
                    lines.push("A critical hit!".to_string());
                }
                if damage == 0 {
                    lines.push(format!("The blow bounces off the {name}'s armor."));
                } else if ctx.registry_mut().injure_monster(target, damage)? {
                    lines.push(format!("You hit the {name}. The {name} is dead!"));
                } else {
                    lines.push(format!("You hit the {name} for {damage} damage."));
                }
            }
        }
        Ok(lines.join("\n"))
    }
}

/// Roll first-sight reactions for monsters in the player's room.
pub(crate) fn roll_reactions(state: &mut GameState) {
    let room = state.current_room;
    let charisma = state.registry.player().charisma;
    let unseen: Vec<MonsterId> = state
        .registry
        .monsters_in_room(room)
        .filter(|m| m.reaction == Reaction::Unknown)
        .map(|m| m.id)
        .collect();
    for id in unseen {
        let Some(monster) = state.registry.monster_mut(id) else {
            continue;
        };
        let reaction = roll_reaction(monster, charisma, &mut state.dice);
        monster.set_reaction(reaction);
        debug!(%id, ?reaction, "monster reaction rolled");
    }
}

/// Hostile monsters in the player's room each take a swing.
pub(crate) fn monsters_act(state: &mut GameState) -> FictionResult<Vec<String>> {
    let room = state.current_room;
    let attackers: Vec<MonsterId> = state
        .registry
        .monsters_in_room(room)
        .filter(|m| m.reaction == Reaction::Hostile)
        .map(|m| m.id)
        .collect();

    let mut lines = Vec::new();
    for id in attackers {
        if state.registry.player().is_dead() {
            break;
        }
        let (strike, name) = {
            let registry = &state.registry;
            let Some(monster) = registry.monster(id) else {
                continue;
            };
            let weapon = monster
                .weapon_id
                .and_then(|w| registry.artifact(w))
                .and_then(Artifact::weapon);
            let strike = Strike {
                odds: monster_odds(monster, weapon),
                damage: monster_damage(monster, weapon)?,
                armor_class: player_armor_class(&worn_armor(registry)),
            };
            (strike, capitalize(&monster.name))
        };

        let outcome = strike.resolve(&mut state.dice);
        debug!(%id, ?outcome, "monster attacks");
        match outcome {
            StrikeOutcome::Miss => lines.push(format!("{name} attacks you and misses.")),
            StrikeOutcome::Hit { damage: 0, .. } => {
                lines.push(format!("{name} hits you, but your armor absorbs the blow."));
            }
            StrikeOutcome::Hit { damage, critical } => {
                state.registry.player_mut().injure(damage);
                let line = if critical {
                    format!("{name} lands a critical hit for {damage} damage!")
                } else {
                    format!("{name} hits you for {damage} damage.")
                };
                lines.push(line);
            }
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use eamon_core::{ArtifactId, Location, MonsterId, Reaction, RoomId};

    use crate::commands::testing::{player, world};
    use crate::{PlainAdventure, Session, SessionConfig};

    fn sturdy_session(seed: u64) -> Session {
        let mut hero = player();
        hero.hardiness = 200;
        let mut session = Session::bootstrap(
            world(),
            &PlainAdventure,
            hero,
            SessionConfig::default().with_seed(seed),
        )
        .unwrap();
        session.submit("n");
        session
    }

    #[test]
    fn attacking_provokes() {
        let mut session = sturdy_session(3);
        assert_eq!(
            session.registry().monster(MonsterId(1)).unwrap().reaction,
            Reaction::Neutral
        );
        let text = session.submit("attack dog").text;
        assert!(text.contains("dog"));
        let dog = session.registry().monster(MonsterId(1)).unwrap();
        assert!(!dog.is_alive() || dog.reaction == Reaction::Hostile);
    }

    #[test]
    fn fight_to_the_death_drops_loot() {
        let mut session = sturdy_session(11);
        session.submit("get sword");
        session.submit("ready sword");
        let mut killed = false;
        for _ in 0..500 {
            let text = session.submit("a dog").text;
            if text.contains("The dog is dead!") {
                killed = true;
                break;
            }
        }
        assert!(killed);
        assert_eq!(
            session.registry().artifact(ArtifactId(6)).unwrap().location,
            Location::Room(RoomId(2))
        );
        assert_eq!(session.submit("attack dog").text, "I see no dog here!");
    }

    #[test]
    fn attack_needs_a_target() {
        let mut session = sturdy_session(1);
        assert_eq!(session.submit("attack").text, "Attack what?");
        assert_eq!(session.submit("attack dragon").text, "I see no dragon here!");
    }
}
