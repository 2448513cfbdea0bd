use eamon_core::artifact::Armor;
use eamon_core::{ArmorType, Artifact, Registry};

use super::{capitalize, required};
use crate::command::Command;
use crate::context::TurnContext;
use crate::error::{FictionError, FictionResult};

/// Armor and shield the player has on.
pub(crate) fn worn_armor(registry: &Registry) -> Vec<&Armor> {
    registry
        .player()
        .worn_armor
        .iter()
        .filter_map(|&id| registry.artifact(id))
        .filter_map(Artifact::armor)
        .collect()
}

fn carried<'r>(registry: &'r Registry, query: &str) -> FictionResult<&'r Artifact> {
    registry
        .inventory()
        .find(|a| a.matches(query))
        .ok_or_else(|| FictionError::NotCarrying(query.to_string()))
}

/// Make a carried weapon the one used in combat.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadyCommand;

impl Command for ReadyCommand {
    fn name(&self) -> &str {
        "ready"
    }

    fn verbs(&self) -> &[&str] {
        &["ready"]
    }

    fn run(&self, ctx: &mut TurnContext<'_>, verb: &str, arg: &str) -> FictionResult<String> {
        let arg = required(verb, arg)?;
        let registry = ctx.registry();
        let artifact = carried(registry, arg)?;
        let weapon = artifact
            .weapon()
            .ok_or_else(|| FictionError::NotAWeapon(artifact.name.clone()))?;
        let shield = worn_armor(registry)
            .iter()
            .any(|a| a.armor_type == ArmorType::Shield);
        if weapon.hands >= 2 && shield {
            return Err(FictionError::Equipment(
                "You can't use a two-handed weapon while wearing a shield.".to_string(),
            ));
        }

        let (id, name) = (artifact.id, artifact.name.clone());
        ctx.player_mut().ready_weapon = Some(id);
        Ok(format!("{} readied.", capitalize(&name)))
    }
}

/// Put on carried armor or a shield.
#[derive(Debug, Clone, Copy, Default)]
pub struct WearCommand;

impl Command for WearCommand {
    fn name(&self) -> &str {
        "wear"
    }

    fn verbs(&self) -> &[&str] {
        &["wear"]
    }

    fn run(&self, ctx: &mut TurnContext<'_>, verb: &str, arg: &str) -> FictionResult<String> {
        let arg = required(verb, arg)?;
        let registry = ctx.registry();
        let artifact = carried(registry, arg)?;
        let armor = artifact
            .armor()
            .ok_or_else(|| FictionError::NotWearable(artifact.name.clone()))?;
        if registry.player().worn_armor.contains(&artifact.id) {
            return Ok(format!("You are already wearing the {}.", artifact.name));
        }
        if worn_armor(registry)
            .iter()
            .any(|a| a.armor_type == armor.armor_type)
        {
            let message = match armor.armor_type {
                ArmorType::Armor => "You are already wearing armor.",
                ArmorType::Shield => "You are already using a shield.",
            };
            return Err(FictionError::Equipment(message.to_string()));
        }
        let two_handed = registry
            .player()
            .ready_weapon
            .and_then(|id| registry.artifact(id))
            .and_then(Artifact::weapon)
            .is_some_and(|w| w.hands >= 2);
        if armor.armor_type == ArmorType::Shield && two_handed {
            return Err(FictionError::Equipment(
                "You can't use a shield with a two-handed weapon.".to_string(),
            ));
        }

        let (id, name) = (artifact.id, artifact.name.clone());
        ctx.player_mut().worn_armor.push(id);
        Ok(format!("You put on the {name}."))
    }
}

/// Take off worn armor or a shield.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveCommand;

impl Command for RemoveCommand {
    fn name(&self) -> &str {
        "remove"
    }

    fn verbs(&self) -> &[&str] {
        &["remove"]
    }

    fn run(&self, ctx: &mut TurnContext<'_>, verb: &str, arg: &str) -> FictionResult<String> {
        let arg = required(verb, arg)?;
        let artifact = carried(ctx.registry(), arg)?;
        let (id, name) = (artifact.id, artifact.name.clone());
        if !ctx.player().worn_armor.contains(&id) {
            return Err(FictionError::Equipment("You aren't wearing it!".to_string()));
        }
        ctx.player_mut().worn_armor.retain(|&worn| worn != id);
        Ok(format!("You take off the {name}."))
    }
}
