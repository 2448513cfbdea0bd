use eamon_core::Spell;
use eamon_mechanics::Casting;
use eamon_mechanics::magic::{BLAST_DAMAGE, HEAL_AMOUNT, speed_duration};

use crate::command::Command;
use crate::context::TurnContext;
use crate::error::{FictionError, FictionResult};

/// Cast `spell`, narrating a failure or a gain in ability. Returns whether
/// the spell took effect.
fn attempt(ctx: &mut TurnContext<'_>, spell: Spell) -> FictionResult<bool> {
    match ctx.cast(spell) {
        Casting::Unknown => Err(FictionError::UnknownSpell),
        Casting::Fizzled => {
            ctx.narrate("Nothing happens.");
            Ok(false)
        }
        Casting::Overloaded => {
            ctx.narrate(format!(
                "The strain of attempting to cast {} overloads your brain and you forget it \
                 completely for the rest of this adventure.",
                spell.name().to_uppercase()
            ));
            Ok(false)
        }
        Casting::Worked { improved } => {
            if improved {
                ctx.narrate("Spell ability increased!");
            }
            Ok(true)
        }
    }
}

/// Hurl magical force at a monster.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlastCommand;

impl Command for BlastCommand {
    fn name(&self) -> &str {
        "blast"
    }

    fn verbs(&self) -> &[&str] {
        &["blast"]
    }

    fn run(&self, ctx: &mut TurnContext<'_>, _verb: &str, arg: &str) -> FictionResult<String> {
        if arg.is_empty() {
            return Err(FictionError::Refused("Blast whom?".to_string()));
        }
        let target = ctx.registry().require_monster(arg, ctx.scope())?;
        let name = ctx
            .registry()
            .monster(target)
            .map(|m| m.name.clone())
            .unwrap_or_default();
        if !attempt(ctx, Spell::Blast)? {
            return Ok(String::new());
        }

        if let Some(monster) = ctx.registry_mut().monster_mut(target) {
            monster.provoke();
        }
        let damage = ctx.dice().roll_spec(BLAST_DAMAGE);
        let result = if ctx.registry_mut().injure_monster(target, damage)? {
            format!("A direct hit! The {name} is dead!")
        } else {
            format!("A direct hit! The {name} takes {damage} damage.")
        };
        Ok(result)
    }
}

/// Close wounds: the caster's, or a monster's in the same room.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealCommand;

impl Command for HealCommand {
    fn name(&self) -> &str {
        "heal"
    }

    fn verbs(&self) -> &[&str] {
        &["heal"]
    }

    fn run(&self, ctx: &mut TurnContext<'_>, _verb: &str, arg: &str) -> FictionResult<String> {
        let target = if arg.is_empty() {
            None
        } else {
            Some(ctx.registry().require_monster(arg, ctx.scope())?)
        };
        if !attempt(ctx, Spell::Heal)? {
            return Ok(String::new());
        }

        let amount = ctx.dice().roll_spec(HEAL_AMOUNT);
        match target {
            None => {
                ctx.player_mut().heal(amount);
                Ok("Some of your wounds seem to clear up.".to_string())
            }
            Some(id) => {
                let monster = ctx
                    .registry_mut()
                    .monster_mut(id)
                    .ok_or_else(|| FictionError::Refused("Heal whom?".to_string()))?;
                monster.heal(amount);
                Ok(format!("Some of the {}'s wounds seem to clear up.", monster.name))
            }
        }
    }
}

/// Double the caster's agility for a while.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeedCommand;

impl Command for SpeedCommand {
    fn name(&self) -> &str {
        "speed"
    }

    fn verbs(&self) -> &[&str] {
        &["speed"]
    }

    fn run(&self, ctx: &mut TurnContext<'_>, _verb: &str, _arg: &str) -> FictionResult<String> {
        if !attempt(ctx, Spell::Speed)? {
            return Ok(String::new());
        }
        let turns = speed_duration(ctx.dice());
        ctx.hasten(turns);
        Ok("You can feel the new agility flowing through you!".to_string())
    }
}

/// Call on raw magic. What happens is up to the adventure.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerCommand;

impl Command for PowerCommand {
    fn name(&self) -> &str {
        "power"
    }

    fn verbs(&self) -> &[&str] {
        &["power"]
    }

    fn run(&self, ctx: &mut TurnContext<'_>, _verb: &str, _arg: &str) -> FictionResult<String> {
        if attempt(ctx, Spell::Power)? {
            let roll = ctx.dice().percent();
            // The spell is spent either way.
            if let Err(e) = ctx.power_effect(roll) {
                ctx.narrate(e.to_string());
            }
        }
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use eamon_core::{MonsterId, Player, Spell};

    use crate::commands::testing::{player, world};
    use crate::{PlainAdventure, Session, SessionConfig};

    fn wizard(ability: u32) -> Player {
        let mut p = player();
        p.hardiness = 200;
        for spell in Spell::ALL {
            p.spell_abilities_original.set(spell, ability);
        }
        p
    }

    fn session_with(p: Player, seed: u64) -> Session {
        Session::bootstrap(
            world(),
            &PlainAdventure,
            p,
            SessionConfig::default().with_seed(seed),
        )
        .unwrap()
    }

    #[test]
    fn unknown_spells_take_no_turn() {
        let mut session = session_with(wizard(0), 1);
        assert_eq!(session.submit("blast dog").text, "I see no dog here!");
        session.submit("n");
        assert_eq!(session.submit("blast dog").text, "You don't know that spell!");
        assert_eq!(session.submit("heal").text, "You don't know that spell!");
        assert_eq!(session.submit("blast").text, "Blast whom?");
        assert_eq!(session.turn(), 1);
    }

    #[test]
    fn bootstrap_restores_drained_abilities() {
        let mut p = wizard(60);
        p.spell_abilities.set(Spell::Blast, 3);
        let session = session_with(p, 1);
        assert_eq!(session.registry().player().spell_abilities.blast, 60);
    }

    #[test]
    fn casting_drains_then_recovers() {
        let mut session = session_with(wizard(80), 2);
        session.submit("heal");
        let drained = session.registry().player().spell_abilities.heal;
        // Halved by the cast, or wiped by an overload; one turn of rest follows.
        assert!(drained == 41 || drained == 1);
        session.submit("look");
        assert_eq!(session.registry().player().spell_abilities.heal, drained + 1);
    }

    #[test]
    fn blast_wounds_and_provokes() {
        let mut hits = 0;
        for seed in 0..20 {
            let mut session = session_with(wizard(100), seed);
            session.submit("n");
            let text = session.submit("blast dog").text;
            if text.contains("A direct hit!") {
                hits += 1;
                let dog = session.registry().monster(MonsterId(1)).unwrap();
                assert!(dog.damage > 0);
            }
        }
        assert!(hits >= 15);
    }

    #[test]
    fn heal_closes_wounds() {
        let mut p = wizard(100);
        p.injure(150);
        let mut session = session_with(p, 3);
        let text = session.submit("heal").text;
        if text.ends_with("Some of your wounds seem to clear up.") {
            let health = session.registry().player().health();
            assert!((52..=62).contains(&health));
        }
    }

    #[test]
    fn speed_wears_off() {
        let mut session = session_with(wizard(100), 4);
        let text = session.submit("speed").text;
        if !text.ends_with("You can feel the new agility flowing through you!") {
            return;
        }
        let mut expired = false;
        for _ in 0..20 {
            if session.submit("look").text.ends_with("Your speed spell just expired!") {
                expired = true;
                break;
            }
        }
        assert!(expired);
    }
}
