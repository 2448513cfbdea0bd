//! A running adventure.

use std::fmt;

use eamon_core::{AdventureData, Player, Registry, RoomId};
use eamon_mechanics::{Dice, DiceSpec, MechError, magic};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::adventure::Adventure;
use crate::commands::{core_commands, describe_room, monsters_act, roll_reactions};
use crate::config::SessionConfig;
use crate::context::{GameState, TurnContext};
use crate::error::{FictionError, FictionResult};
use crate::history::History;
use crate::parser::CommandParser;

/// Unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// What one submitted command produced.
#[derive(Debug, Clone)]
pub struct TurnResult {
    /// Text to show the player.
    pub text: String,
    /// The player after the turn, inventory included.
    pub player: Player,
}

/// One player's run through an adventure.
///
/// Commands resolve one at a time, hooks and secondary commands included,
/// before the next is accepted. A seeded session given the same inputs
/// produces the same output.
pub struct Session {
    id: SessionId,
    state: GameState,
    parser: CommandParser,
    history: History,
}

impl Session {
    /// Load an adventure, register the built-in and adventure commands, and
    /// place the player in the start room.
    ///
    /// Fails on invalid adventure data or on any weapon with impossible dice.
    pub fn bootstrap(
        data: AdventureData,
        adventure: &dyn Adventure,
        mut player: Player,
        config: SessionConfig,
    ) -> FictionResult<Self> {
        let start = data.meta.start_room;
        // Spells drained on an earlier adventure start fresh.
        player.spell_abilities = player.spell_abilities_original;
        let mut registry = Registry::load(data, player)?;
        check_dice(&registry)?;
        if let Some(room) = registry.room_mut(start) {
            room.times_visited += 1;
        }

        let mut parser = CommandParser::new(config.max_dispatch_depth);
        for command in core_commands() {
            parser.register(command);
        }
        for command in adventure.commands() {
            parser.register(command);
        }
        for hook in adventure.hooks() {
            parser.add_hook(hook);
        }
        if let Some(effect) = adventure.power() {
            parser.set_power_effect(effect);
        }

        let id = SessionId::new();
        info!(
            session = %id,
            adventure = registry.meta().name.as_str(),
            seed = ?config.seed,
            "session started"
        );
        Ok(Self {
            id,
            state: GameState {
                registry,
                dice: Dice::from_seed(config.seed),
                current_room: start,
                turn: 0,
                speed_turns: 0,
            },
            parser,
            history: History::new(),
        })
    }

    /// Session id.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The adventure's title and description, then the start room.
    pub fn opening(&mut self) -> FictionResult<String> {
        let meta = self.state.registry.meta();
        let mut text = meta.name.clone();
        if !meta.description.is_empty() {
            text.push_str("\n\n");
            text.push_str(&meta.description);
        }
        let room = describe_room(&mut self.state.registry, self.state.current_room, true)?;
        text.push_str("\n\n");
        text.push_str(&room);
        Ok(text)
    }

    /// Run one line of input and record it.
    pub fn submit(&mut self, raw: &str) -> TurnResult {
        let input = raw.trim();
        if input.is_empty() {
            return TurnResult {
                text: String::new(),
                player: self.player_snapshot(),
            };
        }

        let text = if self.state.registry.player().is_dead() {
            FictionError::PlayerDead.to_string()
        } else {
            self.run_turn(input)
        };
        self.history.push(input, text.clone());
        TurnResult {
            text,
            player: self.player_snapshot(),
        }
    }

    fn run_turn(&mut self, input: &str) -> String {
        let mut ctx = TurnContext::new(&mut self.state, &self.parser, &self.history);
        let outcome = self.parser.execute(&mut ctx, input);
        let mut lines = ctx.into_output();
        match outcome {
            Ok(()) => match tick(&mut self.state) {
                Ok(more) => lines.extend(more),
                Err(e) => {
                    warn!(error = %e, "turn upkeep failed");
                    lines.push(e.to_string());
                }
            },
            Err(e) => {
                debug!(input, error = %e, "command rejected");
                lines.push(e.to_string());
            }
        }
        lines.join("\n")
    }

    /// The transcript so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Step back through earlier commands.
    pub fn recall_older(&mut self) -> &str {
        self.history.older()
    }

    /// Step forward through earlier commands.
    pub fn recall_newer(&mut self) -> &str {
        self.history.newer()
    }

    /// The entity registry.
    pub fn registry(&self) -> &Registry {
        &self.state.registry
    }

    /// The room the player is in.
    pub fn current_room(&self) -> RoomId {
        self.state.current_room
    }

    /// Turns completed so far.
    pub fn turn(&self) -> u64 {
        self.state.turn
    }

    /// Whether the player has died.
    pub fn is_over(&self) -> bool {
        self.state.registry.player().is_dead()
    }

    /// The player with carried artifacts, ready to save.
    pub fn player_snapshot(&self) -> Player {
        self.state.registry.player_snapshot()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("current_room", &self.state.current_room)
            .field("turn", &self.state.turn)
            .field("parser", &self.parser)
            .finish_non_exhaustive()
    }
}

/// End-of-turn upkeep: reactions for newcomers, hostile attacks, then spell
/// recovery.
fn tick(state: &mut GameState) -> FictionResult<Vec<String>> {
    state.turn += 1;
    roll_reactions(state);
    let mut lines = monsters_act(state)?;
    magic::recharge(state.registry.player_mut());
    if state.speed_turns > 0 {
        state.speed_turns -= 1;
        if state.speed_turns == 0 {
            lines.push("Your speed spell just expired!".to_string());
        }
    }
    if state.registry.player().is_dead() {
        info!(turn = state.turn, "player died");
        lines.push(FictionError::PlayerDead.to_string());
    }
    Ok(lines)
}

fn check_dice(registry: &Registry) -> FictionResult<()> {
    let invalid = |name: &str, count: u32, sides: u32| {
        warn!(name, count, sides, "weapon dice rejected");
        MechError::InvalidDiceSpec(format!("{name} has {count}d{sides}"))
    };
    for monster in registry.monsters() {
        DiceSpec::new(monster.weapon_dice, monster.weapon_sides)
            .map_err(|_| invalid(&monster.name, monster.weapon_dice, monster.weapon_sides))?;
    }
    for artifact in registry.artifacts() {
        if let Some(weapon) = artifact.weapon() {
            DiceSpec::new(weapon.dice, weapon.sides)
                .map_err(|_| invalid(&artifact.name, weapon.dice, weapon.sides))?;
        }
    }
    Ok(())
}
