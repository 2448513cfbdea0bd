//! Game state and the per-turn handle given to commands and hooks.

use eamon_core::{ArtifactId, CoreError, Player, Registry, RoomId, Scope, Spell};
use eamon_mechanics::{Casting, Dice};
use tracing::debug;

use crate::error::{FictionError, FictionResult};
use crate::history::History;
use crate::hook::HookEvent;
use crate::parser::CommandParser;

/// Everything a session mutates from turn to turn.
#[derive(Debug)]
pub(crate) struct GameState {
    pub(crate) registry: Registry,
    pub(crate) dice: Dice,
    pub(crate) current_room: RoomId,
    pub(crate) turn: u64,
    /// Turns left on the speed spell.
    pub(crate) speed_turns: u32,
}

/// What a command or hook can see and change while a turn resolves.
///
/// Text passed to [`TurnContext::narrate`], the handler's return value, and
/// the output of any command started with [`TurnContext::dispatch`] all join
/// the same turn result.
pub struct TurnContext<'a> {
    state: &'a mut GameState,
    parser: &'a CommandParser,
    history: &'a History,
    output: Vec<String>,
    depth: usize,
}

impl<'a> TurnContext<'a> {
    pub(crate) fn new(
        state: &'a mut GameState,
        parser: &'a CommandParser,
        history: &'a History,
    ) -> Self {
        Self {
            state,
            parser,
            history,
            output: Vec::new(),
            depth: 0,
        }
    }

    /// The entity registry.
    pub fn registry(&self) -> &Registry {
        &self.state.registry
    }

    /// Mutable access to the entity registry.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.state.registry
    }

    /// The player.
    pub fn player(&self) -> &Player {
        self.state.registry.player()
    }

    /// Mutable access to the player.
    pub fn player_mut(&mut self) -> &mut Player {
        self.state.registry.player_mut()
    }

    /// The session's dice.
    pub fn dice(&mut self) -> &mut Dice {
        &mut self.state.dice
    }

    /// The room the player is in.
    pub fn current_room(&self) -> RoomId {
        self.state.current_room
    }

    /// Lookup scope for what the player can see.
    pub fn scope(&self) -> Scope {
        Scope::Visible(self.state.current_room)
    }

    /// Turns completed so far.
    pub fn turn(&self) -> u64 {
        self.state.turn
    }

    /// Turns left before the speed spell wears off. Zero when it isn't
    /// active.
    pub fn speed_turns(&self) -> u32 {
        self.state.speed_turns
    }

    /// Extend the speed spell.
    pub fn hasten(&mut self, turns: u32) {
        self.state.speed_turns = self.state.speed_turns.saturating_add(turns);
    }

    /// Attempt a spell with the session's dice, draining the player's
    /// current ability.
    pub fn cast(&mut self, spell: Spell) -> Casting {
        let state = &mut *self.state;
        eamon_mechanics::cast(state.registry.player_mut(), spell, &mut state.dice)
    }

    /// Run the adventure's `power` effect for a successful casting.
    pub(crate) fn power_effect(&mut self, roll: u32) -> FictionResult<()> {
        let parser = self.parser;
        match parser.power_effect() {
            Some(effect) => effect(self, roll),
            None => Ok(()),
        }
    }

    /// Earlier turns. The turn in progress is not there yet.
    pub fn history(&self) -> &History {
        self.history
    }

    /// Move the player to a room. Returns `true` on the first visit.
    pub fn enter_room(&mut self, room: RoomId) -> FictionResult<bool> {
        let target = self
            .state
            .registry
            .room_mut(room)
            .ok_or_else(|| CoreError::NotFound(room.to_string()))?;
        target.times_visited += 1;
        let first = target.times_visited == 1;
        self.state.current_room = room;
        debug!(%room, first, "player entered room");
        Ok(first)
    }

    /// Add a line to this turn's result. Empty text is dropped.
    pub fn narrate(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.output.push(text);
        }
    }

    /// Run another command as part of this turn.
    ///
    /// The command goes through the same hooks and its output joins this
    /// turn's result; it gets no history entry of its own.
    pub fn dispatch(&mut self, input: &str) -> FictionResult<()> {
        let limit = self.parser.max_depth();
        if self.depth >= limit {
            return Err(FictionError::DispatchTooDeep(limit));
        }
        self.depth += 1;
        let parser = self.parser;
        let result = parser.execute(self, input);
        self.depth -= 1;
        result
    }

    /// The command names with their live aliases.
    pub fn command_summary(&self) -> Vec<(&str, Vec<&str>)> {
        self.parser.command_summary()
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// The visible artifact named by a command argument.
    pub(crate) fn named_artifact(&self, arg: &str) -> Option<ArtifactId> {
        if arg.is_empty() || arg.eq_ignore_ascii_case("all") {
            return None;
        }
        self.state
            .registry
            .find_artifact(arg, self.scope())
            .map(|a| a.id)
    }

    /// Run the `before` hooks for one artifact of an `all` command. Returns
    /// the text to show instead when the artifact must be skipped.
    pub(crate) fn item_refused(
        &mut self,
        command: &str,
        verb: &str,
        id: ArtifactId,
    ) -> Option<String> {
        let event = self.item_event(command, verb, id);
        let parser = self.parser;
        match parser.run_before(self, &event) {
            Ok(veto) => veto,
            Err(e) => Some(e.to_string()),
        }
    }

    /// Run the `after` hooks for one artifact of an `all` command.
    pub(crate) fn item_done(&mut self, command: &str, verb: &str, id: ArtifactId) {
        let event = self.item_event(command, verb, id);
        let parser = self.parser;
        parser.run_after_item(self, &event);
    }

    fn item_event(&self, command: &str, verb: &str, id: ArtifactId) -> HookEvent {
        HookEvent {
            command: command.to_string(),
            verb: verb.to_string(),
            arg: self
                .state
                .registry
                .artifact(id)
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            artifact: Some(id),
        }
    }

    pub(crate) fn into_output(self) -> Vec<String> {
        self.output
    }
}
