//! Verb resolution and the hook pipeline.

use std::collections::HashMap;

use strsim::jaro_winkler;
use tracing::{debug, warn};

use crate::adventure::PowerFn;
use crate::command::Command;
use crate::context::TurnContext;
use crate::error::{FictionError, FictionResult};
use crate::hook::{HookBinding, HookEvent, HookOutcome, HookStage};

/// Minimum similarity score for a "did you mean" suggestion (0.0-1.0).
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Split raw input into a lowercase verb and the trimmed remainder.
pub fn split_input(input: &str) -> (String, String) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb.to_lowercase(), arg.trim().to_string()),
        None => (input.to_lowercase(), String::new()),
    }
}

/// The closest alias to `verb`, if any scores above the threshold.
///
/// Ties go to the alias listed first.
pub fn suggest<'a>(verb: &str, aliases: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let verb = verb.to_lowercase();
    let mut best: Option<(&str, f64)> = None;
    for alias in aliases {
        let score = jaro_winkler(&verb, alias);
        if score >= SUGGESTION_THRESHOLD && best.is_none_or(|(_, b)| score > b) {
            best = Some((alias, score));
        }
    }
    best.map(|(alias, _)| alias)
}

/// Registered commands and hooks, and the two-phase dispatch over them.
///
/// Commands register in order; when two commands share an alias the one
/// registered last answers to it. Hooks run in registration order within
/// each stage.
pub struct CommandParser {
    commands: Vec<Box<dyn Command>>,
    /// Alias to index into `commands`.
    verbs: HashMap<String, usize>,
    /// Aliases in first-registration order.
    alias_order: Vec<String>,
    hooks: Vec<HookBinding>,
    power: Option<Box<PowerFn>>,
    max_depth: usize,
}

impl CommandParser {
    /// Create a parser with no commands.
    pub fn new(max_depth: usize) -> Self {
        Self {
            commands: Vec::new(),
            verbs: HashMap::new(),
            alias_order: Vec::new(),
            hooks: Vec::new(),
            power: None,
            max_depth,
        }
    }

    /// Register a command. Its aliases shadow any registered earlier.
    pub fn register(&mut self, command: Box<dyn Command>) {
        let index = self.commands.len();
        for verb in command.verbs() {
            let verb = verb.to_lowercase();
            if let Some(previous) = self.verbs.insert(verb.clone(), index) {
                debug!(
                    verb = verb.as_str(),
                    shadowed = self.commands[previous].name(),
                    by = command.name(),
                    "alias shadowed"
                );
            } else {
                self.alias_order.push(verb);
            }
        }
        self.commands.push(command);
    }

    /// Register a hook.
    pub fn add_hook(&mut self, hook: HookBinding) {
        debug!(stage = %hook.stage(), "hook registered");
        self.hooks.push(hook);
    }

    /// Set what a successful `power` spell does.
    pub fn set_power_effect(&mut self, effect: Box<PowerFn>) {
        self.power = Some(effect);
    }

    pub(crate) fn power_effect(&self) -> Option<&PowerFn> {
        self.power.as_deref()
    }

    /// The command answering to a verb.
    pub fn resolve(&self, verb: &str) -> FictionResult<&dyn Command> {
        self.verbs
            .get(verb)
            .map(|&i| self.commands[i].as_ref())
            .ok_or_else(|| FictionError::UnrecognizedCommand {
                verb: verb.to_string(),
                suggestion: suggest(verb, self.aliases()).map(str::to_string),
            })
    }

    /// Every alias, in the order it was first registered.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.alias_order.iter().map(String::as_str)
    }

    /// Command names with the aliases that currently reach them, in
    /// registration order. Fully shadowed commands are left out.
    pub fn command_summary(&self) -> Vec<(&str, Vec<&str>)> {
        self.commands
            .iter()
            .enumerate()
            .filter_map(|(index, command)| {
                let live: Vec<&str> = self
                    .aliases()
                    .filter(|alias| self.verbs.get(*alias) == Some(&index))
                    .collect();
                (!live.is_empty()).then_some((command.name(), live))
            })
            .collect()
    }

    /// How deeply hooks may nest secondary commands.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Resolve and run one command line: `before` hooks, the handler, then
    /// `after` and verb-stage hooks. Output accumulates on the context.
    pub(crate) fn execute(&self, ctx: &mut TurnContext<'_>, input: &str) -> FictionResult<()> {
        let (verb, arg) = split_input(input);
        let command = self.resolve(&verb)?;
        let name = command.name();
        debug!(
            verb = verb.as_str(),
            arg = arg.as_str(),
            command = name,
            depth = ctx.depth(),
            "dispatching"
        );

        let event = HookEvent {
            command: name.to_string(),
            verb: verb.clone(),
            arg: arg.clone(),
            artifact: ctx.named_artifact(&arg),
        };

        if let Some(message) = self.run_before(ctx, &event)? {
            warn!(command = name, reason = %message, "command vetoed by hook");
            return Err(FictionError::VetoedByHook(message));
        }

        let text = command.run(ctx, &verb, &arg)?;
        ctx.narrate(text);
        self.run_after(ctx, &event);
        Ok(())
    }

    /// Run the `before` hooks bound to the event's command, stopping at the
    /// first veto.
    pub(crate) fn run_before(
        &self,
        ctx: &mut TurnContext<'_>,
        event: &HookEvent,
    ) -> FictionResult<Option<String>> {
        let name = event.command.as_str();
        for hook in self.hooks_at(|stage| matches!(stage, HookStage::Before(c) if c == name)) {
            if let HookOutcome::Veto(message) = hook.call(ctx, event)? {
                return Ok(Some(message));
            }
        }
        Ok(None)
    }

    /// Run the `after` hooks, then the verb-stage hooks.
    pub(crate) fn run_after(&self, ctx: &mut TurnContext<'_>, event: &HookEvent) {
        let name = event.command.as_str();
        let after = self.hooks_at(|stage| matches!(stage, HookStage::After(c) if c == name));
        let verb_stage = self.hooks_at(|stage| matches!(stage, HookStage::Verb(c) if c == name));
        settle(ctx, after.chain(verb_stage), event);
    }

    /// Run only the `after` hooks, for one artifact of a multi-artifact
    /// command.
    pub(crate) fn run_after_item(&self, ctx: &mut TurnContext<'_>, event: &HookEvent) {
        let name = event.command.as_str();
        let after = self.hooks_at(|stage| matches!(stage, HookStage::After(c) if c == name));
        settle(ctx, after, event);
    }

    fn hooks_at<'a>(
        &'a self,
        wanted: impl Fn(&HookStage) -> bool,
    ) -> impl Iterator<Item = &'a HookBinding> {
        self.hooks.iter().filter(move |hook| wanted(hook.stage()))
    }
}

/// Call hooks once the command has happened. Neither a veto nor an error can
/// undo it, so both become text.
fn settle<'h>(
    ctx: &mut TurnContext<'_>,
    hooks: impl Iterator<Item = &'h HookBinding>,
    event: &HookEvent,
) {
    for hook in hooks {
        match hook.call(ctx, event) {
            Ok(HookOutcome::Continue) => {}
            Ok(HookOutcome::Veto(message)) => {
                warn!(stage = %hook.stage(), "veto ignored after the command ran");
                ctx.narrate(message);
            }
            Err(e) => {
                warn!(stage = %hook.stage(), error = %e, "hook failed after the command ran");
                ctx.narrate(e.to_string());
            }
        }
    }
}

impl std::fmt::Debug for CommandParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandParser")
            .field("commands", &self.commands.len())
            .field("hooks", &self.hooks)
            .field("power", &self.power.is_some())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::FnCommand;

    #[test]
    fn split_verb_and_argument() {
        assert_eq!(split_input("  GET   Magic Sword "), ("get".into(), "Magic Sword".into()));
        assert_eq!(split_input("n"), ("n".into(), String::new()));
        assert_eq!(split_input(""), (String::new(), String::new()));
        assert_eq!(split_input("say\thello there"), ("say".into(), "hello there".into()));
    }

    #[test]
    fn suggestion_picks_closest_alias() {
        let aliases = ["look", "inventory", "attack"];
        assert_eq!(suggest("lok", aliases), Some("look"));
        assert_eq!(suggest("inventroy", aliases), Some("inventory"));
        assert_eq!(suggest("xyzzy", aliases), None);
    }

    #[test]
    fn last_registered_alias_wins() {
        let mut parser = CommandParser::new(8);
        parser.register(Box::new(FnCommand::new("walk", &["go", "walk"], |_, _, _| {
            Ok("walking".into())
        })));
        parser.register(Box::new(FnCommand::new("wander", &["go"], |_, _, _| {
            Ok("wandering".into())
        })));
        assert_eq!(parser.resolve("go").map(|c| c.name()).ok(), Some("wander"));
        assert_eq!(parser.resolve("walk").map(|c| c.name()).ok(), Some("walk"));
        assert_eq!(parser.aliases().collect::<Vec<_>>(), ["go", "walk"]);

        let summary = parser.command_summary();
        assert_eq!(summary, [("walk", vec!["walk"]), ("wander", vec!["go"])]);
    }

    #[test]
    fn unknown_verb_carries_suggestion() {
        let mut parser = CommandParser::new(8);
        parser.register(Box::new(FnCommand::new("look", &["look"], |_, _, _| {
            Ok(String::new())
        })));
        match parser.resolve("lokk") {
            Err(FictionError::UnrecognizedCommand { verb, suggestion }) => {
                assert_eq!(verb, "lokk");
                assert_eq!(suggestion.as_deref(), Some("look"));
            }
            other => panic!("unexpected {:?}", other.map(|c| c.name().to_string())),
        }
    }
}
