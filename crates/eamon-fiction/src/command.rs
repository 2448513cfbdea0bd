//! The command binding trait.

use std::fmt;

use crate::context::TurnContext;
use crate::error::FictionResult;

/// A verb handler.
///
/// `name` identifies the command to hooks (`beforeGet` binds to the command
/// named `get`); `verbs` are the aliases the parser matches. The handler
/// returns the text shown to the player, or an error whose message is shown
/// instead. A handler must check everything it needs before it mutates.
pub trait Command {
    /// Machine name, matched by hook stages.
    fn name(&self) -> &str;

    /// Aliases that invoke this command.
    fn verbs(&self) -> &[&str];

    /// Run the command.
    fn run(&self, ctx: &mut TurnContext<'_>, verb: &str, arg: &str) -> FictionResult<String>;
}

/// Signature of a closure-backed command.
pub type CommandFn = dyn Fn(&mut TurnContext<'_>, &str, &str) -> FictionResult<String>;

/// A command built from a closure, for adventure-specific verbs.
pub struct FnCommand {
    name: &'static str,
    verbs: Vec<&'static str>,
    run: Box<CommandFn>,
}

impl FnCommand {
    /// Wrap a closure taking `(context, verb, arg)`.
    pub fn new<F>(name: &'static str, verbs: &[&'static str], run: F) -> Self
    where
        F: Fn(&mut TurnContext<'_>, &str, &str) -> FictionResult<String> + 'static,
    {
        Self {
            name,
            verbs: verbs.to_vec(),
            run: Box::new(run),
        }
    }
}

impl Command for FnCommand {
    fn name(&self) -> &str {
        self.name
    }

    fn verbs(&self) -> &[&str] {
        &self.verbs
    }

    fn run(&self, ctx: &mut TurnContext<'_>, verb: &str, arg: &str) -> FictionResult<String> {
        (self.run)(ctx, verb, arg)
    }
}

impl fmt::Debug for FnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCommand")
            .field("name", &self.name)
            .field("verbs", &self.verbs)
            .finish_non_exhaustive()
    }
}
