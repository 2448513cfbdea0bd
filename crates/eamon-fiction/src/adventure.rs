//! Adventure-specific content: extra commands and hooks.

use crate::command::Command;
use crate::context::TurnContext;
use crate::error::FictionResult;
use crate::hook::HookBinding;

/// What a successful `power` spell does, given a 1d100 roll.
pub type PowerFn = dyn Fn(&mut TurnContext<'_>, u32) -> FictionResult<()>;

/// Scripted content an adventure adds on top of the built-in commands.
///
/// Commands returned here register after the core set, so an alias they
/// share with a core command reaches the adventure's version. Hooks run in
/// the order returned.
pub trait Adventure {
    /// Extra commands.
    fn commands(&self) -> Vec<Box<dyn Command>> {
        Vec::new()
    }

    /// Hooks around commands.
    fn hooks(&self) -> Vec<HookBinding> {
        Vec::new()
    }

    /// The effect of a successful `power` spell. Without one the spell
    /// does nothing the player can see.
    fn power(&self) -> Option<Box<PowerFn>> {
        None
    }
}

/// An adventure with no scripting of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainAdventure;

impl Adventure for PlainAdventure {}
