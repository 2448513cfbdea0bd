//! Interceptors that run around a command.

use std::fmt;

use eamon_core::ArtifactId;

use crate::context::TurnContext;
use crate::error::{FictionError, FictionResult};

/// When a hook runs, relative to the command it is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HookStage {
    /// Before the handler. May veto.
    Before(String),
    /// After a successful handler.
    After(String),
    /// After the `after` hooks, for verb-style events such as `say`.
    Verb(String),
}

impl HookStage {
    /// Parse a stage name: `beforeGet`, `afterGet`, or a bare command name
    /// such as `say`. Snake case (`before_get`) is accepted too.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if let Some(rest) = split_prefix(s, "before") {
            return Some(Self::Before(rest));
        }
        if let Some(rest) = split_prefix(s, "after") {
            return Some(Self::After(rest));
        }
        Some(Self::Verb(s.to_lowercase()))
    }

    /// The command name this stage is bound to.
    pub fn command(&self) -> &str {
        match self {
            Self::Before(c) | Self::After(c) | Self::Verb(c) => c,
        }
    }
}

fn split_prefix(s: &str, prefix: &str) -> Option<String> {
    let rest = s.strip_prefix(prefix)?;
    let rest = rest.strip_prefix('_').unwrap_or(rest);
    let first = rest.chars().next()?;
    if rest.len() < s.len() - prefix.len() || first.is_uppercase() {
        Some(rest.to_lowercase())
    } else {
        None
    }
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn camel(name: &str) -> String {
            let mut chars = name.chars();
            chars
                .next()
                .map(|c| c.to_uppercase().chain(chars).collect())
                .unwrap_or_default()
        }
        match self {
            Self::Before(c) => write!(f, "before{}", camel(c)),
            Self::After(c) => write!(f, "after{}", camel(c)),
            Self::Verb(c) => write!(f, "{c}"),
        }
    }
}

/// What a hook sees about the command in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookEvent {
    /// Name of the matched command.
    pub command: String,
    /// The verb as typed (lowercased).
    pub verb: String,
    /// Everything after the verb.
    pub arg: String,
    /// The visible artifact the argument names, if any.
    pub artifact: Option<ArtifactId>,
}

/// A hook's verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// Carry on.
    Continue,
    /// Stop the command with this message. Only honoured for `before` hooks.
    Veto(String),
}

/// Signature of a hook handler.
pub type HookFn = dyn Fn(&mut TurnContext<'_>, &HookEvent) -> FictionResult<HookOutcome>;

/// A hook bound to a stage.
pub struct HookBinding {
    stage: HookStage,
    handler: Box<HookFn>,
}

impl HookBinding {
    /// Bind a handler to a stage.
    pub fn new<F>(stage: HookStage, handler: F) -> Self
    where
        F: Fn(&mut TurnContext<'_>, &HookEvent) -> FictionResult<HookOutcome> + 'static,
    {
        Self {
            stage,
            handler: Box::new(handler),
        }
    }

    /// Bind a handler to a stage given by name, e.g. `"beforeGet"`.
    pub fn named<F>(stage: &str, handler: F) -> FictionResult<Self>
    where
        F: Fn(&mut TurnContext<'_>, &HookEvent) -> FictionResult<HookOutcome> + 'static,
    {
        let stage = HookStage::parse(stage)
            .ok_or_else(|| FictionError::InvalidAdventure(format!("bad hook stage {stage:?}")))?;
        Ok(Self::new(stage, handler))
    }

    /// The stage this hook runs at.
    pub fn stage(&self) -> &HookStage {
        &self.stage
    }

    pub(crate) fn call(
        &self,
        ctx: &mut TurnContext<'_>,
        event: &HookEvent,
    ) -> FictionResult<HookOutcome> {
        (self.handler)(ctx, event)
    }
}

impl fmt::Debug for HookBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookBinding")
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stages() {
        assert_eq!(
            HookStage::parse("beforeGet"),
            Some(HookStage::Before("get".into()))
        );
        assert_eq!(
            HookStage::parse("afterGet"),
            Some(HookStage::After("get".into()))
        );
        assert_eq!(
            HookStage::parse("before_drop"),
            Some(HookStage::Before("drop".into()))
        );
        assert_eq!(HookStage::parse("say"), Some(HookStage::Verb("say".into())));
        assert_eq!(HookStage::parse(""), None);
    }

    #[test]
    fn lowercase_prefix_is_a_verb() {
        // "beforehand" is not "before" + "hand".
        assert_eq!(
            HookStage::parse("beforehand"),
            Some(HookStage::Verb("beforehand".into()))
        );
        assert_eq!(HookStage::parse("after"), Some(HookStage::Verb("after".into())));
    }

    #[test]
    fn display_round_trips() {
        for name in ["beforeGet", "afterAttack", "say"] {
            let stage = HookStage::parse(name).unwrap();
            assert_eq!(stage.to_string(), name);
        }
        assert_eq!(HookStage::Before("get".into()).command(), "get");
    }

    #[test]
    fn named_rejects_empty_stage() {
        let result = HookBinding::named("  ", |_, _| Ok(HookOutcome::Continue));
        assert!(matches!(result, Err(FictionError::InvalidAdventure(_))));
    }
}
