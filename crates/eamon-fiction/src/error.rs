//! Error types for the command pipeline.

use eamon_core::CoreError;
use eamon_mechanics::MechError;
use thiserror::Error;

/// Result type for fiction operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Errors that can occur while dispatching a command.
///
/// Everything except a failed [`Session::bootstrap`](crate::Session::bootstrap)
/// degrades to result text: the message is what the player reads.
#[derive(Debug, Error)]
pub enum FictionError {
    /// No registered command answers to the verb.
    #[error("I don't know the command \"{verb}\"!{}", did_you_mean(.suggestion))]
    UnrecognizedCommand {
        /// The verb as typed.
        verb: String,
        /// The closest known alias, if any is close enough.
        suggestion: Option<String>,
    },

    /// A `before` hook stopped the command.
    #[error("{0}")]
    VetoedByHook(String),

    /// The command needs an argument.
    #[error("{0} what?")]
    MissingArgument(String),

    /// The player does not carry the named artifact.
    #[error("You aren't carrying a {0}!")]
    NotCarrying(String),

    /// The artifact can't be readied.
    #[error("The {0} is not a weapon!")]
    NotAWeapon(String),

    /// The artifact can't be worn.
    #[error("You can't wear the {0}!")]
    NotWearable(String),

    /// Readying or wearing conflicts with what the player already uses.
    #[error("{0}")]
    Equipment(String),

    /// The player has no ability in the spell.
    #[error("You don't know that spell!")]
    UnknownSpell,

    /// The command can't be carried out as things stand.
    #[error("{0}")]
    Refused(String),

    /// The player died; the session accepts no more commands.
    #[error("You are dead.")]
    PlayerDead,

    /// A hook kept re-dispatching commands.
    #[error("Too many nested commands (limit {0}).")]
    DispatchTooDeep(usize),

    /// The adventure's content could not be set up.
    #[error("invalid adventure: {0}")]
    InvalidAdventure(String),

    /// The transcript could not be serialized.
    #[error("cannot export history: {0}")]
    Json(#[from] serde_json::Error),

    /// Registry error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Rules error.
    #[error(transparent)]
    Mech(#[from] MechError),
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" Did you mean \"{s}\"?"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_with_and_without_suggestion() {
        let plain = FictionError::UnrecognizedCommand {
            verb: "xyzzy".into(),
            suggestion: None,
        };
        assert_eq!(plain.to_string(), "I don't know the command \"xyzzy\"!");

        let close = FictionError::UnrecognizedCommand {
            verb: "lok".into(),
            suggestion: Some("look".into()),
        };
        assert_eq!(
            close.to_string(),
            "I don't know the command \"lok\"! Did you mean \"look\"?"
        );
    }

    #[test]
    fn serde_errors_keep_their_layer() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: FictionError = source.into();
        assert!(matches!(err, FictionError::Json(_)));
        assert!(err.to_string().starts_with("cannot export history: "));
    }

    #[test]
    fn core_errors_read_as_player_text() {
        let err: FictionError = CoreError::NotFound("lamp".into()).into();
        assert_eq!(err.to_string(), "I see no lamp here!");
    }
}
