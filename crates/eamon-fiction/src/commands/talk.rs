use super::required;
use crate::command::Command;
use crate::context::TurnContext;
use crate::error::FictionResult;

/// Speak aloud. Adventures listen for passwords with a `say` hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct SayCommand;

impl Command for SayCommand {
    fn name(&self) -> &str {
        "say"
    }

    fn verbs(&self) -> &[&str] {
        &["say"]
    }

    fn run(&self, _ctx: &mut TurnContext<'_>, verb: &str, arg: &str) -> FictionResult<String> {
        let words = required(verb, arg)?;
        Ok(format!("Ok... \"{words}\""))
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::testing::session;

    #[test]
    fn say_echoes() {
        let mut session = session();
        assert_eq!(session.submit("say Hello there").text, "Ok... \"Hello there\"");
        assert_eq!(session.submit("say").text, "Say what?");
    }
}
