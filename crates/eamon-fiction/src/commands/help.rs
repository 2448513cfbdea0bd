use crate::command::Command;
use crate::context::TurnContext;
use crate::error::FictionResult;

/// List the commands and their aliases.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn verbs(&self) -> &[&str] {
        &["help"]
    }

    fn run(&self, ctx: &mut TurnContext<'_>, _verb: &str, _arg: &str) -> FictionResult<String> {
        let mut output = String::from("Commands:");
        for (name, aliases) in ctx.command_summary() {
            output.push_str(&format!("\n  {name}: {}", aliases.join(", ")));
        }
        Ok(output)
    }
}
