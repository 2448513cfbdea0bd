use colored::Colorize;
use eamon_core::{Gender, JsonDirStore};
use eamon_mechanics::{Dice, create_player};
use miette::IntoDiagnostic;

use super::{print_sheet, save_player};

pub fn run(store: &JsonDirStore, name: &str, gender: Gender, seed: Option<u64>) -> miette::Result<()> {
    let name = name.trim();
    if name.is_empty() {
        miette::bail!("a new adventurer needs a name");
    }
    let id = store.next_id().into_diagnostic()?;
    let mut dice = Dice::from_seed(seed);
    let player = create_player(id.0, name, gender, &mut dice).into_diagnostic()?;
    save_player(store, &player)?;

    println!("{}", "The Burly Irishman writes your name in the register.".dimmed());
    print_sheet(&player);
    println!();
    println!("Your player id is {}.", id.0.to_string().bold());
    Ok(())
}
